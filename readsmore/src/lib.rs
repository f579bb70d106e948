//! Truncate long blocks of content to a word or character limit and let the
//! reader expand and collapse them again.
//!
//! A [`TruncationController`] drives any [`Dom`]; [`Page`] is the in-memory
//! document shipped with the crate, and [`Terminal`] draws one.

pub mod animation;
pub mod controller;
pub mod element;
pub mod error;
pub mod layout;
pub mod options;
pub mod terminal;
pub mod text;
pub mod transitions;
pub mod types;

pub use animation::{Completion, HeightAnimator};
pub use controller::{ElementRecord, Toggle, TruncationController};
pub use element::{Dom, Node, NodeId, NodeKind, Page};
pub use error::{Error, Result};
pub use layout::{hit_test, layout_page, Row, Segment};
pub use options::{Options, Preset};
pub use terminal::{Input, Terminal};
pub use text::Unit;
pub use transitions::{Easing, TransitionConfig};
pub use types::*;

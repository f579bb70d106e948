//! Controller configuration.

use std::time::Duration;

use serde::{Deserialize, Deserializer};

use crate::error::Result;
use crate::text::DEFAULT_MARKER;
use crate::transitions::{Easing, TransitionConfig};

/// Data attribute overriding the word limit of a single element.
pub const WORDS_ATTR: &str = "read-smore-words";
/// Data attribute overriding the limit of a single element, in characters.
pub const CHARS_ATTR: &str = "read-smore-chars";
/// Data attribute written on elements whose toggle sits inline.
pub const INLINE_ATTR: &str = "read-smore-inline";

/// Class added to a managed element while it shows its full content.
pub const EXPANDED_CLASS: &str = "is-expanded";

/// Built-in option sets for the two flavours of the widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Preset {
    /// Toggle after the block, no animation.
    #[default]
    Classic,
    /// Animated height with scrollable overflow, toggle after the block.
    Animated,
}

/// Options for a [`TruncationController`](crate::TruncationController).
///
/// Immutable once handed to a controller. Keys deserialize from the camelCase
/// names used by the browser widget, e.g. `{"wordsCount": 30, "isInline": true}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Options {
    /// Prefix for generated class names and toggle ids.
    pub block_class_name: String,
    /// Default word limit.
    pub words_count: usize,
    /// Accepted for compatibility; character mode is only entered through
    /// the per-element attribute.
    pub chars_count: usize,
    pub more_text: String,
    pub less_text: String,
    /// Marker appended to truncated content.
    pub ellipse: String,
    /// Place the toggle inside the element instead of after it.
    pub is_inline: bool,
    pub animate: bool,
    #[serde(deserialize_with = "duration_from_millis")]
    pub animation_duration: Duration,
    /// Keep overflow scrollable (`auto`) around animations instead of
    /// resetting it.
    pub animation_overflow: bool,
    pub easing: Easing,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            block_class_name: "read-smore".to_string(),
            words_count: 70,
            chars_count: 150,
            more_text: "Read More".to_string(),
            less_text: "Read Less".to_string(),
            ellipse: DEFAULT_MARKER.to_string(),
            is_inline: false,
            animate: false,
            animation_duration: Duration::from_millis(400),
            animation_overflow: false,
            easing: Easing::default(),
        }
    }
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn preset(preset: Preset) -> Self {
        match preset {
            Preset::Classic => Self::default(),
            Preset::Animated => Self::default().animate(true).animation_overflow(true),
        }
    }

    /// Parse a JSON options object, filling missing keys with defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn block_class_name(mut self, name: impl Into<String>) -> Self {
        self.block_class_name = name.into();
        self
    }

    pub fn words_count(mut self, count: usize) -> Self {
        self.words_count = count;
        self
    }

    pub fn chars_count(mut self, count: usize) -> Self {
        self.chars_count = count;
        self
    }

    pub fn more_text(mut self, text: impl Into<String>) -> Self {
        self.more_text = text.into();
        self
    }

    pub fn less_text(mut self, text: impl Into<String>) -> Self {
        self.less_text = text.into();
        self
    }

    pub fn ellipse(mut self, marker: impl Into<String>) -> Self {
        self.ellipse = marker.into();
        self
    }

    pub fn inline(mut self, inline: bool) -> Self {
        self.is_inline = inline;
        self
    }

    pub fn animate(mut self, animate: bool) -> Self {
        self.animate = animate;
        self
    }

    pub fn animation_duration(mut self, duration: Duration) -> Self {
        self.animation_duration = duration;
        self
    }

    pub fn animation_overflow(mut self, overflow: bool) -> Self {
        self.animation_overflow = overflow;
        self
    }

    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn transition(&self) -> TransitionConfig {
        TransitionConfig::new(self.animation_duration, self.easing)
    }

    /// Id of the toggle link for the element at `index`.
    pub fn toggle_id(&self, index: usize) -> String {
        format!("{}_{}", self.block_class_name, index)
    }

    pub(crate) fn wrap_class(&self) -> String {
        format!("{}__link-wrap read-smore__link-wrap", self.block_class_name)
    }

    pub(crate) fn link_class(&self) -> String {
        format!("{}__link read-smore__link", self.block_class_name)
    }

    pub(crate) fn label(&self, expanded: bool) -> &str {
        if expanded {
            &self.less_text
        } else {
            &self.more_text
        }
    }
}

fn duration_from_millis<'de, D>(deserializer: D) -> std::result::Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    u64::deserialize(deserializer).map(Duration::from_millis)
}

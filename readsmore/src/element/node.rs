use std::collections::HashMap;

use crate::types::{Overflow, Size};

/// Handle to a node inside a [`Dom`](super::Dom).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NodeKind {
    /// Content-bearing element.
    #[default]
    Block,
    /// Wrapper span around a toggle link.
    ToggleWrap,
    /// The clickable toggle link itself.
    ToggleLink,
}

#[derive(Debug, Clone, Default)]
pub struct Node {
    // Identity
    pub id: Option<String>,
    pub kind: NodeKind,
    pub classes: Vec<String>,

    // Content
    pub html: String,
    pub children: Vec<NodeId>,
    pub(crate) parent: Option<NodeId>,
    pub(crate) attached: bool,

    // Layout
    pub height: Size,
    pub overflow: Overflow,
    /// Occupies layout but is not drawn (opacity 0).
    pub hidden: bool,

    // Toggle state, only meaningful on links
    pub clicked: bool,

    // Custom data attributes, keyed without the `data-` prefix
    pub data: HashMap<String, String>,
}

impl Node {
    pub fn block(html: impl Into<String>) -> Self {
        Self {
            html: html.into(),
            ..Default::default()
        }
    }

    pub fn toggle_wrap(class: impl Into<String>) -> Self {
        Self {
            kind: NodeKind::ToggleWrap,
            classes: split_classes(&class.into()),
            ..Default::default()
        }
    }

    pub fn toggle_link(
        id: impl Into<String>,
        class: impl Into<String>,
        label: impl Into<String>,
    ) -> Self {
        Self {
            id: Some(id.into()),
            kind: NodeKind::ToggleLink,
            classes: split_classes(&class.into()),
            html: label.into(),
            ..Default::default()
        }
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.classes.extend(split_classes(&class.into()));
        self
    }

    pub fn data(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    pub fn get_data(&self, key: &str) -> Option<&String> {
        self.data.get(key)
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }
}

fn split_classes(s: &str) -> Vec<String> {
    s.split_whitespace().map(str::to_string).collect()
}

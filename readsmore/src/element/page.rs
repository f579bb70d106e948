use super::{Dom, Node, NodeId};
use crate::layout;
use crate::text::strip_markup;
use crate::types::{Overflow, Size};

/// In-memory document laid out at a fixed column width.
///
/// Top-level nodes stack vertically in insertion order; everything inside a
/// node flows inline after its own text.
#[derive(Debug, Clone)]
pub struct Page {
    nodes: Vec<Node>,
    roots: Vec<NodeId>,
    width: u16,
}

impl Page {
    pub fn new(width: u16) -> Self {
        Self {
            nodes: Vec::new(),
            roots: Vec::new(),
            width: width.max(1),
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn set_width(&mut self, width: u16) {
        self.width = width.max(1);
    }

    /// Append a content block to the end of the page.
    pub fn block(&mut self, html: impl Into<String>) -> NodeId {
        self.add(Node::block(html))
    }

    /// Append an arbitrary node to the end of the page.
    pub fn add(&mut self, node: Node) -> NodeId {
        let id = self.create_node(node);
        self.roots.push(id);
        self.set_attached(id, true);
        id
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    pub fn is_attached(&self, id: NodeId) -> bool {
        self.nodes[id.0].attached
    }

    /// Attached nodes carrying `class`, in document order.
    pub fn select_class(&self, class: &str) -> Vec<NodeId> {
        self.walk()
            .into_iter()
            .filter(|id| self.nodes[id.0].has_class(class))
            .collect()
    }

    /// Visible text of a node and everything inside it.
    pub fn text_of(&self, id: NodeId) -> String {
        let node = &self.nodes[id.0];
        let mut parts = vec![strip_markup(&node.html)];
        for child in &node.children {
            parts.push(self.text_of(*child));
        }
        parts
            .iter()
            .flat_map(|p| p.split_whitespace())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Every attached node, depth first in document order.
    pub fn walk(&self) -> Vec<NodeId> {
        let mut out = Vec::new();
        for root in &self.roots {
            self.walk_into(*root, &mut out);
        }
        out
    }

    fn walk_into(&self, id: NodeId, out: &mut Vec<NodeId>) {
        out.push(id);
        for child in &self.nodes[id.0].children {
            self.walk_into(*child, out);
        }
    }

    fn set_attached(&mut self, id: NodeId, attached: bool) {
        self.nodes[id.0].attached = attached;
        let children = self.nodes[id.0].children.clone();
        for child in children {
            self.set_attached(child, attached);
        }
    }

    fn detach(&mut self, id: NodeId) {
        match self.nodes[id.0].parent.take() {
            Some(parent) => self.nodes[parent.0].children.retain(|c| *c != id),
            None => self.roots.retain(|r| *r != id),
        }
        self.set_attached(id, false);
    }
}

impl Dom for Page {
    fn html(&self, node: NodeId) -> String {
        self.nodes[node.0].html.clone()
    }

    fn set_html(&mut self, node: NodeId, html: &str) {
        let children = std::mem::take(&mut self.nodes[node.0].children);
        for child in children {
            self.nodes[child.0].parent = None;
            self.set_attached(child, false);
        }
        self.nodes[node.0].html = html.to_string();
    }

    fn data(&self, node: NodeId, key: &str) -> Option<String> {
        self.nodes[node.0].get_data(key).cloned()
    }

    fn set_data(&mut self, node: NodeId, key: &str, value: &str) {
        self.nodes[node.0]
            .data
            .insert(key.to_string(), value.to_string());
    }

    fn toggle_class(&mut self, node: NodeId, class: &str) -> bool {
        let classes = &mut self.nodes[node.0].classes;
        if let Some(pos) = classes.iter().position(|c| c == class) {
            classes.remove(pos);
            false
        } else {
            classes.push(class.to_string());
            true
        }
    }

    fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.nodes[node.0].has_class(class)
    }

    fn create_node(&mut self, mut node: Node) -> NodeId {
        node.parent = None;
        node.attached = false;
        node.children.clear();
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }

    fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.detach(child);
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
        let attached = self.nodes[parent.0].attached;
        self.set_attached(child, attached);
    }

    fn insert_after(&mut self, sibling: NodeId, node: NodeId) {
        self.detach(node);
        match self.nodes[sibling.0].parent {
            Some(parent) => {
                let siblings = &mut self.nodes[parent.0].children;
                let pos = siblings
                    .iter()
                    .position(|c| *c == sibling)
                    .map_or(siblings.len(), |p| p + 1);
                siblings.insert(pos, node);
                self.nodes[node.0].parent = Some(parent);
            }
            None => {
                // A detached sibling has nowhere to put the node
                if let Some(pos) = self.roots.iter().position(|r| *r == sibling) {
                    self.roots.insert(pos + 1, node);
                }
            }
        }
        let attached = self.nodes[sibling.0].attached;
        self.set_attached(node, attached);
    }

    fn remove(&mut self, node: NodeId) {
        self.detach(node);
    }

    fn find_by_id(&self, id: &str) -> Option<NodeId> {
        self.walk()
            .into_iter()
            .find(|n| self.nodes[n.0].id.as_deref() == Some(id))
    }

    fn outer_height(&self, node: NodeId) -> u16 {
        match self.nodes[node.0].height {
            Size::Fixed(h) => h,
            Size::Auto => layout::natural_height(self, node),
        }
    }

    fn set_height(&mut self, node: NodeId, height: Size) {
        self.nodes[node.0].height = height;
    }

    fn set_overflow(&mut self, node: NodeId, overflow: Overflow) {
        self.nodes[node.0].overflow = overflow;
    }

    fn set_hidden(&mut self, node: NodeId, hidden: bool) {
        self.nodes[node.0].hidden = hidden;
    }

    fn clicked(&self, link: NodeId) -> bool {
        self.nodes[link.0].clicked
    }

    fn set_clicked(&mut self, link: NodeId, clicked: bool) {
        self.nodes[link.0].clicked = clicked;
    }
}

mod node;
mod page;

pub use node::{Node, NodeId, NodeKind};
pub use page::Page;

use crate::types::{Overflow, Size};

/// The document surface a controller drives.
///
/// Implementors own the node tree. `set_html` behaves like assigning inner
/// markup in a browser: every child of the node is detached, so anything
/// appended inside it has to be created again.
pub trait Dom {
    fn html(&self, node: NodeId) -> String;
    fn set_html(&mut self, node: NodeId, html: &str);

    /// Read a `data-*` attribute, keyed without the prefix.
    fn data(&self, node: NodeId, key: &str) -> Option<String>;
    fn set_data(&mut self, node: NodeId, key: &str, value: &str);

    /// Flip `class` on the node, returning whether it is now present.
    fn toggle_class(&mut self, node: NodeId, class: &str) -> bool;
    fn has_class(&self, node: NodeId, class: &str) -> bool;

    /// Create a detached node.
    fn create_node(&mut self, node: Node) -> NodeId;
    fn append_child(&mut self, parent: NodeId, child: NodeId);
    fn insert_after(&mut self, sibling: NodeId, node: NodeId);
    fn remove(&mut self, node: NodeId);

    /// Look up an attached node by id.
    fn find_by_id(&self, id: &str) -> Option<NodeId>;

    /// Rendered height in rows, margins included.
    fn outer_height(&self, node: NodeId) -> u16;
    fn set_height(&mut self, node: NodeId, height: Size);
    fn set_overflow(&mut self, node: NodeId, overflow: Overflow);
    fn set_hidden(&mut self, node: NodeId, hidden: bool);

    fn clicked(&self, link: NodeId) -> bool;
    fn set_clicked(&mut self, link: NodeId, clicked: bool);
}

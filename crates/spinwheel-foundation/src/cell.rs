//! Cell nodes and the engine-owned record that wraps them.

use std::rc::Rc;

use crate::graphics::Point;

/// What the picker engine needs from a scene-graph node used as a row cell.
///
/// Implementors are typically label or sprite nodes of the host framework.
/// Only [`set_position`](CellNode::set_position),
/// [`set_alpha`](CellNode::set_alpha) and
/// [`prepare_for_reuse`](CellNode::prepare_for_reuse) are required.
pub trait CellNode: 'static {
    /// Moves the cell within its column's content container.
    fn set_position(&mut self, position: Point);

    /// Sets the cell opacity used for the edge fade.
    fn set_alpha(&mut self, alpha: f32);

    /// Sets the draw order inside the content container.
    fn set_z_position(&mut self, z_position: f32) {
        let _ = z_position;
    }

    /// Clears in-flight actions on the cell and all of its children.
    ///
    /// Called before a pooled cell is handed out again.
    fn prepare_for_reuse(&mut self);

    /// Called when the cell is added to a column's content container.
    fn on_attach(&mut self, component: usize) {
        let _ = component;
    }

    /// Called when the cell is removed from its content container.
    fn on_detach(&mut self) {}
}

/// A cell together with the bookkeeping the engine needs to recycle it.
///
/// Cells produced by [`CellReusePool::dequeue`](crate::CellReusePool::dequeue)
/// carry the identifier they were dequeued under; cells built by hand are
/// untagged and are simply dropped when they scroll out of view.
#[derive(Debug)]
pub struct ReusableCell<C> {
    node: C,
    identifier: Option<Rc<str>>,
    component: Option<usize>,
}

impl<C: CellNode> ReusableCell<C> {
    /// Wraps a node that does not belong to any reuse queue.
    pub fn untagged(node: C) -> Self {
        Self {
            node,
            identifier: None,
            component: None,
        }
    }

    pub(crate) fn tagged(node: C, identifier: Rc<str>) -> Self {
        Self {
            node,
            identifier: Some(identifier),
            component: None,
        }
    }

    /// The reuse identifier this cell returns to, if any.
    pub fn identifier(&self) -> Option<&str> {
        self.identifier.as_deref()
    }

    /// The component whose content container currently holds the cell.
    pub fn component(&self) -> Option<usize> {
        self.component
    }

    pub fn node(&self) -> &C {
        &self.node
    }

    pub fn node_mut(&mut self) -> &mut C {
        &mut self.node
    }

    pub fn into_node(self) -> C {
        self.node
    }

    pub(crate) fn identifier_rc(&self) -> Option<Rc<str>> {
        self.identifier.clone()
    }

    pub(crate) fn attach(&mut self, component: usize) {
        self.component = Some(component);
        self.node.on_attach(component);
    }

    pub(crate) fn detach(&mut self) {
        self.component = None;
        self.node.on_detach();
    }
}

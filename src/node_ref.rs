use std::fmt;

use crate::arena::QuadTree;
use crate::errors::{TreeError, TreeResult};
use crate::node::{NodeId, QNode};

/// A reference to a node in a [`QuadTree`].
///
/// Holds the tree and the node's id rather than the node itself, which is what
/// allows walking both down to children and up to the parent.
pub struct NodeRef<'a, T> {
    tree: &'a QuadTree<T>,
    id: NodeId,
}

impl<T> Clone for NodeRef<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for NodeRef<'_, T> {}

impl<T> PartialEq for NodeRef<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}

impl<T> Eq for NodeRef<'_, T> {}

impl<T: fmt::Debug> fmt::Debug for NodeRef<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("id", &self.id)
            .field("content", &self.content())
            .field("children", &self.record().children.len())
            .finish()
    }
}

impl<'a, T> NodeRef<'a, T> {
    /// Callers guarantee that `id` is present in `tree`.
    pub(crate) fn new(tree: &'a QuadTree<T>, id: NodeId) -> Self {
        debug_assert!(tree.contains(id));
        Self { tree, id }
    }

    fn record(&self) -> &'a QNode<T> {
        // The shared borrow of the tree keeps `id` alive for 'a.
        match self.tree.get(self.id) {
            Some(node) => node,
            None => unreachable!("NodeRef outlived its node"),
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn content(&self) -> Option<&'a T> {
        self.record().content.as_ref()
    }

    /// The node holding this one, `None` for the root.
    pub fn parent(&self) -> Option<Self> {
        self.record()
            .parent
            .and_then(|parent| self.tree.node(parent))
    }

    /// Parent, grandparent and so on up to the root.
    pub fn ancestors(&self) -> impl Iterator<Item = NodeRef<'a, T>> + 'a {
        std::iter::successors(self.parent(), |node| node.parent())
    }

    /// Child at `index`; out-of-range indices are an error, never a default.
    pub fn child(&self, index: usize) -> TreeResult<Self> {
        let children = &self.record().children;
        children
            .get(index)
            .map(|&id| NodeRef::new(self.tree, id))
            .ok_or(TreeError::IndexOutOfRange {
                index,
                len: children.len(),
            })
    }

    pub fn children(
        &self,
    ) -> impl DoubleEndedIterator<Item = NodeRef<'a, T>> + ExactSizeIterator + 'a {
        let tree = self.tree;
        self.record()
            .children
            .iter()
            .map(move |&id| NodeRef::new(tree, id))
    }

    pub fn has_children(&self) -> bool {
        !self.record().children.is_empty()
    }

    /// This node plus all of its descendants.
    pub fn count(&self) -> usize {
        self.pre_order().count()
    }

    /// True if the node has neither content nor children.
    pub fn is_empty(&self) -> bool {
        !self.has_children() && self.content().is_none()
    }
}

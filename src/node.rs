use generational_arena::Index;

/// Maximum number of children a node may hold.
pub const MAX_CHILDREN: usize = 4;

/// Identifier of a node inside its owning [`QuadTree`](crate::arena::QuadTree).
pub type NodeId = Index;

/// Node record stored in the arena.
#[derive(Debug, Clone)]
pub(crate) struct QNode<T> {
    /// Payload, `None` for a content-less node
    pub(crate) content: Option<T>,
    /// Index of the parent node, None for the root
    pub(crate) parent: Option<NodeId>,
    /// Indices of child nodes in insertion order
    pub(crate) children: Vec<NodeId>,
}

impl<T> QNode<T> {
    pub(crate) fn new(parent: Option<NodeId>, content: Option<T>) -> Self {
        Self {
            content,
            parent,
            children: Vec::with_capacity(MAX_CHILDREN),
        }
    }

    pub(crate) fn is_full(&self) -> bool {
        self.children.len() >= MAX_CHILDREN
    }
}

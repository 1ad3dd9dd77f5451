use generational_arena::Arena;
use tracing::{instrument, trace};

use crate::errors::{TreeError, TreeResult};
use crate::node::{NodeId, QNode};
use crate::node_ref::NodeRef;

/// Arena-based tree where every node holds at most four children.
///
/// All nodes live in one generational arena and refer to each other by index,
/// so ownership runs strictly from the tree downwards. Parent indices are
/// navigation only. A subtree handed to [`QuadTree::insert`] or returned by
/// [`QuadTree::remove_at`] is a `QuadTree` of its own.
#[derive(Debug, Clone)]
pub struct QuadTree<T> {
    /// Arena storage for all tree nodes
    arena: Arena<QNode<T>>,
    /// Index of the root node
    root: NodeId,
}

impl<T> Default for QuadTree<T> {
    fn default() -> Self {
        Self::new(None)
    }
}

impl<T> QuadTree<T> {
    /// Creates a tree consisting of a single root node.
    pub fn new(content: Option<T>) -> Self {
        let mut arena = Arena::new();
        let root = arena.insert(QNode::new(None, content));
        Self { arena, root }
    }

    pub fn with_content(content: T) -> Self {
        Self::new(Some(content))
    }

    pub(crate) fn from_parts(arena: Arena<QNode<T>>, root: NodeId) -> Self {
        Self { arena, root }
    }

    pub fn root_id(&self) -> NodeId {
        self.root
    }

    pub fn root(&self) -> NodeRef<'_, T> {
        NodeRef::new(self, self.root)
    }

    /// Returns a view of the node, or `None` if the id is not part of this tree.
    pub fn node(&self, id: NodeId) -> Option<NodeRef<'_, T>> {
        self.contains(id).then(|| NodeRef::new(self, id))
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.arena.contains(id)
    }

    /// Number of nodes in the tree, equal to `self.root().count()`.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    /// True if the root has neither content nor children.
    pub fn is_empty(&self) -> bool {
        self.root().is_empty()
    }

    pub(crate) fn get(&self, id: NodeId) -> Option<&QNode<T>> {
        self.arena.get(id)
    }

    fn get_mut(&mut self, id: NodeId) -> TreeResult<&mut QNode<T>> {
        self.arena.get_mut(id).ok_or(TreeError::NodeNotFound(id))
    }

    /// Id of the child at `index` below `node`.
    #[instrument(level = "trace", skip(self))]
    pub fn child_id(&self, node: NodeId, index: usize) -> TreeResult<NodeId> {
        let holder = self.get(node).ok_or(TreeError::NodeNotFound(node))?;
        holder
            .children
            .get(index)
            .copied()
            .ok_or(TreeError::IndexOutOfRange {
                index,
                len: holder.children.len(),
            })
    }

    /// Creates a node below `parent` and appends it to the parent's children.
    #[instrument(level = "trace", skip(self, content))]
    pub fn new_node(&mut self, parent: NodeId, content: Option<T>) -> TreeResult<NodeId> {
        self.ensure_capacity(parent)?;
        let id = self.arena.insert(QNode::new(Some(parent), content));
        self.get_mut(parent)?.children.push(id);
        Ok(id)
    }

    /// Appends `subtree` as the last child of `parent`.
    ///
    /// The subtree's nodes move into this tree's arena, so the ids it handed
    /// out before are no longer valid. Returns the new id of its root.
    /// Fails without touching either tree if `parent` is unknown or full.
    #[instrument(level = "trace", skip(self, subtree))]
    pub fn insert(&mut self, parent: NodeId, subtree: QuadTree<T>) -> TreeResult<NodeId> {
        self.ensure_capacity(parent)?;
        let QuadTree {
            arena: mut source,
            root,
        } = subtree;
        let id = transplant(&mut source, root, &mut self.arena, Some(parent))
            .ok_or(TreeError::NodeNotFound(root))?;
        trace!(?parent, ?id, "grafted subtree");
        Ok(id)
    }

    /// Detaches the child at `index` below `parent` and returns it as a tree.
    ///
    /// Later siblings shift down by one. The returned tree's root has no parent.
    #[instrument(level = "trace", skip(self))]
    pub fn remove_at(&mut self, parent: NodeId, index: usize) -> TreeResult<QuadTree<T>> {
        let holder = self.get_mut(parent)?;
        let len = holder.children.len();
        if index >= len {
            return Err(TreeError::IndexOutOfRange { index, len });
        }
        let removed = holder.children.remove(index);

        let mut arena = Arena::new();
        let root = transplant(&mut self.arena, removed, &mut arena, None)
            .ok_or(TreeError::NodeNotFound(removed))?;
        trace!(?parent, index, nodes = arena.len(), "detached subtree");
        Ok(QuadTree { arena, root })
    }

    /// Replaces the content of `node`, returning what was there before.
    pub fn set_content(&mut self, node: NodeId, content: Option<T>) -> TreeResult<Option<T>> {
        let target = self.get_mut(node)?;
        Ok(std::mem::replace(&mut target.content, content))
    }

    pub fn content_mut(&mut self, node: NodeId) -> Option<&mut T> {
        self.arena.get_mut(node)?.content.as_mut()
    }

    /// Number of levels in the tree; a lone root has depth 1.
    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut stack = vec![(self.root, 1)];
        while let Some((node_idx, level)) = stack.pop() {
            if let Some(node) = self.get(node_idx) {
                depth = depth.max(level);
                stack.extend(node.children.iter().map(|&child| (child, level + 1)));
            }
        }
        depth
    }

    /// Points every child's parent index at the node holding it, top-down.
    ///
    /// Needed whenever the tree was assembled from a representation without
    /// parent links.
    #[instrument(level = "trace", skip(self))]
    pub fn fix_parent_links(&mut self) {
        if let Some(root) = self.arena.get_mut(self.root) {
            root.parent = None;
        }
        let mut stack = vec![self.root];
        while let Some(holder) = stack.pop() {
            let count = self.get(holder).map_or(0, |node| node.children.len());
            for i in 0..count {
                let child = self.arena[holder].children[i];
                if let Some(node) = self.arena.get_mut(child) {
                    node.parent = Some(holder);
                    stack.push(child);
                }
            }
        }
        trace!(nodes = self.arena.len(), "parent links repaired");
    }

    fn ensure_capacity(&self, parent: NodeId) -> TreeResult<()> {
        let holder = self.get(parent).ok_or(TreeError::NodeNotFound(parent))?;
        if holder.is_full() {
            return Err(TreeError::capacity());
        }
        Ok(())
    }
}

/// Moves the subtree rooted at `root` from `source` into `target`.
///
/// The moved root gets `parent` as its parent and, if `parent` is given,
/// is appended to that node's children. Child order is preserved.
fn transplant<T>(
    source: &mut Arena<QNode<T>>,
    root: NodeId,
    target: &mut Arena<QNode<T>>,
    parent: Option<NodeId>,
) -> Option<NodeId> {
    let mut new_root = None;
    let mut stack = vec![(root, parent)];

    while let Some((old_idx, new_parent)) = stack.pop() {
        let Some(node) = source.remove(old_idx) else {
            continue;
        };
        let new_idx = target.insert(QNode::new(new_parent, node.content));
        if let Some(holder) = new_parent.and_then(|p| target.get_mut(p)) {
            holder.children.push(new_idx);
        }
        new_root.get_or_insert(new_idx);
        // Push children in reverse order for left-to-right traversal
        for &child in node.children.iter().rev() {
            stack.push((child, Some(new_idx)));
        }
    }

    new_root
}

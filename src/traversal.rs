//! Depth-first and breadth-first queries over a node's subtree.
//!
//! All iterators borrow the tree, are lazy, and can be restarted by calling
//! the producing method again.

use std::collections::VecDeque;
use std::iter::FusedIterator;

use crate::node_ref::NodeRef;

impl<'a, T> NodeRef<'a, T> {
    /// Pre-order (self before children) iterator over this subtree.
    pub fn pre_order(&self) -> PreOrder<'a, T> {
        PreOrder::new(*self)
    }

    /// Level-order content of this subtree, one item per node.
    ///
    /// Content-less nodes yield `None`. An empty node yields nothing at all.
    pub fn breadth_first(&self) -> BreadthFirst<'a, T> {
        BreadthFirst::new(*self)
    }

    /// Content matching `predicate`, in pre-order.
    pub fn select_where<P>(&self, predicate: P) -> impl Iterator<Item = &'a T> + 'a
    where
        P: Fn(&T) -> bool + 'a,
    {
        self.pre_order()
            .filter_map(move |node| node.content().filter(|&content| predicate(content)))
    }

    /// First content in pre-order that satisfies `predicate`.
    pub fn select_first<P>(&self, predicate: P) -> Option<&'a T>
    where
        P: Fn(&T) -> bool,
    {
        self.pre_order()
            .find_map(|node| node.content().filter(|&content| predicate(content)))
    }

    /// First content in pre-order that satisfies `predicate`, or `T::default()`.
    ///
    /// Each child's result is accepted when it satisfies `predicate`, so a
    /// predicate that also accepts `T::default()` stops at the first subtree
    /// without a match and returns the default, even if a later subtree holds
    /// a real match. Use [`NodeRef::select_first`] to tell the cases apart.
    pub fn select_first_or_default<P>(&self, predicate: P) -> T
    where
        T: Default + Clone,
        P: Fn(&T) -> bool,
    {
        // A subtree without a match reports `T::default()`. When the predicate
        // rejects the default, only real matches propagate, which is the plain
        // pre-order search. When it accepts the default, the first child's
        // report always wins, so the search follows first children only.
        if !predicate(&T::default()) {
            return self.select_first(predicate).cloned().unwrap_or_default();
        }
        let mut node = *self;
        loop {
            if let Some(content) = node.content().filter(|&content| predicate(content)) {
                return content.clone();
            }
            match node.children().next() {
                Some(first) => node = first,
                None => return T::default(),
            }
        }
    }

    /// Nodes grouped by depth: `[self]`, then its children, and so on.
    pub fn node_levels(&self) -> Vec<Vec<NodeRef<'a, T>>> {
        let mut levels = Vec::new();
        let mut queue = VecDeque::from([*self]);

        while !queue.is_empty() {
            let width = queue.len();
            let mut level = Vec::with_capacity(width);
            for _ in 0..width {
                let Some(node) = queue.pop_front() else {
                    break;
                };
                queue.extend(node.children());
                level.push(node);
            }
            levels.push(level);
        }

        levels
    }
}

pub struct PreOrder<'a, T> {
    stack: Vec<NodeRef<'a, T>>,
}

impl<'a, T> PreOrder<'a, T> {
    fn new(start: NodeRef<'a, T>) -> Self {
        Self { stack: vec![start] }
    }
}

impl<'a, T> Iterator for PreOrder<'a, T> {
    type Item = NodeRef<'a, T>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.stack.pop()?;
        // Push children in reverse order for left-to-right traversal
        self.stack.extend(current.children().rev());
        Some(current)
    }
}

impl<T> FusedIterator for PreOrder<'_, T> {}

pub struct BreadthFirst<'a, T> {
    queue: VecDeque<NodeRef<'a, T>>,
}

impl<'a, T> BreadthFirst<'a, T> {
    fn new(start: NodeRef<'a, T>) -> Self {
        let mut queue = VecDeque::new();
        if !start.is_empty() {
            queue.push_back(start);
        }
        Self { queue }
    }
}

impl<'a, T> Iterator for BreadthFirst<'a, T> {
    type Item = Option<&'a T>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.queue.pop_front()?;
        self.queue.extend(node.children());
        Some(node.content())
    }
}

impl<T> FusedIterator for BreadthFirst<'_, T> {}

use std::fmt;

use termtree::Tree;

use crate::arena::QuadTree;
use crate::node_ref::NodeRef;

/// Label used for nodes without content.
const NO_CONTENT: &str = "(none)";

pub trait TreeNodeConvert {
    fn to_tree_string(&self) -> Tree<String>;
}

/// Labels `node` and takes its already built children off `built`.
fn with_children<T: fmt::Display>(
    node: &NodeRef<'_, T>,
    built: &mut Vec<Tree<String>>,
) -> Tree<String> {
    let label = node
        .content()
        .map_or_else(|| NO_CONTENT.to_string(), ToString::to_string);
    let leaves: Vec<_> = node.children().filter_map(|_| built.pop()).collect();
    Tree::new(label).with_leaves(leaves)
}

impl<T: fmt::Display> TreeNodeConvert for NodeRef<'_, T> {
    fn to_tree_string(&self) -> Tree<String> {
        // Reverse pre-order finishes every subtree before its holder; popping
        // a holder's children off `built` yields them left to right.
        let nodes: Vec<_> = self.pre_order().collect();
        let mut built: Vec<Tree<String>> = Vec::with_capacity(nodes.len());
        for node in nodes.iter().skip(1).rev() {
            let tree = with_children(node, &mut built);
            built.push(tree);
        }
        with_children(self, &mut built)
    }
}

impl<T: fmt::Display> TreeNodeConvert for QuadTree<T> {
    fn to_tree_string(&self) -> Tree<String> {
        self.root().to_tree_string()
    }
}

impl<T: fmt::Display> fmt::Display for QuadTree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_tree_string())
    }
}

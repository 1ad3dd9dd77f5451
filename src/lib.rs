//! Bounded-branching content tree.
//!
//! A [`QuadTree`] holds nodes with optional content and at most
//! [`MAX_CHILDREN`] ordered children each. Nodes live in a generational arena
//! and refer to each other by [`NodeId`]; parent ids are back-references used
//! only for navigation. Trees can be queried depth- or breadth-first and
//! round-tripped through JSON, with parent links rebuilt on load.
//!
//! ```
//! use qtree::QuadTree;
//!
//! let mut tree = QuadTree::with_content(1);
//! let root = tree.root_id();
//! let child = tree.new_node(root, Some(2)).unwrap();
//! tree.new_node(child, Some(3)).unwrap();
//!
//! assert_eq!(tree.root().count(), 3);
//! assert_eq!(tree.root().select_first_or_default(|&x| x == 3), 3);
//! ```

pub mod arena;
pub mod config;
pub mod errors;
pub mod node;
pub mod node_ref;
pub mod persistence;
pub mod traversal;
pub mod tree_traits;
pub mod util;

pub use arena::QuadTree;
pub use crate::config::{PersistenceSettings, Settings};
pub use errors::{TreeError, TreeResult};
pub use node::{NodeId, MAX_CHILDREN};
pub use node_ref::NodeRef;
pub use traversal::{BreadthFirst, PreOrder};
pub use tree_traits::TreeNodeConvert;

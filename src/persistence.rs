//! JSON persistence for trees and subtrees.
//!
//! Every node is written as `{"Value": <content or null>, "Children": [...]}`.
//! Parent links are not written; [`QuadTree::load`] rebuilds them with
//! [`QuadTree::fix_parent_links`] before handing the tree out.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use generational_arena::Arena;
use serde::de::DeserializeOwned;
use serde::ser::{SerializeStruct, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::de::{IoRead, StrRead};
use tracing::{debug, instrument};

use crate::arena::QuadTree;
use crate::config::PersistenceSettings;
use crate::errors::{TreeError, TreeResult};
use crate::node::{NodeId, QNode, MAX_CHILDREN};
use crate::node_ref::NodeRef;

const VALUE_FIELD: &str = "Value";
const CHILDREN_FIELD: &str = "Children";

impl<T: Serialize> Serialize for NodeRef<'_, T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Node", 2)?;
        state.serialize_field(VALUE_FIELD, &self.content())?;
        state.serialize_field(CHILDREN_FIELD, &ChildList(*self))?;
        state.end()
    }
}

struct ChildList<'a, T>(NodeRef<'a, T>);

impl<T: Serialize> Serialize for ChildList<'_, T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.0.children())
    }
}

impl<T: Serialize> Serialize for QuadTree<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.root().serialize(serializer)
    }
}

/// Persisted shape of one node. `Children` is optional here only so that its
/// absence maps to [`TreeError::MissingField`] instead of a generic parse error.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct NodeRecord<T> {
    #[serde(rename = "Value")]
    value: Option<T>,
    #[serde(rename = "Children")]
    children: Option<Vec<NodeRecord<T>>>,
}

impl<T> NodeRecord<T> {
    fn into_parts(self) -> TreeResult<(Option<T>, Vec<NodeRecord<T>>)> {
        let children = self
            .children
            .ok_or(TreeError::MissingField(CHILDREN_FIELD))?;
        if children.len() > MAX_CHILDREN {
            return Err(TreeError::InvalidShape(format!(
                "node has {} children, at most {} allowed",
                children.len(),
                MAX_CHILDREN
            )));
        }
        Ok((self.value, children))
    }
}

fn build_tree<T>(record: NodeRecord<T>) -> TreeResult<QuadTree<T>> {
    let mut arena = Arena::new();
    let (value, children) = record.into_parts()?;
    let root = arena.insert(QNode::new(None, value));

    let mut stack: Vec<(NodeId, NodeRecord<T>)> =
        children.into_iter().rev().map(|child| (root, child)).collect();
    while let Some((holder, record)) = stack.pop() {
        let (value, children) = record.into_parts()?;
        let idx = arena.insert(QNode::new(None, value));
        if let Some(node) = arena.get_mut(holder) {
            node.children.push(idx);
        }
        stack.extend(children.into_iter().rev().map(|child| (idx, child)));
    }

    let mut tree = QuadTree::from_parts(arena, root);
    tree.fix_parent_links();
    Ok(tree)
}

/// Parses one node record with no nesting limit, growing the stack on demand
/// so that deep chains load as well as they save.
fn read_record<'de, T, R>(read: R) -> serde_json::Result<NodeRecord<T>>
where
    T: Deserialize<'de>,
    R: serde_json::de::Read<'de>,
{
    let mut deserializer = serde_json::Deserializer::new(read);
    deserializer.disable_recursion_limit();
    let record = NodeRecord::deserialize(serde_stacker::Deserializer::new(&mut deserializer))?;
    deserializer.end()?;
    Ok(record)
}

fn write_json<S, W>(value: &S, writer: W, pretty: bool) -> serde_json::Result<()>
where
    S: Serialize + ?Sized,
    W: Write,
{
    if pretty {
        serde_json::to_writer_pretty(writer, value)
    } else {
        serde_json::to_writer(writer, value)
    }
}

impl<T: Serialize> NodeRef<'_, T> {
    pub fn to_json_string(&self) -> TreeResult<String> {
        serde_json::to_string(self).map_err(|e| TreeError::json("serialize tree", e))
    }

    pub fn to_json_string_pretty(&self) -> TreeResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| TreeError::json("serialize tree", e))
    }

    pub fn save_to_writer<W: Write>(&self, writer: W) -> TreeResult<()> {
        write_json(self, writer, false).map_err(|e| TreeError::json("write tree", e))
    }

    /// Saves this node and its subtree to `path` with default settings.
    pub fn save(&self, path: impl AsRef<Path>) -> TreeResult<()> {
        self.save_with(path, &PersistenceSettings::default())
    }

    #[instrument(level = "debug", skip(self, path), fields(path = %path.as_ref().display()))]
    pub fn save_with(&self, path: impl AsRef<Path>, settings: &PersistenceSettings) -> TreeResult<()> {
        let path = path.as_ref();
        if settings.create_dirs {
            if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
                fs::create_dir_all(dir).map_err(|e| {
                    TreeError::io(format!("create directory {}", dir.display()), e)
                })?;
            }
        }

        let file = File::create(path)
            .map_err(|e| TreeError::io(format!("create {}", path.display()), e))?;
        let mut writer = BufWriter::new(file);
        write_json(self, &mut writer, settings.pretty)
            .map_err(|e| TreeError::json(format!("write {}", path.display()), e))?;
        writer
            .flush()
            .map_err(|e| TreeError::io(format!("flush {}", path.display()), e))?;

        debug!(nodes = self.count(), pretty = settings.pretty, "saved tree");
        Ok(())
    }
}

impl<T: Serialize> QuadTree<T> {
    pub fn to_json_string(&self) -> TreeResult<String> {
        self.root().to_json_string()
    }

    pub fn to_json_string_pretty(&self) -> TreeResult<String> {
        self.root().to_json_string_pretty()
    }

    pub fn save_to_writer<W: Write>(&self, writer: W) -> TreeResult<()> {
        self.root().save_to_writer(writer)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> TreeResult<()> {
        self.root().save(path)
    }

    pub fn save_with(&self, path: impl AsRef<Path>, settings: &PersistenceSettings) -> TreeResult<()> {
        self.root().save_with(path, settings)
    }
}

impl<T: DeserializeOwned> QuadTree<T> {
    pub fn from_json_str(json: &str) -> TreeResult<Self> {
        let record: NodeRecord<T> = read_record(StrRead::new(json))
            .map_err(|e| TreeError::json("parse tree", e))?;
        build_tree(record)
    }

    pub fn load_from_reader<R: Read>(reader: R) -> TreeResult<Self> {
        let record: NodeRecord<T> = read_record(IoRead::new(reader))
            .map_err(|e| TreeError::json("read tree", e))?;
        build_tree(record)
    }

    /// Loads a tree saved with [`QuadTree::save`], parent links included.
    #[instrument(level = "debug", skip(path), fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> TreeResult<Self> {
        let path = path.as_ref();
        let record: NodeRecord<T> = {
            let file = File::open(path)
                .map_err(|e| TreeError::io(format!("open {}", path.display()), e))?;
            read_record(IoRead::new(BufReader::new(file)))
                .map_err(|e| TreeError::json(format!("read {}", path.display()), e))?
        };
        let tree = build_tree(record)?;
        debug!(nodes = tree.len(), "loaded tree");
        Ok(tree)
    }
}

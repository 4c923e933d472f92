//! JSON deserialization for snapshot files.
//!
//! The raw layer mirrors the file: nodes reference their parent through
//! `pid`, with `-1` marking the root. Converting to [`Snapshot`] checks the
//! references and derives children, depth and sibling index.

use indexmap::IndexMap;
use serde::Deserialize;

use crate::tree::{Node, NodeId, Snapshot};

/// Error while loading a snapshot.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("invalid snapshot JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("snapshot has no nodes")]
    Empty,

    #[error("node at index {index} has id {id}")]
    IdMismatch { index: usize, id: i64 },

    #[error("node {id} has no parent; only node 0 can be the root")]
    DetachedNode { id: usize },

    #[error("node {id} refers to parent {pid}, which does not precede it")]
    InvalidParent { id: usize, pid: i64 },
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSnapshot {
    #[serde(default)]
    app_id: Option<String>,
    #[serde(default)]
    activity_id: Option<String>,
    nodes: Vec<RawNode>,
}

#[derive(Debug, Deserialize)]
struct RawNode {
    id: i64,
    pid: i64,
    #[serde(default)]
    attr: IndexMap<String, serde_json::Value>,
}

impl Snapshot {
    /// Parse and validate a snapshot from its JSON text.
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        let raw: RawSnapshot = serde_json::from_str(json)?;
        Self::from_raw(raw)
    }

    fn from_raw(raw: RawSnapshot) -> Result<Self, SnapshotError> {
        if raw.nodes.is_empty() {
            return Err(SnapshotError::Empty);
        }

        let mut nodes: Vec<Node> = Vec::with_capacity(raw.nodes.len());
        for (index, record) in raw.nodes.into_iter().enumerate() {
            if usize::try_from(record.id).ok() != Some(index) {
                return Err(SnapshotError::IdMismatch {
                    index,
                    id: record.id,
                });
            }

            let parent = match record.pid {
                -1 if index == 0 => None,
                -1 => return Err(SnapshotError::DetachedNode { id: index }),
                pid => {
                    // Parents precede children, so the tree is acyclic.
                    let parent = usize::try_from(pid)
                        .ok()
                        .filter(|&p| p < index)
                        .ok_or(SnapshotError::InvalidParent { id: index, pid })?;
                    Some(parent)
                }
            };

            let (depth, sibling_index) = match parent {
                Some(p) => {
                    let parent_node = &mut nodes[p];
                    parent_node.children.push(NodeId::new(index));
                    (parent_node.depth + 1, parent_node.children.len() - 1)
                }
                None => (0, 0),
            };

            nodes.push(Node {
                id: NodeId::new(index),
                parent: parent.map(NodeId::new),
                children: Vec::new(),
                depth,
                index: sibling_index,
                attr: record.attr,
            });
        }

        Ok(Snapshot::new(nodes, raw.app_id, raw.activity_id))
    }
}

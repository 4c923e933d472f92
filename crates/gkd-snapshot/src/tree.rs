//! Indexed node tree built from a snapshot.

use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;

/// Handle to a node inside one [`Snapshot`]; the node's position in `nodes`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct NodeId(usize);

impl NodeId {
    /// Handle for the node at `index`; [`Snapshot::get`] checks it exists.
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One node with its structural facts resolved.
#[derive(Debug, Clone, Serialize)]
pub struct Node {
    pub id: NodeId,
    #[serde(skip)]
    pub parent: Option<NodeId>,
    #[serde(skip)]
    pub children: Vec<NodeId>,
    #[serde(skip)]
    pub depth: usize,
    /// Position among the parent's children, from 0.
    #[serde(skip)]
    pub index: usize,
    pub attr: IndexMap<String, serde_json::Value>,
}

impl Node {
    /// Element name, taken from the `name` attribute.
    pub fn name(&self) -> Option<&str> {
        self.attr.get("name").and_then(serde_json::Value::as_str)
    }

    /// `pid` as written in snapshot files: the parent's id, or -1 at the root.
    pub fn pid(&self) -> i64 {
        self.parent
            .and_then(|p| i64::try_from(p.index()).ok())
            .unwrap_or(-1)
    }
}

/// Immutable tree loaded from a snapshot file.
#[derive(Debug, Clone)]
pub struct Snapshot {
    nodes: Vec<Node>,
    app_id: Option<String>,
    activity_id: Option<String>,
}

impl Snapshot {
    pub(crate) fn new(nodes: Vec<Node>, app_id: Option<String>, activity_id: Option<String>) -> Self {
        Self {
            nodes,
            app_id,
            activity_id,
        }
    }

    /// Node 0; loading guarantees it exists.
    pub fn root(&self) -> NodeId {
        NodeId::new(0)
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn app_id(&self) -> Option<&str> {
        self.app_id.as_deref()
    }

    pub fn activity_id(&self) -> Option<&str> {
        self.activity_id.as_deref()
    }

    /// Short human label: `Name#id`, or `#id` for unnamed nodes.
    pub fn label(&self, id: NodeId) -> String {
        match self.node(id).name() {
            Some(name) => format!("{name}#{id}"),
            None => format!("#{id}"),
        }
    }
}

//! Selector access to snapshot nodes.

use std::borrow::Cow;

use gkd_selector::{Adapter, Value};

use crate::tree::{Node, NodeId, Snapshot};

impl Adapter<NodeId> for Snapshot {
    /// Recorded attributes win; structural ones fill in when not recorded.
    fn attribute<'a>(&'a self, node: &'a NodeId, name: &str) -> Option<Value<'a>> {
        let node = self.get(*node)?;
        match node.attr.get(name) {
            Some(value) => json_value(value),
            None => structural(node, name),
        }
    }

    fn name<'a>(&'a self, node: &'a NodeId) -> Option<Cow<'a, str>> {
        self.get(*node)?.name().map(Cow::Borrowed)
    }

    fn children(&self, node: &NodeId) -> Vec<NodeId> {
        self.get(*node)
            .map(|n| n.children.clone())
            .unwrap_or_default()
    }

    fn parent(&self, node: &NodeId) -> Option<NodeId> {
        self.get(*node)?.parent
    }
}

/// Arrays and objects have no selector counterpart and read as absent.
fn json_value(value: &serde_json::Value) -> Option<Value<'_>> {
    match value {
        serde_json::Value::Null => Some(Value::Null),
        serde_json::Value::Bool(b) => Some(Value::Bool(*b)),
        serde_json::Value::Number(n) => n
            .as_i64()
            .map(Value::Int)
            .or_else(|| n.as_f64().map(Value::Float)),
        serde_json::Value::String(s) => Some(Value::Str(Cow::Borrowed(s))),
        serde_json::Value::Array(_) | serde_json::Value::Object(_) => None,
    }
}

fn structural(node: &Node, name: &str) -> Option<Value<'static>> {
    let value = match name {
        "_id" => Value::from(node.id.index()),
        "_pid" => Value::Int(node.pid()),
        "depth" => Value::from(node.depth),
        "index" => Value::from(node.index),
        "childCount" => Value::from(node.children.len()),
        _ => return None,
    };
    Some(value)
}

//! In-memory tree for engine tests.

use std::borrow::Cow;

use crate::engine::{Adapter, Value};

/// Nested description of a test tree.
pub struct El {
    name: &'static str,
    attrs: Vec<(&'static str, Value<'static>)>,
    children: Vec<El>,
}

pub fn el(name: &'static str) -> El {
    El {
        name,
        attrs: Vec::new(),
        children: Vec::new(),
    }
}

impl El {
    pub fn attr(mut self, key: &'static str, value: impl Into<Value<'static>>) -> Self {
        self.attrs.push((key, value.into()));
        self
    }

    pub fn id(self, id: &'static str) -> Self {
        self.attr("id", id)
    }

    pub fn child(mut self, child: El) -> Self {
        self.children.push(child);
        self
    }
}

struct TestNode {
    name: &'static str,
    attrs: Vec<(&'static str, Value<'static>)>,
    children: Vec<usize>,
    parent: Option<usize>,
}

/// Flattened tree; node handles are pre-order indices, the root is `0`.
pub struct TestTree {
    nodes: Vec<TestNode>,
}

impl TestTree {
    pub const ROOT: usize = 0;

    pub fn new(root: El) -> Self {
        let mut tree = Self { nodes: Vec::new() };
        tree.push(root, None);
        tree
    }

    fn push(&mut self, el: El, parent: Option<usize>) -> usize {
        let index = self.nodes.len();
        self.nodes.push(TestNode {
            name: el.name,
            attrs: el.attrs,
            children: Vec::new(),
            parent,
        });
        for child in el.children {
            let child_index = self.push(child, Some(index));
            self.nodes[index].children.push(child_index);
        }
        index
    }

    /// Pre-order index of the first node labelled `label`.
    pub fn find(&self, label: &str) -> usize {
        (0..self.nodes.len())
            .find(|&i| self.label(i) == label)
            .unwrap_or_else(|| panic!("no node labelled {label}"))
    }

    /// `Name#id` when the node has an `id`, else `Name`.
    pub fn label(&self, node: usize) -> String {
        let n = &self.nodes[node];
        match self.value(node, "id") {
            Some(Value::Str(id)) => format!("{}#{}", n.name, id),
            _ => n.name.to_string(),
        }
    }

    pub fn labels(&self, nodes: impl IntoIterator<Item = usize>) -> String {
        nodes
            .into_iter()
            .map(|node| self.label(node))
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn value(&self, node: usize, name: &str) -> Option<Value<'static>> {
        self.nodes[node]
            .attrs
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.clone())
    }

    pub fn name_of(&self, node: usize) -> &'static str {
        self.nodes[node].name
    }

    pub fn children_of(&self, node: usize) -> Vec<usize> {
        self.nodes[node].children.clone()
    }

    pub fn parent_of(&self, node: usize) -> Option<usize> {
        self.nodes[node].parent
    }
}

impl Adapter<usize> for TestTree {
    fn attribute<'a>(&'a self, node: &'a usize, name: &str) -> Option<Value<'a>> {
        self.value(*node, name)
    }

    fn name<'a>(&'a self, node: &'a usize) -> Option<Cow<'a, str>> {
        Some(Cow::Borrowed(self.name_of(*node)))
    }

    fn children(&self, node: &usize) -> Vec<usize> {
        self.children_of(*node)
    }

    fn parent(&self, node: &usize) -> Option<usize> {
        self.parent_of(*node)
    }
}

/// Root → A#x1, B#x2 → C#x3
pub fn sample_tree() -> TestTree {
    TestTree::new(
        el("Root")
            .child(el("A").id("x1"))
            .child(el("B").id("x2").child(el("C").id("x3"))),
    )
}

// ── Parameter tree ──
//
// A device configuration decoded once into `Leaf | Node` variants. Every
// query is read-only; nothing here touches the network.

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

use crate::error::CoreError;

/// One position in a parameter tree.
///
/// Arrays are leaves: VAPIX uses them for value lists (DNS servers,
/// capabilities), never for addressable sub-groups.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ParamNode {
    Leaf(Value),
    Node(IndexMap<String, ParamNode>),
}

impl ParamNode {
    fn decode(value: Value, path: &str) -> Result<Self, CoreError> {
        match value {
            Value::Object(map) => {
                let mut children = IndexMap::with_capacity(map.len());
                for (key, child) in map {
                    validate_key(&key, path)?;
                    let child_path = format!("{path}.{key}");
                    children.insert(key, Self::decode(child, &child_path)?);
                }
                Ok(Self::Node(children))
            }
            other => Ok(Self::Leaf(other)),
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf(_))
    }

    pub fn as_leaf(&self) -> Option<&Value> {
        match self {
            Self::Leaf(v) => Some(v),
            Self::Node(_) => None,
        }
    }

    pub fn as_node(&self) -> Option<&IndexMap<String, ParamNode>> {
        match self {
            Self::Node(children) => Some(children),
            Self::Leaf(_) => None,
        }
    }

    /// The node as plain JSON.
    pub fn to_value(&self) -> Value {
        match self {
            Self::Leaf(v) => v.clone(),
            Self::Node(children) => Value::Object(
                children
                    .iter()
                    .map(|(key, child)| (key.clone(), child.to_value()))
                    .collect(),
            ),
        }
    }

    /// Descend along a dotted path relative to this node.
    pub fn get(&self, relative: &str) -> Option<&ParamNode> {
        relative
            .split('.')
            .try_fold(self, |node, segment| node.as_node()?.get(segment))
    }

    /// Leaf as a boolean, accepting VAPIX `yes`/`no` strings.
    pub fn as_bool(&self) -> Option<bool> {
        match self.as_leaf()? {
            Value::Bool(b) => Some(*b),
            Value::Number(n) => n.as_u64().map(|n| n != 0),
            Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
                "yes" | "true" | "on" | "1" => Some(true),
                "no" | "false" | "off" | "0" => Some(false),
                _ => None,
            },
            _ => None,
        }
    }

    /// Leaf as an unsigned integer, accepting numeric strings.
    pub fn as_u64(&self) -> Option<u64> {
        match self.as_leaf()? {
            Value::Number(n) => n.as_u64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Scalar leaf rendered as text; `None` for arrays and sub-trees.
    pub fn as_str_lossy(&self) -> Option<String> {
        match self.as_leaf()? {
            Value::String(s) => Some(s.clone()),
            Value::Null => Some(String::new()),
            Value::Bool(b) => Some(b.to_string()),
            Value::Number(n) => Some(n.to_string()),
            Value::Array(_) | Value::Object(_) => None,
        }
    }

    /// Leaf as a list of strings: a JSON array or a comma-separated string.
    pub fn as_text_list(&self) -> Option<Vec<String>> {
        match self.as_leaf()? {
            Value::Array(items) => Some(
                items
                    .iter()
                    .filter_map(|item| match item {
                        Value::String(s) => Some(s.clone()),
                        Value::Number(n) => Some(n.to_string()),
                        _ => None,
                    })
                    .collect(),
            ),
            Value::String(s) => Some(
                s.split(',')
                    .map(str::trim)
                    .filter(|part| !part.is_empty())
                    .map(str::to_owned)
                    .collect(),
            ),
            _ => None,
        }
    }
}

fn validate_key(key: &str, parent: &str) -> Result<(), CoreError> {
    if key.is_empty() || key.contains('.') {
        return Err(CoreError::MalformedConfig {
            message: format!("invalid parameter key {key:?} under '{parent}'"),
        });
    }
    Ok(())
}

/// A device configuration rooted at a single named root.
///
/// Full paths always start with the root name, e.g.
/// `root.Network.Interface.I0.Active`. Keys are never empty and never contain
/// `.`, so every leaf path is unique and `flatten()` agrees with `lookup()`.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterTree {
    root: String,
    node: ParamNode,
}

impl ParameterTree {
    /// Root name used for a full-configuration fetch.
    pub const DEFAULT_ROOT: &'static str = "root";

    /// Decode a raw JSON payload. The payload must be an object.
    pub fn from_value(root: impl Into<String>, value: Value) -> Result<Self, CoreError> {
        let root = root.into();
        validate_key(&root, "<tree>")?;
        if !value.is_object() {
            return Err(CoreError::MalformedConfig {
                message: format!("expected a mapping at '{root}', got {}", kind(&value)),
            });
        }
        let node = ParamNode::decode(value, &root)?;
        Ok(Self { root, node })
    }

    /// A tree with no groups, used when an optional group is unavailable.
    pub fn empty(root: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            node: ParamNode::Node(IndexMap::new()),
        }
    }

    pub fn root(&self) -> &str {
        &self.root
    }

    pub fn is_empty(&self) -> bool {
        self.node.as_node().is_none_or(IndexMap::is_empty)
    }

    /// The root node (always a `Node`).
    pub fn node(&self) -> &ParamNode {
        &self.node
    }

    /// Resolve a full dotted path (starting with the root name).
    pub fn lookup(&self, path: &str) -> Result<&ParamNode, CoreError> {
        let not_found = || CoreError::PathNotFound {
            path: path.to_owned(),
        };
        let mut segments = path.split('.');
        if segments.next() != Some(self.root.as_str()) {
            return Err(not_found());
        }
        segments.try_fold(&self.node, |node, segment| {
            node.as_node()
                .and_then(|children| children.get(segment))
                .ok_or_else(not_found)
        })
    }

    /// Resolve a path relative to the root, e.g. `Interface.I0.IPAddress`.
    pub fn get(&self, relative: &str) -> Option<&ParamNode> {
        self.node.get(relative)
    }

    /// Every leaf whose full path contains `needle` (case-sensitive).
    pub fn search(&self, needle: &str) -> Vec<(String, &Value)> {
        self.flatten()
            .into_iter()
            .filter(|(path, _)| path.contains(needle))
            .collect()
    }

    /// Depth-first, pre-order list of every leaf in source order.
    pub fn flatten(&self) -> Vec<(String, &Value)> {
        let mut out = Vec::new();
        collect_leaves(&self.node, &self.root, &mut out);
        out
    }

    /// Immediate children of the root, in source order.
    pub fn groups(&self) -> Vec<&str> {
        self.node
            .as_node()
            .map(|children| children.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Number of leaf values.
    pub fn leaf_count(&self) -> usize {
        fn count(node: &ParamNode) -> usize {
            match node {
                ParamNode::Leaf(_) => 1,
                ParamNode::Node(children) => children.values().map(count).sum(),
            }
        }
        count(&self.node)
    }
}

fn collect_leaves<'a>(node: &'a ParamNode, path: &str, out: &mut Vec<(String, &'a Value)>) {
    match node {
        ParamNode::Leaf(value) => out.push((path.to_owned(), value)),
        ParamNode::Node(children) => {
            for (key, child) in children {
                collect_leaves(child, &format!("{path}.{key}"), out);
            }
        }
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "a mapping",
    }
}

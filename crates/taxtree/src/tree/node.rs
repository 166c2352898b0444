//! Node and name types for taxonomic classification trees.

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Identity key of a taxonomic unit.
///
/// Names are assumed unique across a whole tree. An empty name can be read
/// from a document (absent or `""`), but it is rejected by
/// [`collect_all_nodes`](super::collect_all_nodes) and
/// [`check_structure`](crate::validation::check_structure).
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeName(String);

impl NodeName {
    /// Create a name from any string.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Get the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the name is empty (and therefore invalid).
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for NodeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl Borrow<str> for NodeName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for NodeName {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl From<String> for NodeName {
    fn from(name: String) -> Self {
        Self(name)
    }
}

/// One taxonomic unit with its observed count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Unique name within the tree.
    #[serde(default)]
    pub name: NodeName,

    /// Taxonomic rank (e.g., species, genus).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rank: Option<String>,

    /// Observed item count, possibly fractional after averaging.
    #[serde(deserialize_with = "count_from_number_or_string")]
    pub count: f64,

    /// Child nodes in stored order. Empty for a leaf.
    #[serde(
        default,
        deserialize_with = "children_or_null",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub children: Vec<Node>,

    /// Document fields not interpreted by taxtree, kept for round trips.
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl Node {
    /// Build a leaf node.
    pub fn leaf(name: impl Into<NodeName>, rank: impl Into<String>, count: f64) -> Self {
        Self {
            name: name.into(),
            rank: Some(rank.into()),
            count,
            children: Vec::new(),
            attributes: Map::new(),
        }
    }

    /// Build a node with the given children.
    pub fn with_children(
        name: impl Into<NodeName>,
        rank: impl Into<String>,
        count: f64,
        children: Vec<Node>,
    ) -> Self {
        Self {
            children,
            ..Self::leaf(name, rank, count)
        }
    }

    /// Build a leaf node without a rank.
    pub fn unranked(name: impl Into<NodeName>, count: f64) -> Self {
        Self {
            name: name.into(),
            rank: None,
            count,
            children: Vec::new(),
            attributes: Map::new(),
        }
    }

    /// Append a child node.
    pub fn child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    /// Attach an extra document attribute.
    pub fn with_attribute(mut self, key: impl Into<String>, value: Value) -> Self {
        self.attributes.insert(key.into(), value);
        self
    }

    /// Get the rank as a string slice.
    pub fn rank(&self) -> Option<&str> {
        self.rank.as_deref()
    }

    /// Whether the node has no children.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of nodes in the subtree rooted here, including this node.
    pub fn subtree_size(&self) -> usize {
        1 + self.children.iter().map(Node::subtree_size).sum::<usize>()
    }

    /// Copy of this node without its children.
    pub(crate) fn detached(&self) -> Self {
        Self {
            name: self.name.clone(),
            rank: self.rank.clone(),
            count: self.count,
            children: Vec::new(),
            attributes: self.attributes.clone(),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawCount {
    Number(f64),
    Text(String),
}

/// Accept counts written either as JSON numbers or numeric strings.
fn count_from_number_or_string<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match RawCount::deserialize(deserializer)? {
        RawCount::Number(n) => Ok(n),
        RawCount::Text(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| serde::de::Error::custom(format!("invalid count '{}'", s))),
    }
}

fn children_or_null<'de, D>(deserializer: D) -> Result<Vec<Node>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<Node>>::deserialize(deserializer)?.unwrap_or_default())
}

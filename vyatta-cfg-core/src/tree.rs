use std::fmt::{self, Display, Formatter};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Child entries of a [`ConfigNode::Map`], kept in insertion order.
pub type ConfigMap = IndexMap<String, ConfigNode>;

/// A parsed configuration document. The root is always a map.
pub type ConfigTree = ConfigMap;

/// One node of a configuration tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigNode {
    /// Nested block of keyed children.
    Map(ConfigMap),
    /// Repeated scalar values written under the same key.
    List(Vec<String>),
    /// Single value. Empty for bare flags such as `disable`.
    Scalar(String),
}

/// Coarse node shape used when reporting kind conflicts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Map,
    List,
    Scalar,
}

impl Display for NodeKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeKind::Map => "block",
            NodeKind::List => "multi-value",
            NodeKind::Scalar => "value",
        };
        f.write_str(name)
    }
}

impl ConfigNode {
    /// Create an empty map node.
    pub fn map() -> Self {
        ConfigNode::Map(ConfigMap::new())
    }

    /// Create a scalar node.
    pub fn scalar(value: impl Into<String>) -> Self {
        ConfigNode::Scalar(value.into())
    }

    /// Create a multi-value node.
    pub fn list<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ConfigNode::List(values.into_iter().map(Into::into).collect())
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            ConfigNode::Map(_) => NodeKind::Map,
            ConfigNode::List(_) => NodeKind::List,
            ConfigNode::Scalar(_) => NodeKind::Scalar,
        }
    }

    /// True for scalar and multi-value nodes.
    pub fn is_leaf(&self) -> bool {
        !matches!(self, ConfigNode::Map(_))
    }

    pub fn as_map(&self) -> Option<&ConfigMap> {
        match self {
            ConfigNode::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Leaf values in encounter order. Empty for maps.
    pub fn values(&self) -> &[String] {
        match self {
            ConfigNode::Map(_) => &[],
            ConfigNode::List(values) => values,
            ConfigNode::Scalar(value) => std::slice::from_ref(value),
        }
    }

    /// Return the direct child with the provided key.
    pub fn get(&self, key: &str) -> Option<&ConfigNode> {
        self.as_map()?.get(key)
    }

    /// Walk a nested key path and return the node at its end.
    pub fn get_path(&self, path: &[&str]) -> Option<&ConfigNode> {
        let mut current = self;
        for segment in path {
            current = current.get(segment)?;
        }
        Some(current)
    }

    /// Walk a nested key path and return the terminal scalar value if found.
    pub fn get_value<'a>(&'a self, path: &[&str]) -> Option<&'a str> {
        match self.get_path(path)? {
            ConfigNode::Scalar(value) => Some(value),
            _ => None,
        }
    }

    /// Count leaf values beneath this node.
    pub fn leaf_count(&self) -> usize {
        match self {
            ConfigNode::Map(map) => map.values().map(ConfigNode::leaf_count).sum(),
            ConfigNode::List(values) => values.len(),
            ConfigNode::Scalar(_) => 1,
        }
    }
}

impl From<ConfigMap> for ConfigNode {
    fn from(map: ConfigMap) -> Self {
        ConfigNode::Map(map)
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigMap, ConfigNode};

    #[test]
    fn get_value_walks_nested_path() {
        let mut ethernet = ConfigMap::new();
        ethernet.insert("description".to_string(), ConfigNode::scalar("uplink"));
        let mut interfaces = ConfigMap::new();
        interfaces.insert("eth0".to_string(), ConfigNode::Map(ethernet));
        let root = ConfigNode::Map(interfaces);

        assert_eq!(root.get_value(&["eth0", "description"]), Some("uplink"));
        assert_eq!(root.get_value(&["eth0", "missing"]), None);
    }

    #[test]
    fn json_shape_is_untagged() {
        let mut root = ConfigMap::new();
        root.insert("ns".to_string(), ConfigNode::list(["1.1.1.1", "8.8.8.8"]));
        root.insert("disable".to_string(), ConfigNode::scalar(""));

        let json = serde_json::to_string(&root).expect("serialize");
        assert_eq!(json, r#"{"ns":["1.1.1.1","8.8.8.8"],"disable":""}"#);

        let back: ConfigMap = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, root);
    }
}

//! Typed path navigation over a `ValueNode` tree
//!
//! Every lookup goes through [`NodeRef`], which remembers the key path it was
//! reached by so that `NotFound` / `TypeMismatch` errors name the offending
//! record, e.g. `items_game/items/7/name`.

use super::document::ValueNode;
use crate::error::{Error, Result};
use std::str::FromStr;

/// A borrowed node together with the key path that led to it.
#[derive(Debug, Clone)]
pub struct NodeRef<'a> {
    node: &'a ValueNode,
    path: String,
}

impl<'a> NodeRef<'a> {
    /// Wraps a root node with an empty path.
    pub fn root(node: &'a ValueNode) -> Self {
        Self {
            node,
            path: String::new(),
        }
    }

    /// Wraps a node reached by `path`.
    pub fn at(node: &'a ValueNode, path: impl Into<String>) -> Self {
        Self {
            node,
            path: path.into(),
        }
    }

    pub fn node(&self) -> &'a ValueNode {
        self.node
    }

    /// The `/`-joined key path to this node.
    pub fn path(&self) -> &str {
        &self.path
    }

    fn child_path(&self, key: &str) -> String {
        if self.path.is_empty() {
            key.to_string()
        } else {
            format!("{}/{key}", self.path)
        }
    }

    /// Walks a key path. Every intermediate node must be a section.
    pub fn crawl(&self, keys: &[&str]) -> Result<NodeRef<'a>> {
        let mut current = self.clone();
        for key in keys {
            if !current.node.is_section() {
                return Err(Error::TypeMismatch {
                    path: current.path,
                    expected: "section",
                });
            }
            let path = current.child_path(key);
            let node = current
                .node
                .get(key)
                .ok_or_else(|| Error::NotFound { path: path.clone() })?;
            current = NodeRef { node, path };
        }
        Ok(current)
    }

    /// Walks a key path and requires a section at the end.
    pub fn section(&self, keys: &[&str]) -> Result<NodeRef<'a>> {
        let found = self.crawl(keys)?;
        if found.node.is_section() {
            Ok(found)
        } else {
            Err(Error::TypeMismatch {
                path: found.path,
                expected: "section",
            })
        }
    }

    /// Walks a key path and requires a scalar at the end.
    pub fn str(&self, keys: &[&str]) -> Result<&'a str> {
        let found = self.crawl(keys)?;
        found.node.as_str().ok_or(Error::TypeMismatch {
            path: found.path,
            expected: "scalar",
        })
    }

    /// Like [`NodeRef::str`], but a missing key is `Ok(None)`.
    ///
    /// A key that is present with the wrong shape is still an error.
    pub fn opt_str(&self, keys: &[&str]) -> Result<Option<&'a str>> {
        optional(self.str(keys))
    }

    /// Like [`NodeRef::section`], but a missing key is `Ok(None)`.
    pub fn opt_section(&self, keys: &[&str]) -> Result<Option<NodeRef<'a>>> {
        optional(self.section(keys))
    }

    /// Walks to a scalar and parses it.
    pub fn parse<T: FromStr>(&self, keys: &[&str]) -> Result<T> {
        let raw = self.str(keys)?;
        raw.trim().parse().map_err(|_| Error::InvalidNumber {
            path: self.crawl(keys).map(|n| n.path).unwrap_or_default(),
            value: raw.to_string(),
        })
    }

    /// Like [`NodeRef::parse`], but a missing key is `Ok(None)`.
    pub fn opt_parse<T: FromStr>(&self, keys: &[&str]) -> Result<Option<T>> {
        optional(self.parse(keys))
    }

    /// Iterates over the children of a section, each carrying its own path.
    pub fn entries(&self) -> impl Iterator<Item = (&'a str, NodeRef<'a>)> + '_ {
        self.node.entries().map(move |(key, node)| {
            (
                key,
                NodeRef {
                    node,
                    path: self.child_path(key),
                },
            )
        })
    }
}

fn optional<T>(result: Result<T>) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(Error::NotFound { .. }) => Ok(None),
        Err(e) => Err(e),
    }
}

/// Walks `keys` from `root` and returns the node found there.
///
/// # Errors
/// `NotFound` if a key is missing, `TypeMismatch` if an intermediate node is a scalar.
pub fn crawl<'a>(root: &'a ValueNode, keys: &[&str]) -> Result<&'a ValueNode> {
    NodeRef::root(root).crawl(keys).map(|n| n.node)
}

/// Walks `keys` from `root` and requires a scalar.
///
/// # Errors
/// `NotFound` if a key is missing, `TypeMismatch` on a shape mismatch.
pub fn crawl_str<'a>(root: &'a ValueNode, keys: &[&str]) -> Result<&'a str> {
    NodeRef::root(root).str(keys)
}

/// Walks `keys` from `root` and requires a section.
///
/// # Errors
/// `NotFound` if a key is missing, `TypeMismatch` on a shape mismatch.
pub fn crawl_section<'a>(root: &'a ValueNode, keys: &[&str]) -> Result<&'a ValueNode> {
    NodeRef::root(root).section(keys).map(|n| n.node)
}

/// Walks `keys` from `root`; a missing key is `Ok(None)`.
///
/// # Errors
/// `TypeMismatch` if the path exists but does not end in a scalar.
pub fn optional_str<'a>(root: &'a ValueNode, keys: &[&str]) -> Result<Option<&'a str>> {
    NodeRef::root(root).opt_str(keys)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn tree() -> ValueNode {
        ValueNode::section([(
            "items_game",
            ValueNode::section([
                (
                    "items",
                    ValueNode::section([(
                        "7",
                        ValueNode::section([
                            ("name", ValueNode::scalar("weapon_ak47")),
                            ("index", ValueNode::scalar("seven")),
                        ]),
                    )]),
                ),
                ("version", ValueNode::scalar("2")),
            ]),
        )])
    }

    #[test]
    fn test_crawl_scalar() {
        let tree = tree();
        assert_eq!(
            crawl_str(&tree, &["items_game", "items", "7", "name"]).unwrap(),
            "weapon_ak47"
        );
    }

    #[test]
    fn test_not_found_carries_path() {
        let tree = tree();
        match crawl(&tree, &["items_game", "items", "9", "name"]) {
            Err(Error::NotFound { path }) => assert_eq!(path, "items_game/items/9"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_type_mismatch_distinguished() {
        let tree = tree();
        assert!(matches!(
            crawl_section(&tree, &["items_game", "version"]),
            Err(Error::TypeMismatch { expected: "section", .. })
        ));
        assert!(matches!(
            crawl_str(&tree, &["items_game", "items"]),
            Err(Error::TypeMismatch { expected: "scalar", .. })
        ));
        match crawl(&tree, &["items_game", "version", "deeper"]) {
            Err(Error::TypeMismatch { path, .. }) => assert_eq!(path, "items_game/version"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_optional() {
        let tree = tree();
        assert_eq!(optional_str(&tree, &["items_game", "missing"]).unwrap(), None);
        assert_eq!(
            optional_str(&tree, &["items_game", "version"]).unwrap(),
            Some("2")
        );
        assert!(optional_str(&tree, &["items_game", "items"]).is_err());
    }

    #[test]
    fn test_parse_numbers() {
        let tree = tree();
        let root = NodeRef::root(&tree);
        assert_eq!(root.parse::<u32>(&["items_game", "version"]).unwrap(), 2);
        match root.parse::<u32>(&["items_game", "items", "7", "index"]) {
            Err(Error::InvalidNumber { path, value }) => {
                assert_eq!(path, "items_game/items/7/index");
                assert_eq!(value, "seven");
            }
            other => panic!("unexpected: {other:?}"),
        }
        assert_eq!(root.opt_parse::<f64>(&["items_game", "nope"]).unwrap(), None);
    }

    #[test]
    fn test_entries_paths() {
        let tree = tree();
        let items = NodeRef::root(&tree).section(&["items_game", "items"]).unwrap();
        let paths: Vec<String> = items.entries().map(|(_, n)| n.path().to_string()).collect();
        assert_eq!(paths, vec!["items_game/items/7".to_string()]);
    }
}

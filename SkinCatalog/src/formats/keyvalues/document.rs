//! KeyValues document structures

use serde::{Serialize, Serializer};

/// A node in a parsed KeyValues tree.
///
/// Sections keep their entries in source order. Keys are not required to be
/// unique: repeated scalar keys are all retained, while repeated section keys
/// under the same parent are merged by the parser.
#[derive(Debug, Clone, PartialEq)]
pub enum ValueNode {
    /// A quoted or bare string value.
    Scalar(String),
    /// A `{ ... }` block of ordered `(key, node)` entries.
    Section(Vec<(String, ValueNode)>),
}

impl Default for ValueNode {
    fn default() -> Self {
        ValueNode::Section(Vec::new())
    }
}

impl ValueNode {
    /// Creates a scalar node.
    #[must_use]
    pub fn scalar(value: impl Into<String>) -> Self {
        ValueNode::Scalar(value.into())
    }

    /// Creates a section node from `(key, node)` pairs.
    #[must_use]
    pub fn section<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, ValueNode)>,
    {
        ValueNode::Section(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Returns the string if this is a scalar.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ValueNode::Scalar(s) => Some(s),
            ValueNode::Section(_) => None,
        }
    }

    /// Returns the entries if this is a section.
    #[must_use]
    pub fn as_section(&self) -> Option<&[(String, ValueNode)]> {
        match self {
            ValueNode::Scalar(_) => None,
            ValueNode::Section(entries) => Some(entries),
        }
    }

    #[must_use]
    pub fn is_section(&self) -> bool {
        matches!(self, ValueNode::Section(_))
    }

    /// Human-readable kind, used in error messages.
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match self {
            ValueNode::Scalar(_) => "scalar",
            ValueNode::Section(_) => "section",
        }
    }

    /// Looks up a direct child by key.
    ///
    /// When the key is repeated the last occurrence wins, matching the
    /// "later definition overrides" reading of the format.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ValueNode> {
        self.as_section()?
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// All direct children with the given key, in source order.
    pub fn get_all<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a ValueNode> + 'a {
        self.entries().filter(move |(k, _)| *k == key).map(|(_, v)| v)
    }

    /// Iterates over `(key, node)` entries. Empty for scalars.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &ValueNode)> {
        self.as_section()
            .unwrap_or_default()
            .iter()
            .map(|(k, v)| (k.as_str(), v))
    }

    /// Iterates over the keys of a section, duplicates included.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries().map(|(k, _)| k)
    }

    /// Number of direct entries (0 for scalars).
    #[must_use]
    pub fn len(&self) -> usize {
        self.as_section().map_or(0, <[_]>::len)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Appends an entry to a section. Returns `false` (and does nothing) on a scalar.
    pub fn push(&mut self, key: impl Into<String>, value: ValueNode) -> bool {
        match self {
            ValueNode::Section(entries) => {
                entries.push((key.into(), value));
                true
            }
            ValueNode::Scalar(_) => false,
        }
    }
}

impl Serialize for ValueNode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::SerializeMap;

        match self {
            ValueNode::Scalar(s) => serializer.serialize_str(s),
            ValueNode::Section(entries) => {
                // Duplicate keys are emitted as-is, in source order
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in entries {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
        }
    }
}

//! Localization token table
//!
//! Built from the `lang/Tokens` section of a `csgo_<language>.txt` file.
//! Tokens are matched case-insensitively and an optional leading `#` is
//! ignored, so `#SFUI_WPNHUD_AK47` and `sfui_wpnhud_ak47` are the same key.

use super::keyvalues::{NodeRef, ValueNode, read_keyvalues};
use crate::error::{Error, Result};
use std::collections::HashMap;
use std::path::Path;

/// Token → display string lookup.
#[derive(Debug, Clone, Default)]
pub struct LanguageTable {
    language: Option<String>,
    tokens: HashMap<String, String>,
}

impl LanguageTable {
    /// Build the table from a parsed localization tree.
    ///
    /// # Errors
    /// Returns `NotFound` / `TypeMismatch` if `lang/Tokens` is missing or not a section.
    pub fn from_tree(tree: &ValueNode) -> Result<Self> {
        let root = NodeRef::root(tree);
        let tokens_node = root.section(&["lang", "Tokens"])?;
        let language = root.opt_str(&["lang", "Language"])?.map(str::to_string);

        let mut tokens = HashMap::with_capacity(tokens_node.node().len());
        for (key, value) in tokens_node.node().entries() {
            // Sections never appear under Tokens in shipped files
            if let Some(text) = value.as_str() {
                tokens.insert(normalize(key), text.to_string());
            }
        }

        tracing::debug!(
            "Loaded {} localization tokens ({})",
            tokens.len(),
            language.as_deref().unwrap_or("unknown language")
        );

        Ok(Self { language, tokens })
    }

    /// Read and build the table from a localization file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_tree(&read_keyvalues(path)?)
    }

    /// Build a table directly from pairs. Keys are normalized.
    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        K: AsRef<str>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self {
            language: None,
            tokens: pairs
                .into_iter()
                .map(|(k, v)| (normalize(k.as_ref()), v.into()))
                .collect(),
        }
    }

    /// The `lang/Language` value, if the file declared one.
    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    /// Looks up a token. Case-insensitive; a leading `#` is ignored.
    pub fn lookup(&self, token: &str) -> Option<&str> {
        self.tokens.get(&normalize(token)).map(String::as_str)
    }

    /// Like [`LanguageTable::lookup`], but a missing token is an error.
    ///
    /// # Errors
    /// Returns `UnresolvedReference` if the token is not in the table.
    pub fn resolve(&self, token: &str) -> Result<&str> {
        self.lookup(token)
            .ok_or_else(|| Error::unresolved("localization token", token, "language table"))
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

fn normalize(token: &str) -> String {
    token.strip_prefix('#').unwrap_or(token).to_lowercase()
}

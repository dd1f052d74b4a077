//! Token → display string resolution with a configurable miss policy

use crate::error::{Error, Result};
use crate::formats::LanguageTable;

/// Resolves localization tokens for catalog records.
#[derive(Debug, Clone, Copy)]
pub struct Localizer<'a> {
    table: &'a LanguageTable,
    strict: bool,
}

impl<'a> Localizer<'a> {
    pub fn new(table: &'a LanguageTable, strict: bool) -> Self {
        Self { table, strict }
    }

    /// Resolves `token`, naming `context` (usually a key path) on failure.
    ///
    /// In lenient mode a missing token falls back to the token itself with
    /// any leading `#` removed.
    pub fn text(&self, token: &str, context: &str) -> Result<String> {
        if let Some(text) = self.table.lookup(token) {
            return Ok(text.to_string());
        }
        if self.strict {
            return Err(Error::unresolved("localization token", token, context));
        }
        tracing::debug!("Missing localization token {token:?} at {context}");
        Ok(token.strip_prefix('#').unwrap_or(token).to_string())
    }

    /// Resolves an optional token.
    pub fn opt_text(&self, token: Option<&str>, context: &str) -> Result<Option<String>> {
        token.map(|t| self.text(t, context)).transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lenient_falls_back_to_token() {
        let table = LanguageTable::from_pairs([("SFUI_WPNHUD_AK47", "AK-47")]);
        let lenient = Localizer::new(&table, false);
        assert_eq!(lenient.text("#SFUI_WPNHUD_AK47", "x").unwrap(), "AK-47");
        assert_eq!(lenient.text("#Missing_Token", "x").unwrap(), "Missing_Token");
        assert_eq!(lenient.opt_text(None, "x").unwrap(), None);
    }

    #[test]
    fn test_strict_fails() {
        let table = LanguageTable::default();
        let strict = Localizer::new(&table, true);
        match strict.text("#Missing", "items_game/items/7/item_name") {
            Err(Error::UnresolvedReference { kind, id, context }) => {
                assert_eq!(kind, "localization token");
                assert_eq!(id, "#Missing");
                assert_eq!(context, "items_game/items/7/item_name");
            }
            other => panic!("unexpected: {other:?}"),
        }
    }
}

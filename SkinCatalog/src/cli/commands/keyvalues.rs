//! CLI commands for raw KeyValues and language files

use std::path::Path;

use super::TreeFormat;
use crate::formats::{LanguageTable, read_keyvalues, serialize_keyvalues};

/// Parse a KeyValues file and dump it as JSON or canonical KeyValues
pub fn parse(file: &Path, output: Option<&Path>, format: TreeFormat) -> anyhow::Result<()> {
    let tree = read_keyvalues(file)?;
    let text = match format {
        TreeFormat::Json => serde_json::to_string_pretty(&tree)?,
        TreeFormat::Keyvalues => serialize_keyvalues(&tree),
    };

    match output {
        Some(path) => std::fs::write(path, text)?,
        None => println!("{text}"),
    }
    Ok(())
}

/// Print the localized string for a token
pub fn token(language: &Path, token: &str) -> anyhow::Result<()> {
    let table = LanguageTable::from_file(language)?;
    let text = table.resolve(token)?;
    println!("{text}");
    Ok(())
}

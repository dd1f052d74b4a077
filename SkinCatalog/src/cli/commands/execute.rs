//! Command execution implementations

use super::Commands;
use super::{catalog, keyvalues};
use crate::catalog::CatalogOptions;

impl Commands {
    /// Execute the selected command.
    ///
    /// # Errors
    /// Returns an error if the underlying command fails.
    pub fn execute(&self) -> anyhow::Result<()> {
        match self {
            Commands::Build {
                items,
                language,
                output,
                strict,
                ignore_prefabs,
                no_vanilla,
                quiet,
            } => {
                let options = ignore_prefabs.iter().fold(
                    CatalogOptions::new()
                        .with_strict_localization(*strict)
                        .with_vanilla_knives(!*no_vanilla),
                    |options, prefab| options.with_ignored_prefab(prefab.as_str()),
                );
                catalog::build(items, language, output.as_deref(), &options, *quiet)
            }
            Commands::Parse {
                file,
                output,
                format,
            } => keyvalues::parse(file, output.as_deref(), *format),
            Commands::Token { language, token } => keyvalues::token(language, token),
            Commands::Skins {
                items,
                language,
                filter,
                limit,
            } => catalog::skins(items, language, filter.as_deref(), *limit),
        }
    }
}

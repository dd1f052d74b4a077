use clap::{Subcommand, ValueEnum};
use std::path::PathBuf;

pub mod catalog;
pub mod execute;
pub mod keyvalues;

/// Output format of `parse`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum TreeFormat {
    #[default]
    Json,
    Keyvalues,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build the full catalog from items_game.txt and a language file
    Build {
        /// Path to items_game.txt
        items: PathBuf,

        /// Path to a csgo_<language>.txt localization file
        language: PathBuf,

        /// Write the catalog JSON here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Fail on localization tokens missing from the language file
        #[arg(long)]
        strict: bool,

        /// Additional prefab id whose items are skipped (repeatable)
        #[arg(long = "ignore-prefab", value_name = "ID")]
        ignore_prefabs: Vec<String>,

        /// Do not add the vanilla (finish-less) knife variants
        #[arg(long)]
        no_vanilla: bool,

        /// Suppress progress output
        #[arg(short, long)]
        quiet: bool,
    },

    /// Parse one KeyValues file and dump the tree
    Parse {
        /// KeyValues file to parse
        file: PathBuf,

        /// Write the output here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = TreeFormat::Json)]
        format: TreeFormat,
    },

    /// Look up a localization token
    Token {
        /// Path to a csgo_<language>.txt localization file
        language: PathBuf,

        /// Token, with or without the leading '#' (case-insensitive)
        token: String,
    },

    /// Build the catalog and list matching skins
    Skins {
        /// Path to items_game.txt
        items: PathBuf,

        /// Path to a csgo_<language>.txt localization file
        language: PathBuf,

        /// Only list market hash names containing this text (case-insensitive)
        #[arg(short, long)]
        filter: Option<String>,

        /// Maximum number of skins to list
        #[arg(short, long, default_value_t = 50)]
        limit: usize,
    },
}

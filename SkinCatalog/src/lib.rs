//! # SkinCatalog
//!
//! A pure-Rust library for Counter-Strike 2's item definition files.
//!
//! ## Supported Formats
//!
//! - **KeyValues** - Valve's nested text format (`items_game.txt`)
//! - **Language files** - `csgo_<language>.txt` token tables, UTF-8 or UTF-16
//!
//! ## Quick Start
//!
//! ### Parsing KeyValues
//!
//! ```
//! use skincatalog::formats::{parse_keyvalues, crawl_str};
//!
//! let tree = parse_keyvalues("\"items_game\"\n{\n\t\"game_info\"\n\t{\n\t\t\"first_valid_item_slot\" \"0\"\n\t}\n}\n")?;
//! assert_eq!(crawl_str(&tree, &["items_game", "game_info", "first_valid_item_slot"])?, "0");
//! # Ok::<(), skincatalog::Error>(())
//! ```
//!
//! ### Building the Skin Catalog
//!
//! ```no_run
//! use skincatalog::catalog::{CatalogBuilder, CatalogOptions};
//!
//! let catalog = CatalogBuilder::new(CatalogOptions::default())
//!     .build_from_files("items_game.txt", "csgo_english.txt")?;
//! println!("{} skins", catalog.skins.len());
//! catalog.save_to_json("catalog.json")?;
//! # Ok::<(), skincatalog::Error>(())
//! ```
//!
//! ### Using the Prelude
//!
//! ```
//! use skincatalog::prelude::*;
//!
//! let options = CatalogOptions::new().with_vanilla_knives(false);
//! assert!(!options.include_vanilla_knives);
//! ```
//!
//! ## Feature Flags
//!
//! - `cli` - Enables the `skincatalog` command-line binary

pub mod catalog;
pub mod error;
pub mod formats;

// Re-exports for convenience
pub use error::{Error, Result};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::formats::{
        LanguageTable, NodeRef, ValueNode, crawl, crawl_section, crawl_str, optional_str,
        parse_keyvalues, read_keyvalues, serialize_keyvalues,
    };

    pub use crate::catalog::{
        Catalog, CatalogBuilder, CatalogOptions, CatalogStats, ItemRecord, ItemTables,
        QualityCapability, Skin, WearBand, build_catalog,
    };
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// CLI module (feature-gated)
#[cfg(feature = "cli")]
pub mod cli;

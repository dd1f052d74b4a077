//! CS2 item catalog
//!
//! Turns a parsed `items_game.txt` and a language file into typed lookup
//! tables and the full skin list.
//!
//! # Overview
//!
//! - **Prefabs**: multi-parent inheritance decides what kind of entity an
//!   item is
//! - **Loot lists**: sticker capsules reach their contents through
//!   `revolving_loot_lists` → `client_loot_lists`, possibly nested
//! - **Icons**: knives and gloves have no collection, so their finishes are
//!   recovered from `alternate_icons2/weapon_icons` paths
//! - **Skins**: item × paintkit × wear band × quality, merged by market hash
//!   name across crates
//!
//! # Usage
//!
//! ```no_run
//! use skincatalog::catalog::{CatalogBuilder, CatalogOptions};
//!
//! let builder = CatalogBuilder::new(CatalogOptions::default());
//! let catalog = builder.build_from_files("items_game.txt", "csgo_english.txt")?;
//! if let Some(skin) = catalog.skin("AK-47 | Redline (Field-Tested)") {
//!     println!("{:?}", skin.containers);
//! }
//! # Ok::<(), skincatalog::Error>(())
//! ```

mod builder;
mod classifier;
mod definitions;
mod icons;
mod localize;
mod loot_lists;
mod options;
mod paintkits;
mod prefabs;
mod sets;
mod skins;
mod stickerkits;
mod types;

use crate::error::{Error, Result};

pub use types::*;

pub use builder::{CatalogBuilder, build_catalog};
pub use classifier::{ItemClassifier, looks_like_sticker_capsule};
pub use definitions::{parse_keychains, parse_musickits, parse_qualities, parse_rarities};
pub use icons::{
    VANILLA_PAINTKIT, add_vanilla, extract_icon_pairs, find_longest_id_match, split_icon_path,
};
pub use localize::Localizer;
pub use loot_lists::{ClientLootList, LootListKind, LootLists, sticker_member};
pub use options::{CatalogOptions, DEFAULT_IGNORED_PREFABS};
pub use paintkits::{DEFAULT_MAX_FLOAT, DEFAULT_MIN_FLOAT, parse_paintkits};
pub use prefabs::{Prefab, PrefabKind, PrefabTable, base_kind, parent_ids};
pub use sets::{parse_weapon_sets, split_item_paintkit};
pub use skins::{SkinSynthesizer, available_wears, market_hash_name};
pub use stickerkits::{StickerKitKind, StickerKitTables, parse_sticker_kits, sticker_kit_kind};

/// Parses a numeric section key such as `items/7`.
pub(crate) fn parse_index(key: &str, path: &str) -> Result<u32> {
    key.trim().parse().map_err(|_| Error::InvalidNumber {
        path: path.to_string(),
        value: key.to_string(),
    })
}

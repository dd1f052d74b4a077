//! Type definitions for the item catalog

use crate::error::Result;
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Extra quality a container can grant on top of the normal one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum QualityCapability {
    #[default]
    Normal,
    StatTrak,
    Souvenir,
}

impl QualityCapability {
    /// The prefix used in market hash names. Empty for `Normal`.
    pub fn label(self) -> &'static str {
        match self {
            QualityCapability::Normal => "",
            QualityCapability::StatTrak => "StatTrak™",
            QualityCapability::Souvenir => "Souvenir",
        }
    }

    pub fn is_normal(self) -> bool {
        self == QualityCapability::Normal
    }
}

/// Named float subrange of a skin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WearBand {
    #[serde(rename = "Factory New")]
    FactoryNew,
    #[serde(rename = "Minimal Wear")]
    MinimalWear,
    #[serde(rename = "Field-Tested")]
    FieldTested,
    #[serde(rename = "Well-Worn")]
    WellWorn,
    #[serde(rename = "Battle-Scarred")]
    BattleScarred,
}

impl WearBand {
    /// All bands, lowest float first.
    pub const ALL: [WearBand; 5] = [
        WearBand::FactoryNew,
        WearBand::MinimalWear,
        WearBand::FieldTested,
        WearBand::WellWorn,
        WearBand::BattleScarred,
    ];

    pub fn name(self) -> &'static str {
        match self {
            WearBand::FactoryNew => "Factory New",
            WearBand::MinimalWear => "Minimal Wear",
            WearBand::FieldTested => "Field-Tested",
            WearBand::WellWorn => "Well-Worn",
            WearBand::BattleScarred => "Battle-Scarred",
        }
    }

    /// `(min, max)` float bounds of the band.
    pub fn range(self) -> (f64, f64) {
        match self {
            WearBand::FactoryNew => (0.0, 0.07),
            WearBand::MinimalWear => (0.07, 0.15),
            WearBand::FieldTested => (0.15, 0.37),
            WearBand::WellWorn => (0.37, 0.44),
            WearBand::BattleScarred => (0.44, 1.0),
        }
    }
}

impl std::fmt::Display for WearBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// Lookup tables
// ============================================================================

/// An item rarity (`rarities/<id>`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rarity {
    pub id: String,
    /// Localized `loc_key`
    pub name: String,
    /// Localized `loc_key_weapon`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weapon_name: Option<String>,
    /// Localized `loc_key_character`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub character_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// An item quality (`qualities/<id>`). Display-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quality {
    pub id: String,
    pub value: i32,
    #[serde(default)]
    pub weight: i32,
    #[serde(default, rename = "hexColor", skip_serializing_if = "Option::is_none")]
    pub hex_color: Option<String>,
}

/// A cosmetic finish (`paint_kits/<index>`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paintkit {
    pub id: String,
    pub index: u32,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// From `paint_kits_rarity/<id>`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rarity_id: Option<String>,
    pub min_float: f64,
    pub max_float: f64,
}

/// A sticker, spray or patch kit (`sticker_kits/<index>`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StickerKit {
    pub id: String,
    pub index: u32,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rarity_id: Option<String>,
}

/// A keychain charm (`keychain_definitions/<index>`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Keychain {
    pub id: String,
    pub index: u32,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rarity_id: Option<String>,
}

/// A music kit (`music_definitions/<index>`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Musickit {
    pub id: String,
    pub index: u32,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Paintkit id → item ids carrying that finish.
pub type PaintkitItems = IndexMap<String, Vec<String>>;

/// A collection (`item_sets/<id>`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeaponSet {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Paintkit id → item ids, from `[paintkit]item` member strings
    pub members: PaintkitItems,
    /// Agent (`customplayer_*`) members of character collections
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub characters: Vec<String>,
}

impl WeaponSet {
    /// Iterates `(item_id, paintkit_id)` pairs in set order.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.members.iter().flat_map(|(paintkit, items)| {
            items
                .iter()
                .map(move |item| (item.as_str(), paintkit.as_str()))
        })
    }
}

// ============================================================================
// Items
// ============================================================================

/// Fields shared by every classified item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// The `name` field, e.g. `weapon_ak47`
    pub id: String,
    /// The section key under `items`
    pub index: u32,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rarity_id: Option<String>,
}

/// A case or souvenir package linked to one or more collections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeaponCrate {
    #[serde(flatten)]
    pub item: Item,
    pub quality_capability: QualityCapability,
    pub weapon_set_ids: Vec<String>,
}

/// A capsule whose contents come from a sticker loot list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StickerCapsule {
    #[serde(flatten)]
    pub item: Item,
    pub member_sticker_kit_ids: Vec<String>,
}

/// A classified item record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemRecord {
    Weapon(Item),
    Knife(Item),
    Gloves(Item),
    Equipment(Item),
    WeaponCrate(WeaponCrate),
    StickerCapsule(StickerCapsule),
    Tool(Item),
    Character(Item),
    Collectible(Item),
}

impl ItemRecord {
    /// The shared item fields.
    pub fn item(&self) -> &Item {
        match self {
            ItemRecord::Weapon(item)
            | ItemRecord::Knife(item)
            | ItemRecord::Gloves(item)
            | ItemRecord::Equipment(item)
            | ItemRecord::Tool(item)
            | ItemRecord::Character(item)
            | ItemRecord::Collectible(item) => item,
            ItemRecord::WeaponCrate(c) => &c.item,
            ItemRecord::StickerCapsule(c) => &c.item,
        }
    }

    pub fn id(&self) -> &str {
        &self.item().id
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            ItemRecord::Weapon(_) => "weapon",
            ItemRecord::Knife(_) => "knife",
            ItemRecord::Gloves(_) => "gloves",
            ItemRecord::Equipment(_) => "equipment",
            ItemRecord::WeaponCrate(_) => "weapon crate",
            ItemRecord::StickerCapsule(_) => "sticker capsule",
            ItemRecord::Tool(_) => "tool",
            ItemRecord::Character(_) => "character",
            ItemRecord::Collectible(_) => "collectible",
        }
    }
}

/// Classified items, one table per kind, keyed by item id in source order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemTables {
    pub weapons: IndexMap<String, Item>,
    pub knives: IndexMap<String, Item>,
    pub gloves: IndexMap<String, Item>,
    pub equipment: IndexMap<String, Item>,
    pub weapon_crates: IndexMap<String, WeaponCrate>,
    pub sticker_capsules: IndexMap<String, StickerCapsule>,
    pub tools: IndexMap<String, Item>,
    pub characters: IndexMap<String, Item>,
    pub collectibles: IndexMap<String, Item>,
}

impl ItemTables {
    /// Files a record under its kind. A later record with the same id replaces
    /// the earlier one.
    pub fn insert(&mut self, record: ItemRecord) {
        match record {
            ItemRecord::Weapon(item) => {
                self.weapons.insert(item.id.clone(), item);
            }
            ItemRecord::Knife(item) => {
                self.knives.insert(item.id.clone(), item);
            }
            ItemRecord::Gloves(item) => {
                self.gloves.insert(item.id.clone(), item);
            }
            ItemRecord::Equipment(item) => {
                self.equipment.insert(item.id.clone(), item);
            }
            ItemRecord::WeaponCrate(c) => {
                self.weapon_crates.insert(c.item.id.clone(), c);
            }
            ItemRecord::StickerCapsule(c) => {
                self.sticker_capsules.insert(c.item.id.clone(), c);
            }
            ItemRecord::Tool(item) => {
                self.tools.insert(item.id.clone(), item);
            }
            ItemRecord::Character(item) => {
                self.characters.insert(item.id.clone(), item);
            }
            ItemRecord::Collectible(item) => {
                self.collectibles.insert(item.id.clone(), item);
            }
        }
    }

    /// Looks up an item that can carry a paintkit.
    ///
    /// Returns the item and whether it is "special" (gets the `★` prefix).
    pub fn skinnable(&self, id: &str) -> Option<(&Item, bool)> {
        if let Some(item) = self.weapons.get(id) {
            return Some((item, false));
        }
        if let Some(item) = self.knives.get(id) {
            return Some((item, true));
        }
        self.gloves.get(id).map(|item| (item, false))
    }

    /// Total number of classified items.
    pub fn len(&self) -> usize {
        self.weapons.len()
            + self.knives.len()
            + self.gloves.len()
            + self.equipment.len()
            + self.weapon_crates.len()
            + self.sticker_capsules.len()
            + self.tools.len()
            + self.characters.len()
            + self.collectibles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ============================================================================
// Skins
// ============================================================================

/// One synthesized skin variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skin {
    pub market_hash_name: String,
    pub item_id: String,
    /// `None` for the base (vanilla) variant of a knife
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paintkit_id: Option<String>,
    pub quality: QualityCapability,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wear: Option<WearBand>,
    pub min_float: f64,
    pub max_float: f64,
    /// Localized collection name, when the skin came from a collection
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection: Option<String>,
    /// Localized names of the crates that drop this skin
    #[serde(default)]
    pub containers: IndexSet<String>,
}

// ============================================================================
// Catalog
// ============================================================================

/// The complete catalog built from `items_game.txt` and a language file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    pub rarities: IndexMap<String, Rarity>,
    pub qualities: IndexMap<String, Quality>,
    pub paintkits: IndexMap<String, Paintkit>,
    pub keychains: IndexMap<String, Keychain>,
    pub musickits: IndexMap<String, Musickit>,
    pub weapon_sets: IndexMap<String, WeaponSet>,
    /// Paintkit id → knife ids recovered from icon paths
    pub knife_set: PaintkitItems,
    /// Paintkit id → glove ids recovered from icon paths
    pub glove_set: PaintkitItems,
    pub stickerkits: IndexMap<String, StickerKit>,
    pub spraykits: IndexMap<String, StickerKit>,
    pub patchkits: IndexMap<String, StickerKit>,
    pub items: ItemTables,
    /// Keyed by market hash name
    pub skins: IndexMap<String, Skin>,
}

impl Catalog {
    /// Get a skin by its market hash name
    pub fn skin(&self, market_hash_name: &str) -> Option<&Skin> {
        self.skins.get(market_hash_name)
    }

    /// Skins whose market hash name contains `needle` (case-insensitive).
    pub fn find_skins<'a>(&'a self, needle: &str) -> impl Iterator<Item = &'a Skin> + 'a {
        let needle = needle.to_lowercase();
        self.skins
            .values()
            .filter(move |skin| skin.market_hash_name.to_lowercase().contains(&needle))
    }

    /// Get count statistics
    pub fn stats(&self) -> CatalogStats {
        CatalogStats {
            rarity_count: self.rarities.len(),
            quality_count: self.qualities.len(),
            paintkit_count: self.paintkits.len(),
            weapon_set_count: self.weapon_sets.len(),
            sticker_kit_count: self.stickerkits.len()
                + self.spraykits.len()
                + self.patchkits.len(),
            keychain_count: self.keychains.len(),
            musickit_count: self.musickits.len(),
            item_count: self.items.len(),
            crate_count: self.items.weapon_crates.len() + self.items.sticker_capsules.len(),
            skin_count: self.skins.len(),
        }
    }

    /// Save the catalog to a JSON file
    ///
    /// # Errors
    /// Returns an error if serialization or file writing fails.
    pub fn save_to_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load a catalog from a JSON file
    ///
    /// # Errors
    /// Returns an error if reading or deserialization fails.
    pub fn load_from_json<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }
}

/// Table sizes of a [`Catalog`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CatalogStats {
    pub rarity_count: usize,
    pub quality_count: usize,
    pub paintkit_count: usize,
    pub weapon_set_count: usize,
    pub sticker_kit_count: usize,
    pub keychain_count: usize,
    pub musickit_count: usize,
    pub item_count: usize,
    pub crate_count: usize,
    pub skin_count: usize,
}

//! Item classification
//!
//! Maps each raw `items/<index>` record to a typed [`ItemRecord`], using the
//! prefab chain first and tag / loot-list data where the prefab alone is
//! ambiguous.

use super::localize::Localizer;
use super::loot_lists::LootLists;
use super::options::CatalogOptions;
use super::parse_index;
use super::prefabs::{PrefabKind, PrefabTable, parent_ids};
use super::types::{Item, ItemRecord, ItemTables, QualityCapability, StickerCapsule, WeaponCrate};
use crate::error::{Error, Result};
use crate::formats::NodeRef;

/// Id prefixes of sticker capsules that carry no usable prefab.
const CAPSULE_ID_PREFIXES: &[&str] = &["crate_sticker_pack_", "crate_signature_pack_"];

const MELEE_GEAR_SLOT: &str = "melee";

/// Whether an item with an unresolvable prefab looks like a sticker capsule,
/// judging by its `StickerCapsule` tag group or its id.
pub fn looks_like_sticker_capsule(id: Option<&str>, tag_group: Option<&str>) -> bool {
    tag_group == Some("StickerCapsule")
        || id.is_some_and(|id| CAPSULE_ID_PREFIXES.iter().any(|p| id.starts_with(p)))
}

/// Classifies raw item records.
pub struct ItemClassifier<'a> {
    prefabs: &'a PrefabTable<'a>,
    loot_lists: &'a LootLists,
    localizer: Localizer<'a>,
    options: &'a CatalogOptions,
}

impl<'a> ItemClassifier<'a> {
    pub fn new(
        prefabs: &'a PrefabTable<'a>,
        loot_lists: &'a LootLists,
        localizer: Localizer<'a>,
        options: &'a CatalogOptions,
    ) -> Self {
        Self {
            prefabs,
            loot_lists,
            localizer,
            options,
        }
    }

    /// Classifies every entry under `items_game/items`.
    ///
    /// # Errors
    /// `NotFound` if there is no `items` section, plus any error from
    /// [`ItemClassifier::classify`].
    pub fn classify_all(&self, items_game: &NodeRef<'a>) -> Result<ItemTables> {
        let section = items_game.section(&["items"])?;
        let mut tables = ItemTables::default();
        let mut ignored = 0usize;

        for (key, node) in section.entries() {
            match self.classify(key, &node)? {
                Some(record) => tables.insert(record),
                None => ignored += 1,
            }
        }

        tracing::info!(
            "Classified {} items ({} weapons, {} knives, {} gloves, {} crates, {} capsules), ignored {}",
            tables.len(),
            tables.weapons.len(),
            tables.knives.len(),
            tables.gloves.len(),
            tables.weapon_crates.len(),
            tables.sticker_capsules.len(),
            ignored
        );
        Ok(tables)
    }

    /// Classifies one item record. `key` is its section key under `items`.
    ///
    /// Returns `Ok(None)` for items that are deliberately left out: ignored
    /// prefabs, unresolvable prefabs, and case-like items with neither a
    /// collection nor a sticker loot list.
    ///
    /// # Errors
    /// `TypeMismatch` / `NotFound` / `InvalidNumber` for malformed records of
    /// a recognized kind, `CyclicPrefab` / `CyclicLootList` for loops, and
    /// `UnresolvedReference` for missing tokens under strict localization.
    pub fn classify(&self, key: &str, node: &NodeRef<'a>) -> Result<Option<ItemRecord>> {
        let node = node.section(&[])?;
        let parents = node.opt_str(&["prefab"])?.map(parent_ids).unwrap_or_default();

        if let Some(prefab) = parents.iter().find(|p| self.options.is_ignored_prefab(p)) {
            tracing::debug!("Ignoring {} (prefab {prefab})", node.path());
            return Ok(None);
        }

        let id = node.opt_str(&["name"])?;
        let kind = self.prefabs.resolve_parents(&parents)?;

        if !kind.is_known() {
            let tag_group = node.opt_str(&["tags", "StickerCapsule", "tag_group"])?;
            if looks_like_sticker_capsule(id, tag_group) {
                return self.sticker_capsule(key, &node, &parents, false);
            }
        }

        let record = match kind {
            PrefabKind::Unknown => {
                tracing::debug!("Ignoring {} (unrecognized prefab {:?})", node.path(), parents);
                return Ok(None);
            }
            PrefabKind::Equipment => {
                let own = node.opt_str(&["item_gear_slot"])?;
                let slot = match own {
                    Some(slot) => Some(slot),
                    None => self.prefabs.inherited_scalar(&parents, "item_gear_slot")?,
                };
                let item = self.base_item(key, &node, &parents, None)?;
                if slot == Some(MELEE_GEAR_SLOT) {
                    ItemRecord::Weapon(item)
                } else {
                    ItemRecord::Equipment(item)
                }
            }
            PrefabKind::Weapon => ItemRecord::Weapon(self.base_item(key, &node, &parents, None)?),
            PrefabKind::Knife => ItemRecord::Knife(self.base_item(key, &node, &parents, None)?),
            PrefabKind::Gloves => ItemRecord::Gloves(self.base_item(key, &node, &parents, None)?),
            PrefabKind::Tool => ItemRecord::Tool(self.base_item(key, &node, &parents, None)?),
            PrefabKind::Character => {
                ItemRecord::Character(self.base_item(key, &node, &parents, None)?)
            }
            PrefabKind::Collectible => {
                ItemRecord::Collectible(self.base_item(key, &node, &parents, None)?)
            }
            PrefabKind::WeaponCase(quality) => {
                ItemRecord::WeaponCrate(self.weapon_crate(key, &node, &parents, quality)?)
            }
            PrefabKind::WeaponCaseBase => {
                if node.opt_str(&["tags", "ItemSet", "tag_value"])?.is_some() {
                    ItemRecord::WeaponCrate(self.weapon_crate(
                        key,
                        &node,
                        &parents,
                        QualityCapability::Normal,
                    )?)
                } else {
                    return self.sticker_capsule(key, &node, &parents, false);
                }
            }
            PrefabKind::StickerCapsule => {
                return self.sticker_capsule(key, &node, &parents, true);
            }
        };

        Ok(Some(record))
    }

    fn weapon_crate(
        &self,
        key: &str,
        node: &NodeRef<'a>,
        parents: &[&str],
        quality_capability: QualityCapability,
    ) -> Result<WeaponCrate> {
        let weapon_set_ids = node
            .opt_str(&["tags", "ItemSet", "tag_value"])?
            .map(|set| vec![set.to_string()])
            .unwrap_or_default();
        Ok(WeaponCrate {
            item: self.base_item(key, node, parents, None)?,
            quality_capability,
            weapon_set_ids,
        })
    }

    /// Builds a capsule from the item's loot-list series.
    ///
    /// Without a sticker loot list the item is dropped, unless `keep_empty`
    /// is set (its prefab already says it is a capsule).
    fn sticker_capsule(
        &self,
        key: &str,
        node: &NodeRef<'a>,
        parents: &[&str],
        keep_empty: bool,
    ) -> Result<Option<ItemRecord>> {
        let series = node.opt_str(&["attributes", "set supply crate series", "value"])?;
        let members = match series {
            Some(series) => self.loot_lists.capsule_members(series)?,
            None => None,
        };

        let member_sticker_kit_ids = match members {
            Some(members) => members,
            None if keep_empty => Vec::new(),
            None => {
                tracing::debug!("Ignoring {} (no sticker loot list)", node.path());
                return Ok(None);
            }
        };

        let name_override = node.opt_str(&["tags", "StickerCapsule", "tag_text"])?;
        Ok(Some(ItemRecord::StickerCapsule(StickerCapsule {
            item: self.base_item(key, node, parents, name_override)?,
            member_sticker_kit_ids,
        })))
    }

    /// Common item fields, falling back to prefab values for the name,
    /// description and rarity.
    fn base_item(
        &self,
        key: &str,
        node: &NodeRef<'a>,
        parents: &[&str],
        name_override: Option<&str>,
    ) -> Result<Item> {
        let path = node.path();
        let id = node.str(&["name"])?;
        let index = parse_index(key, path)?;

        let name_token = match name_override {
            Some(token) => Some(token),
            None => self.own_or_inherited(node, parents, "item_name")?,
        };
        let name_token = name_token.ok_or_else(|| Error::NotFound {
            path: format!("{path}/item_name"),
        })?;
        let description_token = self.own_or_inherited(node, parents, "item_description")?;

        Ok(Item {
            id: id.to_string(),
            index,
            name: self.localizer.text(name_token, &format!("{path}/item_name"))?,
            description: self
                .localizer
                .opt_text(description_token, &format!("{path}/item_description"))?,
            rarity_id: self
                .own_or_inherited(node, parents, "item_rarity")?
                .map(str::to_string),
        })
    }

    fn own_or_inherited(
        &self,
        node: &NodeRef<'a>,
        parents: &[&str],
        key: &str,
    ) -> Result<Option<&'a str>> {
        match node.opt_str(&[key])? {
            Some(value) => Ok(Some(value)),
            None => self.prefabs.inherited_scalar(parents, key),
        }
    }
}

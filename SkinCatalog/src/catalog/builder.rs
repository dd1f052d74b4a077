//! The catalog pipeline: tables → classification → icon sets → skins

use super::classifier::ItemClassifier;
use super::definitions::{parse_keychains, parse_musickits, parse_qualities, parse_rarities};
use super::icons::{add_vanilla, extract_icon_pairs};
use super::localize::Localizer;
use super::loot_lists::LootLists;
use super::options::CatalogOptions;
use super::paintkits::parse_paintkits;
use super::prefabs::PrefabTable;
use super::sets::parse_weapon_sets;
use super::skins::SkinSynthesizer;
use super::stickerkits::parse_sticker_kits;
use super::types::Catalog;
use crate::error::Result;
use crate::formats::{LanguageTable, NodeRef, ValueNode, read_keyvalues};
use std::path::Path;

/// Builds a [`Catalog`] from a parsed `items_game` tree and language tree.
#[derive(Debug, Clone, Default)]
pub struct CatalogBuilder {
    options: CatalogOptions,
}

impl CatalogBuilder {
    pub fn new(options: CatalogOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &CatalogOptions {
        &self.options
    }

    /// Parses both files and builds the catalog.
    ///
    /// # Errors
    /// Any read or parse error, plus everything [`CatalogBuilder::build`]
    /// can return.
    pub fn build_from_files<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        items_path: P,
        language_path: Q,
    ) -> Result<Catalog> {
        let items = read_keyvalues(items_path)?;
        let table = LanguageTable::from_file(language_path)?;
        self.build_with_table(&items, &table)
    }

    /// Builds the catalog from the two parsed trees.
    ///
    /// # Errors
    /// `NotFound` / `TypeMismatch` / `InvalidNumber` for malformed input,
    /// `CyclicPrefab` / `CyclicLootList` for inheritance loops, and
    /// `UnresolvedReference` for dangling ids (or missing tokens under strict
    /// localization).
    pub fn build(&self, items: &ValueNode, language: &ValueNode) -> Result<Catalog> {
        let table = LanguageTable::from_tree(language)?;
        self.build_with_table(items, &table)
    }

    /// Builds the catalog against an already loaded language table.
    ///
    /// # Errors
    /// Same as [`CatalogBuilder::build`].
    pub fn build_with_table(&self, items: &ValueNode, table: &LanguageTable) -> Result<Catalog> {
        let root = NodeRef::root(items).section(&["items_game"])?;
        let localizer = Localizer::new(table, self.options.strict_localization);

        let prefabs = PrefabTable::from_items(&root)?;
        let loot_lists = LootLists::from_items(&root)?;

        let rarities = parse_rarities(&root, &localizer)?;
        let qualities = parse_qualities(&root)?;
        let paintkits = parse_paintkits(&root, &localizer)?;
        let kits = parse_sticker_kits(&root, &localizer)?;
        let keychains = parse_keychains(&root, &localizer)?;
        let musickits = parse_musickits(&root, &localizer)?;
        let weapon_sets = parse_weapon_sets(&root, &localizer)?;

        let items = ItemClassifier::new(&prefabs, &loot_lists, localizer, &self.options)
            .classify_all(&root)?;

        let mut knife_set = extract_icon_pairs(&root, items.knives.keys().map(String::as_str))?;
        if self.options.include_vanilla_knives {
            add_vanilla(&mut knife_set, items.knives.keys().map(String::as_str));
        }
        let glove_set = extract_icon_pairs(&root, items.gloves.keys().map(String::as_str))?;

        let skins =
            SkinSynthesizer::new(&items, &paintkits, &weapon_sets).synthesize(&knife_set, &glove_set)?;

        let catalog = Catalog {
            rarities,
            qualities,
            paintkits,
            keychains,
            musickits,
            weapon_sets,
            knife_set,
            glove_set,
            stickerkits: kits.stickers,
            spraykits: kits.sprays,
            patchkits: kits.patches,
            items,
            skins,
        };

        let stats = catalog.stats();
        tracing::info!(
            "Built catalog: {} items, {} crates, {} paintkits, {} sets, {} skins",
            stats.item_count,
            stats.crate_count,
            stats.paintkit_count,
            stats.weapon_set_count,
            stats.skin_count
        );
        Ok(catalog)
    }
}

/// Builds a catalog with the given options.
///
/// # Errors
/// See [`CatalogBuilder::build`].
pub fn build_catalog(
    items: &ValueNode,
    language: &ValueNode,
    options: &CatalogOptions,
) -> Result<Catalog> {
    CatalogBuilder::new(options.clone()).build(items, language)
}

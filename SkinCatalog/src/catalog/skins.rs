//! Skin synthesis: item × paintkit × wear band × quality

use super::icons::VANILLA_PAINTKIT;
use super::types::{
    Item, ItemTables, Paintkit, PaintkitItems, QualityCapability, Skin, WearBand, WeaponSet,
};
use crate::error::{Error, Result};
use indexmap::{IndexMap, IndexSet};

const SPECIAL_PREFIX: &str = "★ ";

/// Wear bands a paintkit with the given float range can appear in.
///
/// A band `[lo, hi)` is available when `max_float > lo` and
/// `min_float <= hi`.
pub fn available_wears(min_float: f64, max_float: f64) -> Vec<WearBand> {
    WearBand::ALL
        .into_iter()
        .filter(|band| {
            let (lo, hi) = band.range();
            max_float > lo && min_float <= hi
        })
        .collect()
}

/// Builds `[★ ][quality ]<item>[ | <paintkit> (<wear>)]`.
pub fn market_hash_name(
    special: bool,
    quality: QualityCapability,
    item_name: &str,
    finish: Option<(&str, WearBand)>,
) -> String {
    let mut name = String::new();
    if special {
        name.push_str(SPECIAL_PREFIX);
    }
    if !quality.is_normal() {
        name.push_str(quality.label());
        name.push(' ');
    }
    name.push_str(item_name);
    if let Some((paintkit_name, wear)) = finish {
        name.push_str(" | ");
        name.push_str(paintkit_name);
        name.push_str(" (");
        name.push_str(wear.name());
        name.push(')');
    }
    name
}

/// Where a skin came from, when it came from a crate.
#[derive(Debug, Clone, Copy)]
struct Provenance<'p> {
    collection: &'p str,
    container: &'p str,
}

/// Produces the skin table from classified items and paintkits.
pub struct SkinSynthesizer<'a> {
    items: &'a ItemTables,
    paintkits: &'a IndexMap<String, Paintkit>,
    weapon_sets: &'a IndexMap<String, WeaponSet>,
}

impl<'a> SkinSynthesizer<'a> {
    pub fn new(
        items: &'a ItemTables,
        paintkits: &'a IndexMap<String, Paintkit>,
        weapon_sets: &'a IndexMap<String, WeaponSet>,
    ) -> Self {
        Self {
            items,
            paintkits,
            weapon_sets,
        }
    }

    /// Synthesizes every skin, keyed by market hash name.
    ///
    /// Crates are visited in source order, then the knife set (StatTrak
    /// capable) and the glove set. A name reached twice is merged and its
    /// container set extended.
    ///
    /// # Errors
    /// `UnresolvedReference` when a crate names an unknown item set, or a
    /// pair names an unknown item or paintkit.
    pub fn synthesize(
        &self,
        knife_set: &PaintkitItems,
        glove_set: &PaintkitItems,
    ) -> Result<IndexMap<String, Skin>> {
        let mut skins = IndexMap::new();

        for case in self.items.weapon_crates.values() {
            if case.weapon_set_ids.is_empty() {
                tracing::debug!("Crate {} has no item set", case.item.id);
            }
            for set_id in &case.weapon_set_ids {
                let set = self.weapon_sets.get(set_id).ok_or_else(|| {
                    Error::unresolved("item set", set_id, format!("crate {}", case.item.id))
                })?;
                if set.members.is_empty() {
                    tracing::debug!("Item set {set_id} has no paintable members");
                    continue;
                }
                let provenance = Provenance {
                    collection: &set.name,
                    container: &case.item.name,
                };
                for (item_id, paintkit_id) in set.pairs() {
                    self.emit(
                        &mut skins,
                        item_id,
                        paintkit_id,
                        case.quality_capability,
                        Some(provenance),
                        set_id,
                    )?;
                }
            }
        }

        for (paintkit_id, knives) in knife_set {
            for item_id in knives {
                self.emit(
                    &mut skins,
                    item_id,
                    paintkit_id,
                    QualityCapability::StatTrak,
                    None,
                    "knife icons",
                )?;
            }
        }

        for (paintkit_id, gloves) in glove_set {
            for item_id in gloves {
                self.emit(
                    &mut skins,
                    item_id,
                    paintkit_id,
                    QualityCapability::Normal,
                    None,
                    "glove icons",
                )?;
            }
        }

        tracing::info!("Synthesized {} skins", skins.len());
        Ok(skins)
    }

    fn emit(
        &self,
        skins: &mut IndexMap<String, Skin>,
        item_id: &str,
        paintkit_id: &str,
        capability: QualityCapability,
        provenance: Option<Provenance<'_>>,
        context: &str,
    ) -> Result<()> {
        let (item, special) = self
            .items
            .skinnable(item_id)
            .ok_or_else(|| Error::unresolved("item", item_id, context))?;

        if paintkit_id == VANILLA_PAINTKIT {
            for quality in qualities(capability) {
                let skin = base_skin(item, special, quality);
                merge(skins, skin, provenance);
            }
            return Ok(());
        }

        let paintkit = self
            .paintkits
            .get(paintkit_id)
            .ok_or_else(|| Error::unresolved("paintkit", paintkit_id, context))?;

        for wear in available_wears(paintkit.min_float, paintkit.max_float) {
            for quality in qualities(capability) {
                let skin = Skin {
                    market_hash_name: market_hash_name(
                        special,
                        quality,
                        &item.name,
                        Some((&paintkit.name, wear)),
                    ),
                    item_id: item.id.clone(),
                    paintkit_id: Some(paintkit.id.clone()),
                    quality,
                    wear: Some(wear),
                    min_float: paintkit.min_float,
                    max_float: paintkit.max_float,
                    collection: None,
                    containers: IndexSet::new(),
                };
                merge(skins, skin, provenance);
            }
        }
        Ok(())
    }
}

/// Normal quality, plus the capability when it is not normal.
fn qualities(capability: QualityCapability) -> impl Iterator<Item = QualityCapability> {
    std::iter::once(QualityCapability::Normal)
        .chain((!capability.is_normal()).then_some(capability))
}

/// The finish-less variant of an item.
fn base_skin(item: &Item, special: bool, quality: QualityCapability) -> Skin {
    Skin {
        market_hash_name: market_hash_name(special, quality, &item.name, None),
        item_id: item.id.clone(),
        paintkit_id: None,
        quality,
        wear: None,
        min_float: 0.0,
        max_float: 1.0,
        collection: None,
        containers: IndexSet::new(),
    }
}

fn merge(skins: &mut IndexMap<String, Skin>, mut skin: Skin, provenance: Option<Provenance<'_>>) {
    if let Some(existing) = skins.get_mut(&skin.market_hash_name) {
        if let Some(p) = provenance {
            existing.containers.insert(p.container.to_string());
            if existing.collection.is_none() {
                existing.collection = Some(p.collection.to_string());
            }
        }
        return;
    }

    if let Some(p) = provenance {
        skin.collection = Some(p.collection.to_string());
        skin.containers.insert(p.container.to_string());
    }
    skins.insert(skin.market_hash_name.clone(), skin);
}

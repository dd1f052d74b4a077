//! Paintkits (`paint_kits` + `paint_kits_rarity`)

use super::localize::Localizer;
use super::parse_index;
use super::types::Paintkit;
use crate::error::Result;
use crate::formats::NodeRef;
use indexmap::IndexMap;

/// Float range used when a paintkit has no `wear_remap_min`.
pub const DEFAULT_MIN_FLOAT: f64 = 0.06;
/// Float range used when a paintkit has no `wear_remap_max`.
pub const DEFAULT_MAX_FLOAT: f64 = 0.8;

/// Parses `paint_kits`, keyed by paintkit id.
///
/// # Errors
/// `NotFound` if the table or a kit's `name` is missing, `InvalidNumber` for
/// a non-numeric index or wear bound.
pub fn parse_paintkits(
    items_game: &NodeRef<'_>,
    localizer: &Localizer<'_>,
) -> Result<IndexMap<String, Paintkit>> {
    let section = items_game.section(&["paint_kits"])?;
    let rarities = items_game.opt_section(&["paint_kits_rarity"])?;
    let mut paintkits = IndexMap::with_capacity(section.node().len());

    for (key, node) in section.entries() {
        let node = node.section(&[])?;
        let index = parse_index(key, node.path())?;
        let id = node.str(&["name"])?;

        let name = match node.opt_str(&["description_tag"])? {
            Some(token) => localizer.text(token, &format!("{}/description_tag", node.path()))?,
            None => id.to_string(),
        };
        let description = localizer.opt_text(
            node.opt_str(&["description_string"])?,
            &format!("{}/description_string", node.path()),
        )?;
        let rarity_id = match &rarities {
            Some(r) => r.opt_str(&[id])?.map(str::to_string),
            None => None,
        };

        paintkits.insert(
            id.to_string(),
            Paintkit {
                id: id.to_string(),
                index,
                name,
                description,
                rarity_id,
                min_float: node.opt_parse(&["wear_remap_min"])?.unwrap_or(DEFAULT_MIN_FLOAT),
                max_float: node.opt_parse(&["wear_remap_max"])?.unwrap_or(DEFAULT_MAX_FLOAT),
            },
        );
    }

    tracing::debug!("Loaded {} paintkits", paintkits.len());
    Ok(paintkits)
}

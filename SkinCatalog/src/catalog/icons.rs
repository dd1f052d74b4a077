//! Item/paintkit pairs recovered from icon paths
//!
//! Knives and gloves do not appear in any collection. Their finishes are only
//! discoverable through `alternate_icons2/weapon_icons`, whose paths look like
//! `econ/default_generated/<item id>_<paintkit id>_<light|medium|heavy>`.

use super::types::PaintkitItems;
use crate::error::{Error, Result};
use crate::formats::NodeRef;

const ICON_PREFIX: &str = "econ/default_generated/";
const ICON_SUFFIX: &str = "_light";

/// Paintkit id given to the finish-less base variant of every knife.
pub const VANILLA_PAINTKIT: &str = "vanilla";

/// Finds the longest id that occurs in `path`.
///
/// Equal-length matches are broken by earliest position in the path, then by
/// lexicographic order, so the result does not depend on iteration order.
pub fn find_longest_id_match<'i, I>(ids: I, path: &str) -> Option<&'i str>
where
    I: IntoIterator<Item = &'i str>,
{
    ids.into_iter()
        .filter_map(|id| path.find(id).map(|pos| (id, pos)))
        .min_by(|(a, a_pos), (b, b_pos)| {
            b.len()
                .cmp(&a.len())
                .then(a_pos.cmp(b_pos))
                .then(a.cmp(b))
        })
        .map(|(id, _)| id)
}

/// Extracts the paintkit id from an icon path known to contain `item_id`.
///
/// The path tail is split on `_`; the item id must be a whole prefix of those
/// components, and the paintkit is everything after it minus the trailing
/// wear-quality component.
///
/// # Errors
/// `InvalidIconPath` if the tail does not start with `item_id` or leaves no
/// paintkit component.
pub fn split_icon_path(item_id: &str, path: &str) -> Result<String> {
    let invalid = || Error::InvalidIconPath {
        path: path.to_string(),
        item_id: item_id.to_string(),
    };

    let tail = path.strip_prefix(ICON_PREFIX).unwrap_or(path);
    let components: Vec<&str> = tail.split('_').collect();
    let id_len = item_id.split('_').count();

    if components.len() < id_len + 2 || components[..id_len].join("_") != item_id {
        return Err(invalid());
    }

    let paintkit = components[id_len..components.len() - 1].join("_");
    if paintkit.is_empty() {
        return Err(invalid());
    }
    Ok(paintkit)
}

/// Scans `alternate_icons2/weapon_icons` for icons of the given items.
///
/// Only `_light` icons are used since every finish is listed once per
/// rendering. Paths matching none of `item_ids` are skipped. A missing icon
/// table yields an empty set.
///
/// # Errors
/// `NotFound` / `TypeMismatch` for malformed icon entries, `InvalidIconPath`
/// if a matching path cannot be split.
pub fn extract_icon_pairs<'i, I>(items_game: &NodeRef<'_>, item_ids: I) -> Result<PaintkitItems>
where
    I: IntoIterator<Item = &'i str>,
    I::IntoIter: Clone,
{
    let ids = item_ids.into_iter();
    let mut set = PaintkitItems::new();

    let Some(icons) = items_game.opt_section(&["alternate_icons2", "weapon_icons"])? else {
        tracing::debug!("No alternate_icons2/weapon_icons table");
        return Ok(set);
    };

    let mut skipped = 0usize;
    for (_, icon) in icons.entries() {
        let path = icon.str(&["icon_path"])?;
        if !path.ends_with(ICON_SUFFIX) {
            continue;
        }
        let Some(item_id) = find_longest_id_match(ids.clone(), path) else {
            skipped += 1;
            continue;
        };
        let paintkit = split_icon_path(item_id, path)?;
        let items = set.entry(paintkit).or_default();
        if !items.iter().any(|i| i == item_id) {
            items.push(item_id.to_string());
        }
    }

    tracing::debug!(
        "Recovered {} paintkits from icons ({} unmatched icons skipped)",
        set.len(),
        skipped
    );
    Ok(set)
}

/// Adds the `vanilla` entry listing every knife.
pub fn add_vanilla<'i>(set: &mut PaintkitItems, knife_ids: impl IntoIterator<Item = &'i str>) {
    let vanilla = set.entry(VANILLA_PAINTKIT.to_string()).or_default();
    for id in knife_ids {
        if !vanilla.iter().any(|v| v == id) {
            vanilla.push(id.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::parse_keyvalues;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_longest_match_prefers_variant() {
        let ids = ["weapon_bayonet", "weapon_knife_m9_bayonet", "weapon_knife"];
        assert_eq!(
            find_longest_id_match(ids, "econ/default_generated/weapon_knife_m9_bayonet_aa_fade_light"),
            Some("weapon_knife_m9_bayonet")
        );
        assert_eq!(
            find_longest_id_match(ids, "econ/default_generated/weapon_bayonet_aa_fade_light"),
            Some("weapon_bayonet")
        );
        assert_eq!(find_longest_id_match(ids, "econ/default_generated/sticker_light"), None);
    }

    #[test]
    fn test_tie_break_is_order_independent() {
        let path = "econ/default_generated/abc_xyz_light";
        assert_eq!(find_longest_id_match(["xyz", "abc"], path), Some("abc"));
        assert_eq!(find_longest_id_match(["abc", "xyz"], path), Some("abc"));
    }

    #[test]
    fn test_split_icon_path() {
        assert_eq!(
            split_icon_path(
                "weapon_knife_karambit",
                "econ/default_generated/weapon_knife_karambit_am_zebra_dark_light"
            )
            .unwrap(),
            "am_zebra_dark"
        );
        assert_eq!(
            split_icon_path(
                "studded_bloodhound_gloves",
                "econ/default_generated/studded_bloodhound_gloves_bloodhound_black_silver_light"
            )
            .unwrap(),
            "bloodhound_black_silver"
        );
    }

    #[test]
    fn test_split_icon_path_errors() {
        // Item id appears mid-path
        assert!(matches!(
            split_icon_path("knife", "econ/default_generated/weapon_knife_fade_light"),
            Err(Error::InvalidIconPath { .. })
        ));
        // No paintkit component
        assert!(split_icon_path("weapon_knife", "econ/default_generated/weapon_knife_light").is_err());
    }

    fn icon_table(paths: &[&str]) -> String {
        let mut text = String::from("\"items_game\"\n{\n\"alternate_icons2\"\n{\n\"weapon_icons\"\n{\n");
        for (i, path) in paths.iter().enumerate() {
            text.push_str(&format!("\"{i}\"\n{{\n\"icon_path\" \"{path}\"\n}}\n"));
        }
        text.push_str("}\n}\n}\n");
        text
    }

    #[test]
    fn test_extract_icon_pairs() {
        let text = icon_table(&[
            "econ/default_generated/weapon_bayonet_aa_fade_light",
            "econ/default_generated/weapon_bayonet_aa_fade_medium",
            "econ/default_generated/weapon_bayonet_aa_fade_heavy",
            "econ/default_generated/weapon_knife_m9_bayonet_aa_fade_light",
            "econ/default_generated/weapon_ak47_cu_ak47_cobra_light",
            "econ/default_generated/weapon_bayonet_hy_ddpat_light",
            "econ/default_generated/weapon_bayonet_aa_fade_light",
        ]);

        let tree = parse_keyvalues(&text).unwrap();
        let root = NodeRef::root(&tree).section(&["items_game"]).unwrap();
        let knives = ["weapon_bayonet", "weapon_knife_m9_bayonet"];

        let mut set = extract_icon_pairs(&root, knives).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(
            set.get("aa_fade").unwrap(),
            &vec!["weapon_bayonet".to_string(), "weapon_knife_m9_bayonet".to_string()]
        );
        assert_eq!(set.get("hy_ddpat").unwrap(), &vec!["weapon_bayonet".to_string()]);

        add_vanilla(&mut set, knives);
        assert_eq!(set.get(VANILLA_PAINTKIT).unwrap().len(), 2);
    }
}

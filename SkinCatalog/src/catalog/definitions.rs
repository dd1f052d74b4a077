//! Small lookup tables: rarities, qualities, keychains, music kits

use super::localize::Localizer;
use super::parse_index;
use super::types::{Keychain, Musickit, Quality, Rarity};
use crate::error::Result;
use crate::formats::NodeRef;
use indexmap::IndexMap;

/// Parses `rarities`, keyed by rarity id.
///
/// # Errors
/// `NotFound` if a rarity lacks `loc_key`.
pub fn parse_rarities(
    items_game: &NodeRef<'_>,
    localizer: &Localizer<'_>,
) -> Result<IndexMap<String, Rarity>> {
    let mut rarities = IndexMap::new();
    let Some(section) = items_game.opt_section(&["rarities"])? else {
        tracing::debug!("No rarities table");
        return Ok(rarities);
    };

    for (id, node) in section.entries() {
        let node = node.section(&[])?;
        let path = node.path();
        let rarity = Rarity {
            id: id.to_string(),
            name: localizer.text(node.str(&["loc_key"])?, &format!("{path}/loc_key"))?,
            weapon_name: localizer.opt_text(
                node.opt_str(&["loc_key_weapon"])?,
                &format!("{path}/loc_key_weapon"),
            )?,
            character_name: localizer.opt_text(
                node.opt_str(&["loc_key_character"])?,
                &format!("{path}/loc_key_character"),
            )?,
            color: node.opt_str(&["color"])?.map(str::to_string),
        };
        rarities.insert(rarity.id.clone(), rarity);
    }
    Ok(rarities)
}

/// Parses `qualities`, keyed by quality id.
///
/// # Errors
/// `NotFound` if a quality lacks `value`, `InvalidNumber` for non-integer
/// `value`/`weight`.
pub fn parse_qualities(items_game: &NodeRef<'_>) -> Result<IndexMap<String, Quality>> {
    let mut qualities = IndexMap::new();
    let Some(section) = items_game.opt_section(&["qualities"])? else {
        tracing::debug!("No qualities table");
        return Ok(qualities);
    };

    for (id, node) in section.entries() {
        let node = node.section(&[])?;
        let quality = Quality {
            id: id.to_string(),
            value: node.parse(&["value"])?,
            weight: node.opt_parse(&["weight"])?.unwrap_or(0),
            hex_color: node.opt_str(&["hexColor"])?.map(str::to_string),
        };
        qualities.insert(quality.id.clone(), quality);
    }
    Ok(qualities)
}

/// Parses `keychain_definitions`, keyed by keychain id.
///
/// # Errors
/// `NotFound` if an entry lacks `name` or `loc_name`, `InvalidNumber` for a
/// non-numeric index.
pub fn parse_keychains(
    items_game: &NodeRef<'_>,
    localizer: &Localizer<'_>,
) -> Result<IndexMap<String, Keychain>> {
    let mut keychains = IndexMap::new();
    let Some(section) = items_game.opt_section(&["keychain_definitions"])? else {
        tracing::debug!("No keychain_definitions table");
        return Ok(keychains);
    };

    for (key, node) in section.entries() {
        let node = node.section(&[])?;
        let path = node.path();
        let keychain = Keychain {
            id: node.str(&["name"])?.to_string(),
            index: parse_index(key, path)?,
            name: localizer.text(node.str(&["loc_name"])?, &format!("{path}/loc_name"))?,
            description: localizer.opt_text(
                node.opt_str(&["loc_description"])?,
                &format!("{path}/loc_description"),
            )?,
            rarity_id: node.opt_str(&["item_rarity"])?.map(str::to_string),
        };
        keychains.insert(keychain.id.clone(), keychain);
    }
    Ok(keychains)
}

/// Parses `music_definitions`, keyed by music kit id.
///
/// # Errors
/// `NotFound` if an entry lacks `name` or `loc_name`, `InvalidNumber` for a
/// non-numeric index.
pub fn parse_musickits(
    items_game: &NodeRef<'_>,
    localizer: &Localizer<'_>,
) -> Result<IndexMap<String, Musickit>> {
    let mut musickits = IndexMap::new();
    let Some(section) = items_game.opt_section(&["music_definitions"])? else {
        tracing::debug!("No music_definitions table");
        return Ok(musickits);
    };

    for (key, node) in section.entries() {
        let node = node.section(&[])?;
        let path = node.path();
        let musickit = Musickit {
            id: node.str(&["name"])?.to_string(),
            index: parse_index(key, path)?,
            name: localizer.text(node.str(&["loc_name"])?, &format!("{path}/loc_name"))?,
            description: localizer.opt_text(
                node.opt_str(&["loc_description"])?,
                &format!("{path}/loc_description"),
            )?,
        };
        musickits.insert(musickit.id.clone(), musickit);
    }
    Ok(musickits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::formats::{LanguageTable, ValueNode, parse_keyvalues};
    use pretty_assertions::assert_eq;

    const DEFINITIONS: &str = r##"
"items_game"
{
    "rarities"
    {
        "common"
        {
            "value"             "1"
            "loc_key"           "Rarity_Common"
            "loc_key_weapon"    "Rarity_Common_Weapon"
            "color"             "desc_common"
        }
    }
    "qualities"
    {
        "normal"
        {
            "value"     "0"
            "weight"    "1"
            "hexColor"  "#B2B2B2"
        }
        "strange"
        {
            "value"     "9"
        }
    }
    "keychain_definitions"
    {
        "1"
        {
            "name"              "kc_missinglink"
            "loc_name"          "#keychain_kc_missinglink"
            "loc_description"   "#keychain_kc_missinglink_desc"
            "item_rarity"       "rare"
        }
    }
    "music_definitions"
    {
        "3"
        {
            "name"      "valve_csgo_01"
            "loc_name"  "#musickit_valve_csgo_01"
        }
    }
}
"##;

    fn tree() -> ValueNode {
        parse_keyvalues(DEFINITIONS).unwrap()
    }

    fn table() -> LanguageTable {
        LanguageTable::from_pairs([
            ("Rarity_Common", "Base Grade"),
            ("Rarity_Common_Weapon", "Consumer Grade"),
            ("keychain_kc_missinglink", "Lil' Squirt"),
            ("musickit_valve_csgo_01", "CS:GO"),
        ])
    }

    #[test]
    fn test_rarities() {
        let tree = tree();
        let root = NodeRef::root(&tree).section(&["items_game"]).unwrap();
        let table = table();
        let rarities = parse_rarities(&root, &Localizer::new(&table, true)).unwrap();
        let common = &rarities["common"];
        assert_eq!(common.name, "Base Grade");
        assert_eq!(common.weapon_name.as_deref(), Some("Consumer Grade"));
        assert_eq!(common.character_name, None);
        assert_eq!(common.color.as_deref(), Some("desc_common"));
    }

    #[test]
    fn test_qualities() {
        let tree = tree();
        let root = NodeRef::root(&tree).section(&["items_game"]).unwrap();
        let qualities = parse_qualities(&root).unwrap();
        assert_eq!(qualities["normal"].weight, 1);
        assert_eq!(qualities["normal"].hex_color.as_deref(), Some("#B2B2B2"));
        assert_eq!(qualities["strange"].value, 9);
        assert_eq!(qualities["strange"].weight, 0);
    }

    #[test]
    fn test_keychains_and_musickits() {
        let tree = tree();
        let root = NodeRef::root(&tree).section(&["items_game"]).unwrap();
        let table = table();
        let localizer = Localizer::new(&table, false);

        let keychains = parse_keychains(&root, &localizer).unwrap();
        let kc = &keychains["kc_missinglink"];
        assert_eq!(kc.index, 1);
        assert_eq!(kc.name, "Lil' Squirt");
        assert_eq!(kc.description.as_deref(), Some("keychain_kc_missinglink_desc"));

        let musickits = parse_musickits(&root, &localizer).unwrap();
        assert_eq!(musickits["valve_csgo_01"].index, 3);
        assert_eq!(musickits["valve_csgo_01"].name, "CS:GO");
    }

    #[test]
    fn test_quality_requires_value() {
        let tree = parse_keyvalues("\"items_game\"\n{\n\"qualities\"\n{\n\"x\"\n{\n}\n}\n}\n").unwrap();
        let root = NodeRef::root(&tree).section(&["items_game"]).unwrap();
        assert!(matches!(
            parse_qualities(&root),
            Err(Error::NotFound { .. })
        ));
    }
}

//! Collections (`item_sets`)

use super::localize::Localizer;
use super::types::{PaintkitItems, WeaponSet};
use crate::error::Result;
use crate::formats::NodeRef;
use indexmap::IndexMap;

/// `[kit]<kind>` members that name kits, not paintable items.
const KIT_MEMBER_KINDS: &[&str] = &["sticker", "spray", "patch", "keychain"];

const CHARACTER_PREFIX: &str = "customplayer_";

/// Splits a `[paintkit]item` member string into `(item, paintkit)`.
pub fn split_item_paintkit(member: &str) -> Option<(&str, &str)> {
    let (paintkit, item) = member.strip_prefix('[')?.split_once(']')?;
    if paintkit.is_empty() || item.is_empty() {
        return None;
    }
    Some((item, paintkit))
}

/// Parses every collection under `item_sets`.
///
/// Sets with no paintable members (character or sticker collections) are
/// kept with empty `members` so crates can still reference them.
///
/// # Errors
/// `NotFound` if `item_sets` or a set's `name` is missing, `TypeMismatch`
/// on malformed entries, and `UnresolvedReference` for missing tokens under
/// strict localization.
pub fn parse_weapon_sets(
    items_game: &NodeRef<'_>,
    localizer: &Localizer<'_>,
) -> Result<IndexMap<String, WeaponSet>> {
    let section = items_game.section(&["item_sets"])?;
    let mut sets = IndexMap::with_capacity(section.node().len());

    for (id, node) in section.entries() {
        let node = node.section(&[])?;
        let name_token = node.str(&["name"])?;
        let name = localizer.text(name_token, &format!("{}/name", node.path()))?;
        let description = localizer.opt_text(
            node.opt_str(&["set_description"])?,
            &format!("{}/set_description", node.path()),
        )?;

        let mut members = PaintkitItems::new();
        let mut characters = Vec::new();
        if let Some(items) = node.opt_section(&["items"])? {
            for member in items.node().keys() {
                match split_item_paintkit(member) {
                    Some((item, _)) if KIT_MEMBER_KINDS.contains(&item) => {}
                    Some((item, paintkit)) => {
                        let items = members.entry(paintkit.to_string()).or_default();
                        if !items.iter().any(|i| i == item) {
                            items.push(item.to_string());
                        }
                    }
                    None if member.starts_with(CHARACTER_PREFIX) => {
                        characters.push(member.to_string());
                    }
                    None => tracing::debug!("Skipping set member {member:?} in {id}"),
                }
            }
        }

        sets.insert(
            id.to_string(),
            WeaponSet {
                id: id.to_string(),
                name,
                description,
                members,
                characters,
            },
        );
    }

    tracing::debug!("Loaded {} item sets", sets.len());
    Ok(sets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::{LanguageTable, parse_keyvalues};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_split_item_paintkit() {
        assert_eq!(
            split_item_paintkit("[cu_ak47_cobra]weapon_ak47"),
            Some(("weapon_ak47", "cu_ak47_cobra"))
        );
        assert_eq!(split_item_paintkit("weapon_ak47"), None);
        assert_eq!(split_item_paintkit("[]weapon_ak47"), None);
        assert_eq!(split_item_paintkit("[pk]"), None);
    }

    #[test]
    fn test_parse_weapon_sets() {
        let text = r##"
"items_game"
{
    "item_sets"
    {
        "set_community_1"
        {
            "name"              "#CSGO_set_community_1"
            "set_description"   "#CSGO_set_community_1_desc"
            "items"
            {
                "[cu_ak47_cobra]weapon_ak47"    "1"
                "[cu_ak47_cobra]weapon_m4a1"    "1"
                "[hy_ddpat]weapon_awp"          "1"
                "[comm01_skull]sticker"         "1"
            }
        }
        "set_agents"
        {
            "name"  "#CSGO_set_agents"
            "items"
            {
                "customplayer_ctm_fbi"  "1"
            }
        }
    }
}
"##;
        let tree = parse_keyvalues(text).unwrap();
        let root = NodeRef::root(&tree).section(&["items_game"]).unwrap();
        let table = LanguageTable::from_pairs([("CSGO_set_community_1", "The eSports Collection")]);
        let sets = parse_weapon_sets(&root, &Localizer::new(&table, false)).unwrap();

        let community = &sets["set_community_1"];
        assert_eq!(community.name, "The eSports Collection");
        assert_eq!(community.description.as_deref(), Some("CSGO_set_community_1_desc"));
        assert_eq!(
            community.pairs().collect::<Vec<_>>(),
            vec![
                ("weapon_ak47", "cu_ak47_cobra"),
                ("weapon_m4a1", "cu_ak47_cobra"),
                ("weapon_awp", "hy_ddpat"),
            ]
        );

        let agents = &sets["set_agents"];
        assert!(agents.members.is_empty());
        assert_eq!(agents.characters, vec!["customplayer_ctm_fbi".to_string()]);
    }
}

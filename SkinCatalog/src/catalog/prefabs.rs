//! Prefab inheritance resolution
//!
//! Items name a prefab, prefabs name zero or more parent prefabs
//! (`"prefab" "a b"`), and the chain ends at a handful of well-known roots
//! such as `primary` or `weapon_case` whose entity kind is fixed.

use super::types::QualityCapability;
use crate::error::{Error, Result};
use crate::formats::{NodeRef, ValueNode};
use std::collections::HashMap;

/// The entity kind a prefab chain resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PrefabKind {
    #[default]
    Unknown,
    Weapon,
    Knife,
    Gloves,
    /// Needs a gear-slot check: melee equipment is a weapon.
    Equipment,
    /// A case whose collection is named by its `ItemSet` tag.
    WeaponCase(QualityCapability),
    /// Shared base of cases and capsules; needs tag/loot-list disambiguation.
    WeaponCaseBase,
    StickerCapsule,
    Tool,
    Character,
    Collectible,
}

impl PrefabKind {
    pub fn is_known(self) -> bool {
        self != PrefabKind::Unknown
    }
}

/// Kind of a well-known root prefab, if `prefab_id` is one.
pub fn base_kind(prefab_id: &str) -> Option<PrefabKind> {
    let kind = match prefab_id {
        "primary" | "secondary" => PrefabKind::Weapon,
        "melee_unusual" => PrefabKind::Knife,
        "hands" => PrefabKind::Gloves,
        "equipment" => PrefabKind::Equipment,
        "weapon_case" => PrefabKind::WeaponCase(QualityCapability::StatTrak),
        "weapon_case_souvenirpkg" => PrefabKind::WeaponCase(QualityCapability::Souvenir),
        "weapon_case_base" => PrefabKind::WeaponCaseBase,
        "sticker_capsule" => PrefabKind::StickerCapsule,
        "csgo_tool" => PrefabKind::Tool,
        "customplayertradable" => PrefabKind::Character,
        "collectible" => PrefabKind::Collectible,
        _ => return None,
    };
    Some(kind)
}

/// Splits a `prefab` field into parent ids.
pub fn parent_ids(prefab_field: &str) -> Vec<&str> {
    prefab_field.split_whitespace().collect()
}

/// One entry of `items_game/prefabs`.
#[derive(Debug, Clone)]
pub struct Prefab<'a> {
    pub id: &'a str,
    /// Parents in declared order
    pub parent_ids: Vec<&'a str>,
    pub name_token: Option<&'a str>,
    pub description_token: Option<&'a str>,
    /// The raw prefab section
    pub fields: &'a ValueNode,
}

/// All prefabs, borrowed from the items tree.
#[derive(Debug, Clone, Default)]
pub struct PrefabTable<'a> {
    prefabs: HashMap<&'a str, Prefab<'a>>,
}

impl<'a> PrefabTable<'a> {
    /// Build the table from the `items_game` section.
    ///
    /// # Errors
    /// `NotFound` if there is no `prefabs` section, `TypeMismatch` if a prefab
    /// is not a section or one of its fields has the wrong shape.
    pub fn from_items(items_game: &NodeRef<'a>) -> Result<Self> {
        let section = items_game.section(&["prefabs"])?;
        let mut prefabs = HashMap::with_capacity(section.node().len());

        for (id, node) in section.entries() {
            let node = node.section(&[])?;
            let prefab = Prefab {
                id,
                parent_ids: node.opt_str(&["prefab"])?.map(parent_ids).unwrap_or_default(),
                name_token: node.opt_str(&["item_name"])?,
                description_token: node.opt_str(&["item_description"])?,
                fields: node.node(),
            };
            prefabs.insert(id, prefab);
        }

        tracing::debug!("Loaded {} prefabs", prefabs.len());
        Ok(Self { prefabs })
    }

    pub fn get(&self, id: &str) -> Option<&Prefab<'a>> {
        self.prefabs.get(id)
    }

    pub fn len(&self) -> usize {
        self.prefabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prefabs.is_empty()
    }

    /// Resolves the entity kind of `prefab_id`.
    ///
    /// Well-known roots answer immediately. Otherwise parents are tried in
    /// declared order and the first known kind wins. Unrecognized prefabs are
    /// `Unknown`.
    ///
    /// # Errors
    /// `CyclicPrefab` if the walk re-enters a prefab already on its path.
    pub fn resolve_kind(&self, prefab_id: &str) -> Result<PrefabKind> {
        self.walk_kind(prefab_id, &mut Vec::new())
    }

    /// Resolves the kind of an item that declares `parents`.
    ///
    /// # Errors
    /// `CyclicPrefab` on an inheritance loop.
    pub fn resolve_parents(&self, parents: &[&str]) -> Result<PrefabKind> {
        let mut path = Vec::new();
        for parent in parents {
            let kind = self.walk_kind(parent, &mut path)?;
            if kind.is_known() {
                return Ok(kind);
            }
        }
        Ok(PrefabKind::Unknown)
    }

    fn walk_kind<'s>(&'s self, id: &'s str, path: &mut Vec<&'s str>) -> Result<PrefabKind> {
        if let Some(kind) = base_kind(id) {
            return Ok(kind);
        }
        enter(id, path)?;
        let Some(prefab) = self.prefabs.get(id) else {
            path.pop();
            return Ok(PrefabKind::Unknown);
        };

        let mut kind = PrefabKind::Unknown;
        for parent in &prefab.parent_ids {
            kind = self.walk_kind(parent, path)?;
            if kind.is_known() {
                break;
            }
        }
        path.pop();
        Ok(kind)
    }

    /// Finds `key` on the first prefab along the inheritance walk from
    /// `parents` (depth-first, declared order) that defines it as a scalar.
    ///
    /// # Errors
    /// `CyclicPrefab` on an inheritance loop.
    pub fn inherited_scalar(&self, parents: &[&str], key: &str) -> Result<Option<&'a str>> {
        let mut path = Vec::new();
        for parent in parents {
            if let Some(found) = self.walk_scalar(parent, key, &mut path)? {
                return Ok(Some(found));
            }
        }
        Ok(None)
    }

    fn walk_scalar<'s>(
        &'s self,
        id: &'s str,
        key: &str,
        path: &mut Vec<&'s str>,
    ) -> Result<Option<&'a str>> {
        let Some(prefab) = self.prefabs.get(id) else {
            return Ok(None);
        };
        enter(id, path)?;

        let mut found = prefab.fields.get(key).and_then(ValueNode::as_str);
        if found.is_none() {
            for parent in &prefab.parent_ids {
                found = self.walk_scalar(parent, key, path)?;
                if found.is_some() {
                    break;
                }
            }
        }
        path.pop();
        Ok(found)
    }
}

/// Pushes `id` onto the walk path, failing if it is already there.
///
/// Only the current path is checked, so diamonds (two parents sharing an
/// ancestor) are fine.
fn enter<'s>(id: &'s str, path: &mut Vec<&'s str>) -> Result<()> {
    if path.contains(&id) {
        let mut chain: Vec<String> = path.iter().map(|s| (*s).to_string()).collect();
        chain.push(id.to_string());
        return Err(Error::CyclicPrefab { chain });
    }
    path.push(id);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::parse_keyvalues;
    use pretty_assertions::assert_eq;

    const PREFABS: &str = r##"
"items_game"
{
    "prefabs"
    {
        "rifle"
        {
            "prefab"        "primary"
            "item_name"     "#SFUI_Rifle"
            "item_gear_slot"    "rifle"
        }
        "statted_item_base"
        {
            "item_description"  "#Statted_Desc"
        }
        "weapon_ak47_prefab"
        {
            "prefab"    "statted_item_base rifle"
        }
        "unknown_root"
        {
        }
        "mixed"
        {
            "prefab"    "unknown_root weapon_case"
        }
        "diamond_a"
        {
            "prefab"    "unknown_root"
        }
        "diamond"
        {
            "prefab"    "diamond_a unknown_root"
        }
        "loop_a"
        {
            "prefab"    "loop_b"
        }
        "loop_b"
        {
            "prefab"    "loop_a"
        }
    }
}
"##;

    fn with_table<F: FnOnce(&PrefabTable<'_>)>(f: F) {
        let tree = parse_keyvalues(PREFABS).unwrap();
        let root = NodeRef::root(&tree).section(&["items_game"]).unwrap();
        let table = PrefabTable::from_items(&root).unwrap();
        f(&table);
    }

    #[test]
    fn test_base_table() {
        with_table(|table| {
            assert_eq!(table.resolve_kind("primary").unwrap(), PrefabKind::Weapon);
            assert_eq!(
                table.resolve_kind("weapon_case_souvenirpkg").unwrap(),
                PrefabKind::WeaponCase(QualityCapability::Souvenir)
            );
            assert_eq!(table.resolve_kind("nonexistent").unwrap(), PrefabKind::Unknown);
        });
    }

    #[test]
    fn test_multi_parent_first_known_wins() {
        with_table(|table| {
            assert_eq!(table.len(), 9);
            assert_eq!(
                table.resolve_kind("weapon_ak47_prefab").unwrap(),
                PrefabKind::Weapon
            );
            // Only the second parent is known
            assert_eq!(
                table.resolve_kind("mixed").unwrap(),
                PrefabKind::WeaponCase(QualityCapability::StatTrak)
            );
            assert_eq!(table.resolve_kind("diamond").unwrap(), PrefabKind::Unknown);
        });
    }

    #[test]
    fn test_cycle_detected() {
        with_table(|table| match table.resolve_kind("loop_a") {
            Err(Error::CyclicPrefab { chain }) => {
                assert_eq!(chain, vec!["loop_a", "loop_b", "loop_a"]);
            }
            other => panic!("unexpected: {other:?}"),
        });
    }

    #[test]
    fn test_inherited_scalar() {
        with_table(|table| {
            let parents = ["weapon_ak47_prefab"];
            assert_eq!(
                table.inherited_scalar(&parents, "item_name").unwrap(),
                Some("#SFUI_Rifle")
            );
            assert_eq!(
                table.inherited_scalar(&parents, "item_description").unwrap(),
                Some("#Statted_Desc")
            );
            assert_eq!(
                table.inherited_scalar(&parents, "item_gear_slot").unwrap(),
                Some("rifle")
            );
            assert_eq!(table.inherited_scalar(&parents, "missing").unwrap(), None);
            assert!(table.inherited_scalar(&["loop_a"], "missing").is_err());
        });
    }

    #[test]
    fn test_prefab_fields() {
        with_table(|table| {
            let prefab = table.get("weapon_ak47_prefab").unwrap();
            assert_eq!(prefab.parent_ids, vec!["statted_item_base", "rifle"]);
            assert_eq!(prefab.name_token, None);
            assert_eq!(table.get("rifle").unwrap().name_token, Some("#SFUI_Rifle"));
        });
    }
}

//! Sticker, spray and patch kits (`sticker_kits`)

use super::localize::Localizer;
use super::parse_index;
use super::types::StickerKit;
use crate::error::Result;
use crate::formats::NodeRef;
use indexmap::IndexMap;

/// Which table a `sticker_kits` entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StickerKitKind {
    Sticker,
    Spray,
    Patch,
}

/// Decides the kind of a kit from its id, name token and fields.
///
/// A `patch_material` field marks a patch. A `spray_` id or `#SprayKit_`
/// name token marks a spray. Everything else is a sticker.
pub fn sticker_kit_kind(id: &str, name_token: &str, has_patch_material: bool) -> StickerKitKind {
    if has_patch_material {
        StickerKitKind::Patch
    } else if id.starts_with("spray_") || name_token.starts_with("#SprayKit_") {
        StickerKitKind::Spray
    } else {
        StickerKitKind::Sticker
    }
}

/// `sticker_kits` split by kind, each keyed by kit id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StickerKitTables {
    pub stickers: IndexMap<String, StickerKit>,
    pub sprays: IndexMap<String, StickerKit>,
    pub patches: IndexMap<String, StickerKit>,
}

/// Parses `sticker_kits`. The index `0` placeholder is skipped and a missing
/// table yields empty tables.
///
/// # Errors
/// `NotFound` if a kit lacks `name` or `item_name`, `InvalidNumber` for a
/// non-numeric index.
pub fn parse_sticker_kits(
    items_game: &NodeRef<'_>,
    localizer: &Localizer<'_>,
) -> Result<StickerKitTables> {
    let mut tables = StickerKitTables::default();
    let Some(section) = items_game.opt_section(&["sticker_kits"])? else {
        tracing::debug!("No sticker_kits table");
        return Ok(tables);
    };

    for (key, node) in section.entries() {
        let node = node.section(&[])?;
        let index = parse_index(key, node.path())?;
        if index == 0 {
            continue;
        }
        let id = node.str(&["name"])?;
        let name_token = node.str(&["item_name"])?;

        let kit = StickerKit {
            id: id.to_string(),
            index,
            name: localizer.text(name_token, &format!("{}/item_name", node.path()))?,
            description: localizer.opt_text(
                node.opt_str(&["description_string"])?,
                &format!("{}/description_string", node.path()),
            )?,
            rarity_id: node.opt_str(&["item_rarity"])?.map(str::to_string),
        };

        let has_patch = node.opt_str(&["patch_material"])?.is_some();
        let table = match sticker_kit_kind(id, name_token, has_patch) {
            StickerKitKind::Sticker => &mut tables.stickers,
            StickerKitKind::Spray => &mut tables.sprays,
            StickerKitKind::Patch => &mut tables.patches,
        };
        table.insert(kit.id.clone(), kit);
    }

    tracing::debug!(
        "Loaded {} stickers, {} sprays, {} patches",
        tables.stickers.len(),
        tables.sprays.len(),
        tables.patches.len()
    );
    Ok(tables)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::{LanguageTable, parse_keyvalues};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_kind() {
        assert_eq!(sticker_kit_kind("comm01_skull", "#StickerKit_comm01_skull", false), StickerKitKind::Sticker);
        assert_eq!(sticker_kit_kind("spray_gg", "#x", false), StickerKitKind::Spray);
        assert_eq!(sticker_kit_kind("gg", "#SprayKit_gg", false), StickerKitKind::Spray);
        assert_eq!(sticker_kit_kind("patch_dragon", "#PatchKit_dragon", true), StickerKitKind::Patch);
    }

    #[test]
    fn test_parse_sticker_kits() {
        let text = r##"
"items_game"
{
    "sticker_kits"
    {
        "0"
        {
            "name"          "default"
            "item_name"     "#StickerKit_Default"
        }
        "1"
        {
            "name"                  "comm01_skull"
            "item_name"             "#StickerKit_comm01_skull"
            "description_string"    "#StickerKit_desc_comm01_skull"
            "item_rarity"           "rare"
        }
        "2"
        {
            "name"          "spray_gg"
            "item_name"     "#SprayKit_gg"
        }
        "3"
        {
            "name"              "patch_dragon"
            "item_name"         "#PatchKit_dragon"
            "patch_material"    "case01/dragon"
        }
    }
}
"##;
        let tree = parse_keyvalues(text).unwrap();
        let root = NodeRef::root(&tree).section(&["items_game"]).unwrap();
        let table = LanguageTable::from_pairs([("StickerKit_comm01_skull", "Skull")]);
        let kits = parse_sticker_kits(&root, &Localizer::new(&table, false)).unwrap();

        assert_eq!(kits.stickers.len(), 1);
        assert_eq!(kits.sprays.len(), 1);
        assert_eq!(kits.patches.len(), 1);

        let skull = &kits.stickers["comm01_skull"];
        assert_eq!(skull.index, 1);
        assert_eq!(skull.name, "Skull");
        assert_eq!(skull.rarity_id.as_deref(), Some("rare"));
        assert!(!kits.stickers.contains_key("default"));
    }
}

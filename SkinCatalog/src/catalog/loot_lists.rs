//! Revolving and client loot lists
//!
//! A capsule's `set supply crate series` attribute indexes
//! `revolving_loot_lists`, which names a `client_loot_lists` entry. That list
//! either holds sticker kits directly (`[kit]sticker` keys) or names further
//! client loot lists.

use crate::error::{Error, Result};
use crate::formats::NodeRef;
use indexmap::IndexMap;

const STICKER_SUFFIX: &str = "]sticker";

/// What a client loot list holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LootListKind {
    #[default]
    Unknown,
    Sticker,
    SubList,
}

/// One entry of `client_loot_lists`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientLootList {
    pub id: String,
    pub kind: LootListKind,
    /// Sticker kit ids or child list ids, depending on `kind`
    pub member_ids: Vec<String>,
}

/// Unwraps `[kit]sticker` into `kit`.
pub fn sticker_member(key: &str) -> Option<&str> {
    let inner = key.strip_suffix(STICKER_SUFFIX)?;
    Some(inner.strip_prefix('[').unwrap_or(inner))
}

/// Both loot list tables.
#[derive(Debug, Clone, Default)]
pub struct LootLists {
    revolving: IndexMap<String, String>,
    client: IndexMap<String, ClientLootList>,
}

impl LootLists {
    /// Build both tables from the `items_game` section. Either table may be absent.
    ///
    /// # Errors
    /// `TypeMismatch` if a table or entry has the wrong shape.
    pub fn from_items(items_game: &NodeRef<'_>) -> Result<Self> {
        let mut revolving = IndexMap::new();
        if let Some(section) = items_game.opt_section(&["revolving_loot_lists"])? {
            for (index, node) in section.entries() {
                let list_id = node.str(&[])?;
                revolving.insert(index.to_string(), list_id.to_string());
            }
        }

        let mut client = IndexMap::new();
        if let Some(section) = items_game.opt_section(&["client_loot_lists"])? {
            let declared = section.node();
            for (id, node) in section.entries() {
                let node = node.section(&[])?;
                let mut list = ClientLootList {
                    id: id.to_string(),
                    kind: LootListKind::Unknown,
                    member_ids: Vec::new(),
                };
                for member in node.node().keys() {
                    if declared.get(member).is_some() {
                        list.kind = LootListKind::SubList;
                        list.member_ids.push(member.to_string());
                    } else if let Some(kit) = sticker_member(member) {
                        list.kind = LootListKind::Sticker;
                        list.member_ids.push(kit.to_string());
                    }
                }
                client.insert(list.id.clone(), list);
            }
        }

        tracing::debug!(
            "Loaded {} revolving and {} client loot lists",
            revolving.len(),
            client.len()
        );
        Ok(Self { revolving, client })
    }

    /// Build directly from tables.
    pub fn from_parts(
        revolving: IndexMap<String, String>,
        client: impl IntoIterator<Item = ClientLootList>,
    ) -> Self {
        Self {
            revolving,
            client: client.into_iter().map(|l| (l.id.clone(), l)).collect(),
        }
    }

    /// Client list id for a revolving list index.
    pub fn revolving(&self, index: &str) -> Option<&str> {
        self.revolving.get(index).map(String::as_str)
    }

    pub fn client(&self, id: &str) -> Option<&ClientLootList> {
        self.client.get(id)
    }

    /// Flattens a client list into its leaf members.
    ///
    /// Sticker lists return their members. Sublist lists concatenate their
    /// children's members and report the kind of the last child visited; if
    /// children disagree a warning is logged. Unknown ids give
    /// `(Unknown, [])`.
    ///
    /// # Errors
    /// `CyclicLootList` if a list contains itself through its children.
    pub fn flatten(&self, list_id: &str) -> Result<(LootListKind, Vec<String>)> {
        self.flatten_walk(list_id, &mut Vec::new())
    }

    fn flatten_walk<'s>(
        &'s self,
        list_id: &'s str,
        path: &mut Vec<&'s str>,
    ) -> Result<(LootListKind, Vec<String>)> {
        let Some(list) = self.client.get(list_id) else {
            return Ok((LootListKind::Unknown, Vec::new()));
        };

        match list.kind {
            LootListKind::Unknown => Ok((LootListKind::Unknown, Vec::new())),
            LootListKind::Sticker => Ok((LootListKind::Sticker, list.member_ids.clone())),
            LootListKind::SubList => {
                if path.contains(&list_id) {
                    let mut chain: Vec<String> = path.iter().map(|s| (*s).to_string()).collect();
                    chain.push(list_id.to_string());
                    return Err(Error::CyclicLootList { chain });
                }
                path.push(list_id);

                let mut kind = LootListKind::Unknown;
                let mut members = Vec::new();
                for (i, child) in list.member_ids.iter().enumerate() {
                    let (child_kind, child_members) = self.flatten_walk(child, path)?;
                    if i > 0 && child_kind != kind {
                        tracing::warn!(
                            "Client loot list {list_id} mixes {kind:?} and {child_kind:?} children; keeping {child_kind:?}"
                        );
                    }
                    kind = child_kind;
                    members.extend(child_members);
                }

                path.pop();
                Ok((kind, members))
            }
        }
    }

    /// Sticker kit ids of the capsule with the given series index.
    ///
    /// `None` unless the series resolves to a list that flattens to stickers.
    ///
    /// # Errors
    /// `CyclicLootList` on a self-containing list.
    pub fn capsule_members(&self, series: &str) -> Result<Option<Vec<String>>> {
        let Some(list_id) = self.revolving(series) else {
            return Ok(None);
        };
        match self.flatten(list_id)? {
            (LootListKind::Sticker, members) => Ok(Some(members)),
            _ => Ok(None),
        }
    }
}

//! Valve KeyValues text format
//!
//! The format used by `items_game.txt` and the `csgo_<language>.txt`
//! localization files: quoted or bare keys, `{ }` blocks on their own lines,
//! `//` comments, and `\"` escapes inside quotes.

mod document;
mod lexer;
mod navigator;
mod reader;
mod writer;

pub use document::ValueNode;
pub use navigator::{NodeRef, crawl, crawl_section, crawl_str, optional_str};
pub use reader::{decode_text, parse_keyvalues, read_keyvalues};
pub use writer::{serialize_keyvalues, write_keyvalues};

//! Text formats read by the catalog pipeline

pub mod keyvalues;
pub mod language;

pub use keyvalues::{
    NodeRef, ValueNode, crawl, crawl_section, crawl_str, decode_text, optional_str,
    parse_keyvalues, read_keyvalues, serialize_keyvalues, write_keyvalues,
};
pub use language::LanguageTable;

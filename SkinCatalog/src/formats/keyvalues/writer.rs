//! KeyValues text writing

use super::document::ValueNode;
use crate::error::Result;
use std::fs;
use std::path::Path;

/// Write a tree to disk as KeyValues text.
///
/// # Errors
/// Returns an error if the file cannot be written.
pub fn write_keyvalues<P: AsRef<Path>>(node: &ValueNode, path: P) -> Result<()> {
    fs::write(path, serialize_keyvalues(node))?;
    Ok(())
}

/// Pretty-print a tree as KeyValues text.
///
/// Every key and scalar is quoted, braces sit on their own lines and nesting
/// is indented with tabs. A root scalar has no key and produces an empty
/// document.
pub fn serialize_keyvalues(node: &ValueNode) -> String {
    let mut output = String::new();
    for (key, child) in node.entries() {
        write_entry(&mut output, key, child, 0);
    }
    output
}

fn write_entry(output: &mut String, key: &str, node: &ValueNode, depth: usize) {
    let indent = "\t".repeat(depth);
    match node {
        ValueNode::Scalar(value) => {
            output.push_str(&format!("{indent}\"{}\"\t\t\"{}\"\n", escape(key), escape(value)));
        }
        ValueNode::Section(entries) => {
            output.push_str(&format!("{indent}\"{}\"\n{indent}{{\n", escape(key)));
            for (child_key, child) in entries {
                write_entry(output, child_key, child, depth + 1);
            }
            output.push_str(&format!("{indent}}}\n"));
        }
    }
}

fn escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

//! KeyValues text reading

use super::document::ValueNode;
use super::lexer::{Line, LineTokens, classify_line, extract_tokens};
use crate::error::{Error, Result};
use std::fs;
use std::path::Path;

/// Grammar state: the class of the last meaningful line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Root,
    SectionName,
    Opener,
    Closer,
    Data,
}

impl State {
    fn name(self) -> &'static str {
        match self {
            State::Root => "start of input",
            State::SectionName => "section name",
            State::Opener => "'{'",
            State::Closer => "'}'",
            State::Data => "key/value",
        }
    }

    fn allows(self, next: State) -> bool {
        use State::{Closer, Data, Opener, Root, SectionName};
        match self {
            Root => matches!(next, SectionName | Data),
            SectionName => next == Opener,
            Opener | Closer | Data => matches!(next, SectionName | Data | Closer),
        }
    }
}

/// A section being filled in.
struct Frame {
    key: String,
    entries: Vec<(String, ValueNode)>,
    /// Index of an existing same-named section in the parent that this frame
    /// re-opened. Its entries were moved into this frame and go back on close.
    slot: Option<usize>,
}

struct Parser {
    stack: Vec<Frame>,
    state: State,
    pending_name: Option<String>,
    /// A line whose quoted string continues on the next physical line.
    open_line: Option<LineTokens>,
}

impl Parser {
    fn new() -> Self {
        Self {
            stack: vec![Frame {
                key: String::new(),
                entries: Vec::new(),
                slot: None,
            }],
            state: State::Root,
            pending_name: None,
            open_line: None,
        }
    }

    fn top(&mut self) -> &mut Frame {
        // The root frame is never popped
        let last = self.stack.len() - 1;
        &mut self.stack[last]
    }

    fn transition(&mut self, next: State, line_no: usize) -> Result<()> {
        if !self.state.allows(next) {
            return Err(Error::MalformedToken {
                line: line_no,
                message: format!("{} cannot follow {}", next.name(), self.state.name()),
            });
        }
        self.state = next;
        Ok(())
    }

    fn feed(&mut self, line: &str, line_no: usize) -> Result<()> {
        let scanned = match self.open_line.take() {
            Some(mut open) => {
                open.continue_line(line);
                open
            }
            None => extract_tokens(line),
        };
        if scanned.open_quote {
            self.open_line = Some(scanned);
            return Ok(());
        }

        match classify_line(scanned.tokens, line_no)? {
            Line::Blank => Ok(()),
            Line::Key(key) => {
                self.transition(State::SectionName, line_no)?;
                self.pending_name = Some(key);
                Ok(())
            }
            Line::Open => {
                self.transition(State::Opener, line_no)?;
                let key = self.pending_name.take().unwrap_or_default();
                self.open_section(key);
                Ok(())
            }
            Line::Close => {
                if self.stack.len() == 1 {
                    return Err(Error::UnbalancedSection { line: line_no });
                }
                self.transition(State::Closer, line_no)?;
                self.close_section();
                Ok(())
            }
            Line::KeyValue(key, value) => {
                self.transition(State::Data, line_no)?;
                self.top().entries.push((key, ValueNode::Scalar(value)));
                Ok(())
            }
        }
    }

    fn open_section(&mut self, key: String) {
        let parent = self.top();
        let slot = parent
            .entries
            .iter()
            .rposition(|(k, v)| *k == key && v.is_section());

        let entries = match slot {
            Some(i) => match &mut parent.entries[i].1 {
                ValueNode::Section(existing) => std::mem::take(existing),
                ValueNode::Scalar(_) => Vec::new(),
            },
            None => Vec::new(),
        };

        self.stack.push(Frame { key, entries, slot });
    }

    fn close_section(&mut self) {
        let Some(frame) = self.stack.pop() else {
            return;
        };
        let node = ValueNode::Section(frame.entries);
        let parent = self.top();
        match frame.slot {
            Some(i) => parent.entries[i].1 = node,
            None => parent.entries.push((frame.key, node)),
        }
    }

    fn finish(mut self, last_line: usize) -> Result<ValueNode> {
        let open_sections = self.stack.len() - 1;
        if self.open_line.is_some() || self.pending_name.is_some() || open_sections > 0 {
            return Err(Error::UnexpectedEof {
                line: last_line,
                open_sections,
            });
        }
        Ok(ValueNode::Section(std::mem::take(&mut self.top().entries)))
    }
}

/// Parse KeyValues text into a tree.
///
/// The result is always a `ValueNode::Section` holding the top-level entries.
///
/// # Errors
/// Returns `MalformedToken` for grammar violations, `UnbalancedSection` for a
/// stray `}`, and `UnexpectedEof` if the input ends inside a section or string.
pub fn parse_keyvalues(text: &str) -> Result<ValueNode> {
    let mut parser = Parser::new();
    let mut line_no = 0;
    for (i, line) in text.lines().enumerate() {
        line_no = i + 1;
        parser.feed(line, line_no)?;
    }
    parser.finish(line_no)
}

/// Read and parse a KeyValues file from disk.
///
/// # Errors
/// Returns an error if the file cannot be read, decoded, or parsed.
pub fn read_keyvalues<P: AsRef<Path>>(path: P) -> Result<ValueNode> {
    let bytes = fs::read(path.as_ref())?;
    let text = decode_text(&bytes)?;
    tracing::debug!(
        "Read {} ({} bytes)",
        path.as_ref().display(),
        bytes.len()
    );
    parse_keyvalues(&text)
}

/// Decode raw file bytes into text.
///
/// UTF-8 with or without BOM, and UTF-16 LE/BE with BOM, are accepted.
///
/// # Errors
/// Returns an error if the bytes are not valid in the detected encoding.
pub fn decode_text(bytes: &[u8]) -> Result<String> {
    match bytes {
        [0xEF, 0xBB, 0xBF, rest @ ..] => Ok(String::from_utf8(rest.to_vec())?),
        [0xFF, 0xFE, rest @ ..] => decode_utf16(rest, u16::from_le_bytes),
        [0xFE, 0xFF, rest @ ..] => decode_utf16(rest, u16::from_be_bytes),
        _ => Ok(String::from_utf8(bytes.to_vec())?),
    }
}

fn decode_utf16(data: &[u8], to_unit: fn([u8; 2]) -> u16) -> Result<String> {
    if data.len() % 2 != 0 {
        return Err(Error::OddUtf16Length { len: data.len() });
    }
    let units: Vec<u16> = data
        .chunks_exact(2)
        .map(|pair| to_unit([pair[0], pair[1]]))
        .collect();
    Ok(String::from_utf16(&units)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_nested() {
        let text = r#"
"items_game"
{
    "rarities"
    {
        "common"
        {
            "value"     "1"
            "loc_key"   "Rarity_Common"   // trailing comment
        }
    }
}
"#;
        let tree = parse_keyvalues(text).unwrap();
        let expected = ValueNode::section([(
            "items_game",
            ValueNode::section([(
                "rarities",
                ValueNode::section([(
                    "common",
                    ValueNode::section([
                        ("value", ValueNode::scalar("1")),
                        ("loc_key", ValueNode::scalar("Rarity_Common")),
                    ]),
                )]),
            )]),
        )]);
        assert_eq!(tree, expected);
    }

    #[test]
    fn test_repeated_section_merges() {
        let text = r#"
"root"
{
    "items"
    {
        "1" "a"
    }
    "other" "x"
    "items"
    {
        "2" "b"
    }
}
"#;
        let tree = parse_keyvalues(text).unwrap();
        let root = tree.get("root").unwrap();
        assert_eq!(root.len(), 2);
        let items = root.get("items").unwrap();
        assert_eq!(items.keys().collect::<Vec<_>>(), vec!["1", "2"]);
    }

    #[test]
    fn test_duplicate_scalars_retained() {
        let tree = parse_keyvalues("\"k\" \"1\"\n\"k\" \"2\"\n").unwrap();
        assert_eq!(tree.len(), 2);
        assert_eq!(tree.get("k").and_then(ValueNode::as_str), Some("2"));
    }

    #[test]
    fn test_extra_closer_is_unbalanced() {
        let text = "\"a\"\n{\n\"k\" \"v\"\n}\n}\n";
        assert!(matches!(
            parse_keyvalues(text),
            Err(Error::UnbalancedSection { line: 5 })
        ));
    }

    #[test]
    fn test_missing_closer_is_eof() {
        let text = "\"a\"\n{\n\"b\"\n{\n\"k\" \"v\"\n}\n";
        assert!(matches!(
            parse_keyvalues(text),
            Err(Error::UnexpectedEof {
                open_sections: 1,
                ..
            })
        ));
    }

    #[test]
    fn test_two_section_names_in_a_row() {
        let text = "\"a\"\n\"b\"\n{\n}\n";
        assert!(matches!(
            parse_keyvalues(text),
            Err(Error::MalformedToken { line: 2, .. })
        ));
    }

    #[test]
    fn test_brace_without_name() {
        assert!(matches!(
            parse_keyvalues("{\n}\n"),
            Err(Error::MalformedToken { line: 1, .. })
        ));
    }

    #[test]
    fn test_multiline_value() {
        let text = "\"t\"\n{\n\"desc\" \"first\nsecond\"\n\"next\" \"v\"\n}\n";
        let tree = parse_keyvalues(text).unwrap();
        let t = tree.get("t").unwrap();
        assert_eq!(t.get("desc").and_then(ValueNode::as_str), Some("first\nsecond"));
        assert_eq!(t.get("next").and_then(ValueNode::as_str), Some("v"));
    }

    #[test]
    fn test_multiline_value_keeps_inner_whitespace() {
        let text = "\"t\"\n{\n\t\"desc\"\t\"line one \n    indented two\"\n}\n";
        let tree = parse_keyvalues(text).unwrap();
        assert_eq!(
            tree.get("t").and_then(|t| t.get("desc")).and_then(ValueNode::as_str),
            Some("line one \n    indented two")
        );
    }

    #[test]
    fn test_multiline_key() {
        let text = "\"a\nb\"\n{\n\"k\" \"v\"\n}\n\"c\nd\" \"e\"\n";
        let tree = parse_keyvalues(text).unwrap();
        assert_eq!(tree.keys().collect::<Vec<_>>(), vec!["a\nb", "c\nd"]);
        assert_eq!(tree.get("c\nd").and_then(ValueNode::as_str), Some("e"));
    }

    #[test]
    fn test_platform_suffix_is_ignored() {
        let text = "\"lang\"\n{\n\"Tokens\"\n{\n\"k\" \"v\" [$WIN32]\n\"x\" \"y\" [$X360]\n}\n}\n";
        let tree = parse_keyvalues(text).unwrap();
        let tokens = tree.get("lang").and_then(|l| l.get("Tokens")).unwrap();
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens.get("k").and_then(ValueNode::as_str), Some("v"));
        assert_eq!(tokens.get("x").and_then(ValueNode::as_str), Some("y"));
    }

    #[test]
    fn test_tokens_after_multiline_value() {
        let text = "\"k\" \"a\nb\" \"extra\"\n";
        assert!(matches!(
            parse_keyvalues(text),
            Err(Error::MalformedToken { line: 2, .. })
        ));
    }

    #[test]
    fn test_unterminated_value_at_eof() {
        assert!(matches!(
            parse_keyvalues("\"k\" \"never closed\n"),
            Err(Error::UnexpectedEof { .. })
        ));
    }

    #[test]
    fn test_decode_utf8_bom() {
        let bytes = [0xEF, 0xBB, 0xBF, b'h', b'i'];
        assert_eq!(decode_text(&bytes).unwrap(), "hi");
    }

    #[test]
    fn test_decode_utf16() {
        let le = [0xFF, 0xFE, b'h', 0, b'i', 0];
        assert_eq!(decode_text(&le).unwrap(), "hi");

        let be = [0xFE, 0xFF, 0, b'h', 0, b'i'];
        assert_eq!(decode_text(&be).unwrap(), "hi");

        let odd = [0xFF, 0xFE, b'h'];
        assert!(matches!(
            decode_text(&odd),
            Err(Error::OddUtf16Length { len: 1 })
        ));
    }

    #[test]
    fn test_read_keyvalues_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lang.txt");
        let mut bytes = vec![0xFF, 0xFE];
        for unit in "\"lang\"\n{\n\"Language\" \"english\"\n}\n".encode_utf16() {
            bytes.extend_from_slice(&unit.to_le_bytes());
        }
        std::fs::write(&path, bytes).unwrap();

        let tree = read_keyvalues(&path).unwrap();
        assert_eq!(
            tree.get("lang")
                .and_then(|l| l.get("Language"))
                .and_then(ValueNode::as_str),
            Some("english")
        );
    }
}

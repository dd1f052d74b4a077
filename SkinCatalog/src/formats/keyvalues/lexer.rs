//! Line-level tokenizer for KeyValues text

use crate::error::{Error, Result};

/// A token extracted from a single physical line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Token {
    /// A quoted or bare string.
    Text(String),
    /// `{`
    Open,
    /// `}`
    Close,
}

/// Tokens of one logical line, possibly spread over several physical lines.
#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct LineTokens {
    pub tokens: Vec<Token>,
    /// The line ended inside a quoted string. Its partial content is the
    /// last `Token::Text` in `tokens`.
    pub open_quote: bool,
    /// A quoted token has been read. Unquoted words after it are ignored.
    pub quoted: bool,
}

impl LineTokens {
    /// Carries an open quoted string onto the next physical line and scans
    /// whatever follows its closing quote.
    pub(crate) fn continue_line(&mut self, line: &str) {
        let (text, closed, rest) = continue_quote(line);
        if let Some(Token::Text(partial)) = self.tokens.last_mut() {
            partial.push('\n');
            partial.push_str(&text);
        }
        if closed {
            self.open_quote = false;
            scan_into(rest, self);
        }
    }
}

/// Scans a line left to right.
///
/// Outside quotes, whitespace separates bare tokens, `{` and `}` stand alone,
/// and an unquoted `//` ends the line. Bare words only count on a line with no
/// quoted token before them, so platform suffixes like `[$WIN32]` after a
/// quoted value are dropped. Inside quotes, `\"` and `\\` are unescaped and
/// everything else is taken literally.
pub(crate) fn extract_tokens(line: &str) -> LineTokens {
    let mut out = LineTokens::default();
    scan_into(line, &mut out);
    out
}

fn scan_into(line: &str, out: &mut LineTokens) {
    let mut chars = line.chars().peekable();
    let mut bare = String::new();

    let flush_bare = |bare: &mut String, tokens: &mut Vec<Token>| {
        if !bare.is_empty() {
            tokens.push(Token::Text(std::mem::take(bare)));
        }
    };

    while let Some(c) = chars.next() {
        match c {
            '"' => {
                flush_bare(&mut bare, &mut out.tokens);
                out.quoted = true;
                let mut quoted = String::new();
                let mut closed = false;
                while let Some(q) = chars.next() {
                    match q {
                        '\\' => match chars.peek() {
                            Some('"') => {
                                quoted.push('"');
                                chars.next();
                            }
                            Some('\\') => {
                                quoted.push('\\');
                                chars.next();
                            }
                            _ => quoted.push('\\'),
                        },
                        '"' => {
                            closed = true;
                            break;
                        }
                        other => quoted.push(other),
                    }
                }
                out.tokens.push(Token::Text(quoted));
                if !closed {
                    out.open_quote = true;
                    return;
                }
            }
            '/' if chars.peek() == Some(&'/') => {
                break;
            }
            '{' => {
                flush_bare(&mut bare, &mut out.tokens);
                out.tokens.push(Token::Open);
            }
            '}' => {
                flush_bare(&mut bare, &mut out.tokens);
                out.tokens.push(Token::Close);
            }
            c if c.is_whitespace() => flush_bare(&mut bare, &mut out.tokens),
            _ if out.quoted => {}
            other => bare.push(other),
        }
    }

    flush_bare(&mut bare, &mut out.tokens);
}

/// Continues an unterminated quoted string onto the next physical line.
///
/// Returns the text consumed up to the closing quote (or the whole line if
/// the quote stays open), whether the quote closed, and any remainder after
/// the closing quote.
pub(crate) fn continue_quote(line: &str) -> (String, bool, &str) {
    let mut text = String::new();
    let mut iter = line.char_indices().peekable();
    while let Some((i, c)) = iter.next() {
        match c {
            '\\' => match iter.peek() {
                Some((_, '"')) => {
                    text.push('"');
                    iter.next();
                }
                Some((_, '\\')) => {
                    text.push('\\');
                    iter.next();
                }
                _ => text.push('\\'),
            },
            '"' => return (text, true, &line[i + 1..]),
            other => text.push(other),
        }
    }
    (text, false, "")
}

/// A classified logical line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Line {
    /// Empty or comment-only.
    Blank,
    /// `{`
    Open,
    /// `}`
    Close,
    /// A lone key; names the section opened by the next `{`.
    Key(String),
    /// `"key" "value"`
    KeyValue(String, String),
}

/// Classifies the tokens of one complete logical line.
pub(crate) fn classify_line(tokens: Vec<Token>, line_no: usize) -> Result<Line> {
    let mut iter = tokens.into_iter();

    let line = match (iter.next(), iter.next(), iter.next()) {
        (None, _, _) => Line::Blank,
        (Some(Token::Open), None, _) => Line::Open,
        (Some(Token::Close), None, _) => Line::Close,
        (Some(Token::Text(key)), None, _) => Line::Key(key),
        (Some(Token::Text(key)), Some(Token::Text(value)), None) => Line::KeyValue(key, value),
        (Some(Token::Open | Token::Close), Some(_), _)
        | (Some(Token::Text(_)), Some(Token::Open | Token::Close), _) => {
            return Err(Error::MalformedToken {
                line: line_no,
                message: "brace must stand alone on its line".to_string(),
            });
        }
        (Some(_), Some(_), Some(_)) => {
            return Err(Error::MalformedToken {
                line: line_no,
                message: "more than two tokens on one line".to_string(),
            });
        }
    };

    Ok(line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn texts(line: &str) -> Vec<Token> {
        extract_tokens(line).tokens
    }

    #[test]
    fn test_comment_inside_quotes_is_literal() {
        assert_eq!(
            texts(r#""a" "b//c""#),
            vec![Token::Text("a".into()), Token::Text("b//c".into())]
        );
    }

    #[test]
    fn test_trailing_comment_is_dropped() {
        assert_eq!(texts("x // comment"), vec![Token::Text("x".into())]);
        assert_eq!(texts("// only a comment"), vec![]);
    }

    #[test]
    fn test_escaped_quote() {
        assert_eq!(
            texts(r#""say" "he said \"hi\"""#),
            vec![Token::Text("say".into()), Token::Text(r#"he said "hi""#.into())]
        );
    }

    #[test]
    fn test_other_backslashes_kept() {
        assert_eq!(
            texts(r#""path" "a\nb""#),
            vec![Token::Text("path".into()), Token::Text(r"a\nb".into())]
        );
    }

    #[test]
    fn test_braces() {
        assert_eq!(texts("  {  "), vec![Token::Open]);
        assert_eq!(texts("}"), vec![Token::Close]);
    }

    #[test]
    fn test_open_quote_flag() {
        let scanned = extract_tokens(r#""desc" "first part"#);
        assert!(scanned.open_quote);
        assert_eq!(
            scanned.tokens,
            vec![Token::Text("desc".into()), Token::Text("first part".into())]
        );
    }

    #[test]
    fn test_continue_quote() {
        assert_eq!(continue_quote(r#"end" // tail"#), ("end".to_string(), true, " // tail"));
        assert_eq!(continue_quote("still open"), ("still open".to_string(), false, ""));
    }

    #[test]
    fn test_words_after_quoted_token_are_ignored() {
        assert_eq!(
            texts(r#""k" "v" [$X360]"#),
            vec![Token::Text("k".into()), Token::Text("v".into())]
        );
        assert_eq!(texts(r#""k" [$WIN32] // note"#), vec![Token::Text("k".into())]);
        assert_eq!(
            texts(r#""k" "v" } "#),
            vec![Token::Text("k".into()), Token::Text("v".into()), Token::Close]
        );
    }

    #[test]
    fn test_continue_line_keeps_whitespace() {
        let mut line = extract_tokens("\t\"desc\"\t\t\"line one ");
        assert!(line.open_quote);
        line.continue_line("    indented two\" [$WIN32]");
        assert!(!line.open_quote);
        assert_eq!(
            line.tokens,
            vec![
                Token::Text("desc".into()),
                Token::Text("line one \n    indented two".into())
            ]
        );
    }

    #[test]
    fn test_continue_line_reopens() {
        let mut line = extract_tokens(r#""a"#);
        line.continue_line(r#"b" "c"#);
        assert!(line.open_quote);
        line.continue_line(r#"d""#);
        assert!(!line.open_quote);
        assert_eq!(
            line.tokens,
            vec![Token::Text("a\nb".into()), Token::Text("c\nd".into())]
        );
    }

    #[test]
    fn test_classify() {
        let classify = |line: &str, line_no| classify_line(extract_tokens(line).tokens, line_no);
        assert_eq!(classify("", 1).unwrap(), Line::Blank);
        assert_eq!(classify(r#""k""#, 1).unwrap(), Line::Key("k".into()));
        assert_eq!(
            classify(r#""k" "v""#, 1).unwrap(),
            Line::KeyValue("k".into(), "v".into())
        );
        assert!(matches!(
            classify(r#""a" "b" "c""#, 7),
            Err(Error::MalformedToken { line: 7, .. })
        ));
        assert!(matches!(
            classify(r#""a" {"#, 3),
            Err(Error::MalformedToken { line: 3, .. })
        ));
    }
}

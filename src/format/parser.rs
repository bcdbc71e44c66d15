use crate::constants::{COMMENT_DELIMITER, QUOTE};
use crate::error::LoadError;

/// Token of the value part of a parameter line.
#[derive(Debug, PartialEq, Clone)]
pub enum Token {
    // Unquoted token, e.g. a number.
    Bare(String),
    // Double-quoted string without the quotes.
    Quoted(String),
}

/// Parameter line split into its parts, before any typing.
#[derive(Debug, PartialEq, Clone)]
pub struct RawRecord {
    // 1-based line number.
    pub line: usize,
    // First word of the comment.
    pub name: String,
    pub tokens: Vec<Token>,
    // Rest of the comment after the name.
    pub comment: String,
}

/// Split the text into raw records. Blank and comment-only lines (including
/// the section headers) are skipped.
///
/// # Arguments
/// * `text` - Content of the parameter file.
///
/// # Returns
/// Raw records in the file order.
///
/// # Errors
/// Parse error at the first malformed line.
pub fn parse_lines(text: &str) -> Result<Vec<RawRecord>, LoadError> {
    let mut records = Vec::new();
    for (idx, content) in text.lines().enumerate() {
        if let Some(record) = parse_line(idx + 1, content)? {
            records.push(record);
        }
    }

    Ok(records)
}

/// Parse a line of the parameter file.
///
/// # Arguments
/// * `line` - 1-based line number.
/// * `content` - Content of the line.
///
/// # Returns
/// Raw record. None if the line is blank or a comment only.
///
/// # Errors
/// Parse error if the line has no comment, no name, or broken quotes.
pub fn parse_line(line: usize, content: &str) -> Result<Option<RawRecord>, LoadError> {
    let trimmed = content.trim();
    if trimmed.is_empty() || trimmed.starts_with(COMMENT_DELIMITER) {
        return Ok(None);
    }

    let (values, comment) = split_comment(trimmed);
    let comment = comment.ok_or_else(|| {
        LoadError::parse(
            line,
            format!("missing the '{COMMENT_DELIMITER}' comment with the parameter name"),
        )
    })?;

    let tokens = tokenize(line, values)?;

    let (name, rest) = split_name(comment);
    if name.is_empty() {
        return Err(LoadError::parse(
            line,
            "missing the parameter name in the comment",
        ));
    }

    Ok(Some(RawRecord {
        line,
        name: String::from(name),
        tokens,
        comment: String::from(rest),
    }))
}

/// Split the line at the first comment delimiter outside the quotes.
///
/// # Arguments
/// * `content` - Content of the line.
///
/// # Returns
/// Value part and the comment without the delimiter. The comment is None if
/// there is no delimiter.
fn split_comment(content: &str) -> (&str, Option<&str>) {
    let mut is_quoted = false;
    for (idx, ch) in content.char_indices() {
        if ch == QUOTE {
            is_quoted = !is_quoted;
        } else if (ch == COMMENT_DELIMITER) && !is_quoted {
            return (&content[..idx], Some(&content[(idx + ch.len_utf8())..]));
        }
    }

    (content, None)
}

/// Split the value part into tokens.
///
/// # Arguments
/// * `line` - 1-based line number.
/// * `values` - Value part of the line.
///
/// # Returns
/// Tokens.
///
/// # Errors
/// Parse error if a quote is not terminated or is glued to another token.
fn tokenize(line: usize, values: &str) -> Result<Vec<Token>, LoadError> {
    let mut tokens = Vec::new();
    let mut chars = values.chars().peekable();
    while let Some(&ch) = chars.peek() {
        if ch.is_whitespace() {
            chars.next();
            continue;
        }

        if ch == QUOTE {
            chars.next();

            let mut text = String::new();
            loop {
                match chars.next() {
                    Some(QUOTE) => break,
                    Some(c) => text.push(c),
                    None => return Err(LoadError::parse(line, "unterminated quoted string")),
                }
            }

            if chars.peek().is_some_and(|c| !c.is_whitespace()) {
                return Err(LoadError::parse(
                    line,
                    format!("unexpected text after the quoted string \"{text}\""),
                ));
            }

            tokens.push(Token::Quoted(text));
        } else {
            let mut text = String::new();
            while let Some(&c) = chars.peek() {
                if c.is_whitespace() {
                    break;
                }
                if c == QUOTE {
                    return Err(LoadError::parse(
                        line,
                        format!("unexpected quote after the token {text}"),
                    ));
                }

                text.push(c);
                chars.next();
            }

            tokens.push(Token::Bare(text));
        }
    }

    Ok(tokens)
}

/// Split the comment into the parameter name and the remaining text.
///
/// # Arguments
/// * `comment` - Comment without the delimiter.
///
/// # Returns
/// Name (empty if the comment does not begin with an identifier) and the
/// remaining text without the leading dash.
fn split_name(comment: &str) -> (&str, &str) {
    let comment = comment.trim_start();
    let end = comment
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .unwrap_or(comment.len());

    let rest = comment[end..].trim();
    let rest = rest.strip_prefix('-').unwrap_or(rest).trim();

    (&comment[..end], rest)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bare(text: &str) -> Token {
        Token::Bare(String::from(text))
    }

    #[test]
    fn test_parse_line_scalar() {
        let record = parse_line(5, "1                   ! LoggingLevel\t\t- {0: write no debug files}")
            .unwrap()
            .unwrap();

        assert_eq!(record.line, 5);
        assert_eq!(record.name, "LoggingLevel");
        assert_eq!(record.tokens, vec![bare("1")]);
        assert_eq!(record.comment, "{0: write no debug files}");
    }

    #[test]
    fn test_parse_line_array() {
        let record = parse_line(1, "  0.000000  0.250000  ! F_NotchBetaNumDen - Two notch damping values")
            .unwrap()
            .unwrap();

        assert_eq!(record.name, "F_NotchBetaNumDen");
        assert_eq!(record.tokens, vec![bare("0.000000"), bare("0.250000")]);
    }

    #[test]
    fn test_parse_line_quoted() {
        let record = parse_line(1, "\"Cp Ct Cq!.txt\"    ! PerfFileName      - File")
            .unwrap()
            .unwrap();

        assert_eq!(record.name, "PerfFileName");
        assert_eq!(
            record.tokens,
            vec![Token::Quoted(String::from("Cp Ct Cq!.txt"))]
        );
        assert_eq!(record.comment, "File");
    }

    #[test]
    fn test_parse_line_skipped() {
        assert_eq!(parse_line(1, "").unwrap(), None);
        assert_eq!(parse_line(1, "   \t ").unwrap(), None);
        assert_eq!(
            parse_line(1, "!------- DEBUG ------------------------------").unwrap(),
            None
        );
        assert_eq!(
            parse_line(1, "   ! Controller parameter input file").unwrap(),
            None
        );
    }

    #[test]
    fn test_parse_line_without_comment() {
        let error = parse_line(7, "1.0  2.0").unwrap_err();

        assert!(error.is_parse_error());
        assert!(error.to_string().starts_with("Parse error at line 7"));
    }

    #[test]
    fn test_parse_line_without_name() {
        assert!(parse_line(1, "1.0 !").unwrap_err().is_parse_error());
        assert!(parse_line(1, "1.0 ! - description").unwrap_err().is_parse_error());
    }

    #[test]
    fn test_parse_line_broken_quotes() {
        assert!(parse_line(1, "\"Cp_Ct_Cq.txt ! PerfFileName")
            .unwrap_err()
            .is_parse_error());
        assert!(parse_line(1, "\"Cp\"x ! PerfFileName")
            .unwrap_err()
            .is_parse_error());
        assert!(parse_line(1, "x\"Cp\" ! PerfFileName")
            .unwrap_err()
            .is_parse_error());
    }

    #[test]
    fn test_split_name() {
        assert_eq!(split_name(" PC_GS_n\t\t\t- Amount"), ("PC_GS_n", "Amount"));
        assert_eq!(split_name("WE_CP - Parameters"), ("WE_CP", "Parameters"));
        assert_eq!(split_name("Fl_Kp"), ("Fl_Kp", ""));
        assert_eq!(split_name("VS_n-Number"), ("VS_n", "Number"));
        assert_eq!(split_name(" - nothing"), ("", "nothing"));
    }

    #[test]
    fn test_parse_lines() {
        let text = "! Header\n\n!------- DEBUG ---\n1 ! LoggingLevel\n\n2 3 ! PerfTableSize\n";

        let records = parse_lines(text).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].line, 4);
        assert_eq!(records[1].line, 6);
        assert_eq!(records[1].tokens, vec![bare("2"), bare("3")]);
    }

    #[test]
    fn test_parse_lines_error_line() {
        let text = "1 ! LoggingLevel\n2\n";

        match parse_lines(text).unwrap_err() {
            LoadError::Parse { line, .. } => assert_eq!(line, 2),
            error => panic!("Unexpected error: {error}"),
        }
    }
}

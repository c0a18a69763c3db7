use std::fmt;

use crate::http::request::RequestLine;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The header block had no lines at all.
    Empty,
    /// The request line did not split into exactly three tokens.
    WrongTokenCount(usize),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Empty => write!(f, "no request line"),
            ParseError::WrongTokenCount(n) => {
                write!(f, "request line has {} tokens, expected 3", n)
            }
        }
    }
}

impl std::error::Error for ParseError {}

/// Splits `line` on whitespace into `METHOD PATH VERSION`.
pub fn parse_request_line(line: &str) -> Result<RequestLine, ParseError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();

    match tokens.as_slice() {
        [method, path, version] => Ok(RequestLine::new(*method, *path, *version)),
        _ => Err(ParseError::WrongTokenCount(tokens.len())),
    }
}

/// Parses the first collected header line as the request line.
pub fn parse_head(lines: &[String]) -> Result<RequestLine, ParseError> {
    let first = lines.first().ok_or(ParseError::Empty)?;
    parse_request_line(first)
}

/// Strips a trailing `\n` or `\r\n` from a raw line.
///
/// Returns `None` if the line has no `\n` terminator.
pub fn strip_line_terminator(raw: &[u8]) -> Option<&[u8]> {
    let line = raw.strip_suffix(b"\n")?;
    Some(line.strip_suffix(b"\r").unwrap_or(line))
}

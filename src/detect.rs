//! Body format detection.
//!
//! Mail bodies arrive either as HTML or as plain text, and the two need
//! different treatment: running plain text through the tag rules would eat
//! anything that looks like `<this>`.

use std::fs;
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::Result;

/// Elements whose presence marks a body as HTML.
static HTML_ELEMENT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)<(?:!doctype\b|!--|/?(?:html|head|body|meta|title|style|script|p|div|span|br|hr|a|b|i|u|em|strong|code|pre|blockquote|ul|ol|li|table|thead|tbody|tr|td|th|img|font|center|h[1-6])\b[^<>]*>)",
    )
    .unwrap()
});

/// What kind of body a string holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    /// Nothing but whitespace
    Empty,
    /// Text without HTML markup
    PlainText,
    /// An HTML document or fragment
    Html,
}

impl ContentKind {
    /// Short lowercase name, as shown by the CLI.
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentKind::Empty => "empty",
            ContentKind::PlainText => "plain text",
            ContentKind::Html => "html",
        }
    }
}

impl std::fmt::Display for ContentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Detect the kind of a body.
///
/// # Example
/// ```
/// use unhtml::detect::{detect_content, ContentKind};
///
/// assert_eq!(detect_content("<p>Hi</p>"), ContentKind::Html);
/// assert_eq!(detect_content("if a < b then c"), ContentKind::PlainText);
/// ```
pub fn detect_content(body: &str) -> ContentKind {
    if body.trim().is_empty() {
        ContentKind::Empty
    } else if looks_like_html(body) {
        ContentKind::Html
    } else {
        ContentKind::PlainText
    }
}

/// Check if a body contains at least one known HTML element.
pub fn looks_like_html(body: &str) -> bool {
    HTML_ELEMENT_RE.is_match(body)
}

/// Read a body from disk and detect its kind.
///
/// # Returns
/// * `Ok((body, kind))` for a UTF-8 file
/// * `Err(Error::Io)` if the file cannot be read
/// * `Err(Error::Encoding)` if the file is not valid UTF-8
pub fn detect_content_from_path<P: AsRef<Path>>(path: P) -> Result<(String, ContentKind)> {
    let bytes = fs::read(path)?;
    let body = String::from_utf8(bytes)?;
    let kind = detect_content(&body);
    Ok((body, kind))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_detect_empty() {
        assert_eq!(detect_content(""), ContentKind::Empty);
        assert_eq!(detect_content(" \n\t"), ContentKind::Empty);
    }

    #[test]
    fn test_detect_documents() {
        assert_eq!(detect_content("<!DOCTYPE html><html></html>"), ContentKind::Html);
        assert_eq!(detect_content("<HTML><BODY>x</BODY></HTML>"), ContentKind::Html);
        assert_eq!(detect_content("<!-- generated -->"), ContentKind::Html);
    }

    #[test]
    fn test_detect_fragments() {
        assert_eq!(detect_content("Hello<br>world"), ContentKind::Html);
        assert_eq!(detect_content("<p class=\"x\">Hi</p>"), ContentKind::Html);
        assert_eq!(detect_content("<h3>Title</h3>"), ContentKind::Html);
    }

    #[test]
    fn test_detect_plain_text() {
        assert_eq!(detect_content("Thanks,\nBob"), ContentKind::PlainText);
        assert_eq!(detect_content("x < y and y > z"), ContentKind::PlainText);
        assert_eq!(detect_content("Reply to <bob@example.com>"), ContentKind::PlainText);
        assert_eq!(detect_content("<bold claims>"), ContentKind::PlainText);
    }

    #[test]
    fn test_content_kind_display() {
        assert_eq!(ContentKind::Html.to_string(), "html");
        assert_eq!(ContentKind::PlainText.to_string(), "plain text");
    }

    #[test]
    fn test_detect_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("body.html");
        fs::write(&path, "<p>Hi</p>").unwrap();
        let (body, kind) = detect_content_from_path(&path).unwrap();
        assert_eq!(body, "<p>Hi</p>");
        assert_eq!(kind, ContentKind::Html);
    }

    #[test]
    fn test_detect_from_path_invalid_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("body.bin");
        fs::write(&path, b"\xFF\xFE\x00").unwrap();
        let result = detect_content_from_path(&path);
        assert!(matches!(result, Err(Error::Encoding(_))));
    }

    #[test]
    fn test_detect_from_missing_path() {
        let result = detect_content_from_path("/nonexistent/body.html");
        assert!(matches!(result, Err(Error::Io(_))));
    }
}

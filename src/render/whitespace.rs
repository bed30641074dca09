//! Whitespace normalization for converted text.
//!
//! Only ordinary spaces and tabs are collapsed or trimmed. U+00A0 is content
//! and survives untouched, including at the very end of the text.

use once_cell::sync::Lazy;
use regex::Regex;

static SPACE_RUN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ \t]+").unwrap());
static PARAGRAPH_RUN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").unwrap());
static LINE_RUN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{2,}").unwrap());
static ANY_WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Plain whitespace trimmed from the ends of the result.
fn is_plain_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r')
}

/// Normalize spacing and paragraph breaks.
///
/// With `keep_blank_lines`, runs of three or more newlines become one blank
/// line; without it every run of newlines becomes a single line break.
pub fn normalize(text: &str, keep_blank_lines: bool) -> String {
    let collapsed = SPACE_RUN_RE.replace_all(text, " ");

    let trimmed = collapsed
        .split('\n')
        .map(|line| line.trim_matches(|c: char| c == ' ' || c == '\t'))
        .collect::<Vec<_>>()
        .join("\n");

    let breaks = if keep_blank_lines {
        PARAGRAPH_RUN_RE.replace_all(&trimmed, "\n\n")
    } else {
        LINE_RUN_RE.replace_all(&trimmed, "\n")
    };

    breaks.trim_matches(is_plain_whitespace).to_string()
}

/// Collapse every whitespace run, newlines included, to one space.
pub fn collapse_all(text: &str) -> String {
    ANY_WHITESPACE_RE.replace_all(text, " ").trim().to_string()
}

/// Collapse whitespace runs to one space without trimming.
pub(crate) fn collapse_inline(text: &str) -> String {
    ANY_WHITESPACE_RE.replace_all(text, " ").into_owned()
}

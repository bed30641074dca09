//! Greedy word wrapping that keeps quote and bullet prefixes.

use once_cell::sync::Lazy;
use regex::Regex;

/// Leading quote/bullet markers, each followed by whitespace.
static PREFIX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:[ \t]*[>•*\-][ \t]+)+").unwrap());

/// Wrap every line of `text` to at most `width` characters.
///
/// A `width` of 0 disables wrapping. Blank lines and lines that already fit
/// are returned as-is. A word longer than the available width is placed on
/// its own line without being split.
pub fn wrap(text: &str, width: usize) -> String {
    if width == 0 {
        return text.to_string();
    }

    let mut lines = Vec::new();
    for line in text.split('\n') {
        if line.trim().is_empty() || line.chars().count() <= width {
            lines.push(line.to_string());
        } else {
            wrap_line(line, width, &mut lines);
        }
    }
    lines.join("\n")
}

fn wrap_line(line: &str, width: usize, out: &mut Vec<String>) {
    let mut prefix = line_prefix(line);
    let mut budget = width.saturating_sub(prefix.chars().count());

    // A word that fits the width must never be pushed past it by the prefix
    let crowded = line[prefix.len()..]
        .split([' ', '\t'])
        .map(|w| w.chars().count())
        .any(|len| len > budget && len <= width);
    if crowded {
        prefix = "";
        budget = width;
    }
    let body = &line[prefix.len()..];

    let mut wrapped = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in body.split([' ', '\t']).filter(|w| !w.is_empty()) {
        let word_len = word.chars().count();
        if current.is_empty() {
            current.push_str(word);
            current_len = word_len;
        } else if current_len + 1 + word_len <= budget {
            current.push(' ');
            current.push_str(word);
            current_len += 1 + word_len;
        } else {
            wrapped.push(format!("{}{}", prefix, current));
            current.clear();
            current.push_str(word);
            current_len = word_len;
        }

        if current_len > budget {
            log::trace!("Word of {} chars exceeds wrap width {}", word_len, width);
        }
    }

    if !current.is_empty() || wrapped.is_empty() {
        wrapped.push(format!("{}{}", prefix, current));
    }
    out.extend(wrapped);
}

/// The marker prefix of a line, or `""` when it has none.
pub fn line_prefix(line: &str) -> &str {
    PREFIX_RE.find(line).map_or("", |m| m.as_str())
}

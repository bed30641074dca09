//! List rendering.
//!
//! Lists nest, which a single pattern cannot follow, so `<ul>`, `<ol>` and
//! `<li>` tags are walked with a stack. Everything between those tags is
//! copied through; inside a list it is flattened onto the item's line.

use once_cell::sync::Lazy;
use regex::Regex;

use super::blocks::LIST_INDENT;
use super::result::ConversionStats;
use super::whitespace::collapse_inline;
use super::ConversionOptions;

const BULLET: &str = "\u{2022} ";
const INDENT_PER_LEVEL: usize = 2;

static LIST_TAG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)<(/?)(ul|ol|li)\b([^>]*)>").unwrap());
static START_ATTR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i)\bstart\s*=\s*["']?(-?\d+)"#).unwrap());
static ITEM_BREAK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)</?(?:p|div)\b[^>]*>|<br\b[^>]*>").unwrap());

/// One open `<ul>` or `<ol>`.
#[derive(Debug)]
struct ListFrame {
    ordered: bool,
    next_number: i64,
}

impl ListFrame {
    fn marker(&mut self) -> String {
        if self.ordered {
            let marker = format!("{}. ", self.next_number);
            self.next_number += 1;
            marker
        } else {
            BULLET.to_string()
        }
    }
}

/// Render every list item on its own marked line.
pub fn render_lists(html: &str, options: &ConversionOptions, stats: &mut ConversionStats) -> String {
    if !LIST_TAG_RE.is_match(html) {
        return html.to_string();
    }

    let mut out = String::with_capacity(html.len());
    let mut stack: Vec<ListFrame> = Vec::new();
    let mut last = 0;

    for caps in LIST_TAG_RE.captures_iter(html) {
        let Some(tag) = caps.get(0) else { continue };
        push_text(&mut out, &html[last..tag.start()], !stack.is_empty());
        last = tag.end();

        let closing = !caps[1].is_empty();
        let name = caps[2].to_ascii_lowercase();

        match (name.as_str(), closing) {
            ("ul", false) | ("ol", false) => {
                if stack.is_empty() {
                    ensure_line_start(&mut out);
                }
                let ordered = name == "ol";
                let next_number = if ordered { start_number(&caps[3]) } else { 1 };
                stack.push(ListFrame {
                    ordered,
                    next_number,
                });
            }
            ("ul", true) | ("ol", true) => {
                stack.pop();
                if stack.is_empty() {
                    out.push_str(options.block_break());
                } else {
                    ensure_line_start(&mut out);
                }
            }
            ("li", false) => {
                ensure_line_start(&mut out);
                let depth = stack.len().max(1);
                for _ in 0..(depth - 1) * INDENT_PER_LEVEL {
                    out.push(LIST_INDENT);
                }
                let marker = match stack.last_mut() {
                    Some(frame) => frame.marker(),
                    None => BULLET.to_string(),
                };
                out.push_str(&marker);
                stats.add_list_item();
            }
            _ => {}
        }
    }

    push_text(&mut out, &html[last..], !stack.is_empty());

    if !stack.is_empty() {
        log::debug!("{} list(s) left unclosed", stack.len());
    }
    out
}

/// Copy text found between list tags.
fn push_text(out: &mut String, text: &str, in_list: bool) {
    if !in_list {
        out.push_str(text);
        return;
    }
    if text.trim().is_empty() {
        return;
    }
    let flattened = ITEM_BREAK_RE.replace_all(text, " ");
    let flattened = collapse_inline(&flattened);
    if out.ends_with('\n') || out.ends_with(BULLET) || ends_with_number_marker(out) {
        out.push_str(flattened.trim_start());
    } else {
        out.push_str(&flattened);
    }
}

fn ends_with_number_marker(out: &str) -> bool {
    let Some(rest) = out.strip_suffix(". ") else {
        return false;
    };
    rest.chars().last().is_some_and(|c| c.is_ascii_digit())
}

fn ensure_line_start(out: &mut String) {
    if !out.is_empty() && !out.ends_with('\n') {
        out.push('\n');
    }
}

fn start_number(attrs: &str) -> i64 {
    START_ATTR_RE
        .captures(attrs)
        .and_then(|caps| caps[1].parse().ok())
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(html: &str) -> String {
        let mut stats = ConversionStats::new();
        render_lists(html, &ConversionOptions::default(), &mut stats).replace(LIST_INDENT, " ")
    }

    #[test]
    fn test_unordered_list() {
        assert_eq!(render("<ul><li>One</li><li>Two</li></ul>"), "\u{2022} One\n\u{2022} Two\n\n");
    }

    #[test]
    fn test_ordered_list_numbering() {
        assert_eq!(render("<ol><li>First</li><li>Second</li></ol>"), "1. First\n2. Second\n\n");
    }

    #[test]
    fn test_numbering_restarts_per_list() {
        let text = render("<ol><li>a</li><li>b</li></ol><ol><li>c</li></ol>");
        assert_eq!(text, "1. a\n2. b\n\n1. c\n\n");
    }

    #[test]
    fn test_ordered_start_attribute() {
        assert_eq!(render("<ol start=\"4\"><li>d</li><li>e</li></ol>"), "4. d\n5. e\n\n");
    }

    #[test]
    fn test_nested_lists() {
        let html = "<ul><li>Item 1</li><li>Item 2<ul><li>Sub item 1</li><li>Sub item 2</li></ul></li><li>Item 3</li></ul>";
        assert_eq!(
            render(html),
            "\u{2022} Item 1\n\u{2022} Item 2\n  \u{2022} Sub item 1\n  \u{2022} Sub item 2\n\u{2022} Item 3\n\n"
        );
    }

    #[test]
    fn test_deep_nesting_compounds_indent() {
        let html = "<ol><li>a<ul><li>b<ol><li>c</li></ol></li></ul></li></ol>";
        assert_eq!(render(html), "1. a\n  \u{2022} b\n    1. c\n\n\n");
    }

    #[test]
    fn test_source_whitespace_between_items_ignored() {
        let html = "<ul>\n  <li>\n    One\n  </li>\n  <li>Two\n words</li>\n</ul>";
        assert_eq!(render(html), "\u{2022} One \n\u{2022} Two words\n\n");
    }

    #[test]
    fn test_empty_item() {
        assert_eq!(render("<ul><li></li></ul>"), "\u{2022} \n\n");
    }

    #[test]
    fn test_text_before_list_starts_new_line() {
        assert_eq!(render("Intro:<ul><li>x</li></ul>After"), "Intro:\n\u{2022} x\n\nAfter");
    }

    #[test]
    fn test_item_paragraphs_flattened() {
        assert_eq!(render("<ul><li><p>para</p></li></ul>"), "\u{2022} para \n\n");
    }

    #[test]
    fn test_stray_item_renders_bullet() {
        assert_eq!(render("<li>loose</li>"), "\u{2022} loose");
    }

    #[test]
    fn test_list_item_count() {
        let mut stats = ConversionStats::new();
        render_lists(
            "<ul><li>a</li><li>b<ol><li>c</li></ol></li></ul>",
            &ConversionOptions::default(),
            &mut stats,
        );
        assert_eq!(stats.list_item_count, 3);
    }

    #[test]
    fn test_similar_tags_untouched() {
        let html = "<link rel=\"x\"><olive>";
        assert_eq!(render(html), html);
    }
}

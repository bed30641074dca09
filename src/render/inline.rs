//! Inline emphasis and link rules.
//!
//! Each emphasis rule pairs an opening tag with the nearest closing tag of
//! the same name. Mismatched nesting of different tags is not repaired and
//! may interleave the markers.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use super::blocks::strip_tags;
use super::result::ConversionStats;
use super::whitespace::collapse_inline;
use super::{ConversionOptions, LinkStyle};

/// (pattern, marker) pairs applied in order.
static EMPHASIS_RULES: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    [
        ("strong", "**"),
        ("b", "**"),
        ("em", "*"),
        ("i", "*"),
        ("u", "_"),
        ("code", "`"),
    ]
    .iter()
    .map(|(tag, marker)| {
        let pattern = format!(r"(?is)<{tag}(?:\s[^>]*)?>(.*?)</{tag}\s*>", tag = tag);
        (Regex::new(&pattern).unwrap(), *marker)
    })
    .collect()
});

static LINK_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(?is)<a\s[^>]*?\bhref\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>]+))[^>]*>(.*?)</a\s*>"#,
    )
    .unwrap()
});

/// Replace emphasis tags with their text markers.
pub fn apply_emphasis(html: &str) -> String {
    let mut result = html.to_string();
    for (re, marker) in EMPHASIS_RULES.iter() {
        if !re.is_match(&result) {
            continue;
        }
        result = re
            .replace_all(&result, |caps: &Captures| {
                let content = &caps[1];
                if content.trim().is_empty() {
                    content.to_string()
                } else {
                    format!("{marker}{content}{marker}", marker = marker)
                }
            })
            .into_owned();
    }
    result
}

/// Replace anchors with their text and, optionally, their target.
pub fn apply_links(html: &str, options: &ConversionOptions, stats: &mut ConversionStats) -> String {
    LINK_RE
        .replace_all(html, |caps: &Captures| {
            let href = caps
                .get(1)
                .or_else(|| caps.get(2))
                .or_else(|| caps.get(3))
                .map_or("", |m| m.as_str())
                .trim();
            let text = collapse_inline(&strip_tags(&caps[4])).trim().to_string();
            stats.add_link();
            render_link(&text, href, options)
        })
        .into_owned()
}

/// Render one link.
///
/// `text` is the anchor body with tags stripped and whitespace collapsed.
pub fn render_link(text: &str, href: &str, options: &ConversionOptions) -> String {
    if !options.preserve_links || href.is_empty() || is_local_target(href) {
        return text.to_string();
    }

    let shown = display_url(href);
    if text.is_empty() || text == href || text == shown {
        return shown.to_string();
    }

    match options.style.link {
        LinkStyle::Bracket => format!("{} [{}]", text, shown),
        LinkStyle::Paren => format!("{} ({})", text, shown),
    }
}

/// The URL as shown to the reader: `mailto:` is dropped.
pub fn display_url(href: &str) -> &str {
    match href.get(..7) {
        Some(scheme) if scheme.eq_ignore_ascii_case("mailto:") => &href[7..],
        _ => href,
    }
}

/// Targets that mean nothing outside the original page.
fn is_local_target(href: &str) -> bool {
    href.starts_with('#')
        || href
            .get(..11)
            .is_some_and(|scheme| scheme.eq_ignore_ascii_case("javascript:"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn links(html: &str, options: &ConversionOptions) -> String {
        let mut stats = ConversionStats::new();
        apply_links(html, options, &mut stats)
    }

    #[test]
    fn test_emphasis_markers() {
        assert_eq!(apply_emphasis("<strong>x</strong>"), "**x**");
        assert_eq!(apply_emphasis("<b>x</b>"), "**x**");
        assert_eq!(apply_emphasis("<em>x</em> <i>y</i>"), "*x* *y*");
        assert_eq!(apply_emphasis("<u>x</u>"), "_x_");
        assert_eq!(apply_emphasis("<code>x()</code>"), "`x()`");
    }

    #[test]
    fn test_emphasis_case_insensitive_and_attributes() {
        assert_eq!(apply_emphasis("<B class=\"x\">bold</B>"), "**bold**");
        assert_eq!(apply_emphasis("<STRONG>\nmulti\nline\n</STRONG>"), "**\nmulti\nline\n**");
    }

    #[test]
    fn test_emphasis_does_not_touch_similar_tags() {
        let html = "<br><blockquote>q</blockquote><img src=\"a\"><ul><li>x</li></ul>";
        assert_eq!(apply_emphasis(html), html);
    }

    #[test]
    fn test_emphasis_shortest_span() {
        assert_eq!(apply_emphasis("<b>a</b> and <b>b</b>"), "**a** and **b**");
    }

    #[test]
    fn test_emphasis_whitespace_only() {
        assert_eq!(apply_emphasis("a<b> </b>b"), "a b");
    }

    #[test]
    fn test_link_with_text() {
        let html = r#"<a href="https://example.com">Click</a>"#;
        assert_eq!(links(html, &ConversionOptions::default()), "Click [https://example.com]");
    }

    #[test]
    fn test_link_paren_style() {
        let options = ConversionOptions::default().with_link_style(LinkStyle::Paren);
        let html = r#"<a href="https://example.com">Click</a>"#;
        assert_eq!(links(html, &options), "Click (https://example.com)");
    }

    #[test]
    fn test_link_text_equals_url() {
        let html = r#"<a href="https://example.com">https://example.com</a>"#;
        assert_eq!(links(html, &ConversionOptions::default()), "https://example.com");
    }

    #[test]
    fn test_link_empty_body() {
        let html = r#"<a href="https://example.com"></a>"#;
        assert_eq!(links(html, &ConversionOptions::default()), "https://example.com");
    }

    #[test]
    fn test_link_inner_tags_stripped() {
        let html = r#"<a href='https://example.com'> <span>Go</span>  here </a>"#;
        assert_eq!(links(html, &ConversionOptions::default()), "Go here [https://example.com]");
    }

    #[test]
    fn test_mailto_link() {
        let html = r#"<a href="mailto:bob@example.com">bob@example.com</a>"#;
        assert_eq!(links(html, &ConversionOptions::default()), "bob@example.com");

        let html = r#"<a href="MAILTO:bob@example.com">Bob</a>"#;
        assert_eq!(links(html, &ConversionOptions::default()), "Bob [bob@example.com]");
    }

    #[test]
    fn test_links_disabled() {
        let options = ConversionOptions::default().with_links(false);
        let html = r#"Visit <a href="https://example.com">our site</a>."#;
        assert_eq!(links(html, &options), "Visit our site.");
    }

    #[test]
    fn test_local_targets_render_text_only() {
        let options = ConversionOptions::default();
        assert_eq!(links(r##"<a href="#top">Top</a>"##, &options), "Top");
        assert_eq!(links(r#"<a href="javascript:void(0)">Run</a>"#, &options), "Run");
    }

    #[test]
    fn test_unquoted_href() {
        let html = "<a href=https://example.com/x>X</a>";
        assert_eq!(links(html, &ConversionOptions::default()), "X [https://example.com/x]");
    }

    #[test]
    fn test_link_count() {
        let mut stats = ConversionStats::new();
        apply_links(
            r#"<a href="a">1</a><a href="b">2</a><a name="c">3</a>"#,
            &ConversionOptions::default(),
            &mut stats,
        );
        assert_eq!(stats.link_count, 2);
    }
}

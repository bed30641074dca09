//! Block-level rules: non-content removal, headings, blockquotes,
//! preformatted blocks, paragraph boundaries and tag stripping.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use super::entities;
use super::result::ConversionStats;
use super::whitespace::collapse_inline;
use super::{ConversionOptions, HeadingStyle, PreStyle};

/// Stands in for list indentation until line trimming is done.
pub(crate) const LIST_INDENT: char = '\u{0000}';

/// Stands in for spaces inside preformatted blocks until wrapping is done.
pub(crate) const PRE_SPACE: char = '\u{0001}';

const PRE_TAB_WIDTH: usize = 4;

static SCRIPT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<script\b[^>]*>.*?</script\s*>").unwrap());
static STYLE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<style\b[^>]*>.*?</style\s*>").unwrap());
static HEAD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?is)<head\b[^>]*>.*?</head\s*>").unwrap());
static TITLE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<title\b[^>]*>.*?</title\s*>").unwrap());
static UNCLOSED_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<(?:script|style)\b[^>]*>.*\z").unwrap());
static COMMENT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<!--.*?-->").unwrap());
static CDATA_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<!\[CDATA\[(.*?)\]\]>").unwrap());
static DOCTYPE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\A\s*<!doctype[^>]*>").unwrap());

static HEADING_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<h([1-6])\b[^>]*>(.*?)</h[1-6]\s*>").unwrap());

static BLOCKQUOTE_OPEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)<blockquote\b[^>]*>").unwrap());
static BLOCKQUOTE_CLOSE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)</blockquote\s*>").unwrap());
static QUOTE_PARAGRAPH_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)</p\s*>|</?div\b[^>]*>").unwrap());
static QUOTE_LINE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<br\b[^>]*>").unwrap());

static PRE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?is)<pre\b[^>]*>(.*?)</pre\s*>").unwrap());

static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[a-zA-Z/!?][^>]*>").unwrap());
static DANGLING_TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[a-zA-Z/!?][^<>]*\z").unwrap());

/// What a block boundary tag turns into.
#[derive(Debug, Clone, Copy)]
enum Boundary {
    Paragraph,
    Line,
    Space,
}

static BOUNDARY_RULES: Lazy<Vec<(Regex, Boundary)>> = Lazy::new(|| {
    [
        (r"(?i)</p\s*>", Boundary::Paragraph),
        (r"(?i)</?div\b[^>]*>", Boundary::Paragraph),
        (r"(?i)</(?:ul|ol|blockquote|pre)\s*>", Boundary::Paragraph),
        (r"(?i)<br\b[^>]*>", Boundary::Line),
        (r"(?i)<hr\b[^>]*>", Boundary::Line),
        (r"(?i)</(?:tr|table)\s*>", Boundary::Line),
        (r"(?i)</t[dh]\s*>", Boundary::Space),
    ]
    .iter()
    .map(|(pattern, boundary)| (Regex::new(pattern).unwrap(), *boundary))
    .collect()
});

/// Remove a pattern, counting how many blocks went away.
fn remove_counted(re: &Regex, text: String, stats: &mut ConversionStats) -> String {
    let count = re.find_iter(&text).count();
    if count == 0 {
        return text;
    }
    stats.add_removed(count);
    re.replace_all(&text, "").into_owned()
}

/// Drop everything that is never displayed: scripts, styles, the document
/// head, comments and the DOCTYPE. CDATA sections are unwrapped.
pub fn remove_non_content(html: &str, stats: &mut ConversionStats) -> String {
    let text: String = html
        .replace("\r\n", "\n")
        .chars()
        .map(|c| if c == '\r' { '\n' } else { c })
        .filter(|c| *c != LIST_INDENT && *c != PRE_SPACE)
        .collect();

    // Comments first: tags inside them are not real openers
    let text = remove_counted(&COMMENT_RE, text, stats);
    let text = remove_counted(&SCRIPT_RE, text, stats);
    let text = remove_counted(&STYLE_RE, text, stats);
    let text = remove_counted(&HEAD_RE, text, stats);
    let text = remove_counted(&TITLE_RE, text, stats);
    let text = remove_counted(&UNCLOSED_RE, text, stats);
    let text = CDATA_RE.replace_all(&text, "$1");
    DOCTYPE_RE.replace(&text, "").into_owned()
}

/// Render `<h1>`..`<h6>` as standalone paragraphs.
pub fn render_headings(
    html: &str,
    options: &ConversionOptions,
    stats: &mut ConversionStats,
) -> String {
    let brk = options.block_break();
    HEADING_RE
        .replace_all(html, |caps: &Captures| {
            let level: usize = caps[1].parse().unwrap_or(1);
            let text = collapse_inline(&strip_tags(&caps[2])).trim().to_string();
            if text.is_empty() {
                return brk.to_string();
            }
            stats.add_heading();

            match options.style.heading {
                HeadingStyle::Markdown => {
                    format!("{brk}{} {text}{brk}", "#".repeat(level))
                }
                HeadingStyle::Underline => {
                    let shown = entities::decode(&text, options.entity_policy);
                    let rule = "=".repeat(shown.chars().count().min(options.rule_width()));
                    format!("{brk}{text}\n{rule}{brk}")
                }
            }
        })
        .into_owned()
}

/// Render blockquotes with a `> ` prefix on every line.
///
/// Pairs are resolved innermost first, so nested quotes gain one `>` per
/// level. A closing tag without an opening tag before it is left for the
/// boundary stage.
pub fn render_blockquotes(
    html: &str,
    options: &ConversionOptions,
    stats: &mut ConversionStats,
) -> String {
    let mut text = html.to_string();
    let mut search_from = 0;

    while let Some(close) = BLOCKQUOTE_CLOSE_RE.find_at(&text, search_from) {
        let close = close.range();
        let Some(open) = BLOCKQUOTE_OPEN_RE
            .find_iter(&text[..close.start])
            .last()
            .map(|m| m.range())
        else {
            search_from = close.end;
            continue;
        };

        let rendered = quote_block(&text[open.end..close.start], options.block_break());
        stats.add_blockquote();
        text.replace_range(open.start..close.end, &rendered);
        search_from = open.start + rendered.len();
    }

    text
}

fn quote_block(inner: &str, brk: &str) -> String {
    let broken = QUOTE_PARAGRAPH_RE.replace_all(inner, "\n\n");
    let broken = QUOTE_LINE_RE.replace_all(&broken, "\n");
    let stripped = strip_tags(&broken);
    let content = stripped.trim();
    if content.is_empty() {
        return brk.to_string();
    }

    let mut lines: Vec<String> = Vec::new();
    for line in content.lines().map(|l| l.trim_matches(|c: char| c == ' ' || c == '\t')) {
        if line.is_empty() {
            if lines.last().is_some_and(|l| l == ">") {
                continue;
            }
            lines.push(">".to_string());
        } else {
            lines.push(format!("> {}", line));
        }
    }

    format!("{brk}{}{brk}", lines.join("\n"))
}

/// Render `<pre>` blocks, keeping their internal whitespace.
pub fn render_preformatted(
    html: &str,
    options: &ConversionOptions,
    stats: &mut ConversionStats,
) -> String {
    let brk = options.block_break();
    PRE_RE
        .replace_all(html, |caps: &Captures| {
            let stripped = strip_tags(&caps[1]);
            let mut content = stripped.trim_matches('\n');
            if content.len() >= 2
                && content.starts_with('`')
                && content.ends_with('`')
                && content.matches('`').count() == 2
            {
                content = &content[1..content.len() - 1];
            }
            if content.trim().is_empty() {
                return brk.to_string();
            }
            stats.add_code_block();

            let protected: String = content
                .replace('\t', &" ".repeat(PRE_TAB_WIDTH))
                .chars()
                .map(|c| if c == ' ' { PRE_SPACE } else { c })
                .collect();

            match options.style.pre {
                PreStyle::Plain => format!("{brk}{protected}{brk}"),
                PreStyle::Fenced => format!("{brk}```\n{protected}\n```{brk}"),
            }
        })
        .into_owned()
}

/// Turn paragraph and line boundaries into newlines.
pub fn apply_boundaries(html: &str, options: &ConversionOptions) -> String {
    let mut result = html.to_string();
    for (re, boundary) in BOUNDARY_RULES.iter() {
        let replacement = match boundary {
            Boundary::Paragraph => options.block_break(),
            Boundary::Line => "\n",
            Boundary::Space => " ",
        };
        result = re.replace_all(&result, replacement).into_owned();
    }
    result
}

/// Remove every tag, keeping the text between them.
pub fn strip_tags(html: &str) -> String {
    TAG_RE.replace_all(html, "").into_owned()
}

/// Remove remaining tags and a tag left open at the very end of the input.
pub fn strip_remaining_tags(html: &str) -> String {
    let stripped = strip_tags(html);
    DANGLING_TAG_RE.replace(&stripped, "").into_owned()
}

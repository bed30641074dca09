//! # unhtml
//!
//! Fast HTML email body to terminal text conversion for Rust.
//!
//! This library turns the HTML part of an email into readable plain text
//! for a monospace display. Headings, emphasis, lists, links, quotes and
//! preformatted blocks survive as simple typographic markers.
//!
//! ## Quick Start
//!
//! ```
//! use unhtml::{convert, ConversionOptions};
//!
//! let html = r#"<p>Hello <b>Ann</b>, see <a href="https://example.com">the notes</a>.</p>"#;
//! let text = convert(html, &ConversionOptions::default());
//! assert_eq!(text, "Hello **Ann**, see the notes [https://example.com].");
//! ```
//!
//! ## Features
//!
//! - **Never fails**: any string, however malformed, produces some text
//! - **Terminal layout**: prefix-aware word wrapping for quotes and lists
//! - **Configurable style**: Markdown or underlined headings, `[url]` or `(url)` links
//! - **Previews**: single-line previews with exact length limits
//! - **Parallel processing**: Uses Rayon for batch conversion

pub mod detect;
pub mod error;
pub mod render;

// Re-export commonly used types
pub use detect::{detect_content, looks_like_html, ContentKind};
pub use error::{Error, Result};
pub use render::{
    to_json, ConversionOptions, ConversionResult, ConversionStats, EntityPolicy, HeadingStyle,
    HtmlPipeline, JsonFormat, LinkStyle, OutputStyle, PreStyle, DEFAULT_LINE_WIDTH,
};
pub use render::{convert_for_preview, truncate};

use rayon::prelude::*;

/// Convert an HTML body to plain text.
///
/// # Arguments
///
/// * `html` - The HTML body, possibly malformed
/// * `options` - Conversion options
///
/// # Example
///
/// ```
/// use unhtml::{convert, ConversionOptions};
///
/// let text = convert("<ol><li>First</li><li>Second</li></ol>", &ConversionOptions::default());
/// assert_eq!(text, "1. First\n2. Second");
/// ```
pub fn convert(html: &str, options: &ConversionOptions) -> String {
    HtmlPipeline::new(options.clone()).convert(html)
}

/// Convert a body that may be missing. `None` converts to the empty string.
pub fn convert_opt(html: Option<&str>, options: &ConversionOptions) -> String {
    html.map(|html| convert(html, options)).unwrap_or_default()
}

/// Convert an HTML body for full terminal display.
///
/// Lines wrap at 80 columns, link targets are kept and paragraphs are
/// separated by a blank line.
pub fn convert_for_display(html: &str) -> String {
    convert(html, &ConversionOptions::display())
}

/// Convert an HTML body and collect statistics.
///
/// # Example
///
/// ```
/// use unhtml::{convert_with_stats, ConversionOptions};
///
/// let result = convert_with_stats("<h1>Hi</h1><p>there</p>", &ConversionOptions::default());
/// assert_eq!(result.stats.heading_count, 1);
/// assert_eq!(result.stats.word_count, 3);
/// ```
pub fn convert_with_stats(html: &str, options: &ConversionOptions) -> ConversionResult {
    HtmlPipeline::new(options.clone()).process(html)
}

/// Convert many bodies in parallel.
///
/// The output order matches the input order.
pub fn convert_batch<S: AsRef<str> + Sync>(bodies: &[S], options: &ConversionOptions) -> Vec<String> {
    let pipeline = HtmlPipeline::new(options.clone());
    let texts: Vec<String> = bodies
        .par_iter()
        .map(|body| pipeline.convert(body.as_ref()))
        .collect();
    log::debug!("Converted a batch of {} bodies", texts.len());
    texts
}

/// Render a mail body of unknown kind.
///
/// HTML bodies go through the full pipeline. Plain-text bodies keep their
/// characters as-is and only get whitespace normalization and wrapping.
///
/// # Example
///
/// ```
/// use unhtml::{render_body, ConversionOptions};
///
/// let options = ConversionOptions::default();
/// assert_eq!(render_body("<p>a &lt; b</p>", &options).text, "a < b");
/// assert_eq!(render_body("a &lt; b", &options).text, "a &lt; b");
/// ```
pub fn render_body(body: &str, options: &ConversionOptions) -> ConversionResult {
    let pipeline = HtmlPipeline::new(options.clone());
    match detect_content(body) {
        ContentKind::Empty => ConversionResult::text_only(String::new()),
        ContentKind::PlainText => pipeline.process_plain(body),
        ContentKind::Html => pipeline.process(body),
    }
}

//! The HTML to text conversion pipeline.
//!
//! Stages run in a fixed order. Emphasis and links are rewritten before any
//! block rule so that their markers end up inside headings, list items and
//! quotes. Entities are decoded only after every tag is gone, which keeps an
//! escaped `&lt;b&gt;` from being mistaken for markup.

use unicode_normalization::UnicodeNormalization;

use super::blocks::{self, LIST_INDENT, PRE_SPACE};
use super::result::{ConversionResult, ConversionStats};
use super::{entities, inline, lists, whitespace, wrap, ConversionOptions};

/// Converts HTML bodies to plain text with a fixed set of options.
#[derive(Debug, Clone, Default)]
pub struct HtmlPipeline {
    options: ConversionOptions,
}

impl HtmlPipeline {
    /// Create a new pipeline with the given options.
    pub fn new(options: ConversionOptions) -> Self {
        Self { options }
    }

    /// The options this pipeline converts with.
    pub fn options(&self) -> &ConversionOptions {
        &self.options
    }

    /// Convert an HTML body to plain text.
    pub fn convert(&self, html: &str) -> String {
        self.process(html).text
    }

    /// Convert an HTML body, collecting statistics along the way.
    pub fn process(&self, html: &str) -> ConversionResult {
        let mut stats = ConversionStats::new();
        if html.is_empty() {
            return ConversionResult::new(String::new(), stats);
        }

        let options = &self.options;

        // Stage 1: markup that is never displayed
        let text = blocks::remove_non_content(html, &mut stats);

        // Stage 2: inline markup
        let text = inline::apply_emphasis(&text);
        let text = inline::apply_links(&text, options, &mut stats);

        // Stage 3: block structure
        let text = blocks::render_headings(&text, options, &mut stats);
        let text = lists::render_lists(&text, options, &mut stats);
        let text = blocks::render_blockquotes(&text, options, &mut stats);
        let text = blocks::render_preformatted(&text, options, &mut stats);
        let text = blocks::apply_boundaries(&text, options);
        let text = blocks::strip_remaining_tags(&text);

        // Stage 4: text
        let text = entities::decode(&text, options.entity_policy);
        let text = whitespace::normalize(&text, options.add_spacing);
        let text = if options.normalize_unicode {
            text.nfc().collect()
        } else {
            text
        };

        // Stage 5: layout
        let text = text.replace(LIST_INDENT, " ");
        let text = wrap::wrap(&text, options.max_line_width);
        let text = text.replace(PRE_SPACE, " ");

        stats.count_text(&text);
        log::debug!(
            "Converted {} bytes of HTML into {} lines ({} links, {} list items)",
            html.len(),
            stats.line_count,
            stats.link_count,
            stats.list_item_count
        );

        ConversionResult::new(text, stats)
    }

    /// Run only the text stages on a body that carries no markup.
    ///
    /// Entities are left alone: a plain-text body means what it says.
    pub fn process_plain(&self, text: &str) -> ConversionResult {
        let text: String = text
            .replace("\r\n", "\n")
            .chars()
            .map(|c| if c == '\r' { '\n' } else { c })
            .collect();
        let text = whitespace::normalize(&text, self.options.add_spacing);
        let text = if self.options.normalize_unicode {
            text.nfc().collect()
        } else {
            text
        };
        let text = wrap::wrap(&text, self.options.max_line_width);
        ConversionResult::text_only(text)
    }
}

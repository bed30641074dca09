//! Conversion result with statistics.

use serde::{Deserialize, Serialize};

/// Result of converting an HTML body, including statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionResult {
    /// The converted plain text
    pub text: String,

    /// Conversion statistics
    pub stats: ConversionStats,
}

impl ConversionResult {
    /// Create a new conversion result.
    pub fn new(text: String, stats: ConversionStats) -> Self {
        Self { text, stats }
    }

    /// Create a simple result with just text.
    pub fn text_only(text: String) -> Self {
        let mut stats = ConversionStats::new();
        stats.count_text(&text);
        Self { text, stats }
    }
}

/// Statistics collected while converting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionStats {
    /// Script, style, head and comment blocks removed
    pub removed_block_count: u32,

    /// Number of anchors rewritten
    pub link_count: u32,

    /// Number of headings rendered
    pub heading_count: u32,

    /// Number of list items rendered
    pub list_item_count: u32,

    /// Number of blockquotes rendered
    pub blockquote_count: u32,

    /// Number of preformatted blocks rendered
    pub code_block_count: u32,

    /// Approximate word count (whitespace-separated tokens)
    pub word_count: u32,

    /// Character count (excluding whitespace)
    pub char_count: u32,

    /// Number of output lines
    pub line_count: u32,
}

impl ConversionStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add to the removed block count.
    pub fn add_removed(&mut self, count: usize) {
        self.removed_block_count += count as u32;
    }

    /// Increment link count.
    pub fn add_link(&mut self) {
        self.link_count += 1;
    }

    /// Increment heading count.
    pub fn add_heading(&mut self) {
        self.heading_count += 1;
    }

    /// Increment list item count.
    pub fn add_list_item(&mut self) {
        self.list_item_count += 1;
    }

    /// Increment blockquote count.
    pub fn add_blockquote(&mut self) {
        self.blockquote_count += 1;
    }

    /// Increment preformatted block count.
    pub fn add_code_block(&mut self) {
        self.code_block_count += 1;
    }

    /// Set word, character and line counts from the final text.
    pub fn count_text(&mut self, text: &str) {
        self.word_count = text.split_whitespace().count() as u32;
        self.char_count = text.chars().filter(|c| !c.is_whitespace()).count() as u32;
        self.line_count = text.lines().count() as u32;
    }
}

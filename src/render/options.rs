//! Conversion options and configuration.

use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{Error, Result};

/// Default wrap width for terminal display.
pub const DEFAULT_LINE_WIDTH: usize = 80;

/// Options for converting an HTML body to text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionOptions {
    /// Width for wrapping long lines (0 = no wrap)
    #[serde(alias = "maxLineWidth", deserialize_with = "deserialize_width")]
    pub max_line_width: usize,

    /// Render anchor targets next to the link text
    #[serde(alias = "preserveLinks")]
    pub preserve_links: bool,

    /// Separate paragraphs with a blank line
    #[serde(alias = "addSpacing")]
    pub add_spacing: bool,

    /// Heading, link and preformatted block syntax
    pub style: OutputStyle,

    /// How `&nbsp;` is decoded
    #[serde(alias = "entityPolicy")]
    pub entity_policy: EntityPolicy,

    /// Normalize the output to Unicode NFC
    #[serde(alias = "normalizeUnicode")]
    pub normalize_unicode: bool,
}

impl ConversionOptions {
    /// Create new conversion options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Options used for a full terminal rendering of an email body.
    pub fn display() -> Self {
        Self::default()
    }

    /// Options used for single-line previews in message lists.
    pub fn preview() -> Self {
        Self {
            max_line_width: 0,
            preserve_links: false,
            ..Self::default()
        }
    }

    /// Set line width for wrapping.
    pub fn with_line_width(mut self, width: usize) -> Self {
        self.max_line_width = width;
        self
    }

    /// Enable or disable link targets.
    pub fn with_links(mut self, preserve: bool) -> Self {
        self.preserve_links = preserve;
        self
    }

    /// Enable or disable blank lines between paragraphs.
    pub fn with_spacing(mut self, spacing: bool) -> Self {
        self.add_spacing = spacing;
        self
    }

    /// Set the output style.
    pub fn with_style(mut self, style: OutputStyle) -> Self {
        self.style = style;
        self
    }

    /// Set the heading style.
    pub fn with_heading_style(mut self, heading: HeadingStyle) -> Self {
        self.style.heading = heading;
        self
    }

    /// Set the link style.
    pub fn with_link_style(mut self, link: LinkStyle) -> Self {
        self.style.link = link;
        self
    }

    /// Set the entity decoding policy.
    pub fn with_entity_policy(mut self, policy: EntityPolicy) -> Self {
        self.entity_policy = policy;
        self
    }

    /// Enable or disable NFC normalization.
    pub fn with_unicode_normalization(mut self, normalize: bool) -> Self {
        self.normalize_unicode = normalize;
        self
    }

    /// Width used when sizing heading underlines.
    pub(crate) fn rule_width(&self) -> usize {
        if self.max_line_width > 0 {
            self.max_line_width
        } else {
            DEFAULT_LINE_WIDTH
        }
    }

    /// Separator emitted for paragraph-level breaks.
    pub(crate) fn block_break(&self) -> &'static str {
        if self.add_spacing {
            "\n\n"
        } else {
            "\n"
        }
    }

    /// Parse options from a JSON document.
    ///
    /// Missing keys keep their defaults. Both `snake_case` and `camelCase`
    /// keys are accepted.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load options from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }
}

impl Default for ConversionOptions {
    fn default() -> Self {
        Self {
            max_line_width: DEFAULT_LINE_WIDTH,
            preserve_links: true,
            add_spacing: true,
            style: OutputStyle::default(),
            entity_policy: EntityPolicy::PlainText,
            normalize_unicode: true,
        }
    }
}

/// Negative widths mean "no wrapping".
fn deserialize_width<'de, D>(deserializer: D) -> std::result::Result<usize, D::Error>
where
    D: Deserializer<'de>,
{
    let width = i64::deserialize(deserializer)?;
    Ok(usize::try_from(width).unwrap_or(0))
}

/// Syntax used for the structural markers of the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputStyle {
    /// How headings are rendered
    pub heading: HeadingStyle,
    /// How links are rendered
    pub link: LinkStyle,
    /// How preformatted blocks are rendered
    pub pre: PreStyle,
}

impl OutputStyle {
    /// Default terminal style: `#` headings, `[url]` links.
    pub fn terminal() -> Self {
        Self::default()
    }

    /// Underlined headings and `(url)` links.
    pub fn legacy() -> Self {
        Self {
            heading: HeadingStyle::Underline,
            link: LinkStyle::Paren,
            pre: PreStyle::Plain,
        }
    }

    /// Markdown-flavoured output with fenced code blocks.
    pub fn markdown() -> Self {
        Self {
            heading: HeadingStyle::Markdown,
            link: LinkStyle::Bracket,
            pre: PreStyle::Fenced,
        }
    }
}

impl FromStr for OutputStyle {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "terminal" | "plain" | "default" => Ok(Self::terminal()),
            "legacy" => Ok(Self::legacy()),
            "markdown" | "md" => Ok(Self::markdown()),
            other => Err(Error::InvalidOption(format!("unknown style '{}'", other))),
        }
    }
}

/// Heading rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeadingStyle {
    /// `# Title`, `## Title`, ...
    #[default]
    Markdown,
    /// Title followed by a line of `=`
    Underline,
}

/// Link rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkStyle {
    /// `text [url]`
    #[default]
    Bracket,
    /// `text (url)`
    Paren,
}

/// Preformatted block rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PreStyle {
    /// Content surrounded by blank lines
    #[default]
    Plain,
    /// Content wrapped in ``` fences
    Fenced,
}

/// Entity decoding policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityPolicy {
    /// `&nbsp;` becomes an ordinary space
    #[default]
    #[serde(alias = "plain")]
    PlainText,
    /// `&nbsp;` becomes U+00A0
    Preserve,
}

impl FromStr for EntityPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "plain" | "plaintext" | "space" => Ok(EntityPolicy::PlainText),
            "preserve" | "nbsp" => Ok(EntityPolicy::Preserve),
            other => Err(Error::InvalidOption(format!(
                "unknown entity policy '{}'",
                other
            ))),
        }
    }
}

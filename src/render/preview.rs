//! One-line previews and word-boundary truncation.

use super::pipeline::HtmlPipeline;
use super::whitespace::collapse_all;
use super::ConversionOptions;

/// Default preview length used by message lists.
pub const DEFAULT_PREVIEW_LENGTH: usize = 150;

/// Default limit for [`truncate`].
pub const DEFAULT_TRUNCATE_LENGTH: usize = 100;

const ELLIPSIS: &str = "...";

/// Convert an HTML body to a single-line preview of at most `max_length`
/// characters.
///
/// Links are reduced to their text and every whitespace run becomes one
/// space. When the text does not fit, it is cut so that the result, ending
/// in `...`, is exactly `max_length` characters long.
pub fn convert_for_preview(html: &str, max_length: usize) -> String {
    let text = HtmlPipeline::new(ConversionOptions::preview()).convert(html);
    let text = collapse_all(&text);

    if text.chars().count() <= max_length {
        return text;
    }
    if max_length < ELLIPSIS.len() {
        return ".".repeat(max_length);
    }

    let mut preview: String = text.chars().take(max_length - ELLIPSIS.len()).collect();
    preview.push_str(ELLIPSIS);
    preview
}

/// Truncate plain text to `max_length` characters, appending `...`.
///
/// The cut backs off to the last space when that space lies within the
/// final fifth of the limit; otherwise the text is cut mid-word. Text that
/// already fits is returned unchanged.
pub fn truncate(text: &str, max_length: usize) -> String {
    if text.chars().count() <= max_length {
        return text.to_string();
    }

    let cut: String = text.chars().take(max_length).collect();
    let mut truncated = match cut.rfind(' ') {
        Some(byte_idx) if cut[..byte_idx].chars().count() * 5 >= max_length * 4 => {
            cut[..byte_idx].trim_end().to_string()
        }
        _ => cut,
    };
    truncated.push_str(ELLIPSIS);
    truncated
}

//! Rendering module for converting HTML bodies to terminal text.

mod blocks;
pub mod entities;
mod inline;
mod json;
mod lists;
mod options;
mod pipeline;
mod preview;
mod result;
pub mod whitespace;
pub mod wrap;

pub use inline::display_url;
pub use json::{to_json, JsonFormat};
pub use options::{
    ConversionOptions, EntityPolicy, HeadingStyle, LinkStyle, OutputStyle, PreStyle,
    DEFAULT_LINE_WIDTH,
};
pub use pipeline::HtmlPipeline;
pub use preview::{convert_for_preview, truncate, DEFAULT_PREVIEW_LENGTH, DEFAULT_TRUNCATE_LENGTH};
pub use result::{ConversionResult, ConversionStats};

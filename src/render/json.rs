//! JSON rendering for conversion results.

use crate::error::{Error, Result};

use super::result::ConversionResult;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Convert a conversion result to JSON.
pub fn to_json(result: &ConversionResult, format: JsonFormat) -> Result<String> {
    let json = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(result),
        JsonFormat::Compact => serde_json::to_string(result),
    };

    json.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::ConversionStats;

    fn sample() -> ConversionResult {
        let mut stats = ConversionStats::new();
        stats.add_link();
        stats.count_text("Click [https://example.com]");
        ConversionResult::new("Click [https://example.com]".to_string(), stats)
    }

    #[test]
    fn test_to_json_pretty() {
        let json = to_json(&sample(), JsonFormat::Pretty).unwrap();
        assert!(json.contains("\"text\""));
        assert!(json.contains("\"link_count\": 1"));
        assert!(json.contains('\n')); // Pretty has newlines
    }

    #[test]
    fn test_to_json_compact() {
        let json = to_json(&sample(), JsonFormat::Compact).unwrap();
        assert!(!json.contains('\n')); // Compact has no newlines
    }

    #[test]
    fn test_to_json_round_trip() {
        let result = sample();
        let json = to_json(&result, JsonFormat::Compact).unwrap();
        let parsed: ConversionResult = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, result);
    }
}

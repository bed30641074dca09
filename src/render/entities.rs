//! HTML character reference decoding.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use super::EntityPolicy;

/// Named references recognized by the decoder.
///
/// `nbsp` is absent: its rendering depends on the [`EntityPolicy`].
const NAMED_ENTITIES: &[(&str, &str)] = &[
    ("amp", "&"),
    ("lt", "<"),
    ("gt", ">"),
    ("quot", "\""),
    ("apos", "'"),
    ("copy", "\u{00A9}"),
    ("reg", "\u{00AE}"),
    ("trade", "\u{2122}"),
    ("hellip", "\u{2026}"),
    ("mdash", "\u{2014}"),
    ("ndash", "\u{2013}"),
    ("lsquo", "\u{2018}"),
    ("rsquo", "\u{2019}"),
    ("sbquo", "\u{201A}"),
    ("ldquo", "\u{201C}"),
    ("rdquo", "\u{201D}"),
    ("bdquo", "\u{201E}"),
    ("laquo", "\u{00AB}"),
    ("raquo", "\u{00BB}"),
    ("bull", "\u{2022}"),
    ("middot", "\u{00B7}"),
    ("deg", "\u{00B0}"),
    ("plusmn", "\u{00B1}"),
    ("times", "\u{00D7}"),
    ("divide", "\u{00F7}"),
    ("euro", "\u{20AC}"),
    ("pound", "\u{00A3}"),
    ("yen", "\u{00A5}"),
    ("cent", "\u{00A2}"),
    ("sect", "\u{00A7}"),
    ("para", "\u{00B6}"),
    ("shy", ""),
    ("zwnj", "\u{200C}"),
    ("zwj", "\u{200D}"),
    ("ensp", "\u{2002}"),
    ("emsp", "\u{2003}"),
    ("thinsp", "\u{2009}"),
];

const NBSP: char = '\u{00A0}';

static ENTITY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"&(#[0-9]{1,8}|#[xX][0-9a-fA-F]{1,6}|[a-zA-Z][a-zA-Z0-9]{1,31});").unwrap()
});

/// Look up a named reference, without the surrounding `&` and `;`.
pub fn lookup_named(name: &str) -> Option<&'static str> {
    NAMED_ENTITIES
        .iter()
        .find(|(entity, _)| *entity == name)
        .map(|(_, value)| *value)
}

/// Decode all character references in `text`.
///
/// Unknown named references are left untouched. Numeric references that do
/// not name a valid scalar value decode to U+FFFD.
pub fn decode(text: &str, policy: EntityPolicy) -> String {
    if !text.contains('&') {
        return text.to_string();
    }

    ENTITY_RE
        .replace_all(text, |caps: &Captures| {
            let body = &caps[1];
            match decode_reference(body) {
                Some(Decoded::Nbsp) => nbsp_for(policy).to_string(),
                Some(Decoded::Char(c)) => c.to_string(),
                Some(Decoded::Str(s)) => s.to_string(),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}

enum Decoded {
    Nbsp,
    Char(char),
    Str(&'static str),
}

fn decode_reference(body: &str) -> Option<Decoded> {
    if let Some(numeric) = body.strip_prefix('#') {
        let code = match numeric.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => numeric.parse::<u32>().ok()?,
        };
        return Some(match char::from_u32(code) {
            Some(NBSP) => Decoded::Nbsp,
            Some(c) if code != 0 => Decoded::Char(c),
            _ => Decoded::Char(char::REPLACEMENT_CHARACTER),
        });
    }

    if body == "nbsp" {
        return Some(Decoded::Nbsp);
    }
    lookup_named(body).map(Decoded::Str)
}

fn nbsp_for(policy: EntityPolicy) -> char {
    match policy {
        EntityPolicy::PlainText => ' ',
        EntityPolicy::Preserve => NBSP,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(text: &str) -> String {
        decode(text, EntityPolicy::PlainText)
    }

    #[test]
    fn test_basic_entities() {
        assert_eq!(plain("AT&amp;T"), "AT&T");
        assert_eq!(plain("&lt;div&gt;"), "<div>");
        assert_eq!(plain("&quot;hi&quot; &#39;there&apos;"), "\"hi\" 'there'");
    }

    #[test]
    fn test_typography_entities() {
        assert_eq!(plain("&copy; &reg; &trade;"), "\u{00A9} \u{00AE} \u{2122}");
        assert_eq!(plain("wait&hellip;"), "wait\u{2026}");
        assert_eq!(plain("a&mdash;b&ndash;c"), "a\u{2014}b\u{2013}c");
        assert_eq!(plain("&ldquo;q&rdquo; &lsquo;s&rsquo;"), "\u{201C}q\u{201D} \u{2018}s\u{2019}");
    }

    #[test]
    fn test_numeric_entities() {
        assert_eq!(plain("&#65;"), "A");
        assert_eq!(plain("&#x41;&#X42;"), "AB");
        assert_eq!(plain("&#8364;"), "\u{20AC}");
        assert_eq!(plain("&#x1F600;"), "\u{1F600}");
    }

    #[test]
    fn test_invalid_numeric_entities() {
        assert_eq!(plain("&#0;"), "\u{FFFD}");
        assert_eq!(plain("&#xD800;"), "\u{FFFD}");
        assert_eq!(plain("&#x110000;"), "\u{FFFD}");
    }

    #[test]
    fn test_unknown_entity_left_alone() {
        assert_eq!(plain("&bogus; & &amp"), "&bogus; & &amp");
    }

    #[test]
    fn test_single_pass_decoding() {
        assert_eq!(plain("&amp;lt;"), "&lt;");
    }

    #[test]
    fn test_nbsp_policies() {
        assert_eq!(decode("a&nbsp;b", EntityPolicy::PlainText), "a b");
        assert_eq!(decode("a&nbsp;b", EntityPolicy::Preserve), "a\u{00A0}b");
        assert_eq!(decode("a&#160;b", EntityPolicy::Preserve), "a\u{00A0}b");
        assert_eq!(decode("a&#xA0;b", EntityPolicy::PlainText), "a b");
    }

    #[test]
    fn test_lookup_named() {
        assert_eq!(lookup_named("amp"), Some("&"));
        assert_eq!(lookup_named("nbsp"), None);
        assert_eq!(lookup_named("AMP"), None);
    }
}

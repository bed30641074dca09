//! Property tests for conversion invariants.

use proptest::prelude::*;

use unhtml::render::wrap::wrap;
use unhtml::{convert, convert_for_preview, ConversionOptions};

/// HTML-ish soup: real tags, broken tags, entities and text.
fn html_fragment() -> impl Strategy<Value = String> {
    let token = prop::sample::select(vec![
        "<p>",
        "</p>",
        "<br>",
        "<b>",
        "</b>",
        "<ul>",
        "<ol>",
        "<li>",
        "</li>",
        "</ul>",
        "</ol>",
        "<blockquote>",
        "</blockquote>",
        "<pre>",
        "</pre>",
        "<a href=\"https://example.com/x\">",
        "</a>",
        "<h2>",
        "</h2>",
        "<script>",
        "&amp;",
        "&#x110000;",
        "&nbsp;",
        "<",
        ">",
        "\n",
    ]);
    let piece = prop_oneof![
        "[a-zA-Z0-9 .,]{0,20}",
        token.prop_map(str::to_string),
    ];
    prop::collection::vec(piece, 0..40).prop_map(|pieces| pieces.concat())
}

proptest! {
    #[test]
    fn prop_never_panics(html in html_fragment(), width in 0usize..120) {
        let options = ConversionOptions::default().with_line_width(width);
        let _ = convert(&html, &options);
    }

    #[test]
    fn prop_arbitrary_strings_never_panic(html in "\\PC{0,200}") {
        let _ = convert(&html, &ConversionOptions::default());
    }

    #[test]
    fn prop_no_tags_survive(text in "[a-z ]{1,40}") {
        let html = format!("<div><p><b>{}</b></p><span class=\"x\">{}</span></div>", text, text);
        let converted = convert(&html, &ConversionOptions::default());
        prop_assert!(!converted.contains('<'));
        prop_assert!(!converted.contains('>'));
    }

    #[test]
    fn prop_wrap_width_invariant(
        words in prop::collection::vec("[a-z]{1,15}", 1..60),
        width in 1usize..60,
    ) {
        let text = words.join(" ");
        let wrapped = wrap(&text, width);
        for line in wrapped.lines() {
            let len = line.chars().count();
            prop_assert!(
                len <= width || !line.contains(' '),
                "line {:?} is {} chars at width {}", line, len, width
            );
        }
        prop_assert_eq!(wrapped.split_whitespace().collect::<Vec<_>>(), words.iter().map(String::as_str).collect::<Vec<_>>());
    }

    #[test]
    fn prop_preview_length_invariant(html in html_fragment(), limit in 0usize..80) {
        let full = convert_for_preview(&html, usize::MAX);
        let preview = convert_for_preview(&html, limit);
        let len = preview.chars().count();

        prop_assert!(len <= limit);
        if full.chars().count() > limit {
            prop_assert_eq!(len, limit);
        } else {
            prop_assert_eq!(preview, full);
        }
    }
}

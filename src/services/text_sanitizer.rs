use scraper::Html;

/// Extracts plain text from note HTML.
///
/// Every text node is kept in document order, separated by a single space, and whitespace runs
/// (including `&nbsp;`) collapse to one ASCII space. Markup the parser does not understand is
/// dropped rather than rejected, so this never fails.
///
/// Idempotent on markup-free input only: escaped markup such as `&lt;b&gt;` decodes to `<b>`,
/// which a second pass would treat as a tag.
pub fn sanitize(raw: &str) -> String {
    if raw.trim().is_empty() {
        return String::new();
    }

    let fragment = Html::parse_fragment(raw);
    let joined = fragment.root_element().text().collect::<Vec<_>>().join(" ");

    collapse_whitespace(&joined)
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_simple_html() {
        assert_eq!(
            sanitize("<h1>Welcome</h1><p>This is a test.</p>"),
            "Welcome This is a test."
        );
    }

    #[test]
    fn sanitize_nested_html() {
        assert_eq!(
            sanitize("<div><h1>Title</h1><div><p>Some <b>bold</b> text here.</p></div></div>"),
            "Title Some bold text here."
        );
    }

    #[test]
    fn sanitize_list_html() {
        assert_eq!(
            sanitize("<ul><li>Item 1</li><li>Item 2</li><li>Item 3</li></ul>"),
            "Item 1 Item 2 Item 3"
        );
    }

    #[test]
    fn sanitize_collapses_extra_whitespace() {
        assert_eq!(
            sanitize("<p>   Lots    of   extra  whitespace    here.  </p>"),
            "Lots of extra whitespace here."
        );
    }

    #[test]
    fn sanitize_empty_input() {
        assert_eq!(sanitize(""), "");
        assert_eq!(sanitize(" \n\t "), "");
    }

    #[test]
    fn sanitize_plain_text_passes_through() {
        assert_eq!(
            sanitize("Just plain text with no HTML tags."),
            "Just plain text with no HTML tags."
        );
        assert_eq!(sanitize("  line one\n\tline   two "), "line one line two");
    }

    #[test]
    fn sanitize_decodes_entities_and_nbsp() {
        assert_eq!(
            sanitize("<p>starts from&nbsp;<strong>ws://</strong>&nbsp;or&nbsp;<strong>wss://</strong></p>"),
            "starts from ws:// or wss://"
        );
        assert_eq!(sanitize("<p>Tom &amp; Jerry</p>"), "Tom & Jerry");
    }

    #[test]
    fn sanitize_tolerates_malformed_markup() {
        assert_eq!(sanitize("<p>open <b>never closed"), "open never closed");
        assert_eq!(sanitize("<madeup>custom</madeup> tag"), "custom tag");
    }

    #[test]
    fn sanitize_drops_images_and_breaks() {
        let html = r#"<p><br></p><p><img src="https://example.com/a.png" height="inherit"></p><p>After</p>"#;

        assert_eq!(sanitize(html), "After");
    }

    #[test]
    fn sanitize_decodes_escaped_markup_to_literal_text() {
        let once = sanitize("use &lt;b&gt; for bold");

        assert_eq!(once, "use <b> for bold");
        assert_eq!(sanitize(&once), "use for bold");
    }

    #[test]
    fn sanitize_is_idempotent_on_markup_free_output() {
        let inputs = [
            "plain   text",
            "<h2><strong>WebSocket</strong></h2><p>is   bidirectional</p>",
            "  a\n\nb  ",
        ];

        for input in inputs {
            let once = sanitize(input);
            assert_eq!(sanitize(&once), once);
            assert!(!once.contains("  "));
            assert_eq!(once.trim(), once);
        }
    }
}

use std::sync::OnceLock;

use regex::Regex;

static TAG_RE: OnceLock<Regex> = OnceLock::new();
static SPACE_RE: OnceLock<Regex> = OnceLock::new();

fn tag_re() -> &'static Regex {
    TAG_RE.get_or_init(|| Regex::new(r"<[^>]*>").expect("valid tag pattern"))
}

fn space_re() -> &'static Regex {
    SPACE_RE.get_or_init(|| Regex::new(r"\s+").expect("valid whitespace pattern"))
}

/// Flattens passage HTML into a single line of plain text.
pub fn clean_passage_html(html: &str) -> String {
    let text = tag_re().replace_all(html, " ");
    let text = text.replace("\\u003c", "<").replace("\\u003e", ">");
    let text = decode_entities(&text);
    let text = text.replace("Â¶", "").replace('¶', "");
    space_re().replace_all(text.trim(), " ").trim().to_string()
}

fn decode_entities(text: &str) -> String {
    // &amp; last so "&amp;lt;" stays "&lt;"
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_tags_and_verse_markup() {
        let html = r#"<p class="p"><span data-number="10" class="v">10</span>Fear thou not; for I <span class="add">am</span> with thee</p>"#;
        assert_eq!(
            clean_passage_html(html),
            "10 Fear thou not; for I am with thee"
        );
    }

    #[test]
    fn test_removes_pilcrows_and_collapses_whitespace() {
        let html = "<p>\u{b6}  The LORD\n\n is my   shepherd; Â¶</p>";
        assert_eq!(clean_passage_html(html), "The LORD is my shepherd;");
    }

    #[test]
    fn test_decodes_entities() {
        let html = "<p>faith&nbsp;&amp;&nbsp;&quot;hope&quot; &#39;n&#39; &amp;lt;</p>";
        assert_eq!(clean_passage_html(html), "faith & \"hope\" 'n' &lt;");
    }

    #[test]
    fn test_literal_escapes_are_restored() {
        assert_eq!(clean_passage_html("a \\u003c b \\u003e c"), "a < b > c");
    }

    #[test]
    fn test_empty_markup_is_empty() {
        assert_eq!(clean_passage_html("<p> </p><br/>"), "");
    }
}

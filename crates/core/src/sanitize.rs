//! Allow-list HTML sanitization for user-supplied rich text.
//!
//! Post content is authored as raw HTML in the admin and injected into
//! rendered pages with escaping disabled, so everything outside a fixed
//! allow-list of tags and attributes must be stripped. Sanitization runs
//! twice by design: once before content is persisted, and again immediately
//! before render, because rows already in storage may have been written
//! under an older policy.
//!
//! Built on `ammonia`, which parses with a real HTML5 tree builder rather
//! than regexes, so malformed markup cannot smuggle script through.

use std::collections::{HashMap, HashSet};

/// Tags that survive sanitization. Everything else is stripped (for
/// `<script>` and `<style>`, the content is removed along with the tag).
const ALLOWED_TAGS: &[&str] = &[
    "p", "br", "strong", "em", "u", "h1", "h2", "h3", "h4", "h5", "h6", "ul", "ol", "li", "a",
    "blockquote", "code", "pre", "img", "div", "span",
];

/// Attributes that survive on any allowed tag. Notably absent: every `on*`
/// event handler and `style`.
const ALLOWED_ATTRIBUTES: &[&str] = &["href", "target", "rel", "src", "alt", "class", "id"];

/// URL schemes permitted in `href` and `src` values. Anything else
/// (`javascript:`, `data:`, ...) drops the attribute. Relative URLs pass.
const ALLOWED_URL_SCHEMES: &[&str] = &["http", "https", "mailto"];

fn policy() -> ammonia::Builder<'static> {
    let mut builder = ammonia::Builder::default();
    builder
        .tags(ALLOWED_TAGS.iter().copied().collect::<HashSet<_>>())
        // Replace ammonia's per-tag attribute defaults wholesale; the
        // generic set below is the entire attribute policy.
        .tag_attributes(HashMap::new())
        .generic_attributes(ALLOWED_ATTRIBUTES.iter().copied().collect::<HashSet<_>>())
        .url_schemes(ALLOWED_URL_SCHEMES.iter().copied().collect::<HashSet<_>>())
        // `rel` is caller-controlled (it is in the allow-list), so ammonia
        // must not also try to force its own value onto links.
        .link_rel(None);
    builder
}

/// Sanitize raw HTML down to the fixed allow-list.
///
/// Pure function: same input, same output, no side effects. Idempotent:
/// `sanitize(sanitize(x)) == sanitize(x)` for all inputs, which is what
/// makes the write-time and render-time applications compose safely.
#[must_use]
pub fn sanitize(raw: &str) -> String {
    policy().clean(raw).to_string()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn strips_script_tags_and_content() {
        let out = sanitize("<p>hi</p><script>bad()</script>");
        assert_eq!(out, "<p>hi</p>");
    }

    #[test]
    fn keeps_allowed_formatting() {
        let input = "<h2>Title</h2><p>Some <strong>bold</strong> and <em>italic</em> text.</p>";
        assert_eq!(sanitize(input), input);
    }

    #[test]
    fn strips_event_handler_attributes() {
        let out = sanitize("<p onclick=\"steal()\" class=\"intro\">hi</p>");
        assert!(!out.contains("onclick"));
        assert!(out.contains("class=\"intro\""));
    }

    #[test]
    fn strips_javascript_urls() {
        let out = sanitize("<a href=\"javascript:alert(1)\">x</a>");
        assert!(!out.contains("javascript:"));
        assert!(out.contains(">x</a>"));
    }

    #[test]
    fn keeps_http_links_with_target_and_rel() {
        let input = "<a href=\"https://example.com\" target=\"_blank\" rel=\"noopener\">link</a>";
        let out = sanitize(input);
        assert!(out.contains("href=\"https://example.com\""));
        assert!(out.contains("target=\"_blank\""));
        assert!(out.contains("rel=\"noopener\""));
    }

    #[test]
    fn keeps_relative_links_and_images() {
        let out = sanitize("<img src=\"/images/cover.jpg\" alt=\"cover\">");
        assert!(out.contains("src=\"/images/cover.jpg\""));
        assert!(out.contains("alt=\"cover\""));
    }

    #[test]
    fn strips_disallowed_tags_but_keeps_text() {
        let out = sanitize("<table><tr><td>cell</td></tr></table><iframe src=\"x\"></iframe>");
        assert!(!out.contains("<table"));
        assert!(!out.contains("<iframe"));
        assert!(out.contains("cell"));
    }

    #[test]
    fn strips_style_attribute() {
        let out = sanitize("<div style=\"position:fixed\">x</div>");
        assert!(!out.contains("style"));
        assert!(out.contains("<div>x</div>"));
    }

    #[test]
    fn handles_malformed_markup() {
        // Unclosed tags and stray brackets must not panic or leak script.
        let out = sanitize("<p>hi <b><script>bad(</p><<img src=x onerror=pwn()>");
        assert!(!out.contains("script"));
        assert!(!out.contains("onerror"));
    }

    #[test]
    fn empty_input() {
        assert_eq!(sanitize(""), "");
    }

    /// Strategy producing adversarial tag/attribute soup: a mix of allowed
    /// and disallowed tags, event-handler attributes, and hostile URLs.
    fn html_soup() -> impl Strategy<Value = String> {
        let tag = prop::sample::select(vec![
            "p", "div", "span", "a", "img", "script", "iframe", "object", "form", "table",
            "svg", "math", "style",
        ]);
        let attr = prop::sample::select(vec![
            "href=\"https://ok.example\"",
            "href=\"javascript:alert(1)\"",
            "src=\"data:text/html,<script>1</script>\"",
            "onclick=\"x()\"",
            "onerror=\"x()\"",
            "onmouseover=\"x()\"",
            "style=\"color:red\"",
            "class=\"c\"",
            "id=\"i\"",
            "formaction=\"https://evil.example\"",
        ]);
        let fragment = (tag, prop::collection::vec(attr, 0..3), "[a-zA-Z <>&\"']{0,20}").prop_map(
            |(tag, attrs, text)| format!("<{tag} {}>{text}</{tag}>", attrs.join(" ")),
        );
        prop::collection::vec(fragment, 0..8).prop_map(|frags| frags.concat())
    }

    proptest! {
        #[test]
        fn output_never_contains_disallowed_constructs(input in html_soup()) {
            let out = sanitize(&input);
            for tag in ["script", "iframe", "object", "form", "svg", "math", "style"] {
                prop_assert!(!out.contains(&format!("<{tag}")), "disallowed tag <{}> in {:?}", tag, out);
            }
            for attr in ["onclick", "onerror", "onmouseover", "style=", "formaction", "javascript:"] {
                prop_assert!(!out.contains(attr), "disallowed attribute {} in {:?}", attr, out);
            }
        }

        #[test]
        fn sanitize_is_idempotent(input in html_soup()) {
            let once = sanitize(&input);
            prop_assert_eq!(sanitize(&once), once);
        }

        #[test]
        fn idempotent_on_arbitrary_text(input in ".{0,200}") {
            let once = sanitize(&input);
            prop_assert_eq!(sanitize(&once), once);
        }
    }
}

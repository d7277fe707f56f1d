//! Phase 2: origin allow-listing for iframe and script sources.

use std::collections::HashSet;

use scraper::{Html, Selector, node::Node};

use super::EmbedPolicy;
use super::structural::push_escaped;

/// Remove every `iframe` and `script` whose `src` is missing or not under
/// an allowed origin.
///
/// Removal takes the whole element, not just its `src`: a srcless iframe or
/// an inline script is worthless at best and hostile at worst.
pub(crate) fn filter(html: &str, policy: &EmbedPolicy) -> String {
    let document = Html::parse_fragment(html);
    let selector = Selector::parse("iframe, script").expect("embed selector is valid");

    let mut skip_ids = HashSet::new();
    for element in document.select(&selector) {
        let allowed = element
            .value()
            .attr("src")
            .is_some_and(|src| policy.origin_allowed(src));
        if !allowed {
            tracing::warn!(
                "Removing <{}> with disallowed source: {:?}",
                element.value().name(),
                element.value().attr("src").unwrap_or("<none>"),
            );
            skip_ids.insert(element.id());
        }
    }

    let mut out = String::new();
    serialize_node(document.tree.root(), &skip_ids, &mut out);
    out
}

fn serialize_node(
    node: ego_tree::NodeRef<Node>,
    skip_ids: &HashSet<ego_tree::NodeId>,
    out: &mut String,
) {
    if skip_ids.contains(&node.id()) {
        return;
    }

    match node.value() {
        Node::Document | Node::Fragment => {
            for child in node.children() {
                serialize_node(child, skip_ids, out);
            }
        }
        Node::Element(el) => {
            let tag = el.name();

            // Unwrap the fragment parser's synthetic <html> element.
            if tag == "html" {
                for child in node.children() {
                    serialize_node(child, skip_ids, out);
                }
                return;
            }

            out.push('<');
            out.push_str(tag);
            for (name, value) in el.attrs() {
                out.push(' ');
                out.push_str(name);
                out.push_str("=\"");
                push_escaped(value, out);
                out.push('"');
            }
            out.push('>');

            if tag == "br" {
                return;
            }

            for child in node.children() {
                serialize_node(child, skip_ids, out);
            }

            out.push_str("</");
            out.push_str(tag);
            out.push('>');
        }
        Node::Text(text) => push_escaped(text, out),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(html: &str) -> String {
        filter(html, &EmbedPolicy::default())
    }

    #[test]
    fn allowed_iframe_kept() {
        let html = r#"<iframe src="https://www.youtube.com/embed/x"></iframe>"#;
        assert_eq!(run(html), html);
    }

    #[test]
    fn privacy_video_host_kept() {
        let html = r#"<iframe src="https://www.youtube-nocookie.com/embed/x"></iframe>"#;
        assert_eq!(run(html), html);
    }

    #[test]
    fn foreign_iframe_removed_entirely() {
        let html = r#"<p>before</p><iframe src="https://evil.example.com/x"></iframe><p>after</p>"#;
        assert_eq!(run(html), "<p>before</p><p>after</p>");
    }

    #[test]
    fn srcless_iframe_removed() {
        assert_eq!(run("<iframe></iframe>"), "");
    }

    #[test]
    fn inline_script_removed() {
        assert_eq!(run("<script>alert(1)</script><span>ok</span>"), "<span>ok</span>");
    }

    #[test]
    fn official_widget_script_kept() {
        let html = r#"<script src="https://platform.twitter.com/widgets.js"></script>"#;
        assert_eq!(run(html), html);
    }

    #[test]
    fn mixed_sources_filtered_independently() {
        let html = concat!(
            r#"<iframe src="https://player.vimeo.com/video/1"></iframe>"#,
            r#"<iframe src="https://ads.example.net/frame"></iframe>"#,
            r#"<script src="https://www.instagram.com/embed.js"></script>"#,
            r#"<script src="https://cdn.example.net/miner.js"></script>"#,
        );
        let out = run(html);
        assert!(out.contains("player.vimeo.com"));
        assert!(out.contains("www.instagram.com"));
        assert!(!out.contains("example.net"));
    }

    #[test]
    fn surrounding_markup_untouched() {
        let html = r#"<blockquote class="twitter-tweet"><p>hi</p></blockquote>"#;
        assert_eq!(run(html), html);
    }
}

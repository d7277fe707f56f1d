//! Phase 1: structural allow-listing of embed HTML.

use scraper::{Html, node::Node};

use super::EmbedPolicy;

/// Reduce raw embed HTML to allow-listed structure.
///
/// Disallowed tags are unwrapped (their children survive, the tag and its
/// attributes do not), disallowed attributes are dropped, and `href`/`src`
/// values with unsafe protocols are dropped. Comments and doctypes are
/// discarded. Text is re-escaped on output.
pub(crate) fn sanitize(raw: &str, policy: &EmbedPolicy) -> String {
    let fragment = Html::parse_fragment(raw);
    let mut out = String::new();
    emit_node(fragment.tree.root(), policy, &mut out);
    out
}

fn emit_node(node: ego_tree::NodeRef<Node>, policy: &EmbedPolicy, out: &mut String) {
    match node.value() {
        Node::Document | Node::Fragment => {
            for child in node.children() {
                emit_node(child, policy, out);
            }
        }
        Node::Element(el) => {
            let tag = el.name();

            // The fragment parser wraps content in a synthetic <html>
            // element; it is unwrapped like any other disallowed tag.
            if !policy.tag_allowed(tag) {
                for child in node.children() {
                    emit_node(child, policy, out);
                }
                return;
            }

            out.push('<');
            out.push_str(tag);
            for (name, value) in el.attrs() {
                if !policy.attr_allowed(name) {
                    continue;
                }
                if (name == "href" || name == "src") && !safe_url(value) {
                    tracing::warn!("Dropping {name} with unsafe protocol: {value:?}");
                    continue;
                }
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
                emit_node(child, policy, out);
            }

            out.push_str("</");
            out.push_str(tag);
            out.push('>');
        }
        Node::Text(text) => push_escaped(text, out),
        _ => {}
    }
}

/// A URL is safe when it is http(s), mailto, or relative. Anything with
/// another scheme (`javascript:`, `data:`, ...) is rejected.
fn safe_url(value: &str) -> bool {
    let value = value.trim();
    let lower = value.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") || lower.starts_with("mailto:")
    {
        return true;
    }
    match value.find(':') {
        None => true,
        // A ':' is part of a scheme only if no path/query/fragment
        // delimiter precedes it.
        Some(i) => value[..i].contains(['/', '?', '#']),
    }
}

pub(super) fn push_escaped(text: &str, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
}

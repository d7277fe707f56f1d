//! Rendering documents to reading-time estimates and safe HTML.
//!
//! HTML generation is a pure tree-to-string transformation so it can run
//! during non-interactive content generation, with no DOM available. It
//! never fails: a document containing anything the renderer does not
//! support produces a fixed placeholder paragraph instead of an error, so
//! one malformed document can never take down a listing page rendering
//! many.

use crate::document::{Node, extract_text, word_count};
use crate::error::{ContentPipelineError, Result};

/// Reading speed used by [`estimate_reading_time`], in words per minute.
pub const WORDS_PER_MINUTE: usize = 200;

/// Placeholder emitted by [`render_to_html`] when a document cannot be
/// rendered.
pub const RENDER_FALLBACK_HTML: &str = "<p>This content could not be displayed.</p>";

/// Host serving privacy-respecting video embeds.
const VIDEO_EMBED_BASE: &str = "https://www.youtube-nocookie.com/embed/";

/// Everything derived from a document at render time.
///
/// Ephemeral: computed per render, never persisted by this crate. Callers
/// decide whether to cache it.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedDocument {
    /// Plain text extracted from the tree.
    pub text: String,
    /// Whitespace-separated word count of `text`.
    pub word_count: usize,
    /// Estimated reading time in whole minutes, always >= 1.
    pub reading_minutes: u32,
    /// Generated HTML, or the fallback placeholder.
    pub html: String,
}

/// Render a document to its full derived form in one pass over the tree
/// per output.
pub fn render_document(doc: &Node) -> RenderedDocument {
    let text = extract_text(doc);
    let word_count = text.split_whitespace().count();
    RenderedDocument {
        word_count,
        reading_minutes: minutes_for(word_count),
        html: render_to_html(doc),
        text,
    }
}

/// Estimate reading time in whole minutes at [`WORDS_PER_MINUTE`], rounded
/// up and floored at one minute — an empty document still reads as one.
pub fn estimate_reading_time(doc: &Node) -> u32 {
    minutes_for(word_count(doc))
}

fn minutes_for(words: usize) -> u32 {
    (words.div_ceil(WORDS_PER_MINUTE) as u32).max(1)
}

/// Generate HTML for a document.
///
/// Supported nodes: paragraphs, headings 1-3, links (rendered inert, so a
/// click never auto-navigates), images, privacy-respecting video embeds,
/// and code blocks. Text content and attribute values are HTML-escaped.
///
/// Never returns an error or panics: an [`Node::Unknown`] node, a heading
/// level outside 1-3, or any other unrenderable shape anywhere in the tree
/// yields [`RENDER_FALLBACK_HTML`] for the whole document.
pub fn render_to_html(doc: &Node) -> String {
    let mut out = String::new();
    match render_node(doc, &mut out) {
        Ok(()) => out,
        Err(e) => {
            tracing::warn!("Falling back to placeholder: {e}");
            RENDER_FALLBACK_HTML.to_string()
        }
    }
}

fn render_node(node: &Node, out: &mut String) -> Result<()> {
    match node {
        Node::Doc { content } => render_children(content, out),
        Node::Paragraph { content } => {
            out.push_str("<p>");
            render_children(content, out)?;
            out.push_str("</p>");
            Ok(())
        }
        Node::Heading { attrs, content } => {
            if !(1..=3).contains(&attrs.level) {
                return Err(ContentPipelineError::UnsupportedNode(format!(
                    "heading level {}",
                    attrs.level
                )));
            }
            out.push_str("<h");
            out.push((b'0' + attrs.level) as char);
            out.push('>');
            render_children(content, out)?;
            out.push_str("</h");
            out.push((b'0' + attrs.level) as char);
            out.push('>');
            Ok(())
        }
        Node::Text { text } => {
            push_escaped(text, out);
            Ok(())
        }
        Node::Link { attrs, content } => {
            out.push_str("<a href=\"");
            push_escaped(&attrs.href, out);
            out.push_str("\" onclick=\"return false\">");
            render_children(content, out)?;
            out.push_str("</a>");
            Ok(())
        }
        Node::Image { attrs } => {
            out.push_str("<img src=\"");
            push_escaped(&attrs.src, out);
            out.push('"');
            if let Some(alt) = &attrs.alt {
                out.push_str(" alt=\"");
                push_escaped(alt, out);
                out.push('"');
            }
            out.push('>');
            Ok(())
        }
        Node::Video { attrs } => {
            out.push_str("<iframe src=\"");
            out.push_str(VIDEO_EMBED_BASE);
            push_escaped(&attrs.id, out);
            out.push_str("\" frameborder=\"0\" allowfullscreen></iframe>");
            Ok(())
        }
        Node::CodeBlock { content } => {
            out.push_str("<pre><code>");
            render_children(content, out)?;
            out.push_str("</code></pre>");
            Ok(())
        }
        Node::Unknown => Err(ContentPipelineError::UnsupportedNode(
            "unrecognized node type".into(),
        )),
    }
}

fn render_children(children: &[Node], out: &mut String) -> Result<()> {
    for child in children {
        render_node(child, out)?;
    }
    Ok(())
}

fn push_escaped(text: &str, out: &mut String) {
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

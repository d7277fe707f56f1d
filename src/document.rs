//! The rich-text document model consumed by the renderer.
//!
//! Documents arrive as JSON produced by a structured editor: a tree of
//! nodes, each carrying a `type` tag and either a text payload (leaves) or
//! an ordered list of children (containers). The model is a closed tagged
//! enum over the node kinds this pipeline understands, with an explicit
//! [`Node::Unknown`] variant catching everything else so the renderer can
//! handle unrecognized content as an exhaustively-matched case instead of an
//! implicit runtime assumption.

use serde::{Deserialize, Serialize};

/// One node of a rich-text document tree.
///
/// Deserializes from the editor's JSON shape, e.g.:
///
/// ```json
/// {
///   "type": "doc",
///   "content": [
///     { "type": "heading", "attrs": { "level": 1 },
///       "content": [{ "type": "text", "text": "Hello" }] },
///     { "type": "paragraph",
///       "content": [{ "type": "text", "text": "World" }] }
///   ]
/// }
/// ```
///
/// Any unrecognized `type` tag deserializes to [`Node::Unknown`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Node {
    /// Document root.
    Doc {
        #[serde(default)]
        content: Vec<Node>,
    },
    /// A paragraph of inline content.
    Paragraph {
        #[serde(default)]
        content: Vec<Node>,
    },
    /// A heading; only levels 1-3 are renderable.
    Heading {
        attrs: HeadingAttrs,
        #[serde(default)]
        content: Vec<Node>,
    },
    /// A text leaf.
    Text { text: String },
    /// An inline link wrapping text children.
    Link {
        attrs: LinkAttrs,
        #[serde(default)]
        content: Vec<Node>,
    },
    /// An image; contributes nothing to extracted text.
    Image { attrs: ImageAttrs },
    /// An embedded video, identified by its platform video id and rendered
    /// through the privacy-respecting embed host.
    Video { attrs: VideoAttrs },
    /// A block of preformatted code.
    CodeBlock {
        #[serde(default)]
        content: Vec<Node>,
    },
    /// Any node kind this pipeline does not understand.
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeadingAttrs {
    pub level: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkAttrs {
    pub href: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageAttrs {
    pub src: String,
    #[serde(default)]
    pub alt: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoAttrs {
    pub id: String,
}

impl Node {
    /// Ordered children of a container node; empty for leaves and for node
    /// kinds that carry no extractable content.
    fn children(&self) -> &[Node] {
        match self {
            Node::Doc { content }
            | Node::Paragraph { content }
            | Node::Heading { content, .. }
            | Node::Link { content, .. }
            | Node::CodeBlock { content } => content,
            Node::Text { .. } | Node::Image { .. } | Node::Video { .. } | Node::Unknown => &[],
        }
    }
}

/// Recursively extract the plain text of a document.
///
/// A text leaf contributes its payload; a container contributes the
/// space-joined extraction of its children; images, videos, and unknown
/// nodes contribute nothing. Single pass, suitable for word counting.
pub fn extract_text(node: &Node) -> String {
    match node {
        Node::Text { text } => text.clone(),
        _ => node
            .children()
            .iter()
            .map(extract_text)
            .collect::<Vec<_>>()
            .join(" "),
    }
}

/// Count the whitespace-separated words in a document's extracted text.
pub fn word_count(node: &Node) -> usize {
    extract_text(node).split_whitespace().count()
}

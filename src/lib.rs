//! # content_pipeline
//!
//! Slug generation, unique-slug resolution, rich-text document rendering,
//! and embed sanitization for content publishing (blog posts, recipes, or
//! any titled collection).
//!
//! ## Overview
//!
//! Publishing a piece of content needs four things this crate provides:
//!
//! - [`generate_slug`] turns a free-form title into a normalized, URL-safe
//!   identifier.
//! - [`make_unique_slug`] guarantees that identifier is unique within its
//!   collection, probing numeric suffixes through a caller-supplied
//!   [`ExistenceChecker`] capability. The crate never touches storage;
//!   persisting the resolved slug (and resolving concurrent-publish races
//!   with a uniqueness constraint) is the caller's job.
//! - [`render_document`] converts a structured rich-text [`Node`] tree into
//!   extracted plain text, a word count, a reading-time estimate, and HTML
//!   that degrades to a safe placeholder instead of failing.
//! - [`sanitize_embed`] narrows user-pasted third-party embed HTML down to
//!   an allow-listed set of tags, attributes, and iframe/script origins.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use content_pipeline::{
//!     ExistenceChecker, Node, Result, generate_slug, make_unique_slug, render_document,
//! };
//!
//! struct PostChecker { /* db pool ... */ }
//!
//! impl ExistenceChecker for PostChecker {
//!     async fn exists(&self, candidate: &str) -> Result<bool> {
//!         // SELECT 1 FROM posts WHERE slug = $candidate ...
//!         Ok(false)
//!     }
//! }
//!
//! # async fn publish(title: &str, doc: &Node, checker: &PostChecker) -> Result<()> {
//! let slug = make_unique_slug(&generate_slug(title), checker).await?;
//! let rendered = render_document(doc);
//! // persist { slug, rendered.html, rendered.reading_minutes, ... }
//! # Ok(())
//! # }
//! ```
//!
//! Blog posts and recipes are independent slug namespaces: give each its
//! own checker.

pub mod document;
pub mod embed;
pub mod error;
pub mod render;
pub mod resolver;
pub mod slug;

pub use document::{
    HeadingAttrs, ImageAttrs, LinkAttrs, Node, VideoAttrs, extract_text, word_count,
};
pub use embed::{
    DEFAULT_ALLOWED_ATTRS, DEFAULT_ALLOWED_ORIGINS, DEFAULT_ALLOWED_TAGS, EmbedPolicy,
    sanitize_embed,
};
pub use error::{ContentPipelineError, Result};
pub use render::{
    RENDER_FALLBACK_HTML, RenderedDocument, WORDS_PER_MINUTE, estimate_reading_time,
    render_document, render_to_html,
};
pub use resolver::{
    ExistenceChecker, MAX_EXISTENCE_CHECKS, make_unique_slug, make_unique_slug_batched,
};
pub use slug::{generate_slug, is_valid_slug};

//! Error types for the `content_pipeline` crate.

/// All errors that can occur in the slug and rendering pipeline.
#[derive(Debug, thiserror::Error)]
pub enum ContentPipelineError {
    /// The title normalized to an empty slug; resolution was refused.
    #[error("Title produced an empty slug")]
    EmptySlug,

    /// The externally supplied existence checker failed.
    #[error("Existence check failed: {0}")]
    Checker(Box<dyn std::error::Error + Send + Sync>),

    /// A document node could not be rendered to HTML.
    ///
    /// Never surfaces from [`render_to_html`](crate::render_to_html), which
    /// absorbs it into the fallback output; public only so the fallible
    /// internal renderer has a typed error.
    #[error("Unsupported document node: {0}")]
    UnsupportedNode(String),
}

/// A type alias for `Result<T, ContentPipelineError>`.
pub type Result<T> = std::result::Result<T, ContentPipelineError>;

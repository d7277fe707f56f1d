//! Two-phase sanitization of user-pasted embed HTML.
//!
//! Embed codes are third-party-controlled HTML/JS pasted by users
//! (video players, social-media widgets). Two independent layers are
//! applied before any of it reaches a browser:
//!
//! 1. **Structural** -- a tag/attribute/protocol allow-list. Disallowed
//!    tags are unwrapped, disallowed attributes and unsafe URL protocols
//!    (`javascript:` etc.) are dropped.
//! 2. **Origin** -- every surviving `iframe` and `script` must carry a
//!    `src` under an allow-listed origin, or the whole element is removed.
//!
//! The structural pass alone cannot make semantic trust judgments about
//! *which* iframe or script source is acceptable, which is why the origin
//! pass exists. The output is always a structural subset of the input:
//! tags and attributes are removed, never added.

mod origin;
mod structural;

/// Tags permitted in embed HTML.
pub const DEFAULT_ALLOWED_TAGS: &[&str] = &[
    "blockquote",
    "a",
    "p",
    "br",
    "iframe",
    "script",
    "div",
    "span",
];

/// Attributes permitted on embed elements, in addition to any `data-*`
/// attribute (platform widgets hang their configuration off those).
pub const DEFAULT_ALLOWED_ATTRS: &[&str] = &[
    "href",
    "src",
    "width",
    "height",
    "frameborder",
    "allowfullscreen",
    "allow",
    "class",
    "id",
    "style",
    "title",
    "charset",
    "crossorigin",
    "async",
    "defer",
];

/// Origins trusted to serve iframe and script content: the video platforms
/// and the two social platforms' official embed hosts. Each ends in `/` so
/// a prefix check cannot be fooled by a lookalike domain.
pub const DEFAULT_ALLOWED_ORIGINS: &[&str] = &[
    "https://www.youtube.com/",
    "https://www.youtube-nocookie.com/",
    "https://player.vimeo.com/",
    "https://platform.twitter.com/",
    "https://www.instagram.com/",
];

/// Allow-lists governing embed sanitization.
///
/// The default policy carries the fixed tag, attribute, and origin lists
/// above. Construct a custom policy when a deployment trusts a different
/// set of embed providers; the policy is plain injected configuration, no
/// ambient state.
///
/// # Example
///
/// ```
/// use content_pipeline::EmbedPolicy;
///
/// let policy = EmbedPolicy::default().allow_origin("https://embeds.example.com/");
/// let clean = policy.sanitize(r#"<iframe src="https://embeds.example.com/v/1"></iframe>"#);
/// assert!(clean.contains("<iframe"));
/// ```
#[derive(Clone, Debug)]
pub struct EmbedPolicy {
    tags: Vec<String>,
    attrs: Vec<String>,
    origins: Vec<String>,
}

impl Default for EmbedPolicy {
    fn default() -> Self {
        Self {
            tags: DEFAULT_ALLOWED_TAGS.iter().map(|s| s.to_string()).collect(),
            attrs: DEFAULT_ALLOWED_ATTRS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            origins: DEFAULT_ALLOWED_ORIGINS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl EmbedPolicy {
    /// Permit an additional tag in embed HTML.
    pub fn allow_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Permit an additional attribute on embed elements.
    pub fn allow_attr(mut self, attr: impl Into<String>) -> Self {
        self.attrs.push(attr.into());
        self
    }

    /// Trust an additional iframe/script source origin. Should end in `/`
    /// to keep the prefix check strict.
    pub fn allow_origin(mut self, origin: impl Into<String>) -> Self {
        self.origins.push(origin.into());
        self
    }

    /// Run both sanitization phases on raw embed HTML.
    pub fn sanitize(&self, raw: &str) -> String {
        let structural = structural::sanitize(raw, self);
        origin::filter(&structural, self)
    }

    pub(crate) fn tag_allowed(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    pub(crate) fn attr_allowed(&self, attr: &str) -> bool {
        attr.starts_with("data-") || self.attrs.iter().any(|a| a == attr)
    }

    pub(crate) fn origin_allowed(&self, src: &str) -> bool {
        self.origins.iter().any(|o| src.starts_with(o.as_str()))
    }
}

/// Sanitize raw embed HTML under the default [`EmbedPolicy`].
///
/// # Example
///
/// ```
/// use content_pipeline::sanitize_embed;
///
/// let clean = sanitize_embed(r#"<iframe src="https://evil.example.com/x"></iframe>"#);
/// assert!(!clean.contains("iframe"));
/// ```
pub fn sanitize_embed(raw: &str) -> String {
    EmbedPolicy::default().sanitize(raw)
}

//! Slug generation: mapping free-form titles to URL-safe identifiers.

use std::sync::LazyLock;

use regex::Regex;

static SLUG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9]+(-[a-z0-9]+)*$").expect("slug pattern is valid"));

/// Convert a human title into a normalized, URL-safe slug.
///
/// Lowercases the input, collapses every run of characters that are not
/// ASCII letters or digits into a single hyphen, and trims leading and
/// trailing hyphens. Non-ASCII letters are treated as separators, not
/// transliterated.
///
/// Empty or all-punctuation input yields an empty string; callers must
/// reject that before attempting resolution (see
/// [`make_unique_slug`](crate::make_unique_slug), which refuses an empty
/// base). No length limit is enforced here.
///
/// Deterministic and pure: no I/O, no randomness, and idempotent — the slug
/// of a slug is itself.
///
/// # Example
///
/// ```
/// use content_pipeline::generate_slug;
///
/// assert_eq!(generate_slug("Hello World! 2024"), "hello-world-2024");
/// assert_eq!(generate_slug("Chicken Tikka Masala!"), "chicken-tikka-masala");
/// assert_eq!(generate_slug("!!!"), "");
/// ```
pub fn generate_slug(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_hyphen = false;

    for c in title.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_hyphen = true;
        }
    }

    slug
}

/// Returns `true` when `slug` is a well-formed slug.
///
/// Well-formed means non-empty, only lowercase ASCII alphanumerics and
/// hyphens, no leading/trailing hyphen, and no repeated hyphens — i.e. it
/// matches `^[a-z0-9]+(-[a-z0-9]+)*$`. Every non-empty output of
/// [`generate_slug`] satisfies this.
pub fn is_valid_slug(slug: &str) -> bool {
    SLUG_RE.is_match(slug)
}

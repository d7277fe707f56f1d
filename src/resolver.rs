//! Unique slug resolution against an externally supplied existence check.
//!
//! The resolver never touches storage directly: callers hand it an
//! [`ExistenceChecker`] capability backed by whatever collection owns the
//! slug namespace (blog posts and recipes are independent namespaces, so
//! each gets its own checker). Persisting the resolved slug is entirely the
//! caller's job.
//!
//! Two concurrent publishers resolving the same base can both observe a
//! candidate as free before either has written its row. That check-then-act
//! race is deliberately left to the storage layer (a uniqueness constraint
//! on the slug column); the resolver adds no locking.

use std::future::Future;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::{ContentPipelineError, Result};

/// Upper bound on existence checks per resolution, including the initial
/// check of the base itself. Past this, the timestamp fallback kicks in.
pub const MAX_EXISTENCE_CHECKS: usize = 100;

/// Number of suffix candidates probed concurrently by
/// [`make_unique_slug_batched`].
const PROBE_WINDOW: usize = 8;

/// Capability reporting whether a candidate slug is already taken in its
/// collection.
///
/// Implementations must be `Send + Sync` so resolution can run inside shared
/// request handlers. Errors are propagated unmodified to the resolver's
/// caller, which owns retry/abort policy.
///
/// # Implementing a checker
///
/// ```rust,no_run
/// use content_pipeline::{ExistenceChecker, Result};
///
/// struct DbChecker { /* connection pool, collection name, ... */ }
///
/// impl ExistenceChecker for DbChecker {
///     async fn exists(&self, candidate: &str) -> Result<bool> {
///         // SELECT count(*) FROM posts WHERE slug = $candidate ...
///         Ok(false)
///     }
/// }
/// ```
pub trait ExistenceChecker: Send + Sync {
    /// Returns `true` if `candidate` is already taken.
    fn exists(&self, candidate: &str) -> impl Future<Output = Result<bool>> + Send;
}

/// Resolve `base` to a slug that is unique within the checker's collection.
///
/// The common case costs exactly one existence check: if `base` is free it
/// is returned as-is. Otherwise numeric suffixes `base-2`, `base-3`, … are
/// probed sequentially and the first free candidate wins. If
/// [`MAX_EXISTENCE_CHECKS`] checks all come back taken, the current
/// Unix-epoch millisecond timestamp is appended instead, guaranteeing
/// termination without further checking (at the cost of strict sequential
/// numbering).
///
/// An empty `base` is refused with
/// [`ContentPipelineError::EmptySlug`] — normalize titles through
/// [`generate_slug`](crate::generate_slug) first and expect this error for
/// titles with no alphanumeric content.
///
/// Checker failures propagate unmodified; the resolver adds no retry logic.
pub async fn make_unique_slug<C: ExistenceChecker>(base: &str, checker: &C) -> Result<String> {
    if base.is_empty() {
        return Err(ContentPipelineError::EmptySlug);
    }

    if !checker.exists(base).await? {
        return Ok(base.to_string());
    }

    for n in 2..=MAX_EXISTENCE_CHECKS {
        let candidate = format!("{base}-{n}");
        if !checker.exists(&candidate).await? {
            return Ok(candidate);
        }
    }

    let fallback = timestamp_slug(base);
    tracing::debug!("Probe ceiling reached for {base:?}, falling back to {fallback:?}");
    Ok(fallback)
}

/// Like [`make_unique_slug`], but probes suffix candidates in concurrent
/// windows for lower latency against slow checkers.
///
/// The base itself is still checked alone first, so the common case costs
/// one existence check. When suffix probing is needed, a window of
/// candidates is checked concurrently and the lowest-numbered free candidate
/// is returned — the result is identical to the sequential resolver, only
/// the check schedule differs. Ceiling and timestamp fallback are shared
/// with [`make_unique_slug`].
pub async fn make_unique_slug_batched<C: ExistenceChecker>(
    base: &str,
    checker: &C,
) -> Result<String> {
    if base.is_empty() {
        return Err(ContentPipelineError::EmptySlug);
    }

    if !checker.exists(base).await? {
        return Ok(base.to_string());
    }

    let mut next = 2;
    while next <= MAX_EXISTENCE_CHECKS {
        let window: Vec<String> = (next..=MAX_EXISTENCE_CHECKS)
            .take(PROBE_WINDOW)
            .map(|n| format!("{base}-{n}"))
            .collect();

        let results =
            futures::future::join_all(window.iter().map(|c| checker.exists(c))).await;

        // Errors and hits are resolved in candidate order so the returned
        // slug is always the lowest-numbered free one.
        for (candidate, taken) in window.iter().zip(results) {
            if !taken? {
                return Ok(candidate.clone());
            }
        }

        next += window.len();
    }

    let fallback = timestamp_slug(base);
    tracing::debug!("Probe ceiling reached for {base:?}, falling back to {fallback:?}");
    Ok(fallback)
}

fn timestamp_slug(base: &str) -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);
    format!("{base}-{millis}")
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    /// Checker backed by an in-memory set, counting calls.
    struct SetChecker {
        taken: Mutex<HashSet<String>>,
        calls: AtomicUsize,
    }

    impl SetChecker {
        fn new(taken: &[&str]) -> Self {
            Self {
                taken: Mutex::new(taken.iter().map(|s| s.to_string()).collect()),
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl ExistenceChecker for SetChecker {
        async fn exists(&self, candidate: &str) -> Result<bool> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.taken.lock().unwrap().contains(candidate))
        }
    }

    /// Checker that reports every candidate as taken.
    struct SaturatedChecker {
        calls: AtomicUsize,
    }

    impl ExistenceChecker for SaturatedChecker {
        async fn exists(&self, _candidate: &str) -> Result<bool> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(true)
        }
    }

    /// Checker that always fails -- for testing error propagation.
    struct FailingChecker;

    impl ExistenceChecker for FailingChecker {
        async fn exists(&self, _candidate: &str) -> Result<bool> {
            Err(ContentPipelineError::Checker("connection reset".into()))
        }
    }

    #[tokio::test]
    async fn free_base_returned_after_one_check() {
        let checker = SetChecker::new(&[]);
        let slug = make_unique_slug("my-post", &checker).await.unwrap();
        assert_eq!(slug, "my-post");
        assert_eq!(checker.calls(), 1);
    }

    #[tokio::test]
    async fn first_collision_gets_suffix_two() {
        let checker = SetChecker::new(&["my-post"]);
        let slug = make_unique_slug("my-post", &checker).await.unwrap();
        assert_eq!(slug, "my-post-2");
        assert_eq!(checker.calls(), 2);
    }

    #[tokio::test]
    async fn probes_until_first_free_suffix() {
        let checker = SetChecker::new(&["p", "p-2", "p-3", "p-4"]);
        let slug = make_unique_slug("p", &checker).await.unwrap();
        assert_eq!(slug, "p-5");
        assert_eq!(checker.calls(), 5);
    }

    #[tokio::test]
    async fn saturated_checker_falls_back_to_timestamp() {
        let checker = SaturatedChecker {
            calls: AtomicUsize::new(0),
        };
        let slug = make_unique_slug("p", &checker).await.unwrap();
        assert!(slug.starts_with("p-"));
        let suffix = &slug["p-".len()..];
        assert!(suffix.chars().all(|c| c.is_ascii_digit()));
        // Millisecond timestamps are far larger than any probe suffix.
        assert!(suffix.len() > 3);
        assert_eq!(checker.calls.load(Ordering::SeqCst), MAX_EXISTENCE_CHECKS);
    }

    #[tokio::test]
    async fn empty_base_is_refused_without_checking() {
        let checker = SetChecker::new(&[]);
        let err = make_unique_slug("", &checker).await.unwrap_err();
        assert!(matches!(err, ContentPipelineError::EmptySlug));
        assert_eq!(checker.calls(), 0);
    }

    #[tokio::test]
    async fn checker_errors_propagate_unmodified() {
        let err = make_unique_slug("p", &FailingChecker).await.unwrap_err();
        assert!(matches!(err, ContentPipelineError::Checker(_)));
    }

    #[tokio::test]
    async fn batched_free_base_costs_one_check() {
        let checker = SetChecker::new(&[]);
        let slug = make_unique_slug_batched("my-post", &checker).await.unwrap();
        assert_eq!(slug, "my-post");
        assert_eq!(checker.calls(), 1);
    }

    #[tokio::test]
    async fn batched_returns_lowest_free_candidate() {
        // p-2 and p-3 taken, p-4 and p-5 both free within the same window.
        let checker = SetChecker::new(&["p", "p-2", "p-3"]);
        let slug = make_unique_slug_batched("p", &checker).await.unwrap();
        assert_eq!(slug, "p-4");
    }

    #[tokio::test]
    async fn batched_matches_sequential_result() {
        let taken: Vec<String> = std::iter::once("post".to_string())
            .chain((2..=17).map(|n| format!("post-{n}")))
            .collect();
        let taken_refs: Vec<&str> = taken.iter().map(String::as_str).collect();

        let sequential = make_unique_slug("post", &SetChecker::new(&taken_refs))
            .await
            .unwrap();
        let batched = make_unique_slug_batched("post", &SetChecker::new(&taken_refs))
            .await
            .unwrap();
        assert_eq!(sequential, "post-18");
        assert_eq!(batched, sequential);
    }

    #[tokio::test]
    async fn batched_saturated_falls_back_to_timestamp() {
        let checker = SaturatedChecker {
            calls: AtomicUsize::new(0),
        };
        let slug = make_unique_slug_batched("p", &checker).await.unwrap();
        assert!(slug.starts_with("p-"));
        assert!(checker.calls.load(Ordering::SeqCst) <= MAX_EXISTENCE_CHECKS);
    }

    #[tokio::test]
    async fn batched_empty_base_is_refused() {
        let checker = SetChecker::new(&[]);
        let err = make_unique_slug_batched("", &checker).await.unwrap_err();
        assert!(matches!(err, ContentPipelineError::EmptySlug));
    }
}

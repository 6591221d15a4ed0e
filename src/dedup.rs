//! Concurrent digest registry for first-writer-wins deduplication.

use std::collections::HashSet;
use std::sync::Mutex;

/// Set of content digests already admitted for saving in this run.
///
/// Shared across all workers for the lifetime of one scan. Admission is an
/// atomic insert-if-absent: exactly one worker per distinct digest gets
/// `true`, every other worker gets `false` and must discard its copy. Entries
/// are never removed.
#[derive(Debug, Default)]
pub struct DedupRegistry {
    seen: Mutex<HashSet<String>>,
}

impl DedupRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attempt to admit a digest.
    ///
    /// Returns `true` if this caller is the first to present the digest and
    /// therefore owns persisting the icon, `false` if it was already seen.
    pub fn try_admit(&self, digest: &str) -> bool {
        self.seen
            .lock()
            .expect("dedup registry mutex poisoned")
            .insert(digest.to_owned())
    }

    /// Number of distinct digests admitted so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.seen
            .lock()
            .expect("dedup registry mutex poisoned")
            .len()
    }

    /// Whether no digest has been admitted yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

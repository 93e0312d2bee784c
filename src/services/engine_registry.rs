//! Registry of loaded document indexes.
//!
//! Replaces a process-global per-document table: callers own a registry and
//! pass it to whatever serves requests. Entries are keyed by document
//! reference and evicted according to [`EvictionPolicy`].

use moka::future::Cache;
use moka::policy::EvictionPolicy as MokaEviction;
use std::future::Future;
use std::sync::Arc;

use crate::domain::errors::RetrievalResult;
use crate::domain::models::DocumentRef;
use crate::services::document_index::DocumentIndex;

/// When loaded indexes are dropped from the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvictionPolicy {
    /// Keep every index until it is invalidated or the registry is dropped.
    None,
    /// Keep at most this many indexes, dropping the least recently used.
    Lru(u64),
}

impl EvictionPolicy {
    /// `None` for no eviction, `Some(n)` for an LRU bound of `n`.
    pub const fn from_capacity(capacity: Option<u64>) -> Self {
        match capacity {
            Some(n) => Self::Lru(n),
            None => Self::None,
        }
    }
}

/// Shared table of initialized [`DocumentIndex`]es.
///
/// Cloning is cheap and clones share the same entries.
#[derive(Clone)]
pub struct EngineRegistry {
    engines: Cache<DocumentRef, Arc<DocumentIndex>>,
    policy: EvictionPolicy,
}

impl EngineRegistry {
    pub fn new(policy: EvictionPolicy) -> Self {
        let engines = match policy {
            EvictionPolicy::None => Cache::builder().build(),
            EvictionPolicy::Lru(capacity) => Cache::builder()
                .max_capacity(capacity)
                .eviction_policy(MokaEviction::lru())
                .build(),
        };

        Self { engines, policy }
    }

    pub const fn policy(&self) -> EvictionPolicy {
        self.policy
    }

    /// Loaded index for `document`, if any.
    pub async fn get(&self, document: &DocumentRef) -> Option<Arc<DocumentIndex>> {
        self.engines.get(document).await
    }

    /// Return the loaded index for `document`, running `init` if there is none.
    ///
    /// Concurrent callers for the same document share one `init` run. A
    /// failed `init` leaves no entry behind, so the next call tries again.
    pub async fn get_or_init<F>(
        &self,
        document: &DocumentRef,
        init: F,
    ) -> RetrievalResult<Arc<DocumentIndex>>
    where
        F: Future<Output = RetrievalResult<DocumentIndex>>,
    {
        self.engines
            .try_get_with(document.clone(), async move { init.await.map(Arc::new) })
            .await
            .map_err(Arc::unwrap_or_clone)
    }

    /// Store `index` under its document, replacing any previous entry.
    pub async fn insert(&self, index: Arc<DocumentIndex>) {
        self.engines.insert(index.document().clone(), index).await;
    }

    /// Drop the entry for `document`.
    pub async fn invalidate(&self, document: &DocumentRef) {
        self.engines.invalidate(document).await;
    }

    pub fn contains(&self, document: &DocumentRef) -> bool {
        self.engines.contains_key(document)
    }

    /// Number of loaded indexes after pending evictions have been applied.
    pub async fn len(&self) -> u64 {
        self.engines.run_pending_tasks().await;
        self.engines.entry_count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Default for EngineRegistry {
    fn default() -> Self {
        Self::new(EvictionPolicy::None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::RetrievalError;
    use crate::domain::models::CacheRecord;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    fn index(name: &str) -> DocumentIndex {
        let record = CacheRecord::new(
            DocumentRef::new(name),
            vec!["text".to_string()],
            vec![vec![1.0, 0.0]],
            "model",
            2,
        );
        DocumentIndex::from_record(record, 2)
    }

    #[tokio::test]
    async fn test_get_or_init_runs_once() {
        let registry = EngineRegistry::default();
        let calls = AtomicUsize::new(0);
        let doc = DocumentRef::new("a.pdf");

        for _ in 0..3 {
            let loaded = registry
                .get_or_init(&doc, async {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok(index("a.pdf"))
                })
                .await
                .unwrap();
            assert_eq!(loaded.document(), &doc);
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_concurrent_init_is_coalesced() {
        let registry = EngineRegistry::default();
        let calls = Arc::new(AtomicUsize::new(0));
        let doc = DocumentRef::new("shared.pdf");

        let init = |calls: Arc<AtomicUsize>| async move {
            calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(50)).await;
            Ok(index("shared.pdf"))
        };

        let (a, b) = tokio::join!(
            registry.get_or_init(&doc, init(calls.clone())),
            registry.get_or_init(&doc, init(calls.clone())),
        );

        assert!(Arc::ptr_eq(&a.unwrap(), &b.unwrap()));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failed_init_is_not_cached() {
        let registry = EngineRegistry::default();
        let doc = DocumentRef::new("broken.pdf");

        let err = registry
            .get_or_init(&doc, async {
                Err(RetrievalError::extraction("broken.pdf", "unreadable"))
            })
            .await
            .unwrap_err();
        assert!(matches!(err, RetrievalError::Extraction { .. }));
        assert!(!registry.contains(&doc));

        registry
            .get_or_init(&doc, async { Ok(index("broken.pdf")) })
            .await
            .unwrap();
        assert!(registry.contains(&doc));
    }

    #[tokio::test]
    async fn test_insert_replaces_and_invalidate_removes() {
        let registry = EngineRegistry::default();
        let doc = DocumentRef::new("a.pdf");

        let first = Arc::new(index("a.pdf"));
        registry.insert(first.clone()).await;
        let second = Arc::new(index("a.pdf"));
        registry.insert(second.clone()).await;

        let current = registry.get(&doc).await.unwrap();
        assert!(Arc::ptr_eq(&current, &second));

        registry.invalidate(&doc).await;
        assert!(registry.get(&doc).await.is_none());
        assert!(registry.is_empty().await);
    }

    #[tokio::test]
    async fn test_lru_evicts_least_recently_used() {
        let registry = EngineRegistry::new(EvictionPolicy::Lru(2));
        let (a, b, c) = (
            DocumentRef::new("a.pdf"),
            DocumentRef::new("b.pdf"),
            DocumentRef::new("c.pdf"),
        );

        registry.insert(Arc::new(index("a.pdf"))).await;
        registry.len().await;
        registry.insert(Arc::new(index("b.pdf"))).await;
        registry.len().await;
        assert!(registry.get(&a).await.is_some());
        registry.len().await;
        registry.insert(Arc::new(index("c.pdf"))).await;

        assert_eq!(registry.len().await, 2);
        assert!(registry.contains(&a));
        assert!(!registry.contains(&b));
        assert!(registry.contains(&c));
    }

    #[test]
    fn test_policy_from_capacity() {
        assert_eq!(EvictionPolicy::from_capacity(None), EvictionPolicy::None);
        assert_eq!(EvictionPolicy::from_capacity(Some(8)), EvictionPolicy::Lru(8));
    }
}

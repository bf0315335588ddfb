use sha2::{Digest, Sha256};
use std::collections::{HashMap, VecDeque};
use std::future::Future;
use std::sync::Arc;
use tokio::sync::{Mutex, OnceCell};
use vision_sim::{FilterKind, FilterSpec};

/// Identity of one preview: the uploaded bytes plus the exact selection.
///
/// Intensity is compared by its bit pattern so that specs which would
/// produce different pixels never share an entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PreviewKey {
    source_hash: String,
    kind: FilterKind,
    intensity_bits: u32,
}

impl PreviewKey {
    pub fn new(source: &[u8], spec: FilterSpec) -> Self {
        Self::with_hash(source_hash(source), spec)
    }

    /// Build a key from an already computed source hash
    pub fn with_hash(source_hash: String, spec: FilterSpec) -> Self {
        Self {
            source_hash,
            kind: spec.kind(),
            intensity_bits: spec.intensity().to_bits(),
        }
    }

    pub fn source_hash(&self) -> &str {
        &self.source_hash
    }
}

/// Lowercase hex SHA-256 of an upload
pub fn source_hash(source: &[u8]) -> String {
    hex::encode(Sha256::digest(source))
}

/// Encoded preview ready to be served
#[derive(Debug, Clone)]
pub struct CachedPreview {
    /// Filtered PNG bytes
    pub png_bytes: Arc<Vec<u8>>,
    /// When this preview was generated
    pub generated_at: chrono::DateTime<chrono::Utc>,
}

impl CachedPreview {
    pub fn new(png_bytes: Vec<u8>) -> Self {
        Self {
            png_bytes: Arc::new(png_bytes),
            generated_at: chrono::Utc::now(),
        }
    }
}

#[derive(Default)]
struct Entries {
    cells: HashMap<PreviewKey, Arc<OnceCell<CachedPreview>>>,
    /// Insertion order, oldest first
    order: VecDeque<PreviewKey>,
}

/// Bounded cache of encoded previews.
///
/// Concurrent requests for the same key share one computation: the first
/// caller runs it and the rest wait for its result. A failed computation
/// removes its entry, so it neither occupies a slot nor blocks a retry.
/// When full, the oldest entry is evicted.
pub struct PreviewCache {
    capacity: usize,
    entries: Mutex<Entries>,
}

impl PreviewCache {
    /// Create a cache holding at most `capacity` previews (0 disables caching)
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: Mutex::new(Entries::default()),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of entries currently held (including in-flight ones)
    pub async fn len(&self) -> usize {
        self.entries.lock().await.cells.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Retrieve a finished preview
    pub async fn get(&self, key: &PreviewKey) -> Option<CachedPreview> {
        let entries = self.entries.lock().await;
        entries.cells.get(key).and_then(|cell| cell.get().cloned())
    }

    /// Return the cached preview for `key`, computing it with `init` if absent
    pub async fn get_or_try_insert_with<F, Fut, E>(
        &self,
        key: PreviewKey,
        init: F,
    ) -> Result<CachedPreview, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<u8>, E>>,
    {
        if self.capacity == 0 {
            return init().await.map(CachedPreview::new);
        }

        let cell = self.cell_for(key.clone()).await;
        let result = cell
            .get_or_try_init(move || async move { init().await.map(CachedPreview::new) })
            .await
            .cloned();

        if result.is_err() {
            self.discard_empty(&key, &cell).await;
        }
        result
    }

    /// Drop the entry for `key` if it is still this unfilled cell
    async fn discard_empty(&self, key: &PreviewKey, cell: &Arc<OnceCell<CachedPreview>>) {
        let mut entries = self.entries.lock().await;
        let same = entries
            .cells
            .get(key)
            .is_some_and(|held| Arc::ptr_eq(held, cell) && !held.initialized());
        if same {
            entries.cells.remove(key);
            entries.order.retain(|k| k != key);
            tracing::debug!(source_hash = %key.source_hash, kind = %key.kind, "Dropped failed preview entry");
        }
    }

    /// Find or create the cell for `key`, evicting the oldest entries
    async fn cell_for(&self, key: PreviewKey) -> Arc<OnceCell<CachedPreview>> {
        let mut entries = self.entries.lock().await;
        if let Some(cell) = entries.cells.get(&key) {
            tracing::trace!(source_hash = %key.source_hash, kind = %key.kind, "Preview cache hit");
            return cell.clone();
        }

        let cell = Arc::new(OnceCell::new());
        entries.cells.insert(key.clone(), cell.clone());
        entries.order.push_back(key);

        while entries.order.len() > self.capacity {
            if let Some(oldest) = entries.order.pop_front() {
                entries.cells.remove(&oldest);
                tracing::debug!(source_hash = %oldest.source_hash, kind = %oldest.kind, "Evicted preview");
            }
        }
        cell
    }

    /// Drop every cached preview
    pub async fn clear(&self) {
        let mut entries = self.entries.lock().await;
        entries.cells.clear();
        entries.order.clear();
    }
}

impl Default for PreviewCache {
    fn default() -> Self {
        Self::new(64)
    }
}

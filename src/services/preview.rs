use crate::error::ApiError;
use crate::rendering::PngCodec;
use crate::services::{CachedPreview, PreviewCache, PreviewKey};
use std::sync::Arc;
use vision_sim::FilterSpec;

/// Produces filtered PNG previews of uploaded images.
///
/// Every preview is derived from the original upload. A previous output is
/// never fed back in, so switching filters or intensities does not
/// compound.
pub struct PreviewService {
    codec: Arc<PngCodec>,
    cache: Arc<PreviewCache>,
}

impl PreviewService {
    pub fn new(codec: PngCodec, cache: Arc<PreviewCache>) -> Self {
        Self {
            codec: Arc::new(codec),
            cache,
        }
    }

    pub fn cache(&self) -> &Arc<PreviewCache> {
        &self.cache
    }

    /// Filter an uploaded image, reusing a cached result when available
    pub async fn render(&self, source: Arc<[u8]>, spec: FilterSpec) -> Result<CachedPreview, ApiError> {
        let key = PreviewKey::new(&source, spec);

        tracing::info!(
            source_hash = %key.source_hash(),
            filter = %spec.kind(),
            intensity = spec.intensity(),
            size_bytes = source.len(),
            "Preview requested"
        );

        self.cache
            .get_or_try_insert_with(key, || self.render_uncached(source, spec))
            .await
    }

    /// Decode, transform and encode without consulting the cache
    ///
    /// Runs in spawn_blocking; the work is CPU bound.
    pub async fn render_uncached(&self, source: Arc<[u8]>, spec: FilterSpec) -> Result<Vec<u8>, ApiError> {
        let codec = self.codec.clone();

        let png_bytes = tokio::task::spawn_blocking(move || render_blocking(&codec, &source, spec))
            .await
            .map_err(|e| ApiError::Internal(format!("Preview task failed: {e}")))??;

        tracing::debug!(size_bytes = png_bytes.len(), "Preview rendered");
        Ok(png_bytes)
    }
}

/// Synchronous preview pipeline, shared with the CLI
pub fn render_blocking(codec: &PngCodec, source: &[u8], spec: FilterSpec) -> Result<Vec<u8>, ApiError> {
    let original = codec.decode(source)?;
    let filtered = vision_sim::transform(&original, spec)?;
    Ok(codec.encode(&filtered)?)
}

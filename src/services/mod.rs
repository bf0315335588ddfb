pub mod preview;
pub mod preview_cache;

pub use preview::{render_blocking, PreviewService};
pub use preview_cache::{source_hash, CachedPreview, PreviewCache, PreviewKey};

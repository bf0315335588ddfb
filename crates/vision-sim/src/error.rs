//! Error type for the vision-sim public API.

use thiserror::Error;

/// Errors reported by [`transform`](crate::transform) and the buffer and
/// filter constructors.
///
/// Both variants are caller contract violations. Out-of-range numeric
/// inputs (intensity, zoom level) are never errors; they are clamped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    /// The sample count does not match `width * height * 4`.
    #[error("invalid raster buffer: {width}x{height} needs {expected} bytes, got {len}", expected = expected_len(.width, .height))]
    InvalidBuffer {
        width: u32,
        height: u32,
        len: usize,
    },

    /// The filter tag is not one of the supported kinds.
    #[error("unknown filter kind: {0:?}")]
    UnknownFilterKind(String),
}

fn expected_len(width: &u32, height: &u32) -> String {
    (*width as usize)
        .checked_mul(*height as usize)
        .and_then(|n| n.checked_mul(4))
        .map(|n| n.to_string())
        .unwrap_or_else(|| "more than usize::MAX".to_string())
}

//! Immutable RGBA raster buffer.
//!
//! [`RasterBuffer`] is the only pixel container the engine accepts and
//! produces. Samples are stored as a flat `[R, G, B, A, R, G, B, A, ...]`
//! byte sequence, row-major, origin top-left.

use crate::error::FilterError;

/// Bytes per pixel (R, G, B, A).
pub const CHANNELS: usize = 4;

/// A width/height-tagged flat array of 8-bit RGBA samples.
///
/// The invariant `data.len() == width * height * 4` is checked on
/// construction, and the buffer cannot be mutated afterwards. Filters
/// always produce a new buffer, so an original upload stays available for
/// re-filtering at another intensity or for reverting to no filter.
///
/// # Example
///
/// ```
/// use vision_sim::RasterBuffer;
///
/// let buf = RasterBuffer::new(2, 1, vec![255, 0, 0, 255, 0, 0, 255, 255]).unwrap();
/// assert_eq!(buf.pixel(1, 0), Some([0, 0, 255, 255]));
///
/// assert!(RasterBuffer::new(2, 2, vec![0; 3]).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RasterBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl RasterBuffer {
    /// Wrap `data` as a `width` x `height` RGBA raster.
    ///
    /// Returns [`FilterError::InvalidBuffer`] when the length does not match
    /// the dimensions (including when `width * height * 4` overflows).
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Result<Self, FilterError> {
        check_len(width, height, data.len())?;
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Create a raster where every pixel is `rgba`.
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let count = width as usize * height as usize;
        let mut data = Vec::with_capacity(count * CHANNELS);
        for _ in 0..count {
            data.extend_from_slice(&rgba);
        }
        Self {
            width,
            height,
            data,
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of bytes in one row.
    #[inline]
    pub fn stride(&self) -> usize {
        self.width as usize * CHANNELS
    }

    /// Raw RGBA samples.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Consume the buffer and return its samples.
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// True when the raster has no pixels.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The RGBA value at `(x, y)`, or `None` when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = y as usize * self.stride() + x as usize * CHANNELS;
        Some([
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ])
    }

    /// Iterate over rows as byte slices, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        // chunks() rejects a zero chunk size; a zero-width raster has no rows.
        self.data.chunks(self.stride().max(1))
    }

    /// Re-check the length invariant.
    pub fn validate(&self) -> Result<(), FilterError> {
        check_len(self.width, self.height, self.data.len())
    }
}

fn check_len(width: u32, height: u32, len: usize) -> Result<(), FilterError> {
    let expected = (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(CHANNELS));
    match expected {
        Some(n) if n == len => Ok(()),
        _ => Err(FilterError::InvalidBuffer { width, height, len }),
    }
}

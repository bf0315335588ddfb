//! Vision condition filters.
//!
//! [`transform`] maps a source [`RasterBuffer`] and a [`FilterSpec`] to a new
//! buffer. Color filters ([`color`]) remap every pixel independently; blur
//! ([`blur`]) is a separable Gaussian convolution.
//!
//! # Color vision approximation
//!
//! Protanopia, deuteranopia and tritanopia blend a single channel (red,
//! green, blue respectively) toward the pixel's luminance. This is a
//! perceptual approximation, not a dichromacy model: a full simulation
//! projects onto confusion lines in LMS space with a 3x3 matrix. The
//! approximation is kept on purpose because its outputs are the documented
//! behavior of the tool.

pub mod blur;
pub mod color;

use std::fmt;
use std::str::FromStr;

use crate::buffer::RasterBuffer;
use crate::error::FilterError;

/// Slider value used after every new upload (0..=100 scale).
pub const DEFAULT_INTENSITY_PERCENT: u8 = 50;

/// The closed set of simulated vision conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FilterKind {
    /// No filter; output equals input.
    #[default]
    None,
    /// Spatial blur, radius scales with intensity.
    Blur,
    /// Contrast loss: channels pulled toward mid gray 128.
    Contrast,
    /// Missing red cone response.
    Protanopia,
    /// Missing green cone response.
    Deuteranopia,
    /// Missing blue cone response.
    Tritanopia,
    /// Total color blindness: full desaturation at intensity 1.
    Achromatopsia,
}

impl FilterKind {
    /// All kinds in display order.
    pub const ALL: [FilterKind; 7] = [
        FilterKind::None,
        FilterKind::Blur,
        FilterKind::Contrast,
        FilterKind::Protanopia,
        FilterKind::Deuteranopia,
        FilterKind::Tritanopia,
        FilterKind::Achromatopsia,
    ];

    /// Lowercase wire tag.
    pub fn as_str(self) -> &'static str {
        match self {
            FilterKind::None => "none",
            FilterKind::Blur => "blur",
            FilterKind::Contrast => "contrast",
            FilterKind::Protanopia => "protanopia",
            FilterKind::Deuteranopia => "deuteranopia",
            FilterKind::Tritanopia => "tritanopia",
            FilterKind::Achromatopsia => "achromatopsia",
        }
    }

    /// Human-readable tab label.
    pub fn label(self) -> &'static str {
        match self {
            FilterKind::None => "None",
            FilterKind::Blur => "Blurred Vision",
            FilterKind::Contrast => "Reduced Contrast",
            FilterKind::Protanopia => "Protanopia (No Red)",
            FilterKind::Deuteranopia => "Deuteranopia (No Green)",
            FilterKind::Tritanopia => "Tritanopia (No Blue)",
            FilterKind::Achromatopsia => "Achromatopsia (No Color)",
        }
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterKind {
    type Err = FilterError;

    /// Parse a tag case-insensitively. `normal` is accepted as an alias of
    /// `none`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim().to_ascii_lowercase();
        if tag == "normal" {
            return Ok(FilterKind::None);
        }
        FilterKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == tag)
            .ok_or_else(|| FilterError::UnknownFilterKind(s.to_string()))
    }
}

/// A filter selection plus a normalized strength in `[0, 1]`.
///
/// Intensity is clamped on construction; `NaN` becomes 0. At 0 every kind
/// is the identity; at 1 the effect is at its maximum.
///
/// # Example
///
/// ```
/// use vision_sim::{FilterKind, FilterSpec};
///
/// let spec = FilterSpec::from_percent(FilterKind::Contrast, 150.0);
/// assert_eq!(spec.intensity(), 1.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterSpec {
    kind: FilterKind,
    intensity: f32,
}

impl FilterSpec {
    pub fn new(kind: FilterKind, intensity: f32) -> Self {
        Self {
            kind,
            intensity: clamp_unit(intensity),
        }
    }

    /// Build from a 0..=100 slider value.
    pub fn from_percent(kind: FilterKind, percent: f32) -> Self {
        Self::new(kind, percent / 100.0)
    }

    /// The "no filter" selection.
    pub fn none() -> Self {
        Self::new(FilterKind::None, 0.0)
    }

    #[inline]
    pub fn kind(&self) -> FilterKind {
        self.kind
    }

    #[inline]
    pub fn intensity(&self) -> f32 {
        self.intensity
    }

    /// True when applying this spec cannot change any pixel.
    pub fn is_identity(&self) -> bool {
        self.kind == FilterKind::None || self.intensity == 0.0
    }
}

impl Default for FilterSpec {
    fn default() -> Self {
        Self::none()
    }
}

fn clamp_unit(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// Apply `spec` to `source`, producing a new buffer.
///
/// The source is never modified, so callers should always derive previews
/// from the original upload rather than from a previous output. Either every
/// pixel is processed or an error is returned before any output exists.
///
/// # Errors
///
/// [`FilterError::InvalidBuffer`] when the source violates its length
/// invariant.
///
/// # Example
///
/// ```
/// use vision_sim::{transform, FilterKind, FilterSpec, RasterBuffer};
///
/// let src = RasterBuffer::filled(1, 1, [200, 50, 50, 255]);
/// let out = transform(&src, FilterSpec::new(FilterKind::Protanopia, 1.0)).unwrap();
/// assert_eq!(out.pixel(0, 0), Some([95, 50, 50, 255]));
/// ```
pub fn transform(source: &RasterBuffer, spec: FilterSpec) -> Result<RasterBuffer, FilterError> {
    source.validate()?;

    if spec.is_identity() {
        return Ok(source.clone());
    }

    let t = spec.intensity();
    let data = match spec.kind() {
        FilterKind::None => return Ok(source.clone()),
        FilterKind::Blur => blur::gaussian_blur(source, blur::sigma_for_intensity(t)),
        FilterKind::Contrast => color::remap(source, color::Remap::Contrast, t),
        FilterKind::Protanopia => color::remap(source, color::Remap::Channel(0), t),
        FilterKind::Deuteranopia => color::remap(source, color::Remap::Channel(1), t),
        FilterKind::Tritanopia => color::remap(source, color::Remap::Channel(2), t),
        FilterKind::Achromatopsia => color::remap(source, color::Remap::Desaturate, t),
    };

    RasterBuffer::new(source.width(), source.height(), data)
}

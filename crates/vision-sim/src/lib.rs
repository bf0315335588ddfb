//! vision-sim: preview how an image looks with a vision condition
//!
//! This library provides the pixel transform engine and the magnifier lens
//! geometry behind a vision accessibility tester. Both are pure functions
//! over caller-owned values: no I/O, no global state, no async.
//!
//! # Quick Start
//!
//! ```
//! use vision_sim::{transform, FilterKind, FilterSpec, RasterBuffer};
//!
//! let original = RasterBuffer::filled(4, 4, [200, 50, 50, 255]);
//! let spec = FilterSpec::new(FilterKind::Achromatopsia, 1.0);
//! let preview = transform(&original, spec).unwrap();
//!
//! let [r, g, b, a] = preview.pixel(0, 0).unwrap();
//! assert_eq!((r, g, b, a), (95, 95, 95, 255));
//! ```
//!
//! # Filters
//!
//! | Kind | Effect at intensity `t` |
//! |------|-------------------------|
//! | `none` | identity |
//! | `blur` | Gaussian blur, sigma = `8 * t` px, clamp-to-edge |
//! | `contrast` | R, G, B blended toward 128 |
//! | `protanopia` | R blended toward luminance |
//! | `deuteranopia` | G blended toward luminance |
//! | `tritanopia` | B blended toward luminance |
//! | `achromatopsia` | R, G, B blended toward luminance |
//!
//! Luminance is `0.299 R + 0.587 G + 0.114 B`. The single-channel filters
//! are a perceptual approximation, not an LMS-space dichromacy model.
//!
//! Intensity 0 is always the identity, alpha is only ever changed by blur,
//! and every channel is rounded and clamped into `0..=255`.
//!
//! # Re-derive, don't chain
//!
//! [`transform`] never mutates its source. Always filter the original
//! upload; filtering a previous preview compounds rounding error.
//!
//! # Magnifier
//!
//! ```
//! use vision_sim::{Bounds, LensEvent, Magnifier, Pointer};
//!
//! let bounds = Bounds::new(0.0, 0.0, 640.0, 360.0);
//! let magnifier = Magnifier::default()
//!     .apply(LensEvent::Toggle)
//!     .apply(LensEvent::Wheel { delta_y: -100.0 });
//!
//! let lens = magnifier.sample(Pointer::new(320.0, 90.0), bounds).unwrap();
//! assert_eq!(lens.background_size, 300.0);
//! assert_eq!(lens.background_position, (50.0, 25.0));
//! ```

pub mod buffer;
pub mod error;
pub mod filter;
pub mod magnifier;


pub use buffer::RasterBuffer;
pub use error::FilterError;
pub use filter::{transform, FilterKind, FilterSpec, DEFAULT_INTENSITY_PERCENT};
pub use magnifier::{
    sample, Bounds, Focal, LensDescriptor, LensEvent, Magnifier, MagnifierState, Pointer,
    ZoomState,
};

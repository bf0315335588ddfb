//! Magnifying lens sampling.
//!
//! [`sample`] maps a pointer position, the container's bounds and a
//! [`ZoomState`] to a [`LensDescriptor`]: the crop origin and scale of a
//! circular preview over the already-filtered image. [`Magnifier`] wraps
//! the Inactive/Active state machine around it.

mod lens;
mod state;
mod zoom;

pub use lens::{normalize, sample, Bounds, LensDescriptor, Pointer, DEFAULT_LENS_DIAMETER};
pub use state::{LensEvent, Magnifier, MagnifierState};
pub use zoom::{
    clamp_level, Focal, ZoomState, DEFAULT_ZOOM, MAX_ZOOM, MIN_ZOOM, WHEEL_SENSITIVITY,
    ZOOM_SLIDER_STEP,
};

//! Pointer-to-lens sampling.
//!
//! The lens is a circle of fixed on-screen diameter centered on the
//! pointer. Its background is the displayed image scaled by the zoom level
//! and positioned at the same percentage coordinates as the pointer, so the
//! point under the cursor sits in the middle of the lens. No pixels are
//! recomputed.

use super::zoom::{Focal, ZoomState};

/// Default lens diameter in display pixels.
pub const DEFAULT_LENS_DIAMETER: f64 = 200.0;

/// Pointer position in client (viewport) coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Pointer {
    pub x: f64,
    pub y: f64,
}

impl Pointer {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Bounding rectangle of the tracked container, in client coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// True when the pointer lies inside (edges inclusive).
    pub fn contains(&self, pointer: Pointer) -> bool {
        pointer.x >= self.left
            && pointer.x <= self.left + self.width
            && pointer.y >= self.top
            && pointer.y <= self.top + self.height
    }
}

/// Everything needed to paint the lens.
///
/// Percentages are in `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LensDescriptor {
    /// Background scale, `level * 100` percent.
    pub background_size: f64,
    /// Background position `(u%, v%)`.
    pub background_position: (f64, f64),
    /// Lens diameter in display pixels.
    pub lens_diameter: f64,
    /// Lens center within the container, `(u%, v%)`.
    pub center: (f64, f64),
}

impl LensDescriptor {
    /// Translation applied to the lens so its center, not its corner, sits
    /// on [`center`](Self::center).
    pub fn lens_offset(&self) -> f64 {
        -self.lens_diameter / 2.0
    }

    /// Top-left corner of the lens relative to the container, in pixels.
    pub fn lens_origin(&self, bounds: Bounds) -> (f64, f64) {
        (
            self.center.0 / 100.0 * bounds.width + self.lens_offset(),
            self.center.1 / 100.0 * bounds.height + self.lens_offset(),
        )
    }

    /// The focal point this lens magnifies.
    pub fn focal(&self) -> Focal {
        Focal::new(
            self.background_position.0 / 100.0,
            self.background_position.1 / 100.0,
        )
    }
}

/// Express the pointer as percentages of the container, each clamped into
/// `[0, 100]`.
///
/// Pointers outside the container are valid while dragging and clamp to
/// the nearest edge. A zero-sized or non-finite container yields 0.
pub fn normalize(pointer: Pointer, bounds: Bounds) -> (f64, f64) {
    (
        percent(pointer.x - bounds.left, bounds.width),
        percent(pointer.y - bounds.top, bounds.height),
    )
}

fn percent(offset: f64, extent: f64) -> f64 {
    let p = offset / extent * 100.0;
    if p.is_finite() {
        p.clamp(0.0, 100.0)
    } else {
        0.0
    }
}

/// Map a pointer position, container bounds and zoom to a lens descriptor.
pub fn sample(pointer: Pointer, bounds: Bounds, zoom: ZoomState, diameter: f64) -> LensDescriptor {
    let (u, v) = normalize(pointer, bounds);
    LensDescriptor {
        background_size: zoom.level() * 100.0,
        background_position: (u, v),
        lens_diameter: diameter,
        center: (u, v),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn container() -> Bounds {
        Bounds::new(100.0, 50.0, 400.0, 200.0)
    }

    #[test]
    fn test_normalize_inside() {
        let (u, v) = normalize(Pointer::new(300.0, 100.0), container());
        assert_eq!((u, v), (50.0, 25.0));
    }

    #[test]
    fn test_normalize_clamps_outside() {
        assert_eq!(
            normalize(Pointer::new(0.0, 0.0), container()),
            (0.0, 0.0)
        );
        assert_eq!(
            normalize(Pointer::new(900.0, 900.0), container()),
            (100.0, 100.0)
        );
        assert_eq!(
            normalize(Pointer::new(600.0, 40.0), container()),
            (100.0, 0.0)
        );
    }

    #[test]
    fn test_normalize_degenerate_container() {
        let flat = Bounds::new(0.0, 0.0, 0.0, 0.0);
        assert_eq!(normalize(Pointer::new(10.0, 10.0), flat), (0.0, 0.0));
    }

    #[test]
    fn test_sample_fields() {
        let lens = sample(
            Pointer::new(200.0, 200.0),
            container(),
            ZoomState::new(2.5),
            DEFAULT_LENS_DIAMETER,
        );
        assert_eq!(lens.background_size, 250.0);
        assert_eq!(lens.background_position, (25.0, 75.0));
        assert_eq!(lens.center, (25.0, 75.0));
        assert_eq!(lens.lens_diameter, 200.0);
    }

    #[test]
    fn test_lens_is_center_anchored() {
        let lens = sample(
            Pointer::new(300.0, 150.0),
            container(),
            ZoomState::default(),
            DEFAULT_LENS_DIAMETER,
        );
        assert_eq!(lens.lens_offset(), -100.0);
        // Center is (200, 100) inside the container.
        assert_eq!(lens.lens_origin(container()), (100.0, 0.0));
    }

    #[test]
    fn test_diameter_independent_of_zoom() {
        let a = sample(Pointer::default(), container(), ZoomState::new(1.5), 120.0);
        let b = sample(Pointer::default(), container(), ZoomState::new(5.0), 120.0);
        assert_eq!(a.lens_diameter, b.lens_diameter);
        assert_eq!(a.background_size, 150.0);
        assert_eq!(b.background_size, 500.0);
    }

    #[test]
    fn test_focal_from_descriptor() {
        let lens = sample(
            Pointer::new(200.0, 100.0),
            container(),
            ZoomState::default(),
            DEFAULT_LENS_DIAMETER,
        );
        assert_eq!(lens.focal(), Focal::new(0.25, 0.25));
    }

    #[test]
    fn test_bounds_contains() {
        assert!(container().contains(Pointer::new(100.0, 50.0)));
        assert!(container().contains(Pointer::new(500.0, 250.0)));
        assert!(!container().contains(Pointer::new(99.0, 60.0)));
    }
}

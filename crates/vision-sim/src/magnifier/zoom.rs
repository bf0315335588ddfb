//! Zoom level and focal point.

/// Lowest magnification.
pub const MIN_ZOOM: f64 = 1.5;
/// Highest magnification.
pub const MAX_ZOOM: f64 = 5.0;
/// Magnification when a session starts.
pub const DEFAULT_ZOOM: f64 = 2.0;
/// Zoom change per unit of wheel `deltaY`.
pub const WHEEL_SENSITIVITY: f64 = 0.01;
/// Granularity of the zoom slider.
pub const ZOOM_SLIDER_STEP: f64 = 0.5;

/// Clamp a magnification into `[MIN_ZOOM, MAX_ZOOM]`. `NaN` maps to
/// [`MIN_ZOOM`].
#[inline]
pub fn clamp_level(level: f64) -> f64 {
    if level.is_nan() {
        MIN_ZOOM
    } else {
        level.clamp(MIN_ZOOM, MAX_ZOOM)
    }
}

/// Normalized `(u, v)` position in `[0, 1] x [0, 1]` relative to the
/// displayed image's bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Focal {
    pub u: f64,
    pub v: f64,
}

impl Focal {
    /// Build a focal point, clamping both coordinates into `[0, 1]`.
    pub fn new(u: f64, v: f64) -> Self {
        Self {
            u: clamp_fraction(u),
            v: clamp_fraction(v),
        }
    }

    /// The image center.
    pub fn center() -> Self {
        Self { u: 0.5, v: 0.5 }
    }
}

fn clamp_fraction(x: f64) -> f64 {
    if x.is_finite() {
        x.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Current magnification and the point being magnified.
///
/// `level` always lies in `[MIN_ZOOM, MAX_ZOOM]`: every constructor and
/// update clamps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomState {
    level: f64,
    focal: Focal,
}

impl ZoomState {
    pub fn new(level: f64) -> Self {
        Self {
            level: clamp_level(level),
            focal: Focal::center(),
        }
    }

    #[inline]
    pub fn level(&self) -> f64 {
        self.level
    }

    #[inline]
    pub fn focal(&self) -> Focal {
        self.focal
    }

    /// Apply a wheel gesture. Negative `delta_y` (scrolling up/forward)
    /// zooms in.
    pub fn with_wheel(self, delta_y: f64) -> Self {
        if !delta_y.is_finite() {
            return self;
        }
        self.with_level(self.level - delta_y * WHEEL_SENSITIVITY)
    }

    /// Set the level directly (slider input), clamped.
    pub fn with_level(self, level: f64) -> Self {
        Self {
            level: clamp_level(level),
            ..self
        }
    }

    pub fn with_focal(self, focal: Focal) -> Self {
        Self { focal, ..self }
    }
}

impl Default for ZoomState {
    fn default() -> Self {
        Self::new(DEFAULT_ZOOM)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_level() {
        assert_eq!(ZoomState::default().level(), 2.0);
        assert_eq!(ZoomState::default().focal(), Focal::center());
    }

    #[test]
    fn test_new_clamps() {
        assert_eq!(ZoomState::new(0.2).level(), MIN_ZOOM);
        assert_eq!(ZoomState::new(9.0).level(), MAX_ZOOM);
        assert_eq!(ZoomState::new(f64::NAN).level(), MIN_ZOOM);
        assert_eq!(ZoomState::new(3.25).level(), 3.25);
    }

    #[test]
    fn test_wheel_up_zooms_in() {
        let zoom = ZoomState::new(2.0).with_wheel(-100.0);
        assert!((zoom.level() - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_wheel_down_zooms_out() {
        let zoom = ZoomState::new(2.0).with_wheel(25.0);
        assert!((zoom.level() - 1.75).abs() < 1e-9);
    }

    #[test]
    fn test_wheel_stays_at_ceiling() {
        let zoom = ZoomState::new(MAX_ZOOM).with_wheel(-120.0);
        assert_eq!(zoom.level(), 5.0);
    }

    #[test]
    fn test_wheel_stays_at_floor() {
        let zoom = ZoomState::new(MIN_ZOOM).with_wheel(120.0);
        assert_eq!(zoom.level(), 1.5);
    }

    #[test]
    fn test_wheel_ignores_non_finite_delta() {
        let zoom = ZoomState::new(2.5);
        assert_eq!(zoom.with_wheel(f64::NAN), zoom);
        assert_eq!(zoom.with_wheel(f64::INFINITY), zoom);
    }

    #[test]
    fn test_with_level_clamps() {
        let zoom = ZoomState::default();
        assert_eq!(zoom.with_level(7.0).level(), MAX_ZOOM);
        assert_eq!(zoom.with_level(1.0).level(), MIN_ZOOM);
        assert_eq!(zoom.with_level(4.5).level(), 4.5);
    }

    #[test]
    fn test_focal_clamps() {
        assert_eq!(Focal::new(-0.2, 1.7), Focal { u: 0.0, v: 1.0 });
        assert_eq!(Focal::new(f64::NAN, 0.25), Focal { u: 0.0, v: 0.25 });
    }
}

//! Magnifier activity state machine.
//!
//! Two states, `Inactive` and `Active`. An explicit toggle flips between
//! them; losing pointer tracking always lands in `Inactive` so no stale lens
//! stays on screen. There is no paused state.

use super::lens::{sample, Bounds, LensDescriptor, Pointer, DEFAULT_LENS_DIAMETER};
use super::zoom::ZoomState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MagnifierState {
    #[default]
    Inactive,
    Active,
}

/// Input events the magnifier reacts to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LensEvent {
    /// Explicit on/off button.
    Toggle,
    /// The pointer left the tracked container.
    PointerLeft,
    /// Wheel/scroll gesture; only honored while active.
    Wheel { delta_y: f64 },
    /// Zoom slider moved.
    SetLevel { level: f64 },
}

/// Caller-owned magnifier value: activity, zoom and lens size.
///
/// Every update returns a new value; nothing is shared or mutated behind
/// the caller's back.
///
/// # Example
///
/// ```
/// use vision_sim::{Bounds, LensEvent, Magnifier, MagnifierState, Pointer};
///
/// let bounds = Bounds::new(0.0, 0.0, 100.0, 100.0);
/// let m = Magnifier::default().apply(LensEvent::Toggle);
/// assert!(m.sample(Pointer::new(50.0, 50.0), bounds).is_some());
///
/// let m = m.apply(LensEvent::PointerLeft);
/// assert_eq!(m.state(), MagnifierState::Inactive);
/// assert!(m.sample(Pointer::new(50.0, 50.0), bounds).is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Magnifier {
    state: MagnifierState,
    zoom: ZoomState,
    diameter: f64,
}

impl Magnifier {
    pub fn new(state: MagnifierState, zoom: ZoomState) -> Self {
        Self {
            state,
            zoom,
            diameter: DEFAULT_LENS_DIAMETER,
        }
    }

    /// Override the lens diameter (display pixels). Non-finite or
    /// non-positive values keep the default.
    pub fn with_diameter(mut self, diameter: f64) -> Self {
        if diameter.is_finite() && diameter > 0.0 {
            self.diameter = diameter;
        }
        self
    }

    #[inline]
    pub fn state(&self) -> MagnifierState {
        self.state
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.state == MagnifierState::Active
    }

    #[inline]
    pub fn zoom(&self) -> ZoomState {
        self.zoom
    }

    #[inline]
    pub fn diameter(&self) -> f64 {
        self.diameter
    }

    /// Reduce one event into the next magnifier value.
    pub fn apply(self, event: LensEvent) -> Self {
        match event {
            LensEvent::Toggle => Self {
                state: match self.state {
                    MagnifierState::Inactive => MagnifierState::Active,
                    MagnifierState::Active => MagnifierState::Inactive,
                },
                ..self
            },
            LensEvent::PointerLeft => Self {
                state: MagnifierState::Inactive,
                ..self
            },
            LensEvent::Wheel { delta_y } if self.is_active() => Self {
                zoom: self.zoom.with_wheel(delta_y),
                ..self
            },
            LensEvent::Wheel { .. } => self,
            LensEvent::SetLevel { level } => Self {
                zoom: self.zoom.with_level(level),
                ..self
            },
        }
    }

    /// The lens for the current pointer position, or `None` while inactive.
    pub fn sample(&self, pointer: Pointer, bounds: Bounds) -> Option<LensDescriptor> {
        self.is_active()
            .then(|| sample(pointer, bounds, self.zoom, self.diameter))
    }
}

impl Default for Magnifier {
    fn default() -> Self {
        Self::new(MagnifierState::Inactive, ZoomState::default())
    }
}

use axum::{extract::State, response::Json, Json as JsonExtractor};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use vision_sim::{Bounds, LensDescriptor, LensEvent, Magnifier, MagnifierState, Pointer, ZoomState};

use crate::models::AppConfig;

/// Client-held magnifier state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MagnifierStateDto {
    /// Whether the lens is shown
    #[serde(default)]
    pub active: bool,
    /// Magnification, clamped to [1.5, 5]
    pub level: f64,
}

impl From<Magnifier> for MagnifierStateDto {
    fn from(magnifier: Magnifier) -> Self {
        Self {
            active: magnifier.is_active(),
            level: magnifier.zoom().level(),
        }
    }
}

/// Container rectangle in display pixels
#[derive(Debug, Clone, Copy, Deserialize, ToSchema)]
pub struct BoundsDto {
    #[serde(default)]
    pub left: f64,
    #[serde(default)]
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl From<BoundsDto> for Bounds {
    fn from(b: BoundsDto) -> Self {
        Bounds::new(b.left, b.top, b.width, b.height)
    }
}

/// Interaction applied to the magnifier
#[derive(Debug, Clone, Copy, Deserialize, ToSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MagnifierEvent {
    /// Magnifier button pressed
    Toggle,
    /// Pointer left the image container
    Leave,
    /// Scroll wheel over the image (ignored while inactive)
    Wheel { delta_y: f64 },
    /// Zoom slider moved
    SetLevel { level: f64 },
    /// Pointer moved inside the container
    Move { x: f64, y: f64, bounds: BoundsDto },
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct MagnifierRequest {
    /// Current state; the configured initial state when omitted
    #[serde(default)]
    pub state: Option<MagnifierStateDto>,
    pub event: MagnifierEvent,
}

/// A position as percentages of the container
#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
pub struct PercentPoint {
    pub u: f64,
    pub v: f64,
}

/// A position in display pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
pub struct PixelPoint {
    pub x: f64,
    pub y: f64,
}

/// Geometry for painting the lens
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LensDto {
    /// `background-size` in percent
    pub background_size: f64,
    /// `background-position` in percent
    pub background_position: PercentPoint,
    /// Lens center in percent of the container
    pub center: PercentPoint,
    /// Lens top-left corner relative to the container
    pub origin: PixelPoint,
    /// Lens diameter in display pixels
    pub diameter: f64,
}

impl LensDto {
    fn new(lens: LensDescriptor, bounds: Bounds) -> Self {
        let (x, y) = lens.lens_origin(bounds);
        Self {
            background_size: lens.background_size,
            background_position: PercentPoint {
                u: lens.background_position.0,
                v: lens.background_position.1,
            },
            center: PercentPoint {
                u: lens.center.0,
                v: lens.center.1,
            },
            origin: PixelPoint { x, y },
            diameter: lens.lens_diameter,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MagnifierResponse {
    /// State after the event
    pub state: MagnifierStateDto,
    /// Present only for `move` while active
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lens: Option<LensDto>,
}

/// Build the magnifier a request describes
fn restore(config: &AppConfig, state: Option<MagnifierStateDto>) -> Magnifier {
    let initial = config.magnifier();
    match state {
        Some(dto) => {
            let state = if dto.active {
                MagnifierState::Active
            } else {
                MagnifierState::Inactive
            };
            Magnifier::new(state, ZoomState::new(dto.level)).with_diameter(initial.diameter())
        }
        None => initial,
    }
}

/// Apply one event and sample the lens for pointer moves
pub fn step(magnifier: Magnifier, event: MagnifierEvent) -> MagnifierResponse {
    let lens_event = match event {
        MagnifierEvent::Toggle => Some(LensEvent::Toggle),
        MagnifierEvent::Leave => Some(LensEvent::PointerLeft),
        MagnifierEvent::Wheel { delta_y } => Some(LensEvent::Wheel { delta_y }),
        MagnifierEvent::SetLevel { level } => Some(LensEvent::SetLevel { level }),
        MagnifierEvent::Move { .. } => None,
    };
    let next = lens_event.map_or(magnifier, |e| magnifier.apply(e));

    let lens = match event {
        MagnifierEvent::Move { x, y, bounds } => {
            let bounds = Bounds::from(bounds);
            next.sample(Pointer::new(x, y), bounds)
                .map(|lens| LensDto::new(lens, bounds))
        }
        _ => None,
    };

    MagnifierResponse {
        state: next.into(),
        lens,
    }
}

/// Advance the magnifier lens
///
/// Stateless: the client sends its current state with each event and keeps
/// the returned state.
#[utoipa::path(
    post,
    path = "/api/magnifier",
    request_body = MagnifierRequest,
    responses(
        (status = 200, description = "State after the event", body = MagnifierResponse),
        (status = 422, description = "Malformed event"),
    ),
    tag = "Magnifier"
)]
pub async fn handle_magnifier(
    State(config): State<Arc<AppConfig>>,
    JsonExtractor(request): JsonExtractor<MagnifierRequest>,
) -> Json<MagnifierResponse> {
    let magnifier = restore(&config, request.state);
    let response = step(magnifier, request.event);

    tracing::debug!(
        event = ?request.event,
        active = response.state.active,
        level = response.state.level,
        "Magnifier event"
    );

    Json(response)
}

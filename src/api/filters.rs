use axum::{extract::State, response::Json};
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;
use vision_sim::magnifier::{MAX_ZOOM, MIN_ZOOM, ZOOM_SLIDER_STEP};
use vision_sim::FilterKind;

use crate::models::AppConfig;

/// General guidance shown alongside the filters
pub const ACCESSIBILITY_TIPS: [&str; 5] = [
    "Ensure sufficient color contrast for text readability",
    "Provide alt text for all important images",
    "Use semantic HTML elements for better screen reader support",
    "Make all interactive elements keyboard accessible",
    "Test with different vision conditions using the filters above",
];

/// One selectable vision condition
#[derive(Debug, Serialize, ToSchema)]
pub struct FilterInfo {
    /// Tag accepted by `/api/preview?filter=`
    pub kind: String,
    /// Human-readable label
    pub label: String,
}

impl From<FilterKind> for FilterInfo {
    fn from(kind: FilterKind) -> Self {
        Self {
            kind: kind.as_str().to_string(),
            label: kind.label().to_string(),
        }
    }
}

/// Initial selection and slider ranges for a client
#[derive(Debug, Serialize, ToSchema)]
pub struct SelectionDefaults {
    /// Filter tag applied after an upload
    pub filter: String,
    /// Intensity on the 0-100 slider scale
    pub intensity: f32,
    /// Initial lens magnification
    pub zoom: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
    pub zoom_step: f64,
    /// Lens diameter in display pixels
    pub lens_diameter: f64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct FiltersResponse {
    /// Filters in display order
    pub filters: Vec<FilterInfo>,
    pub defaults: SelectionDefaults,
    /// Accessibility tips, in display order
    pub tips: Vec<String>,
}

/// List the available vision filters
#[utoipa::path(
    get,
    path = "/api/filters",
    responses(
        (status = 200, description = "Available filters and defaults", body = FiltersResponse),
    ),
    tag = "Filters"
)]
pub async fn handle_filters(State(config): State<Arc<AppConfig>>) -> Json<FiltersResponse> {
    let spec = config.default_spec();
    let magnifier = config.magnifier();

    Json(FiltersResponse {
        filters: FilterKind::ALL.into_iter().map(FilterInfo::from).collect(),
        defaults: SelectionDefaults {
            filter: spec.kind().as_str().to_string(),
            intensity: spec.intensity() * 100.0,
            zoom: magnifier.zoom().level(),
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
            zoom_step: ZOOM_SLIDER_STEP,
            lens_diameter: magnifier.diameter(),
        },
        tips: ACCESSIBILITY_TIPS.iter().map(|tip| tip.to_string()).collect(),
    })
}

pub mod filters;
pub mod magnifier;
pub mod preview;

pub use filters::{handle_filters, FilterInfo, FiltersResponse, SelectionDefaults, __path_handle_filters};
pub use magnifier::{
    handle_magnifier, BoundsDto, LensDto, MagnifierEvent, MagnifierRequest, MagnifierResponse,
    MagnifierStateDto, PercentPoint, PixelPoint, __path_handle_magnifier,
};
pub use preview::{
    handle_preview, ErrorResponse, PreviewFormat, PreviewJsonResponse, PreviewQuery,
    __path_handle_preview,
};

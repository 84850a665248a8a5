//! Domain entities - Objects with identity and lifecycle

mod feedback;
mod feedback_token;
mod floor_overlay;
mod search;

pub use feedback::{FeedbackCategory, FeedbackRequest};
pub use feedback_token::{
    DEFAULT_MIN_MATURATION_DELAY, DEFAULT_TOKEN_VALIDITY, FEEDBACK_TOKEN_STORAGE_KEY,
    FeedbackToken,
};
pub use floor_overlay::FloorOverlay;
pub use search::{
    Facet, FacetEntry, FacetKind, HIGHLIGHT_BEGIN, HIGHLIGHT_END, RoomsFacet, SearchEntry,
    SearchQuery, SearchResponse, SearchSection, SitesBuildingsFacet,
};

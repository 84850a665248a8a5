//! Application services - Use case implementations

mod capabilities;
mod facets;
mod feedback_form;
mod feedback_service;
mod floor_control;
mod preferences;
mod search_service;
mod ui_state;

pub use capabilities::{
    Browser, Capabilities, OUTDATED_WARNING_INTERVAL_HOURS, OutdatedBrowserNotice,
    detect_capabilities, should_warn_outdated,
};
pub use facets::{escape_html, extract_facets, highlight, render_highlighted};
pub use feedback_form::FeedbackForm;
pub use feedback_service::{FeedbackConfig, FeedbackError, FeedbackService, TokenState};
pub use floor_control::{
    BUTTON_HEIGHT_PX, CHROME_ALLOWANCE_PX, ControlLayout, FloorButton, FloorChanged, FloorControl,
    LAYOUT_MARGIN_PX,
};
pub use preferences::{
    BicycleType, Language, PedestrianType, PreferencesService, PtwType, ROUTING_PREFERENCES_COOKIE,
    RouteCosting, RoutingPreferences, Theme,
};
pub use search_service::{FacetTitles, SearchService};
pub use ui_state::{EditRequestModal, ErrorSlot, FeedbackModal, MapMode, PageState};

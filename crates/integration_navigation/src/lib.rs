//! Backend API integration for Wayfinder
//!
//! Typed access to the campus navigation backend: search, location details,
//! nearby public transport, the feedback token/submission pair and the
//! room calendar.
//!
//! # Architecture
//!
//! [`NavigationClient`] defines the interface, implemented over HTTP by
//! [`HttpNavigationClient`]. Every non-success status is mapped onto a
//! [`NavigationError`] variant so callers can tell rate limiting, missing
//! configuration and rejected tokens apart.
//!
//! # Example
//!
//! ```rust,ignore
//! use domain::SearchQuery;
//! use integration_navigation::{HttpNavigationClient, NavigationClient, NavigationConfig};
//!
//! let client = HttpNavigationClient::new(&NavigationConfig::default())?;
//! let response = client.search(&SearchQuery::new("mi hs 1")).await?;
//! ```

mod client;
mod config;
mod error;
mod models;

pub use client::{HttpNavigationClient, MAX_CALENDAR_IDS, NavigationClient};
pub use config::NavigationConfig;
pub use error::NavigationError;
pub use models::{
    CalendarEvent, CalendarLocation, CalendarRequest, CalendarResponse, FeedbackSubmitted,
    LocationCoords, LocationDetails, LocationEntry, LocationMaps, MapKind, NearbyResponse,
    OverlayMaps, TokenResponse, TransportStation,
};

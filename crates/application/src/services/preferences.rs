//! User preferences
//!
//! Theme and language live in key-value storage. Routing preferences travel
//! as a cookie so the server side can read them as well.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use cookie::{Cookie, SameSite};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ApplicationError;
use crate::ports::{KeyValueStorePort, StorageKey};

/// Name of the routing preferences cookie
pub const ROUTING_PREFERENCES_COOKIE: &str = "user-routing-preferences";

/// Color scheme
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    #[default]
    System,
}

impl Theme {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
            Self::System => "system",
        }
    }
}

impl FromStr for Theme {
    type Err = ApplicationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            "system" => Ok(Self::System),
            other => Err(ApplicationError::Validation(format!("unknown theme: {other}"))),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// UI language
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    De,
    En,
}

impl Language {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::De => "de",
            Self::En => "en",
        }
    }
}

impl FromStr for Language {
    type Err = ApplicationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "de" => Ok(Self::De),
            "en" => Ok(Self::En),
            other => Err(ApplicationError::Validation(format!(
                "unknown language: {other}"
            ))),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Cost model the router optimizes for
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteCosting {
    #[default]
    Pedestrian,
    Bicycle,
    Motorcycle,
    Car,
    PublicTransit,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PedestrianType {
    #[default]
    Standard,
    Blind,
    Wheelchair,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BicycleType {
    Road,
    #[default]
    Hybrid,
    Cross,
    Mountain,
}

/// Powered two-wheeler type
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PtwType {
    #[default]
    Motorcycle,
    Moped,
}

/// Routing preferences, persisted as a cookie
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoutingPreferences {
    pub route_costing: RouteCosting,
    pub pedestrian_type: PedestrianType,
    pub bicycle_type: BicycleType,
    pub ptw_type: PtwType,
}

fn wire_name<T: Serialize>(value: &T) -> String {
    serde_json::to_value(value)
        .ok()
        .and_then(|v| v.as_str().map(ToString::to_string))
        .unwrap_or_default()
}

fn from_wire_name<T: for<'de> Deserialize<'de>>(raw: &str) -> Option<T> {
    serde_json::from_value(serde_json::Value::String(raw.to_string())).ok()
}

impl RoutingPreferences {
    /// Cookie value, form-encoded (`route_costing=pedestrian&...`)
    #[must_use]
    pub fn to_cookie_value(&self) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .append_pair("route_costing", &wire_name(&self.route_costing))
            .append_pair("pedestrian_type", &wire_name(&self.pedestrian_type))
            .append_pair("bicycle_type", &wire_name(&self.bicycle_type))
            .append_pair("ptw_type", &wire_name(&self.ptw_type))
            .finish()
    }

    /// Parse a cookie value, keeping defaults for missing or unknown fields
    #[must_use]
    pub fn from_cookie_value(value: &str) -> Self {
        let mut prefs = Self::default();
        for (key, raw) in url::form_urlencoded::parse(value.as_bytes()) {
            match key.as_ref() {
                "route_costing" => {
                    prefs.route_costing = from_wire_name(&raw).unwrap_or(prefs.route_costing);
                },
                "pedestrian_type" => {
                    prefs.pedestrian_type = from_wire_name(&raw).unwrap_or(prefs.pedestrian_type);
                },
                "bicycle_type" => {
                    prefs.bicycle_type = from_wire_name(&raw).unwrap_or(prefs.bicycle_type);
                },
                "ptw_type" => {
                    prefs.ptw_type = from_wire_name(&raw).unwrap_or(prefs.ptw_type);
                },
                other => debug!(key = other, "Ignoring unknown routing preference"),
            }
        }
        prefs
    }

    /// `Set-Cookie` value persisting these preferences for a year
    #[must_use]
    pub fn to_cookie(&self) -> Cookie<'static> {
        Cookie::build((ROUTING_PREFERENCES_COOKIE, self.to_cookie_value()))
            .path("/")
            .secure(true)
            .same_site(SameSite::Lax)
            .max_age(cookie::time::Duration::days(365))
            .build()
    }

    /// Read preferences from a `Cookie` request header
    ///
    /// A missing or unparsable cookie yields the defaults.
    #[must_use]
    pub fn from_cookie_header(header: &str) -> Self {
        Cookie::split_parse(header)
            .filter_map(Result::ok)
            .find(|cookie| cookie.name() == ROUTING_PREFERENCES_COOKIE)
            .map_or_else(Self::default, |cookie| {
                Self::from_cookie_value(cookie.value())
            })
    }
}

/// Theme and language backed by key-value storage
pub struct PreferencesService {
    store: Arc<dyn KeyValueStorePort>,
}

impl fmt::Debug for PreferencesService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PreferencesService").finish_non_exhaustive()
    }
}

impl PreferencesService {
    pub fn new(store: Arc<dyn KeyValueStorePort>) -> Self {
        Self { store }
    }

    /// Stored theme, or the default for missing/unknown values
    ///
    /// # Errors
    ///
    /// Returns an error if the storage backend fails.
    pub fn theme(&self) -> Result<Theme, ApplicationError> {
        Ok(self
            .store
            .get(StorageKey::Theme.as_str())?
            .and_then(|raw| raw.parse().ok())
            .unwrap_or_default())
    }

    pub fn set_theme(&self, theme: Theme) -> Result<(), ApplicationError> {
        self.store.set(StorageKey::Theme.as_str(), theme.as_str())
    }

    /// Stored language, or the default for missing/unknown values
    ///
    /// # Errors
    ///
    /// Returns an error if the storage backend fails.
    pub fn language(&self) -> Result<Language, ApplicationError> {
        Ok(self
            .store
            .get(StorageKey::Language.as_str())?
            .and_then(|raw| raw.parse().ok())
            .unwrap_or_default())
    }

    pub fn set_language(&self, language: Language) -> Result<(), ApplicationError> {
        self.store.set(StorageKey::Language.as_str(), language.as_str())
    }
}

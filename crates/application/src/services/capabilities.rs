//! Browser capability detection
//!
//! User-agent parsing is kept to this module; everything else only sees the
//! resulting [`Capabilities`].

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ApplicationError;
use crate::ports::{KeyValueStorePort, StorageKey};

/// How often an outdated browser is nagged at most (hours)
pub const OUTDATED_WARNING_INTERVAL_HOURS: i64 = 24;

/// Browser family as far as support decisions go
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Browser {
    Chrome,
    Edge,
    Firefox,
    Safari,
    Opera,
    SamsungInternet,
    Other,
}

impl Browser {
    /// Oldest major version still considered supported
    #[must_use]
    pub const fn min_supported_major(&self) -> Option<u32> {
        match self {
            Self::Chrome | Self::Edge => Some(109),
            Self::Firefox => Some(115),
            Self::Safari => Some(15),
            Self::Opera => Some(95),
            Self::SamsungInternet => Some(20),
            Self::Other => None,
        }
    }
}

/// What the current browser can do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capabilities {
    pub browser: Browser,
    pub major_version: Option<u32>,
    /// Whether the interactive map can be rendered
    pub webgl: bool,
    pub outdated: bool,
}

// Order matters: Chromium derivatives also announce "Chrome/" and Chrome
// announces "Safari/".
const MARKERS: [(&str, Browser); 9] = [
    ("Edg/", Browser::Edge),
    ("EdgiOS/", Browser::Edge),
    ("OPR/", Browser::Opera),
    ("SamsungBrowser/", Browser::SamsungInternet),
    ("CriOS/", Browser::Chrome),
    ("Chrome/", Browser::Chrome),
    ("FxiOS/", Browser::Firefox),
    ("Firefox/", Browser::Firefox),
    ("Version/", Browser::Safari),
];

fn major_after(user_agent: &str, marker: &str) -> Option<u32> {
    let start = user_agent.find(marker)? + marker.len();
    user_agent[start..]
        .split(|c: char| !c.is_ascii_digit())
        .next()
        .and_then(|digits| digits.parse().ok())
}

fn identify(user_agent: &str) -> (Browser, Option<u32>) {
    for (marker, browser) in MARKERS {
        if !user_agent.contains(marker) {
            continue;
        }
        if browser == Browser::Safari && !user_agent.contains("Safari/") {
            continue;
        }
        return (browser, major_after(user_agent, marker));
    }
    (Browser::Other, None)
}

/// Derive capabilities from a user agent and the WebGL probe result
#[must_use]
pub fn detect_capabilities(user_agent: &str, webgl_available: bool) -> Capabilities {
    let (browser, major_version) = identify(user_agent);
    let outdated = match (browser.min_supported_major(), major_version) {
        (Some(min), Some(major)) => major < min,
        _ => false,
    };
    debug!(?browser, ?major_version, outdated, webgl = webgl_available, "Detected browser");

    Capabilities {
        browser,
        major_version,
        webgl: webgl_available,
        outdated,
    }
}

/// Whether to show the outdated-browser warning now
#[must_use]
pub fn should_warn_outdated(
    capabilities: &Capabilities,
    last_warning: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> bool {
    capabilities.outdated
        && last_warning
            .is_none_or(|last| now - last >= Duration::hours(OUTDATED_WARNING_INTERVAL_HOURS))
}

/// Persists when the outdated-browser warning was last shown
pub struct OutdatedBrowserNotice {
    store: Arc<dyn KeyValueStorePort>,
}

impl std::fmt::Debug for OutdatedBrowserNotice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OutdatedBrowserNotice").finish_non_exhaustive()
    }
}

impl OutdatedBrowserNotice {
    pub fn new(store: Arc<dyn KeyValueStorePort>) -> Self {
        Self { store }
    }

    /// Last time the warning was shown; unreadable values count as never
    ///
    /// # Errors
    ///
    /// Returns an error if the storage backend fails.
    pub fn last_warning(&self) -> Result<Option<DateTime<Utc>>, ApplicationError> {
        Ok(self
            .store
            .get(StorageKey::LastOutdatedBrowserWarning.as_str())?
            .and_then(|raw| raw.trim().parse::<i64>().ok())
            .and_then(DateTime::from_timestamp_millis))
    }

    /// Decide whether to warn at `now`, recording the warning if so
    ///
    /// # Errors
    ///
    /// Returns an error if the storage backend fails.
    pub fn check(
        &self,
        capabilities: &Capabilities,
        now: DateTime<Utc>,
    ) -> Result<bool, ApplicationError> {
        if !should_warn_outdated(capabilities, self.last_warning()?, now) {
            return Ok(false);
        }
        self.store.set(
            StorageKey::LastOutdatedBrowserWarning.as_str(),
            &now.timestamp_millis().to_string(),
        )?;
        Ok(true)
    }
}

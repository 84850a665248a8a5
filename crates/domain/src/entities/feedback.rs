//! Feedback submissions

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// What a feedback message is about
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackCategory {
    #[default]
    General,
    Bug,
    Feature,
    Search,
    Navigation,
    Entry,
    Other,
}

impl FeedbackCategory {
    pub const ALL: [Self; 7] = [
        Self::General,
        Self::Bug,
        Self::Feature,
        Self::Search,
        Self::Navigation,
        Self::Entry,
        Self::Other,
    ];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Bug => "bug",
            Self::Feature => "feature",
            Self::Search => "search",
            Self::Navigation => "navigation",
            Self::Entry => "entry",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for FeedbackCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FeedbackCategory {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| DomainError::ValidationError(format!("unknown category: {s}")))
    }
}

/// Body of `POST /api/feedback/feedback`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackRequest {
    pub token: String,
    pub category: FeedbackCategory,
    pub subject: String,
    pub body: String,
    /// The user accepted that the message is published
    pub privacy_checked: bool,
    /// The user asked for the issue to be deleted once resolved
    pub deletion_requested: bool,
}

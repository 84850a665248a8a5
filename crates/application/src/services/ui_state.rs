//! Page-scoped UI state
//!
//! Everything here lives for one page view and is reset on navigation. The
//! error slot is shared by reference with the fetch cache and the feedback
//! service so both can surface messages to the same place.

use std::sync::Arc;

use domain::{Coordinate, FeedbackCategory};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::services::feedback_form::FeedbackForm;

/// Last user-facing error message
#[derive(Debug, Default)]
pub struct ErrorSlot {
    message: RwLock<Option<String>>,
}

impl ErrorSlot {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Convenience for the common shared form
    #[must_use]
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    pub fn set(&self, message: impl Into<String>) {
        *self.message.write() = Some(message.into());
    }

    pub fn clear(&self) {
        *self.message.write() = None;
    }

    #[must_use]
    pub fn get(&self) -> Option<String> {
        self.message.read().clone()
    }

    #[must_use]
    pub fn is_set(&self) -> bool {
        self.message.read().is_some()
    }
}

/// Which map presentation is active
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MapMode {
    #[default]
    Interactive,
    Roomfinder,
}

impl MapMode {
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Interactive => Self::Roomfinder,
            Self::Roomfinder => Self::Interactive,
        }
    }
}

/// State of the feedback dialog
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedbackModal {
    pub open: bool,
    pub form: FeedbackForm,
    /// Issue URL of the last successful submission
    pub success_url: Option<String>,
}

impl FeedbackModal {
    /// Open the dialog preset to `category`, keeping any draft text
    pub fn open_with(&mut self, category: FeedbackCategory) {
        self.open = true;
        self.form.category = category;
        self.success_url = None;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    /// Record a successful submission and discard the draft
    pub fn submitted(&mut self, issue_url: impl Into<String>) {
        self.success_url = Some(issue_url.into());
        self.form = FeedbackForm::default();
    }
}

/// State of the "suggest an edit" dialog
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EditRequestModal {
    pub open: bool,
    pub location_id: Option<String>,
    pub suggested_coordinate: Option<Coordinate>,
    pub additional_context: String,
}

impl EditRequestModal {
    pub fn open_for(&mut self, location_id: impl Into<String>) {
        self.open = true;
        self.location_id = Some(location_id.into());
    }

    pub fn close(&mut self) {
        *self = Self::default();
    }
}

/// All UI state of the current page
#[derive(Debug)]
pub struct PageState {
    pub map_mode: MapMode,
    pub search_focused: bool,
    pub feedback: FeedbackModal,
    pub edit_request: EditRequestModal,
    errors: Arc<ErrorSlot>,
}

impl PageState {
    #[must_use]
    pub fn new(errors: Arc<ErrorSlot>) -> Self {
        Self {
            map_mode: MapMode::default(),
            search_focused: false,
            feedback: FeedbackModal::default(),
            edit_request: EditRequestModal::default(),
            errors,
        }
    }

    #[must_use]
    pub fn errors(&self) -> &Arc<ErrorSlot> {
        &self.errors
    }

    /// Back to the initial state, as on page navigation
    ///
    /// The error slot stays shared but is cleared.
    pub fn reset(&mut self) {
        self.map_mode = MapMode::default();
        self.search_focused = false;
        self.feedback = FeedbackModal::default();
        self.edit_request = EditRequestModal::default();
        self.errors.clear();
    }
}

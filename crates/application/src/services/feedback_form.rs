//! Feedback form validation

use domain::{FeedbackCategory, FeedbackRequest};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::ApplicationError;

/// User input of the feedback dialog
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct FeedbackForm {
    pub category: FeedbackCategory,
    #[validate(length(min = 3, max = 512, message = "must be between 3 and 512 characters"))]
    pub subject: String,
    #[validate(length(
        min = 10,
        max = 1_048_576,
        message = "must be between 10 and 1048576 characters"
    ))]
    pub body: String,
    #[serde(default)]
    pub privacy_checked: bool,
    #[serde(default)]
    pub deletion_requested: bool,
}

impl FeedbackForm {
    /// Set the category from its wire name
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Validation` for an unknown category.
    pub fn set_category(&mut self, raw: &str) -> Result<(), ApplicationError> {
        self.category = raw
            .parse()
            .map_err(|e: domain::DomainError| ApplicationError::Validation(e.to_string()))?;
        Ok(())
    }

    /// Validate lengths, joining all field errors into one message
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Validation` listing every failing field.
    pub fn check(&self) -> Result<(), ApplicationError> {
        self.validate().map_err(|e| {
            let mut errors: Vec<String> = e
                .field_errors()
                .iter()
                .flat_map(|(field, errors)| {
                    errors.iter().map(move |error| {
                        format!(
                            "{}: {}",
                            field,
                            error
                                .message
                                .as_ref()
                                .map_or_else(|| error.code.to_string(), ToString::to_string)
                        )
                    })
                })
                .collect();
            errors.sort();
            ApplicationError::Validation(errors.join("; "))
        })
    }

    /// Wire request carrying `token`
    #[must_use]
    pub fn to_request(&self, token: &str) -> FeedbackRequest {
        FeedbackRequest {
            token: token.to_string(),
            category: self.category,
            subject: self.subject.clone(),
            body: self.body.clone(),
            privacy_checked: self.privacy_checked,
            deletion_requested: self.deletion_requested,
        }
    }
}

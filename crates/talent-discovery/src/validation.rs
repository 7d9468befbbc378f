//! Field checks for messages, abuse reports, and product feedback.

use serde::{Deserialize, Serialize};

pub const MAX_MESSAGE_CHARS: usize = 2000;
pub const MAX_REPORT_NOTE_CHARS: usize = 500;
pub const MAX_FEEDBACK_CHARS: usize = 2000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportReason {
    Spam,
    Harassment,
    InappropriateContent,
    FakeProfile,
    Scam,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackCategory {
    Bug,
    FeatureRequest,
    Usability,
    General,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Message cannot be empty")]
    EmptyMessage,
    #[error("Message cannot exceed 2000 characters")]
    MessageTooLong,
    #[error("Please select a reason for this report")]
    MissingReportReason,
    #[error("Please describe the issue when selecting \"Other\"")]
    MissingReportNote,
    #[error("Report details cannot exceed 500 characters")]
    ReportNoteTooLong,
    #[error("Please select a feedback category")]
    MissingFeedbackCategory,
    #[error("Feedback message cannot be empty")]
    EmptyFeedback,
    #[error("Feedback cannot exceed 2000 characters")]
    FeedbackTooLong,
}

/// Serializable `{valid, error?}` view of a validation result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationOutcome {
    pub valid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<Result<(), ValidationError>> for ValidationOutcome {
    fn from(result: Result<(), ValidationError>) -> Self {
        match result {
            Ok(()) => Self {
                valid: true,
                error: None,
            },
            Err(error) => Self {
                valid: false,
                error: Some(error.to_string()),
            },
        }
    }
}

pub fn validate_message(content: &str) -> Result<(), ValidationError> {
    if content.trim().is_empty() {
        return Err(ValidationError::EmptyMessage);
    }
    if content.chars().count() > MAX_MESSAGE_CHARS {
        return Err(ValidationError::MessageTooLong);
    }
    Ok(())
}

pub fn validate_report(
    reason: Option<ReportReason>,
    note: Option<&str>,
) -> Result<(), ValidationError> {
    let reason = reason.ok_or(ValidationError::MissingReportReason)?;
    let note = note.unwrap_or_default();

    if reason == ReportReason::Other && note.trim().is_empty() {
        return Err(ValidationError::MissingReportNote);
    }
    if note.chars().count() > MAX_REPORT_NOTE_CHARS {
        return Err(ValidationError::ReportNoteTooLong);
    }
    Ok(())
}

pub fn validate_feedback(
    category: Option<FeedbackCategory>,
    message: &str,
) -> Result<(), ValidationError> {
    if category.is_none() {
        return Err(ValidationError::MissingFeedbackCategory);
    }
    if message.trim().is_empty() {
        return Err(ValidationError::EmptyFeedback);
    }
    if message.chars().count() > MAX_FEEDBACK_CHARS {
        return Err(ValidationError::FeedbackTooLong);
    }
    Ok(())
}

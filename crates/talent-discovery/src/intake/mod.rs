//! Admission checks for user submissions: field validation, then rate limiting.
//!
//! Delivery and storage of accepted submissions belong to the surrounding application.

pub mod router;
pub mod service;


pub use router::intake_router;
pub use service::{
    FeedbackSubmission, IntakeError, IntakeService, InterviewRequestSubmission,
    MessageSubmission, ReportSubmission,
};

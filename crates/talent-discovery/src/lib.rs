//! Core of a CV-first talent discovery platform.
//!
//! Jobseekers publish structured CVs, employers search and save them. This crate holds the
//! business rules that sit between the web layer and persistence: the discoverability gate,
//! search ranking, the CV draft/active state machine with snapshotting, and intake checks
//! for messages, interview requests, reports, and feedback.

pub mod analytics;
pub mod clock;
pub mod config;
pub mod cv;
pub mod error;
pub mod intake;
pub mod memory;
pub mod profiles;
pub mod rate_limit;
pub mod telemetry;
pub mod validation;

pub use analytics::{AnalyticsEvent, AnalyticsEventKind, AnalyticsSink, RingBufferAnalytics};
pub use clock::{Clock, FixedClock, SystemClock};
pub use cv::{
    CvContent, CvId, CvServiceError, CvSnapshot, CvState, CvStateInfo, CvStateService, EmployerId,
};
pub use error::{AppError, RepositoryError};
pub use profiles::{
    check_profile_completion, explain_ranking, explain_visibility, search_and_rank_at,
    search_and_rank_profiles, CompletionStatus, DiscoveryService, JobseekerProfile, ProfileId,
    RankedProfile, SearchQuery,
};
pub use validation::{
    validate_feedback, validate_message, validate_report, FeedbackCategory, ReportReason,
    ValidationError, ValidationOutcome,
};

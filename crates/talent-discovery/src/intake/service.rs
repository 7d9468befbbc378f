use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::analytics::{AnalyticsEvent, AnalyticsEventKind, AnalyticsSink};
use crate::clock::{Clock, SystemClock};
use crate::rate_limit::{RateLimitDecision, RateLimitPolicy, RateLimitedAction, RateLimiter};
use crate::validation::{
    validate_feedback, validate_message, validate_report, FeedbackCategory, ReportReason,
    ValidationError,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageSubmission {
    pub sender_id: String,
    pub recipient_id: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterviewRequestSubmission {
    pub employer_id: String,
    pub cv_id: String,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSubmission {
    pub reporter_id: String,
    pub subject_id: String,
    #[serde(default)]
    pub reason: Option<ReportReason>,
    #[serde(default)]
    pub note: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackSubmission {
    pub user_id: String,
    #[serde(default)]
    pub category: Option<FeedbackCategory>,
    #[serde(default)]
    pub message: String,
}

/// Gate run before a message, interview request, report, or feedback item is accepted.
pub struct IntakeService<A> {
    limiter: RateLimiter,
    analytics: Arc<A>,
    clock: Arc<dyn Clock>,
}

impl<A> IntakeService<A>
where
    A: AnalyticsSink + 'static,
{
    pub fn new(policy: RateLimitPolicy, analytics: Arc<A>) -> Self {
        Self::with_clock(policy, analytics, Arc::new(SystemClock))
    }

    pub fn with_clock(policy: RateLimitPolicy, analytics: Arc<A>, clock: Arc<dyn Clock>) -> Self {
        Self {
            limiter: RateLimiter::new(policy),
            analytics,
            clock,
        }
    }

    pub fn admit_message(
        &self,
        submission: &MessageSubmission,
    ) -> Result<RateLimitDecision, IntakeError> {
        validate_message(&submission.content)?;
        self.admit(
            &submission.sender_id,
            RateLimitedAction::SendMessage,
            AnalyticsEventKind::MessageSent,
            Some(&submission.recipient_id),
        )
    }

    /// The optional note is held to the message rules when present.
    pub fn admit_interview_request(
        &self,
        submission: &InterviewRequestSubmission,
    ) -> Result<RateLimitDecision, IntakeError> {
        if let Some(message) = submission.message.as_deref() {
            validate_message(message)?;
        }
        self.admit(
            &submission.employer_id,
            RateLimitedAction::RequestInterview,
            AnalyticsEventKind::InterviewRequested,
            Some(&submission.cv_id),
        )
    }

    pub fn admit_report(
        &self,
        submission: &ReportSubmission,
    ) -> Result<RateLimitDecision, IntakeError> {
        validate_report(submission.reason, submission.note.as_deref())?;
        self.admit(
            &submission.reporter_id,
            RateLimitedAction::FileReport,
            AnalyticsEventKind::ReportFiled,
            Some(&submission.subject_id),
        )
    }

    pub fn admit_feedback(
        &self,
        submission: &FeedbackSubmission,
    ) -> Result<RateLimitDecision, IntakeError> {
        validate_feedback(submission.category, &submission.message)?;
        self.admit(
            &submission.user_id,
            RateLimitedAction::SubmitFeedback,
            AnalyticsEventKind::FeedbackSubmitted,
            None,
        )
    }

    fn admit(
        &self,
        actor_id: &str,
        action: RateLimitedAction,
        kind: AnalyticsEventKind,
        subject_id: Option<&str>,
    ) -> Result<RateLimitDecision, IntakeError> {
        let now = self.clock.now();
        let decision = self.limiter.check_and_record(actor_id, action, now);
        if !decision.allowed {
            return Err(IntakeError::RateLimited {
                action,
                retry_after_seconds: decision.retry_after_seconds.unwrap_or(1),
            });
        }

        let mut event = AnalyticsEvent::new(kind, now).actor(actor_id);
        if let Some(subject_id) = subject_id {
            event = event.subject(subject_id);
        }
        if let Err(error) = self.analytics.record(event) {
            warn!(%error, kind = kind.label(), "dropping intake analytics event");
        }

        Ok(decision)
    }
}

/// Reasons a submission is turned away.
#[derive(Debug, thiserror::Error)]
pub enum IntakeError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error("too many {} attempts; retry in {retry_after_seconds}s", .action.label())]
    RateLimited {
        action: RateLimitedAction,
        retry_after_seconds: i64,
    },
}

impl IntakeError {
    pub fn retry_after_seconds(&self) -> Option<i64> {
        match self {
            IntakeError::RateLimited {
                retry_after_seconds,
                ..
            } => Some(*retry_after_seconds),
            IntakeError::Invalid(_) => None,
        }
    }
}

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use serde_json::json;

use super::service::{
    FeedbackSubmission, IntakeError, IntakeService, InterviewRequestSubmission,
    MessageSubmission, ReportSubmission,
};
use crate::analytics::AnalyticsSink;
use crate::rate_limit::RateLimitDecision;
use crate::validation::ValidationOutcome;

/// Router exposing the admission checks for user submissions.
pub fn intake_router<A>(service: Arc<IntakeService<A>>) -> Router
where
    A: AnalyticsSink + 'static,
{
    Router::new()
        .route("/api/v1/intake/messages", post(message_handler::<A>))
        .route("/api/v1/intake/interviews", post(interview_handler::<A>))
        .route("/api/v1/intake/reports", post(report_handler::<A>))
        .route("/api/v1/intake/feedback", post(feedback_handler::<A>))
        .with_state(service)
}

pub(crate) async fn message_handler<A>(
    State(service): State<Arc<IntakeService<A>>>,
    axum::Json(submission): axum::Json<MessageSubmission>,
) -> Response
where
    A: AnalyticsSink + 'static,
{
    respond(service.admit_message(&submission))
}

pub(crate) async fn interview_handler<A>(
    State(service): State<Arc<IntakeService<A>>>,
    axum::Json(submission): axum::Json<InterviewRequestSubmission>,
) -> Response
where
    A: AnalyticsSink + 'static,
{
    respond(service.admit_interview_request(&submission))
}

pub(crate) async fn report_handler<A>(
    State(service): State<Arc<IntakeService<A>>>,
    axum::Json(submission): axum::Json<ReportSubmission>,
) -> Response
where
    A: AnalyticsSink + 'static,
{
    respond(service.admit_report(&submission))
}

pub(crate) async fn feedback_handler<A>(
    State(service): State<Arc<IntakeService<A>>>,
    axum::Json(submission): axum::Json<FeedbackSubmission>,
) -> Response
where
    A: AnalyticsSink + 'static,
{
    respond(service.admit_feedback(&submission))
}

fn respond(result: Result<RateLimitDecision, IntakeError>) -> Response {
    match result {
        Ok(decision) => {
            let payload = json!({
                "valid": true,
                "remaining": decision.remaining,
            });
            (StatusCode::ACCEPTED, axum::Json(payload)).into_response()
        }
        Err(IntakeError::Invalid(error)) => {
            let outcome = ValidationOutcome::from(Err(error));
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(outcome)).into_response()
        }
        Err(error) => {
            let payload = json!({
                "error": error.to_string(),
                "retry_after_seconds": error.retry_after_seconds(),
            });
            (StatusCode::TOO_MANY_REQUESTS, axum::Json(payload)).into_response()
        }
    }
}

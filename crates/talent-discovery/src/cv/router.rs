use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{CvContent, CvId, EmployerId};
use super::repository::{CvStateRepository, SnapshotRepository};
use super::service::{CvServiceError, CvStateService};
use crate::analytics::AnalyticsSink;

#[derive(Debug, Deserialize)]
pub struct VisibilityRequest {
    pub is_visible: bool,
}

#[derive(Debug, Deserialize)]
pub struct SnapshotRequest {
    pub employer_id: String,
    #[serde(default)]
    pub content: CvContent,
}

/// Router exposing CV visibility, the edit lock, and employer snapshots.
pub fn cv_router<S, N, A>(service: Arc<CvStateService<S, N, A>>) -> Router
where
    S: CvStateRepository + 'static,
    N: SnapshotRepository + 'static,
    A: AnalyticsSink + 'static,
{
    Router::new()
        .route(
            "/api/v1/cvs/:cv_id/visibility",
            put(visibility_handler::<S, N, A>),
        )
        .route("/api/v1/cvs/:cv_id/lock", get(lock_handler::<S, N, A>))
        .route("/api/v1/cvs/:cv_id/touch", post(touch_handler::<S, N, A>))
        .route(
            "/api/v1/cvs/:cv_id/snapshots",
            post(snapshot_handler::<S, N, A>),
        )
        .route(
            "/api/v1/cvs/:cv_id/snapshots/:employer_id",
            get(list_snapshots_handler::<S, N, A>),
        )
        .with_state(service)
}

pub(crate) async fn visibility_handler<S, N, A>(
    State(service): State<Arc<CvStateService<S, N, A>>>,
    Path(cv_id): Path<String>,
    axum::Json(request): axum::Json<VisibilityRequest>,
) -> Response
where
    S: CvStateRepository + 'static,
    N: SnapshotRepository + 'static,
    A: AnalyticsSink + 'static,
{
    match service.set_visibility(&CvId(cv_id), request.is_visible) {
        Ok(state) => (StatusCode::OK, axum::Json(state)).into_response(),
        Err(error) => internal_error(error),
    }
}

pub(crate) async fn lock_handler<S, N, A>(
    State(service): State<Arc<CvStateService<S, N, A>>>,
    Path(cv_id): Path<String>,
) -> Response
where
    S: CvStateRepository + 'static,
    N: SnapshotRepository + 'static,
    A: AnalyticsSink + 'static,
{
    let id = CvId(cv_id);
    match service.is_edit_locked(&id) {
        Ok(locked) => {
            let payload = json!({
                "cv_id": id.0,
                "edit_locked": locked,
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(error) => internal_error(error),
    }
}

pub(crate) async fn touch_handler<S, N, A>(
    State(service): State<Arc<CvStateService<S, N, A>>>,
    Path(cv_id): Path<String>,
) -> Response
where
    S: CvStateRepository + 'static,
    N: SnapshotRepository + 'static,
    A: AnalyticsSink + 'static,
{
    let id = CvId(cv_id);
    match service.update_timestamp(&id) {
        Ok(true) => {
            let payload = json!({
                "cv_id": id.0,
                "updated": true,
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Ok(false) => {
            let payload = json!({
                "cv_id": id.0,
                "updated": false,
                "error": "cv is visible to employers; hide it before editing",
            });
            (StatusCode::LOCKED, axum::Json(payload)).into_response()
        }
        Err(error) => internal_error(error),
    }
}

pub(crate) async fn snapshot_handler<S, N, A>(
    State(service): State<Arc<CvStateService<S, N, A>>>,
    Path(cv_id): Path<String>,
    axum::Json(request): axum::Json<SnapshotRequest>,
) -> Response
where
    S: CvStateRepository + 'static,
    N: SnapshotRepository + 'static,
    A: AnalyticsSink + 'static,
{
    let employer_id = EmployerId(request.employer_id);
    match service.create_snapshot(&CvId(cv_id), &employer_id, request.content) {
        Ok(snapshot) => (StatusCode::CREATED, axum::Json(snapshot)).into_response(),
        Err(error) => internal_error(error),
    }
}

pub(crate) async fn list_snapshots_handler<S, N, A>(
    State(service): State<Arc<CvStateService<S, N, A>>>,
    Path((cv_id, employer_id)): Path<(String, String)>,
) -> Response
where
    S: CvStateRepository + 'static,
    N: SnapshotRepository + 'static,
    A: AnalyticsSink + 'static,
{
    match service.snapshots_for(&CvId(cv_id), &EmployerId(employer_id)) {
        Ok(snapshots) => (StatusCode::OK, axum::Json(snapshots)).into_response(),
        Err(error) => internal_error(error),
    }
}

fn internal_error(error: CvServiceError) -> Response {
    let payload = json!({
        "error": error.to_string(),
    });
    (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
}

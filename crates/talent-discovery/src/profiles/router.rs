use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{ProfileId, SearchQuery};
use super::repository::ProfileRepository;
use super::service::{DiscoveryService, DiscoveryServiceError};
use crate::analytics::AnalyticsSink;
use crate::error::RepositoryError;

/// Searches without a `searcher_id` share one rate-limit bucket.
const ANONYMOUS_SEARCHER: &str = "anonymous";

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub searcher_id: Option<String>,
    #[serde(flatten)]
    pub query: SearchQuery,
}

/// Router exposing employer search and the profile completion check.
pub fn discovery_router<P, A>(service: Arc<DiscoveryService<P, A>>) -> Router
where
    P: ProfileRepository + 'static,
    A: AnalyticsSink + 'static,
{
    Router::new()
        .route("/api/v1/search", post(search_handler::<P, A>))
        .route(
            "/api/v1/profiles/:profile_id/completion",
            get(completion_handler::<P, A>),
        )
        .with_state(service)
}

pub(crate) async fn search_handler<P, A>(
    State(service): State<Arc<DiscoveryService<P, A>>>,
    axum::Json(request): axum::Json<SearchRequest>,
) -> Response
where
    P: ProfileRepository + 'static,
    A: AnalyticsSink + 'static,
{
    let searcher_id = request
        .searcher_id
        .as_deref()
        .filter(|id| !id.trim().is_empty())
        .unwrap_or(ANONYMOUS_SEARCHER);

    match service.search_for(searcher_id, &request.query) {
        Ok(results) => {
            let payload = json!({
                "total": results.len(),
                "results": results,
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(DiscoveryServiceError::RateLimited {
            retry_after_seconds,
        }) => {
            let payload = json!({
                "error": "too many searches",
                "retry_after_seconds": retry_after_seconds,
            });
            (StatusCode::TOO_MANY_REQUESTS, axum::Json(payload)).into_response()
        }
        Err(error) => internal_error(error),
    }
}

pub(crate) async fn completion_handler<P, A>(
    State(service): State<Arc<DiscoveryService<P, A>>>,
    Path(profile_id): Path<String>,
) -> Response
where
    P: ProfileRepository + 'static,
    A: AnalyticsSink + 'static,
{
    let id = ProfileId(profile_id);
    match service.completion(&id) {
        Ok(view) => (StatusCode::OK, axum::Json(view)).into_response(),
        Err(DiscoveryServiceError::Repository(RepositoryError::NotFound)) => {
            let payload = json!({
                "error": "profile not found",
                "profile_id": id.0,
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(error) => internal_error(error),
    }
}

fn internal_error(error: DiscoveryServiceError) -> Response {
    let payload = json!({
        "error": error.to_string(),
    });
    (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
}

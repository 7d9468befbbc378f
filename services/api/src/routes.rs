use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Extension, Json};
use serde_json::json;
use std::collections::BTreeMap;
use std::sync::Arc;
use talent_discovery::cv::{cv_router, CvStateRepository, CvStateService, SnapshotRepository};
use talent_discovery::intake::{intake_router, IntakeService};
use talent_discovery::profiles::{discovery_router, DiscoveryService, ProfileRepository};
use talent_discovery::AnalyticsSink;

const RECENT_EVENT_LIMIT: usize = 20;

pub(crate) fn with_platform_routes<P, S, N, A>(
    discovery: Arc<DiscoveryService<P, A>>,
    cvs: Arc<CvStateService<S, N, A>>,
    intake: Arc<IntakeService<A>>,
) -> axum::Router
where
    P: ProfileRepository + 'static,
    S: CvStateRepository + 'static,
    N: SnapshotRepository + 'static,
    A: AnalyticsSink + 'static,
{
    discovery_router(discovery)
        .merge(cv_router(cvs))
        .merge(intake_router(intake))
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/analytics/summary", get(analytics_summary_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn analytics_summary_endpoint(
    Extension(state): Extension<AppState>,
) -> Json<serde_json::Value> {
    let counts: BTreeMap<&'static str, usize> = state
        .analytics
        .counts_by_kind()
        .into_iter()
        .map(|(kind, count)| (kind.label(), count))
        .collect();

    Json(json!({
        "total": state.analytics.len(),
        "capacity": state.analytics.capacity(),
        "counts": counts,
        "recent": state.analytics.recent(RECENT_EVENT_LIMIT),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use std::sync::atomic::AtomicBool;
    use talent_discovery::memory::{
        InMemoryCvStateRepository, InMemoryProfileRepository, InMemorySnapshotRepository,
    };
    use talent_discovery::rate_limit::RateLimitPolicy;
    use talent_discovery::{JobseekerProfile, RingBufferAnalytics};
    use tower::ServiceExt;

    fn discoverable(id: &str, role: &str) -> JobseekerProfile {
        let mut profile = JobseekerProfile::new(id);
        profile.full_name = Some(format!("Candidate {id}"));
        profile.city = Some("Lagos".to_string());
        profile.preferred_role = Some(role.to_string());
        profile.bio = Some(format!("Experienced {role}"));
        profile.skills = vec![role.to_string()];
        profile.open_to_discovery = true;
        profile
    }

    fn app(ready: bool) -> (axum::Router, Arc<RingBufferAnalytics>) {
        let analytics = Arc::new(RingBufferAnalytics::with_capacity(16));
        let profiles = Arc::new(InMemoryProfileRepository::with_profiles(vec![
            discoverable("eng-1", "Engineer"),
            discoverable("des-1", "Designer"),
        ]));
        let discovery = Arc::new(DiscoveryService::new(profiles, analytics.clone()));
        let cvs = Arc::new(CvStateService::new(
            Arc::new(InMemoryCvStateRepository::default()),
            Arc::new(InMemorySnapshotRepository::default()),
            analytics.clone(),
        ));
        let intake = Arc::new(IntakeService::new(
            RateLimitPolicy::default(),
            analytics.clone(),
        ));

        let state = AppState {
            readiness: Arc::new(AtomicBool::new(ready)),
            metrics: Arc::new(PrometheusBuilder::new().build_recorder().handle()),
            analytics: analytics.clone(),
        };

        let router = with_platform_routes(discovery, cvs, intake).layer(Extension(state));
        (router, analytics)
    }

    async fn json_body(response: axum::response::Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body reads");
        serde_json::from_slice(&bytes).expect("body is json")
    }

    #[tokio::test]
    async fn readiness_reflects_startup_flag() {
        let (router, _) = app(false);
        let response = router
            .oneshot(Request::get("/ready").body(Body::empty()).expect("request"))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        let (router, _) = app(true);
        let response = router
            .oneshot(Request::get("/ready").body(Body::empty()).expect("request"))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["status"], "ready");
    }

    #[tokio::test]
    async fn health_and_metrics_respond() {
        let (router, _) = app(true);
        let response = router
            .clone()
            .oneshot(Request::get("/health").body(Body::empty()).expect("request"))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);

        let response = router
            .oneshot(Request::get("/metrics").body(Body::empty()).expect("request"))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/plain; version=0.0.4"
        );
    }

    #[tokio::test]
    async fn search_route_is_mounted_and_feeds_analytics_summary() {
        let (router, analytics) = app(true);
        let request = Request::post("/api/v1/search")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"keywords": "engineer"}"#))
            .expect("request");
        let response = router.clone().oneshot(request).await.expect("response");
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["total"], 2);
        assert_eq!(body["results"][0]["profile"]["id"], "eng-1");
        assert_eq!(analytics.len(), 1);

        let response = router
            .oneshot(
                Request::get("/api/v1/analytics/summary")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");
        let summary = json_body(response).await;
        assert_eq!(summary["total"], 1);
        assert_eq!(summary["capacity"], 16);
        assert_eq!(summary["counts"]["search_performed"], 1);
        assert_eq!(summary["recent"][0]["kind"], "search_performed");
    }

    #[tokio::test]
    async fn cv_and_intake_routes_are_mounted() {
        let (router, _) = app(true);
        let response = router
            .clone()
            .oneshot(
                Request::get("/api/v1/cvs/cv-9/lock")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);

        let request = Request::post("/api/v1/intake/messages")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(
                r#"{"sender_id": "emp-1", "recipient_id": "eng-1", "content": "   "}"#,
            ))
            .expect("request");
        let response = router.oneshot(request).await.expect("response");
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}

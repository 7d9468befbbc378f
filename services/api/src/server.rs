use crate::cli::ServeArgs;
use crate::infra::{read_profiles, AppState};
use crate::routes::with_platform_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use talent_discovery::config::AppConfig;
use talent_discovery::cv::CvStateService;
use talent_discovery::error::AppError;
use talent_discovery::intake::IntakeService;
use talent_discovery::memory::{
    InMemoryCvStateRepository, InMemoryProfileRepository, InMemorySnapshotRepository,
};
use talent_discovery::profiles::DiscoveryService;
use talent_discovery::rate_limit::RateLimitPolicy;
use talent_discovery::{telemetry, RingBufferAnalytics};
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let analytics = Arc::new(RingBufferAnalytics::with_capacity(
        config.analytics.capacity,
    ));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        analytics: analytics.clone(),
    };

    let seeded = match args.seed_profiles.take() {
        Some(path) => read_profiles(&path)?,
        None => Vec::new(),
    };
    info!(profiles = seeded.len(), "profile directory seeded");

    let profiles = Arc::new(InMemoryProfileRepository::with_profiles(seeded));
    let discovery = Arc::new(DiscoveryService::new(profiles, analytics.clone()));
    let cvs = Arc::new(CvStateService::new(
        Arc::new(InMemoryCvStateRepository::default()),
        Arc::new(InMemorySnapshotRepository::default()),
        analytics.clone(),
    ));
    let intake = Arc::new(IntakeService::new(RateLimitPolicy::default(), analytics));

    let app = with_platform_routes(discovery, cvs, intake)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "talent discovery api ready");

    axum::serve(listener, app).await?;
    Ok(())
}

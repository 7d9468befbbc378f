use metrics_exporter_prometheus::PrometheusHandle;
use std::fs;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use talent_discovery::error::AppError;
use talent_discovery::{JobseekerProfile, RingBufferAnalytics};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) analytics: Arc<RingBufferAnalytics>,
}

/// Accepts either a JSON array of profiles or a single profile object.
pub(crate) fn parse_profiles(raw: &str) -> Result<Vec<JobseekerProfile>, AppError> {
    let value: serde_json::Value = serde_json::from_str(raw)?;
    let profiles: Vec<JobseekerProfile> = if value.is_array() {
        serde_json::from_value(value)?
    } else {
        vec![serde_json::from_value(value)?]
    };
    Ok(profiles)
}

pub(crate) fn read_profiles(path: &Path) -> Result<Vec<JobseekerProfile>, AppError> {
    let raw = fs::read_to_string(path)?;
    parse_profiles(&raw)
}

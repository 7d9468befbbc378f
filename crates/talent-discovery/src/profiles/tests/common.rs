use std::sync::Arc;

use axum::response::Response;
use chrono::{DateTime, Duration, TimeZone, Utc};
use serde_json::Value;

use crate::analytics::RingBufferAnalytics;
use crate::clock::FixedClock;
use crate::error::RepositoryError;
use crate::memory::InMemoryProfileRepository;
use crate::profiles::domain::{CvSections, JobseekerProfile, ProfileId};
use crate::profiles::repository::ProfileRepository;
use crate::profiles::DiscoveryService;

pub(super) fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 17, 12, 0, 0).unwrap()
}

pub(super) fn days_ago(days: i64) -> Option<DateTime<Utc>> {
    Some(now() - Duration::days(days))
}

/// Complete, opted-in profile updated today.
pub(super) fn complete_profile(id: &str) -> JobseekerProfile {
    JobseekerProfile {
        id: ProfileId(id.to_string()),
        full_name: Some("Ada Okafor".to_string()),
        city: Some("Lagos".to_string()),
        preferred_role: Some("Backend Engineer".to_string()),
        bio: Some("Builds payment APIs in Rust and Go.".to_string()),
        skills: vec!["Rust".to_string(), "PostgreSQL".to_string()],
        last_updated: days_ago(0),
        open_to_discovery: true,
        sections: CvSections {
            experience: true,
            education: true,
            certifications: false,
            projects: true,
            publications: false,
            languages: true,
        },
    }
}

/// Only city, role, and skills filled in; opted in and fresh.
pub(super) fn sparse_profile(id: &str, role: &str, skill: &str) -> JobseekerProfile {
    let mut profile = JobseekerProfile::new(id);
    profile.city = Some("Lagos".to_string());
    profile.preferred_role = Some(role.to_string());
    profile.skills = vec![skill.to_string()];
    profile.open_to_discovery = true;
    profile.last_updated = days_ago(0);
    profile
}

pub(super) fn build_service(
    profiles: Vec<JobseekerProfile>,
) -> (
    DiscoveryService<InMemoryProfileRepository, RingBufferAnalytics>,
    Arc<RingBufferAnalytics>,
) {
    let repository = Arc::new(InMemoryProfileRepository::with_profiles(profiles));
    let analytics = Arc::new(RingBufferAnalytics::with_capacity(16));
    let service =
        DiscoveryService::with_clock(repository, analytics.clone(), Arc::new(FixedClock(now())));
    (service, analytics)
}

pub(super) struct UnavailableProfiles;

impl ProfileRepository for UnavailableProfiles {
    fn fetch(&self, _id: &ProfileId) -> Result<Option<JobseekerProfile>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn list(&self) -> Result<Vec<JobseekerProfile>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

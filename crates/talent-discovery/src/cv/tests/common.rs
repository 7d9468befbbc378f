use std::collections::BTreeMap;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::{DateTime, Duration, TimeZone, Utc};
use serde_json::Value;

use crate::analytics::RingBufferAnalytics;
use crate::clock::Clock;
use crate::cv::domain::{CvContent, CvId, CvSection, CvStateInfo, EmployerId};
use crate::cv::repository::{CvStateRepository, SnapshotRepository};
use crate::cv::CvStateService;
use crate::error::RepositoryError;
use crate::memory::{InMemoryCvStateRepository, InMemorySnapshotRepository};

pub(super) type MemoryCvService =
    CvStateService<InMemoryCvStateRepository, InMemorySnapshotRepository, RingBufferAnalytics>;

pub(super) fn start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 1, 9, 0, 0).unwrap()
}

/// Manually advanced clock so tests can observe timestamp changes.
pub(super) struct SteppingClock {
    now: Mutex<DateTime<Utc>>,
}

impl SteppingClock {
    pub(super) fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }

    pub(super) fn advance(&self, by: Duration) {
        let mut guard = self.now.lock().expect("clock mutex poisoned");
        *guard += by;
    }
}

impl Clock for SteppingClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().expect("clock mutex poisoned")
    }
}

pub(super) fn build_service() -> (
    MemoryCvService,
    Arc<SteppingClock>,
    Arc<RingBufferAnalytics>,
) {
    let clock = Arc::new(SteppingClock::new(start()));
    let analytics = Arc::new(RingBufferAnalytics::with_capacity(16));
    let service = CvStateService::with_clock(
        Arc::new(InMemoryCvStateRepository::default()),
        Arc::new(InMemorySnapshotRepository::default()),
        analytics.clone(),
        clock.clone(),
    );
    (service, clock, analytics)
}

pub(super) fn cv(id: &str) -> CvId {
    CvId(id.to_string())
}

pub(super) fn employer(id: &str) -> EmployerId {
    EmployerId(id.to_string())
}

pub(super) fn content(role: &str) -> CvContent {
    let mut sections = BTreeMap::new();
    sections.insert(
        CvSection::Experience,
        vec!["Payments platform, 2021-2025".to_string()],
    );
    sections.insert(CvSection::Languages, vec!["English".to_string()]);
    CvContent {
        full_name: Some("Ada Okafor".to_string()),
        city: Some("Lagos".to_string()),
        preferred_role: Some(role.to_string()),
        bio: Some("Builds payment APIs.".to_string()),
        skills: vec!["Rust".to_string()],
        sections,
    }
}

pub(super) struct UnavailableStates;

impl CvStateRepository for UnavailableStates {
    fn fetch(&self, _cv_id: &CvId) -> Result<Option<CvStateInfo>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update<F>(&self, _cv_id: &CvId, _apply: F) -> Result<CvStateInfo, RepositoryError>
    where
        F: FnOnce(Option<CvStateInfo>) -> CvStateInfo,
    {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

/// Holds the first `update` inside the store until the test releases it.
pub(super) struct PausingStates {
    inner: InMemoryCvStateRepository,
    entered: Mutex<Option<Sender<()>>>,
    resume: Mutex<Option<Receiver<()>>>,
}

impl PausingStates {
    /// Returns the repository, a receiver signalled once the first update is held,
    /// and the sender that lets it continue.
    pub(super) fn new() -> (Self, Receiver<()>, Sender<()>) {
        let (entered_tx, entered_rx) = mpsc::channel();
        let (resume_tx, resume_rx) = mpsc::channel();
        let states = Self {
            inner: InMemoryCvStateRepository::default(),
            entered: Mutex::new(Some(entered_tx)),
            resume: Mutex::new(Some(resume_rx)),
        };
        (states, entered_rx, resume_tx)
    }
}

impl CvStateRepository for PausingStates {
    fn fetch(&self, cv_id: &CvId) -> Result<Option<CvStateInfo>, RepositoryError> {
        self.inner.fetch(cv_id)
    }

    fn update<F>(&self, cv_id: &CvId, apply: F) -> Result<CvStateInfo, RepositoryError>
    where
        F: FnOnce(Option<CvStateInfo>) -> CvStateInfo,
    {
        let entered = self.entered.lock().expect("pause mutex poisoned").take();
        let resume = self.resume.lock().expect("pause mutex poisoned").take();
        self.inner.update(cv_id, move |current| {
            if let (Some(entered), Some(resume)) = (entered, resume) {
                entered.send(()).expect("test is waiting");
                resume.recv().expect("test releases the update");
            }
            apply(current)
        })
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{info, warn};

use super::domain::{CvContent, CvId, CvSnapshot, CvStateInfo, EmployerId};
use super::repository::{CvStateRepository, SnapshotRepository};
use crate::analytics::{AnalyticsEvent, AnalyticsEventKind, AnalyticsSink};
use crate::clock::{Clock, SystemClock};
use crate::error::RepositoryError;

/// Owns the draft/active transitions, the edit lock, and employer snapshots.
pub struct CvStateService<S, N, A> {
    states: Arc<S>,
    snapshots: Arc<N>,
    analytics: Arc<A>,
    clock: Arc<dyn Clock>,
}

impl<S, N, A> CvStateService<S, N, A>
where
    S: CvStateRepository + 'static,
    N: SnapshotRepository + 'static,
    A: AnalyticsSink + 'static,
{
    pub fn new(states: Arc<S>, snapshots: Arc<N>, analytics: Arc<A>) -> Self {
        Self::with_clock(states, snapshots, analytics, Arc::new(SystemClock))
    }

    pub fn with_clock(
        states: Arc<S>,
        snapshots: Arc<N>,
        analytics: Arc<A>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            states,
            snapshots,
            analytics,
            clock,
        }
    }

    /// Create the draft record for a new CV. Existing records are returned untouched.
    pub fn initialize(&self, cv_id: &CvId) -> Result<CvStateInfo, CvServiceError> {
        let now = self.clock.now();
        let state = self.states.update(cv_id, |current| {
            current.unwrap_or_else(|| CvStateInfo::draft(cv_id.clone(), now))
        })?;
        Ok(state)
    }

    pub fn state(&self, cv_id: &CvId) -> Result<Option<CvStateInfo>, CvServiceError> {
        Ok(self.states.fetch(cv_id)?)
    }

    /// The only transition: visible CVs become active, hidden CVs return to draft.
    pub fn set_visibility(
        &self,
        cv_id: &CvId,
        is_visible: bool,
    ) -> Result<CvStateInfo, CvServiceError> {
        let now = self.clock.now();
        let next = self.states.update(cv_id, |current| {
            current
                .unwrap_or_else(|| CvStateInfo::draft(cv_id.clone(), now))
                .with_visibility(is_visible)
        })?;

        info!(
            cv_id = %cv_id.0,
            state = next.state().label(),
            "cv visibility updated"
        );
        Ok(next)
    }

    /// Unknown CVs are treated as editable.
    pub fn is_edit_locked(&self, cv_id: &CvId) -> Result<bool, CvServiceError> {
        Ok(self
            .states
            .fetch(cv_id)?
            .map(|state| state.is_edit_locked())
            .unwrap_or(false))
    }

    /// Record an edit. Returns `false` without touching anything while the CV is locked.
    ///
    /// Every CV edit path decides whether its save went through by calling this.
    pub fn update_timestamp(&self, cv_id: &CvId) -> Result<bool, CvServiceError> {
        let now = self.clock.now();
        let mut refused = false;
        self.states.update(cv_id, |current| match current {
            Some(existing) if existing.is_edit_locked() => {
                refused = true;
                existing
            }
            Some(existing) => existing.touched(now),
            None => CvStateInfo::draft(cv_id.clone(), now),
        })?;

        if refused {
            warn!(cv_id = %cv_id.0, "refusing edit on visible cv");
            return Ok(false);
        }
        Ok(true)
    }

    /// Capture the CV as the employer sees it now. Allowed regardless of the edit lock.
    pub fn create_snapshot(
        &self,
        cv_id: &CvId,
        employer_id: &EmployerId,
        content: CvContent,
    ) -> Result<CvSnapshot, CvServiceError> {
        let stored = self
            .snapshots
            .append(cv_id, employer_id, content, self.clock.now())?;

        info!(
            cv_id = %cv_id.0,
            employer_id = %employer_id.0,
            version = stored.version,
            "cv snapshot saved"
        );

        let mut metadata = BTreeMap::new();
        metadata.insert("version".to_string(), stored.version.to_string());
        let event = AnalyticsEvent {
            kind: AnalyticsEventKind::CvSaved,
            actor_id: Some(employer_id.0.clone()),
            subject_id: Some(cv_id.0.clone()),
            occurred_at: stored.created_at,
            metadata,
        };
        if let Err(error) = self.analytics.record(event) {
            warn!(%error, "dropping cv saved analytics event");
        }

        Ok(stored)
    }

    pub fn snapshots_for(
        &self,
        cv_id: &CvId,
        employer_id: &EmployerId,
    ) -> Result<Vec<CvSnapshot>, CvServiceError> {
        Ok(self.snapshots.list(cv_id, employer_id)?)
    }
}

/// Error raised by the CV state service.
#[derive(Debug, thiserror::Error)]
pub enum CvServiceError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

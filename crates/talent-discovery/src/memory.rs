//! Process-local adapters for the repository traits.
//!
//! These back the demo server and tests. Production deployments plug the traits into the
//! platform database instead.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Utc};

use crate::cv::{
    CvContent, CvId, CvSnapshot, CvStateInfo, CvStateRepository, EmployerId, SnapshotRepository,
};
use crate::error::RepositoryError;
use crate::profiles::{JobseekerProfile, ProfileId, ProfileRepository};

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>, RepositoryError> {
    mutex
        .lock()
        .map_err(|_| RepositoryError::Unavailable("in-memory store poisoned".to_string()))
}

#[derive(Debug, Default)]
pub struct InMemoryProfileRepository {
    profiles: Mutex<Vec<JobseekerProfile>>,
}

impl InMemoryProfileRepository {
    pub fn with_profiles(profiles: Vec<JobseekerProfile>) -> Self {
        Self {
            profiles: Mutex::new(profiles),
        }
    }
}

impl ProfileRepository for InMemoryProfileRepository {
    fn fetch(&self, id: &ProfileId) -> Result<Option<JobseekerProfile>, RepositoryError> {
        let guard = lock(&self.profiles)?;
        Ok(guard.iter().find(|profile| &profile.id == id).cloned())
    }

    fn list(&self) -> Result<Vec<JobseekerProfile>, RepositoryError> {
        Ok(lock(&self.profiles)?.clone())
    }
}

#[derive(Debug, Default)]
pub struct InMemoryCvStateRepository {
    states: Mutex<HashMap<CvId, CvStateInfo>>,
}

impl CvStateRepository for InMemoryCvStateRepository {
    fn fetch(&self, cv_id: &CvId) -> Result<Option<CvStateInfo>, RepositoryError> {
        Ok(lock(&self.states)?.get(cv_id).cloned())
    }

    fn update<F>(&self, cv_id: &CvId, apply: F) -> Result<CvStateInfo, RepositoryError>
    where
        F: FnOnce(Option<CvStateInfo>) -> CvStateInfo,
    {
        let mut guard = lock(&self.states)?;
        let next = apply(guard.get(cv_id).cloned());
        guard.insert(cv_id.clone(), next.clone());
        Ok(next)
    }
}

#[derive(Debug, Default)]
pub struct InMemorySnapshotRepository {
    snapshots: Mutex<Vec<CvSnapshot>>,
}

impl SnapshotRepository for InMemorySnapshotRepository {
    fn append(
        &self,
        cv_id: &CvId,
        employer_id: &EmployerId,
        content: CvContent,
        created_at: DateTime<Utc>,
    ) -> Result<CvSnapshot, RepositoryError> {
        let mut guard = lock(&self.snapshots)?;
        let latest = guard
            .iter()
            .filter(|snapshot| &snapshot.cv_id == cv_id && &snapshot.employer_id == employer_id)
            .map(|snapshot| snapshot.version)
            .max()
            .unwrap_or(0);

        let snapshot = CvSnapshot {
            cv_id: cv_id.clone(),
            employer_id: employer_id.clone(),
            version: latest.saturating_add(1),
            content,
            created_at,
        };
        guard.push(snapshot.clone());
        Ok(snapshot)
    }

    fn list(
        &self,
        cv_id: &CvId,
        employer_id: &EmployerId,
    ) -> Result<Vec<CvSnapshot>, RepositoryError> {
        let guard = lock(&self.snapshots)?;
        let mut snapshots: Vec<CvSnapshot> = guard
            .iter()
            .filter(|snapshot| &snapshot.cv_id == cv_id && &snapshot.employer_id == employer_id)
            .cloned()
            .collect();
        snapshots.sort_by_key(|snapshot| snapshot.version);
        Ok(snapshots)
    }
}

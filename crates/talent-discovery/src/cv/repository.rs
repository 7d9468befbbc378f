use chrono::{DateTime, Utc};

use super::domain::{CvContent, CvId, CvSnapshot, CvStateInfo, EmployerId};
use crate::error::RepositoryError;

/// Storage for per-CV state records.
pub trait CvStateRepository: Send + Sync {
    fn fetch(&self, cv_id: &CvId) -> Result<Option<CvStateInfo>, RepositoryError>;

    /// Read, transform, and store the record for `cv_id` as one indivisible step.
    ///
    /// `apply` receives the current record (if any) and returns the record to keep.
    /// Implementations must not let another write land between the read and the store.
    fn update<F>(&self, cv_id: &CvId, apply: F) -> Result<CvStateInfo, RepositoryError>
    where
        F: FnOnce(Option<CvStateInfo>) -> CvStateInfo;
}

/// Append-only storage for employer snapshots.
pub trait SnapshotRepository: Send + Sync {
    /// Store a new snapshot numbered one past the pair's latest version.
    fn append(
        &self,
        cv_id: &CvId,
        employer_id: &EmployerId,
        content: CvContent,
        created_at: DateTime<Utc>,
    ) -> Result<CvSnapshot, RepositoryError>;

    /// Snapshots for the pair, oldest version first.
    fn list(
        &self,
        cv_id: &CvId,
        employer_id: &EmployerId,
    ) -> Result<Vec<CvSnapshot>, RepositoryError>;
}

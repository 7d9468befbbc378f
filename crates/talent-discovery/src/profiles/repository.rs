use super::domain::{JobseekerProfile, ProfileId};
use crate::error::RepositoryError;

/// Read access to stored jobseeker profiles.
pub trait ProfileRepository: Send + Sync {
    fn fetch(&self, id: &ProfileId) -> Result<Option<JobseekerProfile>, RepositoryError>;
    fn list(&self) -> Result<Vec<JobseekerProfile>, RepositoryError>;
}

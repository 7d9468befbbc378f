//! CV publication state, the edit lock, and employer snapshots.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{CvContent, CvId, CvSection, CvSnapshot, CvState, CvStateInfo, EmployerId};
pub use repository::{CvStateRepository, SnapshotRepository};
pub use router::cv_router;
pub use service::{CvServiceError, CvStateService};

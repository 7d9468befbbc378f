//! Jobseeker profiles: the discoverability gate and employer search ranking.

pub mod domain;
pub mod ranking;
pub mod repository;
pub mod router;
pub mod service;
pub mod visibility;

#[cfg(test)]
mod tests;

pub use domain::{CvSections, JobseekerProfile, ProfileId, SearchQuery};
pub use ranking::{
    explain_ranking, search_and_rank_at, search_and_rank_profiles, RankedProfile, RankingEngine,
    RankingWeights,
};
pub use repository::ProfileRepository;
pub use router::{discovery_router, SearchRequest};
pub use service::{
    DiscoveryService, DiscoveryServiceError, ProfileCompletionView, SearchResultView,
};
pub use visibility::{
    check_profile_completion, explain_visibility, visibility_reasons, CompletionStatus,
};

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::warn;

use super::domain::{JobseekerProfile, ProfileId, SearchQuery};
use super::ranking::{explain_ranking, RankedProfile, RankingEngine};
use super::repository::ProfileRepository;
use super::visibility::{check_profile_completion, explain_visibility, CompletionStatus};
use crate::analytics::{AnalyticsEvent, AnalyticsEventKind, AnalyticsSink};
use crate::clock::{Clock, SystemClock};
use crate::error::RepositoryError;
use crate::rate_limit::{RateLimitPolicy, RateLimitedAction, RateLimiter};

/// Composes profile storage, the ranking engine, the search rate limit, and search analytics.
pub struct DiscoveryService<P, A> {
    profiles: Arc<P>,
    analytics: Arc<A>,
    engine: RankingEngine,
    limiter: RateLimiter,
    clock: Arc<dyn Clock>,
}

impl<P, A> DiscoveryService<P, A>
where
    P: ProfileRepository + 'static,
    A: AnalyticsSink + 'static,
{
    pub fn new(profiles: Arc<P>, analytics: Arc<A>) -> Self {
        Self::with_clock(profiles, analytics, Arc::new(SystemClock))
    }

    pub fn with_clock(profiles: Arc<P>, analytics: Arc<A>, clock: Arc<dyn Clock>) -> Self {
        Self {
            profiles,
            analytics,
            engine: RankingEngine::default(),
            limiter: RateLimiter::new(RateLimitPolicy::default()),
            clock,
        }
    }

    /// Replace the default per-searcher limits.
    pub fn with_rate_limits(mut self, policy: RateLimitPolicy) -> Self {
        self.limiter = RateLimiter::new(policy);
        self
    }

    /// Rank every stored profile against the query.
    pub fn search(&self, query: &SearchQuery) -> Result<Vec<RankedProfile>, DiscoveryServiceError> {
        self.run_search(query, None, self.clock.now())
    }

    /// Search on behalf of `searcher_id`, counted against the search rate limit.
    ///
    /// Rejected searches are neither ranked nor recorded.
    pub fn search_for(
        &self,
        searcher_id: &str,
        query: &SearchQuery,
    ) -> Result<Vec<SearchResultView>, DiscoveryServiceError> {
        let now = self.clock.now();
        let decision = self
            .limiter
            .check_and_record(searcher_id, RateLimitedAction::Search, now);
        if !decision.allowed {
            return Err(DiscoveryServiceError::RateLimited {
                retry_after_seconds: decision.retry_after_seconds.unwrap_or(1),
            });
        }

        let ranked = self.run_search(query, Some(searcher_id), now)?;
        Ok(ranked.into_iter().map(SearchResultView::from).collect())
    }

    fn run_search(
        &self,
        query: &SearchQuery,
        searcher_id: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<Vec<RankedProfile>, DiscoveryServiceError> {
        let candidates = self.profiles.list()?;
        let ranked = self.engine.rank(&candidates, query, now);

        let mut metadata = BTreeMap::new();
        metadata.insert("result_count".to_string(), ranked.len().to_string());
        if !query.keywords.trim().is_empty() {
            metadata.insert("keywords".to_string(), query.keywords.trim().to_string());
        }
        if let Some(city) = query.city.as_deref().filter(|city| !city.is_empty()) {
            metadata.insert("city".to_string(), city.to_string());
        }

        let event = AnalyticsEvent {
            kind: AnalyticsEventKind::SearchPerformed,
            actor_id: searcher_id.map(str::to_string),
            subject_id: None,
            occurred_at: now,
            metadata,
        };
        if let Err(error) = self.analytics.record(event) {
            warn!(%error, "dropping search analytics event");
        }

        Ok(ranked)
    }

    /// Ranked results paired with their explanations, ready for display.
    pub fn search_with_explanations(
        &self,
        query: &SearchQuery,
    ) -> Result<Vec<SearchResultView>, DiscoveryServiceError> {
        let ranked = self.search(query)?;
        Ok(ranked.into_iter().map(SearchResultView::from).collect())
    }

    /// Completion and discoverability for a stored profile.
    pub fn completion(
        &self,
        profile_id: &ProfileId,
    ) -> Result<ProfileCompletionView, DiscoveryServiceError> {
        let profile = self
            .profiles
            .fetch(profile_id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(ProfileCompletionView::from_profile(&profile))
    }
}

/// Completion status plus the explanation shown to the profile owner.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileCompletionView {
    pub profile_id: ProfileId,
    #[serde(flatten)]
    pub status: CompletionStatus,
    pub explanation: String,
}

impl ProfileCompletionView {
    pub fn from_profile(profile: &JobseekerProfile) -> Self {
        let status = check_profile_completion(profile);
        let explanation = explain_visibility(profile, &status);
        Self {
            profile_id: profile.id.clone(),
            status,
            explanation,
        }
    }
}

/// One ranked result with its explanation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResultView {
    #[serde(flatten)]
    pub ranked: RankedProfile,
    pub explanation: String,
}

impl From<RankedProfile> for SearchResultView {
    fn from(ranked: RankedProfile) -> Self {
        let explanation = explain_ranking(&ranked);
        Self {
            ranked,
            explanation,
        }
    }
}

/// Error raised by the discovery service.
#[derive(Debug, thiserror::Error)]
pub enum DiscoveryServiceError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error("too many searches; retry in {retry_after_seconds}s")]
    RateLimited { retry_after_seconds: i64 },
}

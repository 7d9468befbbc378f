pub(crate) mod rules;
mod weights;

pub use weights::{RankingWeights, DEFAULT_WEIGHTS};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::domain::{JobseekerProfile, SearchQuery};

const DEFAULT_EXPLANATION: &str = "Matches your search criteria";

/// A profile together with the sub-scores that placed it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedProfile {
    pub profile: JobseekerProfile,
    pub relevance_score: u8,
    pub completeness_score: u8,
    pub recency_score: u8,
    pub discovery_score: u8,
    pub total_score: u8,
}

/// Stateless scorer that filters candidates and orders them for a query.
#[derive(Debug, Clone, Default)]
pub struct RankingEngine {
    weights: RankingWeights,
}

impl RankingEngine {
    /// Filter out hidden or out-of-area profiles, score the rest, and sort by total descending.
    ///
    /// The sort is stable: equal totals keep their input order.
    pub fn rank(
        &self,
        profiles: &[JobseekerProfile],
        query: &SearchQuery,
        now: DateTime<Utc>,
    ) -> Vec<RankedProfile> {
        let city = query.city.as_deref().filter(|city| !city.is_empty());
        let terms = rules::query_terms(query);

        let mut ranked: Vec<RankedProfile> = profiles
            .iter()
            .filter(|profile| profile.open_to_discovery)
            .filter(|profile| city.map_or(true, |city| rules::matches_city(profile, city)))
            .map(|profile| self.score(profile, &terms, now))
            .collect();

        ranked.sort_by(|left, right| right.total_score.cmp(&left.total_score));

        debug!(
            candidates = profiles.len(),
            matched = ranked.len(),
            terms = terms.len(),
            "ranked search candidates"
        );

        ranked
    }

    fn score(
        &self,
        profile: &JobseekerProfile,
        terms: &[String],
        now: DateTime<Utc>,
    ) -> RankedProfile {
        let relevance_score = rules::relevance_score(profile, terms);
        let completeness_score = rules::completeness_score(profile);
        let recency_score = rules::recency_score(profile.last_updated, now);
        let discovery_score = rules::discovery_score(profile);

        RankedProfile {
            profile: profile.clone(),
            relevance_score,
            completeness_score,
            recency_score,
            discovery_score,
            total_score: self.weights.combine(
                relevance_score,
                completeness_score,
                recency_score,
                discovery_score,
            ),
        }
    }
}

/// Rank against an explicit "now" so results are reproducible.
pub fn search_and_rank_at(
    profiles: &[JobseekerProfile],
    query: &SearchQuery,
    now: DateTime<Utc>,
) -> Vec<RankedProfile> {
    RankingEngine::default().rank(profiles, query, now)
}

pub fn search_and_rank_profiles(
    profiles: &[JobseekerProfile],
    query: &SearchQuery,
) -> Vec<RankedProfile> {
    search_and_rank_at(profiles, query, Utc::now())
}

/// Short " | "-joined summary of why a result placed where it did.
pub fn explain_ranking(ranked: &RankedProfile) -> String {
    let mut reasons = Vec::new();

    if ranked.relevance_score >= 70 {
        reasons.push("High keyword relevance");
    } else if ranked.relevance_score >= 40 {
        reasons.push("Moderate keyword relevance");
    }

    if ranked.completeness_score >= 80 {
        reasons.push("Complete profile");
    } else if ranked.completeness_score >= 50 {
        reasons.push("Mostly complete profile");
    }

    if ranked.recency_score >= 80 {
        reasons.push("Recently updated");
    }

    if ranked.discovery_score == 100 {
        reasons.push("Actively seeking opportunities");
    }

    if reasons.is_empty() {
        DEFAULT_EXPLANATION.to_string()
    } else {
        reasons.join(" | ")
    }
}

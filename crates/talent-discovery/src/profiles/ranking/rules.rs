use chrono::{DateTime, Utc};

use super::super::domain::{JobseekerProfile, SearchQuery};

pub(crate) const NEUTRAL_RELEVANCE: u8 = 50;

const ROLE_HIT: f64 = 1.5;
const SKILL_HIT: f64 = 1.25;
const BIO_HIT: f64 = 1.0;
const MAX_HITS_PER_TERM: f64 = 3.0;

const SECONDS_PER_DAY: i64 = 86_400;

/// Upper bound in days (inclusive) and the score awarded inside it.
const RECENCY_TIERS: [(i64, u8); 5] = [(7, 100), (30, 80), (90, 60), (180, 40), (365, 20)];
const STALE_RECENCY: u8 = 10;

/// Lowercased search terms drawn from the keyword, role, and skill inputs.
pub(crate) fn query_terms(query: &SearchQuery) -> Vec<String> {
    [
        Some(query.keywords.as_str()),
        query.desired_role.as_deref(),
        query.skills.as_deref(),
    ]
    .into_iter()
    .flatten()
    .flat_map(tokenize)
    .collect()
}

fn tokenize(raw: &str) -> Vec<String> {
    raw.to_lowercase()
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

pub(crate) fn relevance_score(profile: &JobseekerProfile, terms: &[String]) -> u8 {
    if terms.is_empty() {
        return NEUTRAL_RELEVANCE;
    }

    let role = profile
        .preferred_role
        .as_deref()
        .unwrap_or_default()
        .to_lowercase();
    let bio = profile.bio.as_deref().unwrap_or_default().to_lowercase();
    let skills: Vec<String> = profile
        .skills
        .iter()
        .map(|skill| skill.to_lowercase())
        .collect();

    let mut hits = 0.0;
    for term in terms {
        if role.contains(term.as_str()) {
            hits += ROLE_HIT;
        }
        let skill_matches = skills
            .iter()
            .filter(|skill| skill.contains(term.as_str()))
            .count();
        hits += SKILL_HIT * skill_matches as f64;
        if bio.contains(term.as_str()) {
            hits += BIO_HIT;
        }
    }

    let max_hits = terms.len() as f64 * MAX_HITS_PER_TERM;
    (hits / max_hits * 100.0).min(100.0).round() as u8
}

pub(crate) fn completeness_score(profile: &JobseekerProfile) -> u8 {
    let sections = &profile.sections;
    let checklist: [(bool, u8); 11] = [
        (profile.has_full_name(), 15),
        (profile.has_city(), 10),
        (profile.has_preferred_role(), 15),
        (profile.has_bio(), 15),
        (profile.has_skills(), 15),
        (sections.experience, 10),
        (sections.education, 5),
        (sections.certifications, 5),
        (sections.projects, 5),
        (sections.publications, 3),
        (sections.languages, 2),
    ];

    checklist
        .iter()
        .filter(|(present, _)| *present)
        .map(|(_, weight)| weight)
        .sum()
}

/// Whole days elapsed, floored. `None` stands in for an unknown timestamp.
pub(crate) fn days_since(last_updated: Option<DateTime<Utc>>, now: DateTime<Utc>) -> Option<i64> {
    last_updated.map(|updated| (now - updated).num_seconds().div_euclid(SECONDS_PER_DAY))
}

pub(crate) fn recency_score(last_updated: Option<DateTime<Utc>>, now: DateTime<Utc>) -> u8 {
    let Some(days) = days_since(last_updated, now) else {
        return STALE_RECENCY;
    };

    RECENCY_TIERS
        .iter()
        .find(|(limit, _)| days <= *limit)
        .map(|(_, score)| *score)
        .unwrap_or(STALE_RECENCY)
}

pub(crate) fn discovery_score(profile: &JobseekerProfile) -> u8 {
    if profile.open_to_discovery {
        100
    } else {
        0
    }
}

/// Case-insensitive partial match, so "San" keeps "San Francisco".
pub(crate) fn matches_city(profile: &JobseekerProfile, city: &str) -> bool {
    profile
        .city
        .as_deref()
        .map(|candidate| candidate.to_lowercase().contains(&city.to_lowercase()))
        .unwrap_or(false)
}

use super::common::*;
use crate::profiles::domain::{JobseekerProfile, SearchQuery};
use crate::profiles::ranking::rules::{query_terms, recency_score, relevance_score};
use crate::profiles::ranking::{explain_ranking, search_and_rank_at, RankedProfile};

fn rank(profiles: &[JobseekerProfile], query: &SearchQuery) -> Vec<RankedProfile> {
    search_and_rank_at(profiles, query, now())
}

fn ids(ranked: &[RankedProfile]) -> Vec<&str> {
    ranked
        .iter()
        .map(|result| result.profile.id.0.as_str())
        .collect()
}

#[test]
fn hidden_profiles_never_appear() {
    let mut hidden = complete_profile("hidden");
    hidden.open_to_discovery = false;
    let visible = complete_profile("visible");

    let ranked = rank(&[hidden, visible], &SearchQuery::keywords("rust"));

    assert_eq!(ids(&ranked), vec!["visible"]);
    assert!(ranked.iter().all(|result| result.profile.open_to_discovery));
}

#[test]
fn city_filter_matches_partial_names_case_insensitively() {
    let mut san_francisco = complete_profile("sf");
    san_francisco.city = Some("San Francisco".to_string());
    let mut paris = complete_profile("paris");
    paris.city = Some("Paris".to_string());
    let mut no_city = complete_profile("nowhere");
    no_city.city = None;

    let query = SearchQuery {
        city: Some("san".to_string()),
        ..SearchQuery::default()
    };
    let ranked = rank(&[san_francisco, paris, no_city], &query);

    assert_eq!(ids(&ranked), vec!["sf"]);
}

#[test]
fn empty_city_filter_keeps_everyone() {
    let query = SearchQuery {
        city: Some(String::new()),
        ..SearchQuery::default()
    };
    let ranked = rank(&[complete_profile("a"), complete_profile("b")], &query);
    assert_eq!(ranked.len(), 2);
}

#[test]
fn relevance_is_neutral_without_search_terms() {
    let query = SearchQuery {
        keywords: "  , ".to_string(),
        city: Some("Lagos".to_string()),
        min_age: Some(25),
        max_age: Some(40),
        ..SearchQuery::default()
    };

    let ranked = rank(&[complete_profile("p-1")], &query);

    assert_eq!(ranked[0].relevance_score, 50);
}

#[test]
fn terms_come_from_keywords_role_and_skills() {
    let query = SearchQuery {
        keywords: "Rust,  Go".to_string(),
        desired_role: Some("Backend".to_string()),
        skills: Some("kafka,grpc".to_string()),
        ..SearchQuery::default()
    };

    assert_eq!(
        query_terms(&query),
        vec!["rust", "go", "backend", "kafka", "grpc"]
    );
}

#[test]
fn relevance_weights_role_skill_and_bio_hits() {
    let profile = complete_profile("p-1");

    // skill "rust" (1.25) + bio mention (1.0) over a max of 3.0
    assert_eq!(relevance_score(&profile, &["rust".to_string()]), 75);
    // role only: 1.5 / 3.0
    assert_eq!(relevance_score(&profile, &["engineer".to_string()]), 50);
    assert_eq!(relevance_score(&profile, &["cobol".to_string()]), 0);
}

#[test]
fn every_matching_skill_counts_and_score_is_clamped() {
    let mut profile = sparse_profile("p-1", "Mobile Developer", "React");
    profile.skills.push("React Native".to_string());
    assert_eq!(relevance_score(&profile, &["react".to_string()]), 83);

    profile.preferred_role = Some("React Developer".to_string());
    profile.skills.push("Preact".to_string());
    profile.bio = Some("React all day".to_string());
    assert_eq!(relevance_score(&profile, &["react".to_string()]), 100);
}

#[test]
fn recency_tiers_use_inclusive_upper_bounds() {
    let cases = [
        (0, 100),
        (7, 100),
        (8, 80),
        (30, 80),
        (31, 60),
        (90, 60),
        (91, 40),
        (180, 40),
        (181, 20),
        (365, 20),
        (366, 10),
        (400, 10),
    ];

    for (days, expected) in cases {
        assert_eq!(
            recency_score(days_ago(days), now()),
            expected,
            "{days} days since update"
        );
    }
}

#[test]
fn unknown_update_time_falls_to_the_lowest_tier() {
    let mut profile = complete_profile("p-1");
    profile.last_updated = None;

    let ranked = rank(&[profile], &SearchQuery::default());

    assert_eq!(ranked[0].recency_score, 10);
}

#[test]
fn aggregate_blends_sub_scores() {
    let ranked = rank(&[complete_profile("p-1")], &SearchQuery::keywords("rust"));
    let result = &ranked[0];

    assert_eq!(result.relevance_score, 75);
    assert_eq!(result.completeness_score, 92);
    assert_eq!(result.recency_score, 100);
    assert_eq!(result.discovery_score, 100);
    // 0.4 * 75 + 0.3 * 92 + 0.2 * 100 + 0.1 * 100 = 87.6
    assert_eq!(result.total_score, 88);
}

#[test]
fn completeness_sums_checklist_weights() {
    let mut profile = complete_profile("p-1");
    profile.sections.certifications = true;
    profile.sections.publications = true;

    let ranked = rank(&[profile.clone()], &SearchQuery::default());
    assert_eq!(ranked[0].completeness_score, 100);

    let bare = sparse_profile("p-2", "Designer", "Figma");
    let ranked = rank(&[bare], &SearchQuery::default());
    assert_eq!(ranked[0].completeness_score, 40);
}

#[test]
fn keyword_match_outranks_equal_profiles() {
    let engineer = sparse_profile("engineer", "Engineer", "React");
    let designer = sparse_profile("designer", "Designer", "Figma");

    let ranked = rank(&[designer, engineer], &SearchQuery::keywords("react"));

    assert_eq!(ids(&ranked), vec!["engineer", "designer"]);
    assert!(ranked[0].relevance_score > ranked[1].relevance_score);
    assert_eq!(ranked[0].completeness_score, ranked[1].completeness_score);
    assert_eq!(ranked[0].recency_score, ranked[1].recency_score);
    assert_eq!(ranked[0].discovery_score, ranked[1].discovery_score);
    assert!(ranked[0].total_score > ranked[1].total_score);
}

#[test]
fn equal_totals_keep_input_order() {
    let profiles = vec![
        complete_profile("first"),
        complete_profile("second"),
        complete_profile("third"),
    ];

    let ranked = rank(&profiles, &SearchQuery::keywords("rust"));

    assert_eq!(ids(&ranked), vec!["first", "second", "third"]);
}

#[test]
fn empty_candidate_list_yields_no_results() {
    assert!(rank(&[], &SearchQuery::keywords("rust")).is_empty());
}

#[test]
fn explanation_lists_met_thresholds() {
    let ranked = rank(&[complete_profile("p-1")], &SearchQuery::keywords("rust"));
    assert_eq!(
        explain_ranking(&ranked[0]),
        "High keyword relevance | Complete profile | Recently updated | Actively seeking opportunities"
    );

    let mut stale = ranked[0].clone();
    stale.relevance_score = 45;
    stale.completeness_score = 60;
    stale.recency_score = 20;
    stale.discovery_score = 100;
    assert_eq!(
        explain_ranking(&stale),
        "Moderate keyword relevance | Mostly complete profile | Actively seeking opportunities"
    );
}

#[test]
fn explanation_falls_back_when_nothing_stands_out() {
    let ranked = rank(&[complete_profile("p-1")], &SearchQuery::default());
    let mut weak = ranked[0].clone();
    weak.relevance_score = 10;
    weak.completeness_score = 20;
    weak.recency_score = 10;
    weak.discovery_score = 0;

    assert_eq!(explain_ranking(&weak), "Matches your search criteria");
}

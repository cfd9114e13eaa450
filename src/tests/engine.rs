use std::sync::Arc;

use crate::config::ScoringConfig;
use crate::engine::explain::{BADGE_ACTIVE, BADGE_BACKGROUND, BADGE_RECENT};
use crate::engine::{EngineError, ProfileRecord, RecommendationEngine, Skills};
use crate::tests::support::{profile, FailingOracle, FixedOracle};

fn engine_with(oracle: FixedOracle) -> RecommendationEngine {
    RecommendationEngine::new(Arc::new(oracle), ScoringConfig::default())
}

fn ana() -> ProfileRecord {
    ProfileRecord {
        name: Some("Ana".to_string()),
        role: Some("Researcher".to_string()),
        skills: Skills::from("Machine Learning, Research"),
        industry: Some("Academia".to_string()),
        recent_activity_score: Some(90.0),
        source: Some("research".to_string()),
        ..Default::default()
    }
}

fn pool() -> (Vec<ProfileRecord>, FixedOracle) {
    let profiles = vec![
        profile("low", "Designer", "Figma", 20.0, Some("mock")),
        profile("mid", "Engineer", "Rust, Go", 75.0, Some("devpost")),
        profile("high", "Researcher", "NLP", 95.0, Some("orcid")),
        profile("neg", "Chef", "Baking", 10.0, Some("mock")),
        profile("plain", "Engineer", "Python", 50.0, None),
    ];
    let oracle = FixedOracle::constant(0.3)
        .with(&profiles[0], 0.1)
        .with(&profiles[1], 0.6)
        .with(&profiles[2], 0.9)
        .with(&profiles[3], -0.5);
    (profiles, oracle)
}

#[test]
fn test_one_recommendation_per_profile() {
    let (profiles, oracle) = pool();
    let recs = engine_with(oracle).recommend("rust engineer", &profiles).unwrap();
    assert_eq!(recs.len(), profiles.len());
}

#[test]
fn test_sorted_descending() {
    let (profiles, oracle) = pool();
    let recs = engine_with(oracle).recommend("rust engineer", &profiles).unwrap();

    for pair in recs.windows(2) {
        assert!(pair[0].opportunity_score >= pair[1].opportunity_score);
    }
    assert_eq!(recs[0].name.as_deref(), Some("high"));
    assert_eq!(recs.last().unwrap().name.as_deref(), Some("neg"));
}

#[test]
fn test_negative_score_is_kept() {
    let (profiles, oracle) = pool();
    let recs = engine_with(oracle).recommend("rust engineer", &profiles).unwrap();

    let neg = recs.iter().find(|r| r.name.as_deref() == Some("neg")).unwrap();
    assert_eq!(neg.relevance_score, -50.0);
    // (0.7 * -50 + 0.3 * 10) * 0.7
    assert!((neg.opportunity_score - -22.4).abs() < 1e-9);
    assert_eq!(neg.why_now, BADGE_BACKGROUND);
}

#[test]
fn test_score_never_exceeds_max() {
    let orcid = profile("max", "Researcher", "NLP", 100.0, Some("orcid"));
    let oracle = FixedOracle::constant(1.0);
    let recs = engine_with(oracle).recommend("nlp", &[orcid]).unwrap();

    assert_eq!(recs[0].relevance_score, 100.0);
    assert_eq!(recs[0].opportunity_score, 100.0);
    assert_eq!(recs[0].why_now, BADGE_ACTIVE);
}

#[test]
fn test_all_scores_bounded_above() {
    let (profiles, _) = pool();
    let recs = engine_with(FixedOracle::constant(1.0))
        .recommend("rust engineer", &profiles)
        .unwrap();
    assert!(recs.iter().all(|r| r.opportunity_score <= 100.0));
}

#[test]
fn test_skill_match_ignores_case_and_punctuation() {
    let p = profile("py", "Engineer", "python, Go", 40.0, None);
    let recs = engine_with(FixedOracle::constant(0.5))
        .recommend("I love Python!", &[p])
        .unwrap();

    assert_eq!(recs[0].matched_skills, vec!["python"]);
    assert_eq!(
        recs[0].contextual_triggers.first().map(String::as_str),
        Some("overlapping interests in python")
    );
    assert!(recs[0].why.contains("shared expertise in python"));
}

#[test]
fn test_ana_example() {
    let oracle = FixedOracle::constant(0.8);
    let recs = engine_with(oracle)
        .recommend("machine learning research", &[ana()])
        .unwrap();
    let rec = &recs[0];

    assert_eq!(rec.matched_skills, vec!["Machine Learning", "Research"]);
    assert_eq!(rec.relevance_score, 80.0);
    // (0.7 * 80 + 0.3 * 90) * 1.15
    assert!((rec.opportunity_score - 95.45).abs() < 1e-9);
    assert_eq!(rec.why_now, BADGE_ACTIVE);
    assert_eq!(
        rec.contextual_triggers,
        vec![
            "overlapping interests in Machine Learning",
            "recent professional activity"
        ]
    );
    assert_eq!(
        rec.why,
        "This profile is recommended because of shared expertise in Machine Learning, Research, \
         their role as a Researcher, very high recent professional activity, \
         public data from research, a strong overall match at this time."
    );
    assert_eq!(
        rec.starter,
        "Hi Ana, I came across your work as a Researcher and thought it would be great to connect."
    );
    assert_eq!(rec.source.as_deref(), Some("research"));
}

#[test]
fn test_badge_needs_opportunity_as_well_as_timing() {
    // timing 85 but opportunity (0.7 * 10 + 0.3 * 85) = 32.5
    let p = profile("busy", "Engineer", "Rust", 85.0, None);
    let recs = engine_with(FixedOracle::constant(0.1))
        .recommend("gardening", &[p])
        .unwrap();
    assert_eq!(recs[0].why_now, BADGE_RECENT);
}

#[test]
fn test_triggers_never_exceed_two() {
    let (profiles, oracle) = pool();
    let recs = engine_with(oracle)
        .recommend("rust engineer researcher nlp", &profiles)
        .unwrap();
    assert!(recs.iter().all(|r| r.contextual_triggers.len() <= 2));
}

#[test]
fn test_idempotent() {
    let (profiles, _) = pool();
    let engine = engine_with(pool().1);

    let first = engine.recommend("rust engineer", &profiles).unwrap();
    let second = engine.recommend("rust engineer", &profiles).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_oracle_failure_fails_whole_call() {
    let engine = RecommendationEngine::new(Arc::new(FailingOracle), ScoringConfig::default());
    let (profiles, _) = pool();

    let result = engine.recommend("rust", &profiles);
    assert!(matches!(result, Err(EngineError::Oracle(_))));
}

#[test]
fn test_malformed_records_are_normalized_not_skipped() {
    let profiles: Vec<ProfileRecord> = serde_json::from_str(
        r#"[
            {"name": "ok", "role": "Engineer", "skills": "Rust", "recent_activity_score": 80},
            {"name": "odd", "skills": 42, "recent_activity_score": null},
            {}
        ]"#,
    )
    .unwrap();

    let recs = engine_with(FixedOracle::constant(0.4))
        .recommend("rust", &profiles)
        .unwrap();
    assert_eq!(recs.len(), 3);

    let odd = recs.iter().find(|r| r.name.as_deref() == Some("odd")).unwrap();
    assert!(odd.matched_skills.is_empty());
    assert_eq!(odd.role, "professional");
    assert_eq!(odd.timing_score, 0.0);
}

#[test]
fn test_profile_source_alias_drives_trust() {
    let profiles: Vec<ProfileRecord> = serde_json::from_str(
        r#"[
            {"name": "a", "recent_activity_score": 0, "profile_source": "mock"},
            {"name": "b", "recent_activity_score": 0, "source": "GitHub"}
        ]"#,
    )
    .unwrap();

    let recs = engine_with(FixedOracle::constant(0.5))
        .recommend("anything", &profiles)
        .unwrap();

    assert_eq!(recs[0].name.as_deref(), Some("b"));
    assert_eq!(recs[0].opportunity_score, 35.0);
    assert_eq!(recs[1].opportunity_score, 24.5);
    assert_eq!(recs[1].source.as_deref(), Some("mock"));
    assert!(recs[1].why.contains("public data from mock"));
}

#[test]
fn test_non_finite_timing_uses_default() {
    let nan = profile("nan", "Engineer", "Rust", f64::NAN, Some("mock"));
    let inf = profile("inf", "Engineer", "Rust", f64::INFINITY, Some("mock"));
    let active = profile("active", "Engineer", "Rust", 90.0, Some("github"));

    let recs = engine_with(FixedOracle::constant(0.5))
        .recommend("rust", &[nan, inf, active])
        .unwrap();

    assert_eq!(recs[0].name.as_deref(), Some("active"));
    // (0.7 * 50 + 0.3 * 90) * 1.0
    assert_eq!(recs[0].opportunity_score, 62.0);
    for rec in &recs[1..] {
        // (0.7 * 50 + 0.3 * 0) * 0.7
        assert_eq!(rec.opportunity_score, 24.5);
        assert_eq!(rec.timing_score, 0.0);
        assert_eq!(rec.why_now, BADGE_BACKGROUND);
    }
}

#[test]
fn test_report_carries_sources() {
    let engine = engine_with(FixedOracle::constant(0.5));
    let report = engine
        .report("rust", &[ana()], vec!["research".to_string()])
        .unwrap();
    assert_eq!(report.data_sources, vec!["research"]);
    assert_eq!(report.recommendations.len(), 1);

    let json = serde_json::to_value(&report).unwrap();
    assert!(json["recommendations"][0]["why_now"].is_string());
}

use chrono::NaiveDate;
use std::sync::Arc;
use std::thread;

use contentflow::scoring::{PlatformRegistry, TwitterScorer};
use contentflow::{
    AnalysisError, AnalysisRequest, AnalyzerConfig, ContentAnalyzer, ContentType, LexicalIndex,
    Platform, ReferenceTime,
};

fn friday() -> ReferenceTime {
    ReferenceTime::from_date(NaiveDate::from_ymd_opt(2026, 10, 16).expect("valid date"))
}

fn saturday() -> ReferenceTime {
    ReferenceTime::from_date(NaiveDate::from_ymd_opt(2026, 10, 17).expect("valid date"))
}

fn request(text: &str, platforms: &[&str]) -> AnalysisRequest {
    AnalysisRequest::new(text, ContentType::Post, platforms.iter().copied())
}

fn in_unit_range(value: f64) -> bool {
    (0.0..=1.0).contains(&value)
}

#[test]
fn every_score_stays_in_unit_range() {
    let analyzer = ContentAnalyzer::default();
    let long = "word ".repeat(3000);
    let texts = [
        "Is DIY woodworking fun? Follow us!",
        "Amazing incredible awesome fantastic!!! Share share share 🔥🎉",
        "- one\n- two\n* three\n1. four\n\nA \"quoted\" 2026 note?",
        long.as_str(),
    ];
    for text in texts {
        let analysis = analyzer
            .analyze_at(&request(text, &["twitter", "linkedin", "instagram"]), friday())
            .expect("analysis succeeds");
        let metrics = &analysis.metrics;
        assert!(in_unit_range(metrics.engagement_score));
        assert!(in_unit_range(metrics.virality_potential));
        assert!(in_unit_range(metrics.audience_fit));
        assert!(in_unit_range(metrics.content_quality_score));
        for score in analysis.platform_scores.values() {
            assert!(in_unit_range(*score));
        }
        assert!(metrics.hashtag_recommendations.len() <= 7);
    }
}

#[test]
fn single_platform_scores_follow_the_weights() {
    let analyzer = ContentAnalyzer::default();
    let analysis = analyzer
        .analyze_at(&request("Is DIY woodworking fun? Follow us!", &["twitter"]), friday())
        .expect("analysis succeeds");

    let twitter = 0.012 + 0.2 + 0.3;
    assert!((analysis.metrics.engagement_score - twitter).abs() < 1e-6);
    assert!((analysis.metrics.audience_fit - twitter * 0.35).abs() < 1e-6);
    assert_eq!(analysis.platforms, vec![Platform::Twitter]);
    assert_eq!(analysis.metrics.optimal_posting_times[&Platform::Twitter], "12:00-15:00");
}

#[test]
fn unknown_platforms_are_ignored() {
    let analyzer = ContentAnalyzer::default();
    let analysis = analyzer
        .analyze_at(&request("Sanding the workbench today", &["myspace"]), friday())
        .expect("analysis succeeds");

    assert!(analysis.platforms.is_empty());
    assert!(analysis.platform_scores.is_empty());
    assert!(analysis.metrics.optimal_posting_times.is_empty());
    assert_eq!(analysis.ignored_platforms, vec!["myspace".to_string()]);
    assert!((analysis.metrics.engagement_score - 0.0).abs() < 1e-9);
    assert!((analysis.metrics.audience_fit - 0.5).abs() < 1e-9);
}

#[test]
fn platform_aliases_are_deduplicated() {
    let analyzer = ContentAnalyzer::default();
    let analysis = analyzer
        .analyze_at(&request("Sanding the workbench today", &["Twitter", "x", "ig"]), friday())
        .expect("analysis succeeds");
    assert_eq!(analysis.platforms, vec![Platform::Twitter, Platform::Instagram]);
    assert!(analysis.ignored_platforms.is_empty());
}

#[test]
fn missing_text_or_platforms_is_invalid_input() {
    let analyzer = ContentAnalyzer::default();

    let blank = analyzer.analyze_at(&request("   \n", &["twitter"]), friday());
    assert!(matches!(blank, Err(AnalysisError::InvalidInput(_))));

    let no_platforms = analyzer.analyze_at(&request("Sanding the workbench", &[]), friday());
    assert!(matches!(no_platforms, Err(AnalysisError::InvalidInput(_))));

    assert_eq!(analyzer.indexed_documents(), 0);
}

#[test]
fn repeated_text_loses_originality() {
    let analyzer = ContentAnalyzer::default();
    let text = "Walnut shelf with hidden brackets, finished in hard wax oil";

    let first = analyzer
        .analyze_at(&request(text, &["twitter"]), friday())
        .expect("first analysis");
    let second = analyzer
        .analyze_at(&request(text, &["twitter"]), friday())
        .expect("second analysis");

    assert!((first.signals.originality - 1.0).abs() < 1e-9);
    assert!((second.signals.originality - 0.0).abs() < 1e-9);
    assert!((second.signals.uniqueness - second.signals.originality).abs() < 1e-9);
    assert!(second.metrics.virality_potential < first.metrics.virality_potential);
    assert!(second.metrics.content_quality_score < first.metrics.content_quality_score);
    assert_ne!(first.document_id, second.document_id);
}

#[test]
fn index_grows_per_analysis_and_resets() {
    let analyzer = ContentAnalyzer::default();
    analyzer
        .analyze_at(&request("First cedar planter", &["twitter"]), friday())
        .expect("analysis succeeds");
    analyzer
        .analyze_at(&request("Second cedar planter", &["twitter"]), friday())
        .expect("analysis succeeds");
    assert_eq!(analyzer.indexed_documents(), 2);

    analyzer.reset_index();
    assert_eq!(analyzer.indexed_documents(), 0);
}

#[test]
fn unvectorizable_text_uses_fallback_similarity() {
    let mut config = AnalyzerConfig::default();
    config.index.fallback_similarity = 0.2;
    let analyzer = ContentAnalyzer::new(config);

    analyzer
        .analyze_at(&request("Seed document about joinery", &["twitter"]), friday())
        .expect("seed analysis");
    let analysis = analyzer
        .analyze_at(&request("!!! ???", &["twitter"]), friday())
        .expect("fallback analysis");
    assert!((analysis.signals.originality - 0.8).abs() < 1e-9);
}

#[test]
fn index_capacity_bounds_the_corpus() {
    let mut config = AnalyzerConfig::default();
    config.index.capacity = Some(2);
    let analyzer = ContentAnalyzer::new(config);
    for text in ["maple stool", "cedar chest", "birch box"] {
        analyzer
            .analyze_at(&request(text, &["twitter"]), friday())
            .expect("analysis succeeds");
    }
    assert_eq!(analyzer.indexed_documents(), 2);

    let evicted = analyzer
        .analyze_at(&request("maple stool", &["twitter"]), friday())
        .expect("analysis succeeds");
    assert!((evicted.signals.originality - 1.0).abs() < 1e-9);
}

#[test]
fn posting_times_follow_the_day_of_week() {
    let analyzer = ContentAnalyzer::default();
    let platforms = ["twitter", "linkedin", "instagram"];

    let weekday = analyzer
        .analyze_at(&request("Weekday post", &platforms), friday())
        .expect("analysis succeeds");
    let weekend = analyzer
        .analyze_at(&request("Weekend post", &platforms), saturday())
        .expect("analysis succeeds");

    let weekday_times = &weekday.metrics.optimal_posting_times;
    assert_eq!(weekday_times[&Platform::Twitter], "12:00-15:00");
    assert_eq!(weekday_times[&Platform::Linkedin], "8:00-10:00");
    assert_eq!(weekday_times[&Platform::Instagram], "11:00-13:00");

    let weekend_times = &weekend.metrics.optimal_posting_times;
    assert_eq!(weekend_times[&Platform::Twitter], "9:00-11:00");
    assert_eq!(weekend_times[&Platform::Linkedin], "10:00-11:00");
    assert_eq!(weekend_times[&Platform::Instagram], "9:00-11:00");
}

#[test]
fn timeliness_uses_the_reference_year() {
    let analyzer = ContentAnalyzer::default();
    let current = analyzer
        .analyze_at(&request("Shop trends for 2026", &["twitter"]), friday())
        .expect("analysis succeeds");
    assert!((current.signals.timeliness - 1.0).abs() < 1e-9);

    let stale = analyzer
        .analyze_at(&request("Shop trends for 2019", &["twitter"]), friday())
        .expect("analysis succeeds");
    assert!((stale.signals.timeliness - 0.5).abs() < 1e-9);
}

#[test]
fn custom_registry_limits_supported_platforms() {
    let config = AnalyzerConfig::default();
    let mut registry = PlatformRegistry::new();
    registry.register(TwitterScorer::from_config(&config));
    let analyzer = ContentAnalyzer::with_parts(config, registry, LexicalIndex::new());

    let analysis = analyzer
        .analyze_at(&request("Cutting dovetails", &["twitter", "linkedin"]), friday())
        .expect("analysis succeeds");
    assert_eq!(analysis.platforms, vec![Platform::Twitter]);
    assert_eq!(analysis.ignored_platforms, vec!["linkedin".to_string()]);
}

#[test]
fn concurrent_analyses_each_land_in_the_index() {
    let analyzer = Arc::new(ContentAnalyzer::default());
    let handles: Vec<_> = (0..8)
        .map(|worker| {
            let analyzer = Arc::clone(&analyzer);
            thread::spawn(move || {
                let text = format!("Workshop log entry number {} about jig {}", worker, worker * 7);
                analyzer
                    .analyze_at(&request(&text, &["twitter", "instagram"]), friday())
                    .map(|analysis| analysis.document_id)
            })
        })
        .collect();

    let mut ids = Vec::new();
    for handle in handles {
        let id = handle.join().expect("worker finished").expect("analysis succeeds");
        ids.push(id);
    }
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 8);
    assert_eq!(analyzer.indexed_documents(), 8);
}

use chrono::{TimeZone, Utc};

use contentflow::record::content_fingerprint;
use contentflow::store::RecordStore;
use contentflow::trends::{TrendPost, TrendReport, TrendSource};
use contentflow::scoring::CategoryClassifier;
use contentflow::{
    AnalysisError, AnalysisRequest, AnalyzerConfig, ContentAnalyzer, ContentItem, ContentType,
    PageContent, Platform,
};

fn page(url: &str, text: &str) -> PageContent {
    PageContent {
        url: url.to_string(),
        text: text.to_string(),
        title: None,
        description: None,
        keywords: None,
    }
}

fn platforms(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| name.to_string()).collect()
}

fn item(analyzer: &ContentAnalyzer, url: &str, text: &str) -> ContentItem {
    analyzer
        .analyze_page(&page(url, text), ContentType::Article, &platforms(&["twitter", "linkedin"]))
        .expect("page analysis succeeds")
        .item
}

#[test]
fn analyze_page_builds_a_content_item() {
    let analyzer = ContentAnalyzer::default();
    let text = "How to build a floating shelf. Measure, cut, mount.";
    let mut page = page("https://example.com/diy/shelf", text);
    page.description = Some("x".repeat(800));
    page.keywords = Some("DIY, Shelf, diy".to_string());

    let scored = analyzer
        .analyze_page(&page, ContentType::Article, &platforms(&["linkedin", "twitter"]))
        .expect("page analysis succeeds");
    let item = scored.item;

    assert_eq!(item.url.as_str(), "https://example.com/diy/shelf");
    assert_eq!(item.title, "Untitled");
    assert_eq!(item.summary.chars().count(), 500);
    assert_eq!(item.tags, vec!["diy".to_string(), "shelf".to_string()]);
    assert_eq!(item.target_platforms, vec![Platform::Linkedin, Platform::Twitter]);
    assert_eq!(item.content_type, ContentType::Article);
    assert_eq!(item.fingerprint, content_fingerprint(text));
    assert_eq!(item.content, text);
    assert_eq!(item.id, scored.analysis.document_id);
    assert_eq!(item.metrics, scored.analysis.metrics);
    assert_eq!(analyzer.indexed_documents(), 1);
}

#[test]
fn analyze_page_rejects_invalid_urls_before_indexing() {
    let analyzer = ContentAnalyzer::default();
    let text = "Walnut shelf with hidden brackets";
    let result = analyzer.analyze_page(&page("not a url", text), ContentType::Post, &platforms(&["twitter"]));
    assert!(matches!(result, Err(AnalysisError::InvalidInput(_))));
    assert_eq!(analyzer.indexed_documents(), 0);

    let request = AnalysisRequest::new(text, ContentType::Post, ["twitter"]);
    let analysis = analyzer.analyze(&request).expect("analysis succeeds");
    assert!((analysis.signals.originality - 1.0).abs() < 1e-9);
    assert_eq!(analyzer.indexed_documents(), 1);
}

#[test]
fn analyze_page_scores_the_stored_page_text() {
    let analyzer = ContentAnalyzer::default();
    let body = "Sanding the workbench today";
    let scored = analyzer
        .analyze_page(&page("https://example.com/bench", body), ContentType::Post, &platforms(&["twitter"]))
        .expect("page analysis succeeds");

    // No question or call to action in the page text, so only the length term counts.
    let expected = (4.0 / 250.0) * 0.5;
    assert_eq!(scored.item.content, body);
    assert_eq!(scored.item.fingerprint, content_fingerprint(body));
    assert!((scored.item.metrics.engagement_score - expected).abs() < 1e-6);
    assert_eq!(scored.analysis.statistics.word_count, 4);
}

#[tokio::test]
async fn store_keeps_newest_first_and_dedupes_by_content() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("nested").join("records.json");
    let store = RecordStore::load(path.clone(), 10).await.expect("empty store");
    let analyzer = ContentAnalyzer::default();

    let first = store
        .add(item(&analyzer, "https://example.com/a", "Oak bench build"))
        .await
        .expect("stored");
    let second = store
        .add(item(&analyzer, "https://example.com/b", "Pine bookcase build"))
        .await
        .expect("stored");

    let records = store.list().await;
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].id, second.id);
    assert_eq!(records[1].id, first.id);

    let repeat = store
        .add(item(&analyzer, "https://example.com/a-again", "Oak bench build"))
        .await
        .expect("stored");
    let records = store.list().await;
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].id, repeat.id);
    assert!(store.get(&first.id).await.is_none());

    let reloaded = RecordStore::load(path, 10).await.expect("reloaded store");
    assert_eq!(reloaded.list().await.len(), 2);
    assert_eq!(
        reloaded.get(&second.id).await.map(|record| record.title),
        Some("Untitled".to_string())
    );
}

#[tokio::test]
async fn store_deletes_and_respects_its_limit() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = RecordStore::load(dir.path().join("records.json"), 2)
        .await
        .expect("empty store");
    let analyzer = ContentAnalyzer::default();

    let mut ids = Vec::new();
    for (url, text) in [
        ("https://example.com/1", "Maple stool"),
        ("https://example.com/2", "Cedar chest"),
        ("https://example.com/3", "Birch box"),
    ] {
        ids.push(store.add(item(&analyzer, url, text)).await.expect("stored").id);
    }
    assert_eq!(store.list().await.len(), 2);
    assert!(store.get(&ids[0]).await.is_none());

    assert!(store.delete(&ids[2]).await.expect("delete"));
    assert!(!store.delete(&ids[2]).await.expect("delete"));
    assert_eq!(store.list().await.len(), 1);
}

fn post(platform: Option<TrendSource>, title: &str) -> TrendPost {
    TrendPost {
        platform,
        title: title.to_string(),
        ..TrendPost::default()
    }
}

#[test]
fn trend_engagement_depends_on_platform() {
    let mut pin = post(Some(TrendSource::Pinterest), "Pin");
    pin.saves = 10;
    pin.likes = 100;
    assert!((pin.engagement_score() - 15.0).abs() < 1e-9);

    let mut gram = post(Some(TrendSource::Instagram), "Gram");
    gram.likes = 10;
    gram.comments = 5;
    gram.shares = 50;
    assert!((gram.engagement_score() - 20.0).abs() < 1e-9);

    let mut tok = post(Some(TrendSource::Tiktok), "Tok");
    tok.likes = 1;
    tok.comments = 1;
    tok.shares = 2;
    assert!((tok.engagement_score() - 9.0).abs() < 1e-9);

    let mut unknown = post(None, "");
    unknown.likes = 1000;
    unknown.description = "Fallback label".to_string();
    assert!((unknown.engagement_score() - 0.0).abs() < 1e-9);
    assert_eq!(unknown.label(), "Fallback label");
}

#[test]
fn trend_report_ranks_and_summarizes() {
    let mut marketing = post(Some(TrendSource::Pinterest), "Marketing strategy board");
    marketing.saves = 10;
    let mut nook = post(Some(TrendSource::Pinterest), "Cozy reading nook");
    nook.saves = 20;
    let mut garden = post(Some(TrendSource::Tiktok), "Garden travel hacks");
    garden.likes = 5;
    garden.shares = 10;
    let posts = vec![marketing, nook, garden];

    let at = Utc
        .with_ymd_and_hms(2026, 10, 16, 12, 0, 0)
        .single()
        .expect("valid timestamp");
    let report = TrendReport::build_at(&posts, &CategoryClassifier::default(), 2, at);

    assert_eq!(report.total_projects_analyzed, 3);
    assert_eq!(report.date_analyzed, at);
    assert_eq!(report.top_trending_projects.len(), 2);
    assert_eq!(report.top_trending_projects[0].post.title, "Garden travel hacks");
    assert!((report.top_trending_projects[0].engagement_score - 35.0).abs() < 1e-9);
    assert_eq!(report.top_trending_projects[1].post.title, "Cozy reading nook");

    assert_eq!(report.platform_distribution["pinterest"], 2);
    assert_eq!(report.platform_distribution["tiktok"], 1);
    assert!((report.average_engagement["pinterest"] - 22.5).abs() < 1e-9);
    assert_eq!(report.category_distribution["business"], 1);
    assert_eq!(report.category_distribution["lifestyle"], 1);
    assert_eq!(report.category_distribution["general"], 1);
}

#[test]
fn trend_posts_deserialize_with_missing_counters() {
    let posts: Vec<TrendPost> =
        serde_json::from_str(r#"[{"platform": "tiktok", "title": "Clip", "likes": 3}]"#)
            .expect("valid json");
    assert_eq!(posts[0].platform, Some(TrendSource::Tiktok));
    assert_eq!(posts[0].shares, 0);
    assert!((posts[0].engagement_score() - 3.0).abs() < 1e-9);
}

#[test]
fn config_round_trips_through_toml() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("config").join("analysis.toml");

    let mut config = AnalyzerConfig::default();
    config.index.capacity = Some(50);
    config.platforms.twitter_ideal_words = 280;
    config.write(&path).expect("config written");

    let (loaded, loaded_path) = AnalyzerConfig::load(Some(path.clone())).expect("config loads");
    assert_eq!(loaded_path, Some(path));
    assert_eq!(loaded.platforms.twitter_ideal_words, 280);
    assert_eq!(loaded.index.capacity, Some(50));
    assert_eq!(loaded.schedule.len(), 3);
    assert_eq!(loaded.hashtags.max_tags, 7);
    assert_eq!(loaded.categories.rules.len(), 4);
}

#[test]
fn missing_config_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().expect("tempdir");
    let (config, _) =
        AnalyzerConfig::load(Some(dir.path().join("absent.toml"))).expect("defaults load");
    assert_eq!(config.platforms.twitter_ideal_words, 250);
    assert_eq!(config.categories.fallback, "general");
}

#[test]
fn malformed_config_is_a_config_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("bad.toml");
    std::fs::write(&path, "keywords = 5").expect("write");
    let result = AnalyzerConfig::load(Some(path));
    assert!(matches!(result, Err(AnalysisError::Config(_))));
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use url::Url;

use crate::error::{AnalysisError, Result};
use crate::{ContentAnalysis, ContentMetrics, ContentType, Platform};

pub const SUMMARY_MAX_CHARS: usize = 500;
const UNTITLED: &str = "Untitled";

/// Rendered page handed over by the crawling layer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageContent {
    pub url: String,
    pub text: String,
    pub title: Option<String>,
    pub description: Option<String>,
    /// Comma-separated `<meta name="keywords">` value.
    pub keywords: Option<String>,
}

impl PageContent {
    pub fn parse_url(&self) -> Result<Url> {
        Url::parse(self.url.trim())
            .map_err(|err| AnalysisError::InvalidInput(format!("invalid url {:?}: {}", self.url, err)))
    }
}

/// Persisted record wrapping one analyzed page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentItem {
    pub id: String,
    pub url: Url,
    pub title: String,
    pub content: String,
    pub summary: String,
    pub metrics: ContentMetrics,
    pub created_at: DateTime<Utc>,
    pub target_platforms: Vec<Platform>,
    pub content_type: ContentType,
    pub category: String,
    pub tags: Vec<String>,
    pub fingerprint: String,
}

impl ContentItem {
    /// `url` is the already validated [`PageContent::parse_url`] result.
    pub fn from_analysis(
        page: &PageContent,
        url: Url,
        content_type: ContentType,
        analysis: ContentAnalysis,
    ) -> Self {
        let title = page
            .title
            .as_deref()
            .map(str::trim)
            .filter(|title| !title.is_empty())
            .unwrap_or(UNTITLED)
            .to_string();
        let summary = page
            .description
            .as_deref()
            .map(|description| truncate_chars(description.trim(), SUMMARY_MAX_CHARS))
            .unwrap_or_default();

        Self {
            id: analysis.document_id,
            url,
            title,
            content: page.text.clone(),
            summary,
            metrics: analysis.metrics,
            created_at: Utc::now(),
            target_platforms: analysis.platforms,
            content_type,
            category: analysis.category,
            tags: extract_tags(page.keywords.as_deref()),
            fingerprint: content_fingerprint(&page.text),
        }
    }
}

/// Scores of one page together with the record built from them.
#[derive(Debug, Clone)]
pub struct PageAnalysis {
    pub analysis: ContentAnalysis,
    pub item: ContentItem,
}

/// Lower-cased, trimmed, de-duplicated keywords in first-seen order.
pub fn extract_tags(keywords: Option<&str>) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for keyword in keywords.unwrap_or_default().split(',') {
        let tag = keyword.trim().to_lowercase();
        if !tag.is_empty() && !tags.contains(&tag) {
            tags.push(tag);
        }
    }
    tags
}

/// Stable hex digest of the first eight bytes of the content's SHA-256.
pub fn content_fingerprint(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    let digest = hasher.finalize();
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    format!("{:016x}", u64::from_be_bytes(bytes))
}

fn truncate_chars(value: &str, max: usize) -> String {
    value.chars().take(max).collect()
}

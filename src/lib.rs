pub mod analyzer;
pub mod config;
pub mod error;
pub mod lexical;
pub mod record;
pub mod schedule;
pub mod scoring;
pub mod store;
pub mod trends;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::trace;

pub use crate::analyzer::ContentAnalyzer;
pub use crate::config::AnalyzerConfig;
pub use crate::error::{AnalysisError, Result};
pub use crate::lexical::LexicalIndex;
pub use crate::record::{ContentItem, PageAnalysis, PageContent};
pub use crate::schedule::ReferenceTime;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Twitter,
    Linkedin,
    Instagram,
}

impl Platform {
    pub const ALL: [Platform; 3] = [Platform::Twitter, Platform::Linkedin, Platform::Instagram];

    pub fn from_str(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "twitter" | "x" => Some(Platform::Twitter),
            "linkedin" => Some(Platform::Linkedin),
            "instagram" | "ig" => Some(Platform::Instagram),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Platform::Twitter => "twitter",
            Platform::Linkedin => "linkedin",
            Platform::Instagram => "instagram",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    Article,
    Post,
    Update,
    SocialPost,
    News,
}

impl ContentType {
    pub fn from_str(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().replace('-', "_").as_str() {
            "article" | "blog" => Some(ContentType::Article),
            "post" => Some(ContentType::Post),
            "update" => Some(ContentType::Update),
            "social_post" | "social" => Some(ContentType::SocialPost),
            "news" => Some(ContentType::News),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ContentType::Article => "article",
            ContentType::Post => "post",
            ContentType::Update => "update",
            ContentType::SocialPost => "social_post",
            ContentType::News => "news",
        }
    }
}

#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub text: String,
    pub content_type: ContentType,
    /// Raw platform identifiers; unrecognized entries are dropped with a warning.
    pub platforms: Vec<String>,
}

impl AnalysisRequest {
    pub fn new<I, S>(text: impl Into<String>, content_type: ContentType, platforms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            text: text.into(),
            content_type,
            platforms: platforms.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentMetrics {
    pub engagement_score: f64,
    pub virality_potential: f64,
    pub audience_fit: f64,
    pub optimal_posting_times: BTreeMap<Platform, String>,
    pub hashtag_recommendations: Vec<String>,
    pub content_quality_score: f64,
}

/// Sub-scores behind the virality and quality blends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signals {
    pub emotion: f64,
    pub shareability: f64,
    pub uniqueness: f64,
    pub timeliness: f64,
    pub readability: f64,
    pub structure: f64,
    pub predicted_engagement: f64,
    pub originality: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentAnalysis {
    pub document_id: String,
    pub metrics: ContentMetrics,
    pub category: String,
    pub platforms: Vec<Platform>,
    pub platform_scores: BTreeMap<Platform, f64>,
    pub signals: Signals,
    pub statistics: TextStatistics,
    pub ignored_platforms: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextStatistics {
    pub word_count: usize,
    pub sentence_count: usize,
    pub paragraph_count: usize,
    pub avg_words_per_sentence: f64,
    pub avg_word_length: f64,
}

impl TextStatistics {
    pub fn has_multiple_paragraphs(&self) -> bool {
        self.paragraph_count > 1
    }
}

pub fn text_statistics(text: &str) -> TextStatistics {
    if text.trim().is_empty() {
        return TextStatistics::default();
    }

    let mut word_count = 0usize;
    let mut char_total = 0usize;
    for word in text.split_whitespace() {
        word_count += 1;
        char_total += word.chars().count();
    }

    // Trailing empty fragments after a final '.' still count as sentences.
    let sentence_count = text.split('.').count();
    let paragraph_count = paragraphs(text).len();

    TextStatistics {
        word_count,
        sentence_count,
        paragraph_count,
        avg_words_per_sentence: ratio_or_zero(
            word_count as f64,
            sentence_count as f64,
            "words per sentence",
        ),
        avg_word_length: ratio_or_zero(char_total as f64, word_count as f64, "word length"),
    }
}

pub fn paragraphs(text: &str) -> Vec<&str> {
    text.split("\n\n").collect()
}

pub fn has_list_line(text: &str) -> bool {
    text.lines().any(|line| {
        let line = line.trim();
        line.starts_with('-') || line.starts_with('*') || line.starts_with("1.")
    })
}

/// `lowercase` must already be lower-cased.
pub fn contains_any(lowercase: &str, needles: &[String]) -> bool {
    needles
        .iter()
        .any(|needle| !needle.is_empty() && lowercase.contains(needle.as_str()))
}

pub fn count_present(lowercase: &str, needles: &[String]) -> usize {
    needles
        .iter()
        .filter(|needle| !needle.is_empty() && lowercase.contains(needle.as_str()))
        .count()
}

pub(crate) fn checked_ratio(numerator: f64, denominator: f64, what: &'static str) -> Result<f64> {
    if denominator == 0.0 {
        return Err(AnalysisError::ComputationDegenerate(what));
    }
    Ok(numerator / denominator)
}

pub(crate) fn ratio_or_zero(numerator: f64, denominator: f64, what: &'static str) -> f64 {
    checked_ratio(numerator, denominator, what).unwrap_or_else(|err| {
        trace!(%err, "substituting 0.0");
        0.0
    })
}

pub(crate) fn clamp01(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.max(0.0).min(1.0)
}

pub(crate) fn bool_to_f64(value: bool) -> f64 {
    if value {
        1.0
    } else {
        0.0
    }
}

pub fn format_percent(value: f64) -> String {
    format!("{:.1}%", value * 100.0)
}

pub fn format_float(value: f64, digits: usize) -> String {
    format!("{:.1$}", value, digits)
}

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::env;
use std::path::{Path, PathBuf};

use crate::error::{AnalysisError, Result};

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmotionalTiers {
    pub high: Vec<String>,
    pub medium: Vec<String>,
    pub low: Vec<String>,
}

impl Default for EmotionalTiers {
    fn default() -> Self {
        Self {
            high: strings(&["amazing", "incredible", "awesome", "fantastic"]),
            medium: strings(&["good", "great", "nice", "cool"]),
            low: strings(&["okay", "fine", "normal", "average"]),
        }
    }
}

/// Marker vocabularies used by the heuristic scorers. Matching is a
/// substring check against lower-cased text.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KeywordConfig {
    pub call_to_action: Vec<String>,
    pub engagement_prompts: Vec<String>,
    pub share_prompts: Vec<String>,
    pub professional_terms: Vec<String>,
    pub emoji_markers: Vec<String>,
    pub emotional: EmotionalTiers,
}

impl Default for KeywordConfig {
    fn default() -> Self {
        Self {
            call_to_action: strings(&["follow", "retweet", "like", "share"]),
            engagement_prompts: strings(&["follow", "share", "comment", "like"]),
            share_prompts: strings(&["share", "retweet"]),
            professional_terms: strings(&[
                "experience",
                "professional",
                "industry",
                "business",
                "strategy",
            ]),
            emoji_markers: strings(&["😀", "🎉", "🔥", "❤️"]),
            emotional: EmotionalTiers::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlatformConfig {
    pub weights: BTreeMap<String, f64>,
    pub twitter_ideal_words: usize,
    pub instagram_ideal_words: usize,
    pub linkedin_ideal_words: BTreeMap<String, usize>,
    pub linkedin_default_words: usize,
}

impl Default for PlatformConfig {
    fn default() -> Self {
        let weights = BTreeMap::from([
            ("twitter".to_string(), 0.35),
            ("linkedin".to_string(), 0.35),
            ("instagram".to_string(), 0.3),
        ]);
        let linkedin_ideal_words = BTreeMap::from([
            ("article".to_string(), 1500),
            ("post".to_string(), 800),
            ("update".to_string(), 200),
        ]);
        Self {
            weights,
            twitter_ideal_words: 250,
            instagram_ideal_words: 150,
            linkedin_ideal_words,
            linkedin_default_words: 800,
        }
    }
}

impl PlatformConfig {
    pub const FALLBACK_WEIGHT: f64 = 0.33;

    pub fn weight(&self, platform: &str) -> f64 {
        self.weights
            .get(platform)
            .copied()
            .unwrap_or(Self::FALLBACK_WEIGHT)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostingWindow {
    pub weekday: String,
    pub weekend: String,
}

impl PostingWindow {
    fn new(weekday: &str, weekend: &str) -> Self {
        Self {
            weekday: weekday.to_string(),
            weekend: weekend.to_string(),
        }
    }
}

pub fn default_schedule() -> BTreeMap<String, PostingWindow> {
    BTreeMap::from([
        ("twitter".to_string(), PostingWindow::new("12:00-15:00", "9:00-11:00")),
        ("linkedin".to_string(), PostingWindow::new("8:00-10:00", "10:00-11:00")),
        ("instagram".to_string(), PostingWindow::new("11:00-13:00", "9:00-11:00")),
    ])
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryRule {
    pub label: String,
    pub keywords: Vec<String>,
}

impl CategoryRule {
    fn new(label: &str, keywords: &[&str]) -> Self {
        Self {
            label: label.to_string(),
            keywords: strings(keywords),
        }
    }
}

/// Rules are evaluated in declaration order; earlier rules win ties.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryConfig {
    pub fallback: String,
    pub rules: Vec<CategoryRule>,
}

impl Default for CategoryConfig {
    fn default() -> Self {
        Self {
            fallback: "general".to_string(),
            rules: vec![
                CategoryRule::new("technology", &["tech", "software", "digital", "ai", "innovation"]),
                CategoryRule::new("business", &["business", "strategy", "marketing", "finance"]),
                CategoryRule::new("lifestyle", &["lifestyle", "health", "wellness", "travel"]),
                CategoryRule::new("education", &["education", "learning", "study", "academic"]),
            ],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HashtagConfig {
    pub salient_terms: usize,
    pub static_tags: usize,
    pub max_tags: usize,
    pub templates: BTreeMap<String, Vec<String>>,
    pub stop_words: Vec<String>,
}

impl Default for HashtagConfig {
    fn default() -> Self {
        let templates = BTreeMap::from([
            ("article".to_string(), strings(&["#article", "#blog", "#reading"])),
            ("social_post".to_string(), strings(&["#social", "#trending", "#viral"])),
            ("news".to_string(), strings(&["#news", "#update", "#latest"])),
        ]);
        Self {
            salient_terms: 5,
            static_tags: 2,
            max_tags: 7,
            templates,
            stop_words: strings(&[
                "a", "an", "and", "are", "as", "at", "be", "but", "by", "for", "from", "has",
                "have", "in", "is", "it", "its", "of", "on", "or", "that", "the", "this", "to",
                "was", "we", "were", "will", "with", "you", "your",
            ]),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    /// Maximum number of retained documents; unset keeps every document.
    pub capacity: Option<usize>,
    /// Similarity substituted when a document cannot be vectorized.
    pub fallback_similarity: f64,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            capacity: None,
            fallback_similarity: 0.5,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    pub keywords: KeywordConfig,
    pub platforms: PlatformConfig,
    pub schedule: BTreeMap<String, PostingWindow>,
    pub categories: CategoryConfig,
    pub hashtags: HashtagConfig,
    pub index: IndexConfig,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            keywords: KeywordConfig::default(),
            platforms: PlatformConfig::default(),
            schedule: default_schedule(),
            categories: CategoryConfig::default(),
            hashtags: HashtagConfig::default(),
            index: IndexConfig::default(),
        }
    }
}

impl AnalyzerConfig {
    pub fn load(path: Option<PathBuf>) -> Result<(Self, Option<PathBuf>)> {
        let config_path = path.or_else(default_config_path);
        let mut config = match config_path.as_ref() {
            Some(path) if path.exists() => {
                let contents = std::fs::read_to_string(path)?;
                toml::from_str(&contents).map_err(|err| {
                    AnalysisError::Config(format!("failed to parse {}: {}", path.display(), err))
                })?
            }
            _ => AnalyzerConfig::default(),
        };

        config.apply_env_overrides();
        Ok((config, config_path))
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let payload = toml::to_string_pretty(self)
            .map_err(|err| AnalysisError::Config(format!("failed to serialize config: {}", err)))?;
        std::fs::write(path, payload)?;
        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(capacity) = env::var("CONTENTFLOW_INDEX_CAPACITY") {
            if let Ok(value) = capacity.trim().parse::<usize>() {
                self.index.capacity = if value == 0 { None } else { Some(value) };
            }
        }
        if let Ok(fallback) = env::var("CONTENTFLOW_FALLBACK_SIMILARITY") {
            if let Ok(value) = fallback.trim().parse::<f64>() {
                self.index.fallback_similarity = value.clamp(0.0, 1.0);
            }
        }
    }
}

fn default_config_path() -> Option<PathBuf> {
    env::var("CONTENTFLOW_CONFIG_PATH")
        .ok()
        .filter(|value| !value.trim().is_empty())
        .map(PathBuf::from)
        .or_else(|| Some(PathBuf::from("config/analysis.toml")))
}

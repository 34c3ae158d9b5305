use std::collections::BTreeMap;

use crate::config::AnalyzerConfig;
use crate::{clamp01, contains_any, text_statistics, ContentType, Platform};

/// Fitness of a text for one publishing platform, in `[0, 1]`.
pub trait PlatformScorer: Send + Sync {
    fn platform(&self) -> Platform;

    fn score(&self, text: &str, content_type: ContentType) -> f64;
}

/// `1 - min(|words - ideal| / ideal, 1)`; 0.0 for a zero ideal.
pub fn length_score(word_count: usize, ideal_words: usize) -> f64 {
    if ideal_words == 0 {
        return 0.0;
    }
    let ideal = ideal_words as f64;
    let deviation = (word_count as f64 - ideal).abs() / ideal;
    1.0 - deviation.min(1.0)
}

#[derive(Debug, Clone)]
pub struct TwitterScorer {
    ideal_words: usize,
    call_to_action: Vec<String>,
}

impl TwitterScorer {
    pub fn from_config(config: &AnalyzerConfig) -> Self {
        Self {
            ideal_words: config.platforms.twitter_ideal_words,
            call_to_action: config.keywords.call_to_action.clone(),
        }
    }
}

impl PlatformScorer for TwitterScorer {
    fn platform(&self) -> Platform {
        Platform::Twitter
    }

    fn score(&self, text: &str, _content_type: ContentType) -> f64 {
        let stats = text_statistics(text);
        let lowercase = text.to_lowercase();

        let mut score = length_score(stats.word_count, self.ideal_words) * 0.5;
        if text.contains('?') {
            score += 0.2;
        }
        if contains_any(&lowercase, &self.call_to_action) {
            score += 0.3;
        }
        clamp01(score)
    }
}

#[derive(Debug, Clone)]
pub struct LinkedInScorer {
    ideal_words: BTreeMap<String, usize>,
    default_words: usize,
    professional_terms: Vec<String>,
}

impl LinkedInScorer {
    pub fn from_config(config: &AnalyzerConfig) -> Self {
        Self {
            ideal_words: config.platforms.linkedin_ideal_words.clone(),
            default_words: config.platforms.linkedin_default_words,
            professional_terms: config.keywords.professional_terms.clone(),
        }
    }

    pub fn ideal_words(&self, content_type: ContentType) -> usize {
        self.ideal_words
            .get(content_type.as_str())
            .copied()
            .unwrap_or(self.default_words)
    }
}

impl PlatformScorer for LinkedInScorer {
    fn platform(&self) -> Platform {
        Platform::Linkedin
    }

    fn score(&self, text: &str, content_type: ContentType) -> f64 {
        let stats = text_statistics(text);
        let lowercase = text.to_lowercase();

        let mut score = length_score(stats.word_count, self.ideal_words(content_type)) * 0.4;
        if stats.has_multiple_paragraphs() {
            score += 0.3;
        }
        if contains_any(&lowercase, &self.professional_terms) {
            score += 0.3;
        }
        clamp01(score)
    }
}

#[derive(Debug, Clone)]
pub struct InstagramScorer {
    ideal_words: usize,
    emoji_markers: Vec<String>,
}

impl InstagramScorer {
    pub fn from_config(config: &AnalyzerConfig) -> Self {
        Self {
            ideal_words: config.platforms.instagram_ideal_words,
            emoji_markers: config.keywords.emoji_markers.clone(),
        }
    }
}

impl PlatformScorer for InstagramScorer {
    fn platform(&self) -> Platform {
        Platform::Instagram
    }

    fn score(&self, text: &str, _content_type: ContentType) -> f64 {
        let stats = text_statistics(text);

        let mut score = length_score(stats.word_count, self.ideal_words) * 0.4;
        if contains_any(text, &self.emoji_markers) {
            score += 0.3;
        }
        if stats.has_multiple_paragraphs() {
            score += 0.3;
        }
        clamp01(score)
    }
}

/// Platform → scorer lookup consulted by the analyzer.
#[derive(Default)]
pub struct PlatformRegistry {
    scorers: BTreeMap<Platform, Box<dyn PlatformScorer>>,
}

impl PlatformRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &AnalyzerConfig) -> Self {
        let mut registry = Self::new();
        registry.register(TwitterScorer::from_config(config));
        registry.register(LinkedInScorer::from_config(config));
        registry.register(InstagramScorer::from_config(config));
        registry
    }

    /// Registers `scorer`, replacing any scorer for the same platform.
    pub fn register<S: PlatformScorer + 'static>(&mut self, scorer: S) {
        self.scorers.insert(scorer.platform(), Box::new(scorer));
    }

    pub fn supports(&self, platform: Platform) -> bool {
        self.scorers.contains_key(&platform)
    }

    pub fn platforms(&self) -> impl Iterator<Item = Platform> + '_ {
        self.scorers.keys().copied()
    }

    pub fn score(&self, platform: Platform, text: &str, content_type: ContentType) -> Option<f64> {
        self.scorers
            .get(&platform)
            .map(|scorer| clamp01(scorer.score(text, content_type)))
    }
}

impl std::fmt::Debug for PlatformRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlatformRegistry")
            .field("platforms", &self.scorers.keys().collect::<Vec<_>>())
            .finish()
    }
}

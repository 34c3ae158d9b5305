use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::KeywordConfig;
use crate::lexical::LexicalIndex;
use crate::{
    bool_to_f64, clamp01, contains_any, count_present, has_list_line, paragraphs, ratio_or_zero,
    TextStatistics,
};

const EMOTION_WEIGHT: f64 = 0.3;
const SHAREABILITY_WEIGHT: f64 = 0.3;
const UNIQUENESS_WEIGHT: f64 = 0.2;
const TIMELINESS_WEIGHT: f64 = 0.2;

const READABILITY_WEIGHT: f64 = 0.3;
const STRUCTURE_WEIGHT: f64 = 0.2;
const ENGAGEMENT_WEIGHT: f64 = 0.3;
const ORIGINALITY_WEIGHT: f64 = 0.2;

/// One emotional keyword per this many words saturates the emotion signal.
const WORDS_PER_EMOTIONAL_WORD: f64 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViralityBreakdown {
    pub emotion: f64,
    pub shareability: f64,
    pub uniqueness: f64,
    pub timeliness: f64,
    pub score: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QualityBreakdown {
    pub readability: f64,
    pub structure: f64,
    pub predicted_engagement: f64,
    pub originality: f64,
    pub score: f64,
}

#[derive(Debug, Clone)]
pub struct EngagementModel {
    keywords: KeywordConfig,
}

impl EngagementModel {
    pub fn new(keywords: KeywordConfig) -> Self {
        Self { keywords }
    }

    /// `uniqueness` is `1 - similarity` against the analyzed corpus, see
    /// [`EngagementModel::originality`].
    pub fn virality(
        &self,
        text: &str,
        stats: &TextStatistics,
        uniqueness: f64,
        current_year: i32,
    ) -> ViralityBreakdown {
        let emotion = self.emotion(text, stats);
        let shareability = self.shareability(text);
        let uniqueness = clamp01(uniqueness);
        let timeliness = timeliness(text, current_year);

        let score = clamp01(
            EMOTION_WEIGHT * emotion
                + SHAREABILITY_WEIGHT * shareability
                + UNIQUENESS_WEIGHT * uniqueness
                + TIMELINESS_WEIGHT * timeliness,
        );

        ViralityBreakdown {
            emotion,
            shareability,
            uniqueness,
            timeliness,
            score,
        }
    }

    pub fn quality(&self, text: &str, stats: &TextStatistics, originality: f64) -> QualityBreakdown {
        let readability = readability(stats);
        let structure = structure(text);
        let predicted_engagement = self.predicted_engagement(text);
        let originality = clamp01(originality);

        let score = clamp01(
            READABILITY_WEIGHT * readability
                + STRUCTURE_WEIGHT * structure
                + ENGAGEMENT_WEIGHT * predicted_engagement
                + ORIGINALITY_WEIGHT * originality,
        );

        QualityBreakdown {
            readability,
            structure,
            predicted_engagement,
            originality,
            score,
        }
    }

    pub fn emotion(&self, text: &str, stats: &TextStatistics) -> f64 {
        let lowercase = text.to_lowercase();
        let tiers = &self.keywords.emotional;
        let total = count_present(&lowercase, &tiers.high) as f64 * 1.0
            + count_present(&lowercase, &tiers.medium) as f64 * 0.6
            + count_present(&lowercase, &tiers.low) as f64 * 0.3;

        let expected = stats.word_count as f64 / WORDS_PER_EMOTIONAL_WORD;
        clamp01(ratio_or_zero(total, expected, "emotional word density"))
    }

    pub fn shareability(&self, text: &str) -> f64 {
        let lowercase = text.to_lowercase();
        let mut score = 0.0;
        if text.contains('?') {
            score += 0.3;
        }
        if contains_any(&lowercase, &self.keywords.share_prompts) {
            score += 0.3;
        }
        if has_list_line(text) {
            score += 0.2;
        }
        clamp01(score)
    }

    /// Mean of five binary cues: question, digit, quote, list, call to action.
    pub fn predicted_engagement(&self, text: &str) -> f64 {
        let lowercase = text.to_lowercase();
        let cues = [
            text.contains('?'),
            text.chars().any(|c| c.is_ascii_digit()),
            text.contains('"') || text.contains('\''),
            has_list_line(text),
            contains_any(&lowercase, &self.keywords.engagement_prompts),
        ];
        let hits: f64 = cues.iter().map(|cue| bool_to_f64(*cue)).sum();
        clamp01(hits / cues.len() as f64)
    }

    /// `1 - max similarity` against `index`. An empty index means fully
    /// original; a text that cannot be vectorized gets `1 - fallback_similarity`.
    pub fn originality(index: &LexicalIndex, text: &str, fallback_similarity: f64) -> f64 {
        if text.trim().is_empty() {
            return 0.0;
        }
        let similarity = match index.similarity(text) {
            Ok(similarity) => similarity,
            Err(err) => {
                warn!(%err, fallback_similarity, "using neutral similarity");
                fallback_similarity
            }
        };
        clamp01(1.0 - similarity)
    }
}

/// 1.0 when the current calendar year is mentioned, 0.5 otherwise.
pub fn timeliness(text: &str, current_year: i32) -> f64 {
    if text.trim().is_empty() {
        return 0.0;
    }
    if text.contains(&current_year.to_string()) {
        1.0
    } else {
        0.5
    }
}

/// Penalizes drift from ~15 words per sentence and ~5 characters per word.
pub fn readability(stats: &TextStatistics) -> f64 {
    if stats.word_count == 0 || stats.sentence_count == 0 {
        return 0.0;
    }
    let sentence_drift = (stats.avg_words_per_sentence - 15.0) / 30.0;
    let word_drift = (stats.avg_word_length - 5.0) / 10.0;
    clamp01(1.0 - (sentence_drift + word_drift) / 2.0)
}

pub fn structure(text: &str) -> f64 {
    if text.trim().is_empty() {
        return 0.0;
    }
    let blocks = paragraphs(text);
    let lengths: Vec<usize> = blocks
        .iter()
        .map(|block| block.split_whitespace().count())
        .collect();

    let has_intro = lengths.first().is_some_and(|words| *words >= 20);
    let has_conclusion = lengths.last().is_some_and(|words| *words >= 20);
    let avg_length = ratio_or_zero(
        lengths.iter().sum::<usize>() as f64,
        lengths.len() as f64,
        "paragraph length",
    );

    clamp01(
        0.3 * bool_to_f64(has_intro)
            + 0.3 * bool_to_f64(has_conclusion)
            + 0.4 * (1.0 - (avg_length - 75.0).abs() / 75.0),
    )
}

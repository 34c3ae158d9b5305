use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::{debug, warn};
use uuid::Uuid;

use crate::config::AnalyzerConfig;
use crate::error::{AnalysisError, Result};
use crate::lexical::LexicalIndex;
use crate::record::{ContentItem, PageAnalysis, PageContent};
use crate::schedule::{posting_times, ReferenceTime};
use crate::scoring::{CategoryClassifier, EngagementModel, HashtagGenerator, PlatformRegistry};
use crate::{
    clamp01, text_statistics, AnalysisRequest, ContentAnalysis, ContentMetrics, ContentType, Platform,
    Signals,
};

/// Audience fit reported when no requested platform could be scored.
const NEUTRAL_AUDIENCE_FIT: f64 = 0.5;

/// Scores content and keeps the corpus used for originality.
///
/// The index lock is held for the whole of one analysis, from the similarity
/// lookup to the final insertion, so concurrent calls serialize.
pub struct ContentAnalyzer {
    config: AnalyzerConfig,
    registry: PlatformRegistry,
    engagement: EngagementModel,
    classifier: CategoryClassifier,
    hashtags: HashtagGenerator,
    index: Mutex<LexicalIndex>,
}

impl ContentAnalyzer {
    pub fn new(config: AnalyzerConfig) -> Self {
        let registry = PlatformRegistry::from_config(&config);
        let index = LexicalIndex::with_retention(config.index.capacity);
        Self::with_parts(config, registry, index)
    }

    pub fn with_parts(config: AnalyzerConfig, registry: PlatformRegistry, index: LexicalIndex) -> Self {
        Self {
            engagement: EngagementModel::new(config.keywords.clone()),
            classifier: CategoryClassifier::new(config.categories.clone()),
            hashtags: HashtagGenerator::new(config.hashtags.clone()),
            registry,
            index: Mutex::new(index),
            config,
        }
    }

    pub fn classifier(&self) -> &CategoryClassifier {
        &self.classifier
    }

    pub fn indexed_documents(&self) -> usize {
        self.lock_index().len()
    }

    pub fn reset_index(&self) {
        self.lock_index().reset();
    }

    pub fn analyze(&self, request: &AnalysisRequest) -> Result<ContentAnalysis> {
        self.analyze_at(request, ReferenceTime::now())
    }

    pub fn analyze_at(&self, request: &AnalysisRequest, at: ReferenceTime) -> Result<ContentAnalysis> {
        if request.text.trim().is_empty() {
            return Err(AnalysisError::InvalidInput("text is required".to_string()));
        }
        if request.platforms.is_empty() {
            return Err(AnalysisError::InvalidInput(
                "at least one platform is required".to_string(),
            ));
        }

        let (platforms, ignored_platforms) = self.resolve_platforms(&request.platforms);
        let text = request.text.as_str();
        let content_type = request.content_type;
        let stats = text_statistics(text);

        let platform_scores: BTreeMap<Platform, f64> = platforms
            .iter()
            .filter_map(|platform| {
                self.registry
                    .score(*platform, text, content_type)
                    .map(|score| (*platform, score))
            })
            .collect();
        let engagement_score = mean(platform_scores.values().copied());
        let audience_fit = self.audience_fit(&platform_scores);

        let mut index = self.lock_index();

        let originality =
            EngagementModel::originality(&index, text, self.config.index.fallback_similarity);
        let virality = self.engagement.virality(text, &stats, originality, at.year);
        let quality = self.engagement.quality(text, &stats, originality);
        let hashtag_recommendations = self.hashtags.generate(text, content_type, &index);
        let category = self.classifier.classify(text);

        let document_id = Uuid::new_v4().to_string();
        index.add(document_id.clone(), text);
        let corpus_size = index.len();
        drop(index);

        let metrics = ContentMetrics {
            engagement_score,
            virality_potential: virality.score,
            audience_fit,
            optimal_posting_times: posting_times(&self.config.schedule, &platforms, at),
            hashtag_recommendations,
            content_quality_score: quality.score,
        };

        debug!(
            document_id = %document_id,
            category = %category,
            engagement = metrics.engagement_score,
            virality = metrics.virality_potential,
            quality = metrics.content_quality_score,
            corpus_size,
            "analyzed content"
        );

        Ok(ContentAnalysis {
            document_id,
            metrics,
            category,
            platforms,
            platform_scores,
            signals: Signals {
                emotion: virality.emotion,
                shareability: virality.shareability,
                uniqueness: virality.uniqueness,
                timeliness: virality.timeliness,
                readability: quality.readability,
                structure: quality.structure,
                predicted_engagement: quality.predicted_engagement,
                originality: quality.originality,
            },
            statistics: stats,
            ignored_platforms,
        })
    }

    /// Analyzes the text of a rendered page and wraps the result in a
    /// [`ContentItem`]. The url is validated before the index is touched.
    pub fn analyze_page(
        &self,
        page: &PageContent,
        content_type: ContentType,
        platforms: &[String],
    ) -> Result<PageAnalysis> {
        let url = page.parse_url()?;
        let request = AnalysisRequest::new(page.text.as_str(), content_type, platforms.iter().cloned());
        let analysis = self.analyze(&request)?;
        let item = ContentItem::from_analysis(page, url, content_type, analysis.clone());
        Ok(PageAnalysis { analysis, item })
    }

    /// Splits raw identifiers into scorable platforms (deduplicated, in
    /// request order) and ignored entries.
    pub fn resolve_platforms(&self, raw: &[String]) -> (Vec<Platform>, Vec<String>) {
        let mut platforms = Vec::new();
        let mut ignored = Vec::new();
        for value in raw {
            match Platform::from_str(value) {
                Some(platform) if self.registry.supports(platform) => {
                    if !platforms.contains(&platform) {
                        platforms.push(platform);
                    }
                }
                _ => {
                    warn!(platform = %value, "ignoring unrecognized platform");
                    ignored.push(value.clone());
                }
            }
        }
        (platforms, ignored)
    }

    fn audience_fit(&self, platform_scores: &BTreeMap<Platform, f64>) -> f64 {
        if platform_scores.is_empty() {
            return NEUTRAL_AUDIENCE_FIT;
        }
        let weighted: f64 = platform_scores
            .iter()
            .map(|(platform, score)| score * self.config.platforms.weight(platform.as_str()))
            .sum();
        clamp01(weighted / platform_scores.len() as f64)
    }

    fn lock_index(&self) -> MutexGuard<'_, LexicalIndex> {
        self.index.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for ContentAnalyzer {
    fn default() -> Self {
        Self::new(AnalyzerConfig::default())
    }
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), value| (sum + value, count + 1));
    if count == 0 {
        0.0
    } else {
        clamp01(sum / count as f64)
    }
}

//! Cross-platform trend summary over scraped social posts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::scoring::CategoryClassifier;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendSource {
    Pinterest,
    Instagram,
    Tiktok,
}

impl TrendSource {
    pub fn as_str(self) -> &'static str {
        match self {
            TrendSource::Pinterest => "pinterest",
            TrendSource::Instagram => "instagram",
            TrendSource::Tiktok => "tiktok",
        }
    }
}

/// One scraped post. Counters a source does not report stay at zero.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TrendPost {
    pub platform: Option<TrendSource>,
    pub title: String,
    pub description: String,
    pub url: String,
    pub saves: u64,
    pub likes: u64,
    pub comments: u64,
    pub shares: u64,
    pub views: u64,
}

impl TrendPost {
    /// Saves dominate on Pinterest; comments and shares outweigh likes elsewhere.
    pub fn engagement_score(&self) -> f64 {
        match self.platform {
            Some(TrendSource::Pinterest) => self.saves as f64 * 1.5,
            Some(TrendSource::Instagram) => self.likes as f64 + self.comments as f64 * 2.0,
            Some(TrendSource::Tiktok) => {
                self.likes as f64 + self.comments as f64 * 2.0 + self.shares as f64 * 3.0
            }
            None => 0.0,
        }
    }

    pub fn label(&self) -> &str {
        if self.title.trim().is_empty() {
            self.description.as_str()
        } else {
            self.title.as_str()
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedPost {
    pub post: TrendPost,
    pub engagement_score: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendReport {
    pub top_trending_projects: Vec<RankedPost>,
    pub platform_distribution: BTreeMap<String, usize>,
    pub average_engagement: BTreeMap<String, f64>,
    pub category_distribution: BTreeMap<String, usize>,
    pub total_projects_analyzed: usize,
    pub date_analyzed: DateTime<Utc>,
}

impl TrendReport {
    pub fn build(posts: &[TrendPost], classifier: &CategoryClassifier, top_n: usize) -> Self {
        Self::build_at(posts, classifier, top_n, Utc::now())
    }

    pub fn build_at(
        posts: &[TrendPost],
        classifier: &CategoryClassifier,
        top_n: usize,
        at: DateTime<Utc>,
    ) -> Self {
        let mut ranked: Vec<RankedPost> = posts
            .iter()
            .map(|post| RankedPost {
                engagement_score: post.engagement_score(),
                post: post.clone(),
            })
            .collect();
        // Stable sort keeps input order among equal scores.
        ranked.sort_by(|a, b| {
            b.engagement_score
                .partial_cmp(&a.engagement_score)
                .unwrap_or(Ordering::Equal)
        });
        ranked.truncate(top_n);

        let mut platform_distribution: BTreeMap<String, usize> = BTreeMap::new();
        let mut engagement_totals: BTreeMap<String, (f64, usize)> = BTreeMap::new();
        let mut category_distribution: BTreeMap<String, usize> = BTreeMap::new();

        for post in posts {
            let platform = post
                .platform
                .map(TrendSource::as_str)
                .unwrap_or("unknown")
                .to_string();
            *platform_distribution.entry(platform.clone()).or_insert(0) += 1;
            let entry = engagement_totals.entry(platform).or_insert((0.0, 0));
            entry.0 += post.engagement_score();
            entry.1 += 1;

            let text = format!("{} {}", post.title, post.description);
            *category_distribution
                .entry(classifier.classify(&text))
                .or_insert(0) += 1;
        }

        let average_engagement = engagement_totals
            .into_iter()
            .map(|(platform, (total, count))| (platform, mean(total, count)))
            .collect();

        Self {
            top_trending_projects: ranked,
            platform_distribution,
            average_engagement,
            category_distribution,
            total_projects_analyzed: posts.len(),
            date_analyzed: at,
        }
    }
}

fn mean(total: f64, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        total / count as f64
    }
}

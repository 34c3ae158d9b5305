use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use contentflow::record::{ContentItem, PageContent};
use contentflow::{AnalysisRequest, ContentAnalysis, ContentMetrics, ContentType, Platform, Signals};

#[derive(Debug, Deserialize)]
pub struct ApiAnalysisRequest {
    pub text: Option<String>,
    pub content_type: Option<String>,
    pub platforms: Option<Vec<String>>,
    pub url: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub keywords: Option<String>,
}

impl ApiAnalysisRequest {
    /// Validated request plus the page metadata when a url was supplied.
    pub fn into_parts(self) -> Result<(AnalysisRequest, Option<PageContent>), String> {
        let text = self.text.unwrap_or_default().trim().to_string();
        if text.is_empty() {
            return Err("text is required".to_string());
        }

        let content_type = match self.content_type.as_deref() {
            Some(value) => ContentType::from_str(value)
                .ok_or_else(|| format!("invalid content type: {}", value))?,
            None => ContentType::Post,
        };

        let platforms = match self.platforms {
            Some(platforms) if !platforms.is_empty() => platforms,
            Some(_) => return Err("at least one platform is required".to_string()),
            None => Platform::ALL.iter().map(|p| p.as_str().to_string()).collect(),
        };

        let page = self
            .url
            .filter(|url| !url.trim().is_empty())
            .map(|url| PageContent {
                url,
                text: text.clone(),
                title: self.title,
                description: self.description,
                keywords: self.keywords,
            });

        Ok((AnalysisRequest::new(text, content_type, platforms), page))
    }
}

#[derive(Debug, Serialize)]
pub struct ApiAnalysisResponse {
    pub document_id: String,
    pub category: String,
    pub metrics: ContentMetrics,
    pub platform_scores: BTreeMap<Platform, f64>,
    pub signals: Signals,
    pub record: Option<ContentItem>,
    pub warnings: Vec<String>,
}

impl ApiAnalysisResponse {
    pub fn from_analysis(analysis: ContentAnalysis) -> Self {
        let warnings = ignored_warnings(&analysis.ignored_platforms);
        Self {
            document_id: analysis.document_id,
            category: analysis.category,
            metrics: analysis.metrics,
            platform_scores: analysis.platform_scores,
            signals: analysis.signals,
            record: None,
            warnings,
        }
    }

    pub fn with_record(mut self, record: ContentItem) -> Self {
        self.record = Some(record);
        self
    }
}

fn ignored_warnings(ignored: &[String]) -> Vec<String> {
    ignored
        .iter()
        .map(|platform| format!("ignored unrecognized platform: {}", platform))
        .collect()
}

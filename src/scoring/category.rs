use crate::config::{CategoryConfig, CategoryRule};
use crate::count_present;

#[derive(Debug, Clone)]
pub struct CategoryClassifier {
    rules: Vec<CategoryRule>,
    fallback: String,
}

impl CategoryClassifier {
    pub fn new(config: CategoryConfig) -> Self {
        Self {
            rules: config.rules,
            fallback: config.fallback,
        }
    }

    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    /// Keyword hits per category, in declaration order.
    pub fn scores(&self, text: &str) -> Vec<(&str, usize)> {
        let lowercase = text.to_lowercase();
        self.rules
            .iter()
            .map(|rule| (rule.label.as_str(), count_present(&lowercase, &rule.keywords)))
            .collect()
    }

    pub fn classify(&self, text: &str) -> String {
        let mut best: Option<(&str, usize)> = None;
        for (label, hits) in self.scores(text) {
            // Strictly greater keeps the first declared category on ties.
            if hits > 0 && best.map_or(true, |(_, top)| hits > top) {
                best = Some((label, hits));
            }
        }
        best.map(|(label, _)| label.to_string())
            .unwrap_or_else(|| self.fallback.clone())
    }
}

impl Default for CategoryClassifier {
    fn default() -> Self {
        Self::new(CategoryConfig::default())
    }
}

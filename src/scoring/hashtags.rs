use crate::config::HashtagConfig;
use crate::lexical::LexicalIndex;
use crate::ContentType;

#[derive(Debug, Clone)]
pub struct HashtagGenerator {
    config: HashtagConfig,
}

impl HashtagGenerator {
    pub fn new(config: HashtagConfig) -> Self {
        Self { config }
    }

    /// Salient terms of `text` as `#term`, followed by the content type's
    /// static tags, capped at `max_tags`. Reads `index` without mutating it.
    pub fn generate(&self, text: &str, content_type: ContentType, index: &LexicalIndex) -> Vec<String> {
        let mut tags: Vec<String> = index
            .salient_terms(text, self.config.salient_terms, &self.config.stop_words)
            .into_iter()
            .map(|(term, _)| format!("#{}", term))
            .collect();

        let statics = self
            .config
            .templates
            .get(content_type.as_str())
            .map(Vec::as_slice)
            .unwrap_or_default();
        for tag in statics.iter().take(self.config.static_tags) {
            if !tags.contains(tag) {
                tags.push(tag.clone());
            }
        }

        tags.truncate(self.config.max_tags);
        tags
    }
}

impl Default for HashtagGenerator {
    fn default() -> Self {
        Self::new(HashtagConfig::default())
    }
}

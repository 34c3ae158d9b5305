//! Frequency-weighted term index over previously analyzed documents.
//!
//! Vectors are TF-IDF weighted with a smoothed IDF computed over the whole
//! indexed corpus, then L2-normalized, so the dot product of two vectors is
//! their cosine similarity. The vocabulary grows with every `add`.

use std::cmp::Ordering;
use std::collections::{HashMap, VecDeque};

use crate::error::{AnalysisError, Result};

type TermCounts = HashMap<String, usize>;

#[derive(Debug, Clone)]
struct IndexedDocument {
    id: String,
    terms: TermCounts,
}

#[derive(Debug, Clone, Default)]
pub struct LexicalIndex {
    documents: VecDeque<IndexedDocument>,
    document_frequency: HashMap<String, usize>,
    retention: Option<usize>,
}

impl LexicalIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index that evicts its oldest document once it holds more than
    /// `retention` documents. `None` or 0 keeps every document.
    pub fn with_retention(retention: Option<usize>) -> Self {
        Self {
            retention: retention.filter(|value| *value > 0),
            ..Self::default()
        }
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn retention(&self) -> Option<usize> {
        self.retention
    }

    pub fn vocabulary_size(&self) -> usize {
        self.document_frequency.len()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.documents.iter().any(|document| document.id == id)
    }

    pub fn reset(&mut self) {
        self.documents.clear();
        self.document_frequency.clear();
    }

    /// Stores `text` under `id`, replacing any document already held under it.
    pub fn add(&mut self, id: impl Into<String>, text: &str) {
        let id = id.into();
        if let Some(position) = self.documents.iter().position(|document| document.id == id) {
            if let Some(previous) = self.documents.remove(position) {
                self.forget(&previous.terms);
            }
        }

        let terms = term_counts(text);
        for term in terms.keys() {
            *self.document_frequency.entry(term.clone()).or_insert(0) += 1;
        }
        self.documents.push_back(IndexedDocument { id, terms });

        if let Some(retention) = self.retention {
            while self.documents.len() > retention {
                if let Some(evicted) = self.documents.pop_front() {
                    self.forget(&evicted.terms);
                }
            }
        }
    }

    /// Highest cosine similarity between `text` and any indexed document.
    ///
    /// An empty index yields 0.0. A text with no indexable terms cannot be
    /// compared and yields `VectorizationFailure`.
    pub fn similarity(&self, text: &str) -> Result<f64> {
        if self.documents.is_empty() {
            return Ok(0.0);
        }

        let query_terms = term_counts(text);
        if query_terms.is_empty() {
            return Err(AnalysisError::VectorizationFailure(
                "text contains no indexable terms".to_string(),
            ));
        }

        let query = self.weighted_vector(&query_terms, 0);
        let mut best = 0.0f64;
        for document in &self.documents {
            let similarity = if document.terms == query_terms {
                1.0
            } else {
                dot(&query, &self.weighted_vector(&document.terms, 0))
            };
            best = best.max(similarity);
        }

        Ok(best.max(0.0).min(1.0))
    }

    /// Terms of `text` ranked by TF-IDF weight, as if `text` were the next
    /// document in the corpus. The index itself is left untouched.
    pub fn salient_terms(&self, text: &str, limit: usize, stop_words: &[String]) -> Vec<(String, f64)> {
        let counts = term_counts(text);
        let weights = self.weighted_vector(&counts, 1);

        let mut ranked: Vec<(String, f64)> = weights
            .into_iter()
            .filter(|(term, _)| {
                !term.chars().all(|c| c.is_ascii_digit())
                    && !stop_words.iter().any(|stop| stop.as_str() == *term)
            })
            .map(|(term, weight)| (term.to_string(), weight))
            .collect();

        ranked.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.0.cmp(&b.0))
        });
        ranked.truncate(limit);
        ranked
    }

    fn forget(&mut self, terms: &TermCounts) {
        for term in terms.keys() {
            if let Some(count) = self.document_frequency.get_mut(term) {
                *count = count.saturating_sub(1);
                if *count == 0 {
                    self.document_frequency.remove(term);
                }
            }
        }
    }

    /// `pending` counts documents not yet in the index that contain every
    /// term of `counts` (1 when scoring a document as if it were added).
    fn weighted_vector<'a>(&self, counts: &'a TermCounts, pending: usize) -> HashMap<&'a str, f64> {
        let corpus = (self.documents.len() + pending) as f64;
        let mut vector: HashMap<&str, f64> = counts
            .iter()
            .map(|(term, count)| {
                let df = self.document_frequency.get(term).copied().unwrap_or(0) + pending;
                let idf = ((1.0 + corpus) / (1.0 + df as f64)).ln() + 1.0;
                (term.as_str(), *count as f64 * idf)
            })
            .collect();

        let norm = vector.values().map(|w| w * w).sum::<f64>().sqrt();
        if norm > 0.0 {
            for weight in vector.values_mut() {
                *weight /= norm;
            }
        }
        vector
    }
}

/// Lower-cased word tokens of at least two characters.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|token| token.chars().count() >= 2)
        .map(str::to_string)
        .collect()
}

fn term_counts(text: &str) -> TermCounts {
    let mut counts = TermCounts::new();
    for token in tokenize(text) {
        *counts.entry(token).or_insert(0) += 1;
    }
    counts
}

fn dot(a: &HashMap<&str, f64>, b: &HashMap<&str, f64>) -> f64 {
    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    small
        .iter()
        .filter_map(|(term, weight)| large.get(*term).map(|other| weight * other))
        .sum()
}

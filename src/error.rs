use thiserror::Error;

/// Errors surfaced by the analysis engine.
///
/// Only `InvalidInput` normally reaches callers of [`crate::ContentAnalyzer`];
/// the other scoring variants are recovered inside the engine and logged.
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// Empty text, an empty platform list, or an unparseable label.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The lexical model produced no usable terms for a document.
    #[error("vectorization failed: {0}")]
    VectorizationFailure(String),

    /// A ratio was requested over an empty denominator.
    #[error("degenerate computation: {0}")]
    ComputationDegenerate(&'static str),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, AnalysisError>;

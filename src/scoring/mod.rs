mod keyword;

pub use keyword::KeywordScorer;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScoreError {
    #[error("Blank keyword cannot be scored")]
    BlankKeyword,

    #[error("Score computation produced a non-finite value")]
    NonFinite,
}

/// Relevance scoring capability of a curation deployment.
///
/// Whether scoring is available is decided at configuration time, not per
/// call: a `Disabled` deployment serves relevance requests with a time-ordered
/// fallback instead of erroring.
#[derive(Debug, Clone, Default)]
pub enum RelevanceScorer {
    #[default]
    Disabled,
    Keyword(KeywordScorer),
}

impl RelevanceScorer {
    pub fn keyword() -> Self {
        RelevanceScorer::Keyword(KeywordScorer::new())
    }
}

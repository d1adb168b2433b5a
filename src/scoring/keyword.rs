use crate::scoring::ScoreError;

/// Weight granted to a keyword's first occurrence.
const BASE_WEIGHT: f64 = 1.0;
/// Extra weight per repeat occurrence.
const REPEAT_WEIGHT: f64 = 0.25;
/// Ceiling on a single keyword's contribution.
const MAX_KEYWORD_WEIGHT: f64 = 1.5;

/// Scores text against a keyword set by counting case-insensitive,
/// non-overlapping substring occurrences. Partial-word matches count
/// ("learn" matches inside "learning").
#[derive(Debug, Clone, Default)]
pub struct KeywordScorer;

impl KeywordScorer {
    pub fn new() -> Self {
        Self
    }

    /// Relevance of `text` to `keywords`, in [0, 1].
    ///
    /// An empty keyword list scores 0.0. Errors are reported, not hidden:
    /// the curation pipeline decides what a failed score degrades to.
    pub fn score(&self, text: &str, keywords: &[String]) -> Result<f64, ScoreError> {
        if keywords.is_empty() {
            return Ok(0.0);
        }

        let haystack = text.to_lowercase();
        let mut total = 0.0;

        for keyword in keywords {
            let needle = keyword.trim().to_lowercase();
            if needle.is_empty() {
                return Err(ScoreError::BlankKeyword);
            }

            let occurrences = haystack.matches(&needle).count();
            if occurrences > 0 {
                let weight = BASE_WEIGHT + (occurrences as f64 - 1.0) * REPEAT_WEIGHT;
                total += weight.min(MAX_KEYWORD_WEIGHT);
            }
        }

        let score = (total / keywords.len() as f64).clamp(0.0, 1.0);
        if !score.is_finite() {
            return Err(ScoreError::NonFinite);
        }

        Ok(score)
    }
}

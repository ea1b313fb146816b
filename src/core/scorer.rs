/// Lexicon-based sentiment scorer — per-text, batch, and trend analysis.
use thiserror::Error;

use crate::core::keywords;
use crate::core::lexicon::SentimentLexicon;
use crate::schema::sentiment::{SentimentLabel, SentimentResult, Trend, TrendReport};

#[derive(Debug, Error)]
pub enum ScorerError {
    #[error("trend analysis requires at least 2 texts, got {0}")]
    NotEnoughSamples(usize),
}

/// Default score threshold separating positive/negative from neutral.
pub const DEFAULT_LABEL_THRESHOLD: f64 = 0.1;

/// Minimum half-average delta before a trend counts as improving/declining.
const TREND_THRESHOLD: f64 = 0.1;

/// Classifies free text into a polarity score using keyword lexicons.
///
/// Each scorer owns its lexicon, so differently configured scorers (e.g.
/// per-locale) stay independent. All methods are deterministic and never
/// fail on malformed text — empty input is a valid case that scores neutral.
#[derive(Debug, Clone)]
pub struct SentimentScorer {
    lexicon: SentimentLexicon,
    threshold: f64,
}

impl Default for SentimentScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl SentimentScorer {
    /// A scorer with the default lexicon and label threshold.
    pub fn new() -> Self {
        Self {
            lexicon: SentimentLexicon::default(),
            threshold: DEFAULT_LABEL_THRESHOLD,
        }
    }

    /// A scorer with a custom label threshold.
    pub fn with_threshold(threshold: f64) -> Self {
        Self {
            lexicon: SentimentLexicon::default(),
            threshold,
        }
    }

    /// A scorer over a caller-supplied lexicon.
    pub fn with_lexicon(lexicon: SentimentLexicon, threshold: f64) -> Self {
        Self { lexicon, threshold }
    }

    /// Score one text.
    ///
    /// Tokens are matched exactly (lower-cased, no stemming, no phrases).
    /// `score = (P - N) / (P + N)`, 0 when nothing matches; `magnitude` is
    /// the matched fraction of all tokens; `confidence = min(2 * magnitude, 1)`.
    pub fn analyze(&self, text: &str) -> SentimentResult {
        if text.trim().is_empty() {
            return SentimentResult::neutral();
        }

        let tokens = keywords::tokenize(text);
        if tokens.is_empty() {
            // Punctuation-only input tokenizes to nothing.
            return SentimentResult::neutral();
        }

        let mut positive = 0usize;
        let mut negative = 0usize;
        for token in &tokens {
            if self.lexicon.is_positive(token) {
                positive += 1;
            } else if self.lexicon.is_negative(token) {
                negative += 1;
            }
        }

        let total = positive + negative;
        let score = if total == 0 {
            0.0
        } else {
            (positive as f64 - negative as f64) / total as f64
        };
        let magnitude = total as f64 / tokens.len() as f64;
        let confidence = (magnitude * 2.0).min(1.0);

        let label = if score > self.threshold {
            SentimentLabel::Positive
        } else if score < -self.threshold {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        };

        SentimentResult {
            score,
            magnitude,
            label,
            confidence,
        }
    }

    /// Score a sequence of texts, preserving order and length.
    pub fn analyze_batch<S: AsRef<str>>(&self, texts: &[S]) -> Vec<SentimentResult> {
        texts.iter().map(|t| self.analyze(t.as_ref())).collect()
    }

    /// Score a sequence and classify the movement between its first and
    /// second half (split at `n / 2`, so the first half is the smaller one
    /// for odd lengths).
    pub fn analyze_trend<S: AsRef<str>>(&self, texts: &[S]) -> Result<TrendReport, ScorerError> {
        if texts.len() < 2 {
            return Err(ScorerError::NotEnoughSamples(texts.len()));
        }

        let data = self.analyze_batch(texts);
        let scores: Vec<f64> = data.iter().map(|r| r.score).collect();

        let mid = scores.len() / 2;
        let first_avg = mean(&scores[..mid]);
        let second_avg = mean(&scores[mid..]);

        let trend = if second_avg - first_avg > TREND_THRESHOLD {
            Trend::Improving
        } else if second_avg - first_avg < -TREND_THRESHOLD {
            Trend::Declining
        } else {
            Trend::Stable
        };

        Ok(TrendReport {
            average: mean(&scores),
            trend,
            data,
        })
    }

    /// Grow the positive lexicon. Words are lower-cased; repeats are no-ops.
    pub fn add_positive_words<I, S>(&mut self, words: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.lexicon.add_positive(words);
    }

    /// Grow the negative lexicon. Words are lower-cased; repeats are no-ops.
    pub fn add_negative_words<I, S>(&mut self, words: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.lexicon.add_negative(words);
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

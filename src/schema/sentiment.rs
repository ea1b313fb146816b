use serde::{Deserialize, Serialize};

/// Polarity classification of a scored text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl SentimentLabel {
    /// Returns the label string (e.g., "positive").
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Negative => "negative",
            Self::Neutral => "neutral",
        }
    }
}

/// The result of scoring one text. Produced fresh per call.
///
/// `score` is in [-1, 1]; `magnitude` is the fraction of tokens that matched
/// any sentiment word; `confidence` is in [0, 1].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentResult {
    pub score: f64,
    pub magnitude: f64,
    pub label: SentimentLabel,
    pub confidence: f64,
}

impl SentimentResult {
    /// The neutral zero result returned for empty or unmatched input.
    pub fn neutral() -> Self {
        Self {
            score: 0.0,
            magnitude: 0.0,
            label: SentimentLabel::Neutral,
            confidence: 0.0,
        }
    }
}

/// Direction of sentiment movement across a sequence of texts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Improving,
    Declining,
    Stable,
}

impl Trend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Improving => "improving",
            Self::Declining => "declining",
            Self::Stable => "stable",
        }
    }
}

/// Trend analysis over a sequence of texts.
///
/// `average` is the unweighted mean of all per-text scores, independent of
/// the half-split classification that produces `trend`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendReport {
    pub average: f64,
    pub trend: Trend,
    pub data: Vec<SentimentResult>,
}

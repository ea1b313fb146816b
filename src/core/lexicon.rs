/// Sentiment lexicon — the positive/negative word sets behind the scorer.
use rustc_hash::FxHashSet;

/// Words shipped in the default positive lexicon.
const DEFAULT_POSITIVE: &[&str] = &[
    "good",
    "great",
    "excellent",
    "amazing",
    "love",
    "wonderful",
    "happy",
    "fantastic",
    "pleased",
    "helpful",
];

/// Words shipped in the default negative lexicon.
const DEFAULT_NEGATIVE: &[&str] = &[
    "bad",
    "terrible",
    "awful",
    "hate",
    "poor",
    "worst",
    "angry",
    "frustrated",
    "disappointed",
    "useless",
];

/// Two lower-cased word sets, one per polarity. Owned exclusively by one
/// scorer instance; lexicons only grow — there is no removal operation.
#[derive(Debug, Clone)]
pub struct SentimentLexicon {
    positive: FxHashSet<String>,
    negative: FxHashSet<String>,
}

impl Default for SentimentLexicon {
    fn default() -> Self {
        Self {
            positive: DEFAULT_POSITIVE.iter().map(|w| w.to_string()).collect(),
            negative: DEFAULT_NEGATIVE.iter().map(|w| w.to_string()).collect(),
        }
    }
}

impl SentimentLexicon {
    /// An empty lexicon with no seed words.
    pub fn empty() -> Self {
        Self {
            positive: FxHashSet::default(),
            negative: FxHashSet::default(),
        }
    }

    /// Insert words into the positive set. Lower-cased; repeats are no-ops.
    pub fn add_positive<I, S>(&mut self, words: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for w in words {
            self.positive.insert(w.as_ref().to_lowercase());
        }
    }

    /// Insert words into the negative set. Lower-cased; repeats are no-ops.
    pub fn add_negative<I, S>(&mut self, words: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for w in words {
            self.negative.insert(w.as_ref().to_lowercase());
        }
    }

    /// Exact match against the positive set. Callers pass lower-cased tokens.
    pub fn is_positive(&self, token: &str) -> bool {
        self.positive.contains(token)
    }

    /// Exact match against the negative set. Callers pass lower-cased tokens.
    pub fn is_negative(&self, token: &str) -> bool {
        self.negative.contains(token)
    }

    pub fn positive_len(&self) -> usize {
        self.positive.len()
    }

    pub fn negative_len(&self) -> usize {
        self.negative.len()
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Who produced a transcript message: the engine itself or a scenario role
/// (the user's or an NPC's).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    System,
    Role(String),
}

impl Speaker {
    /// Returns true if this speaker is the given role id.
    pub fn is_role(&self, role_id: &str) -> bool {
        matches!(self, Speaker::Role(id) if id == role_id)
    }
}

/// One entry in a session transcript. Transcripts are append-only and
/// ordering is significant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioMessage {
    pub speaker: Speaker,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl ScenarioMessage {
    pub fn new(speaker: Speaker, message: impl Into<String>) -> Self {
        Self {
            speaker,
            message: message.into(),
            timestamp: Utc::now(),
        }
    }
}

/// The graded outcome of a finished session. Computed once at session end;
/// the engine retains no copy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioFeedback {
    /// 0..=100.
    pub score: u8,
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
    pub overall_comment: String,
}

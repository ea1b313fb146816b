/// Feedback synthesis — grading a finished session transcript.
use chrono::{DateTime, Utc};

use crate::schema::message::{ScenarioFeedback, ScenarioMessage};
use crate::schema::scenario::Scenario;

pub(crate) const STRENGTH_PARTICIPATION: &str = "Active participation and engagement";
pub(crate) const STRENGTH_QUESTIONS: &str = "Asking clarifying questions";
pub(crate) const STRENGTH_DETAIL: &str = "Providing detailed responses";
pub(crate) const IMPROVE_PARTICIPATION: &str = "Increase participation and interaction";
pub(crate) const IMPROVE_QUESTIONS: &str = "Ask more questions to clarify understanding";

/// User messages needed for the participation component.
const PARTICIPATION_FLOOR: usize = 5;
/// User messages standing in for objective completion.
const OBJECTIVES_FLOOR: usize = 3;
/// Message length beyond which a response counts as detailed.
const DETAILED_LEN: usize = 100;

/// Grade the user's participation in a finished session.
///
/// Score is additive with capped components: 30 for participation, 30 for
/// spending at least half the scenario's nominal duration, 40 for the
/// objectives proxy (at least 3 user messages).
pub(crate) fn synthesize(
    scenario: &Scenario,
    user_role_id: &str,
    messages: &[ScenarioMessage],
    started_at: DateTime<Utc>,
    now: DateTime<Utc>,
) -> ScenarioFeedback {
    let user_messages: Vec<&ScenarioMessage> = messages
        .iter()
        .filter(|m| m.speaker.is_role(user_role_id))
        .collect();

    let elapsed_minutes = (now - started_at).num_seconds() as f64 / 60.0;

    let mut score: u8 = 0;
    if user_messages.len() >= PARTICIPATION_FLOOR {
        score += 30;
    }
    if elapsed_minutes >= scenario.duration_minutes as f64 * 0.5 {
        score += 30;
    }
    if user_messages.len() >= OBJECTIVES_FLOOR {
        score += 40;
    }

    let asked_question = user_messages.iter().any(|m| m.message.contains('?'));

    let mut strengths = Vec::new();
    if user_messages.len() >= PARTICIPATION_FLOOR {
        strengths.push(STRENGTH_PARTICIPATION.to_string());
    }
    if asked_question {
        strengths.push(STRENGTH_QUESTIONS.to_string());
    }
    if user_messages.iter().any(|m| m.message.len() > DETAILED_LEN) {
        strengths.push(STRENGTH_DETAIL.to_string());
    }

    let mut improvements = Vec::new();
    if user_messages.len() < PARTICIPATION_FLOOR {
        improvements.push(IMPROVE_PARTICIPATION.to_string());
    }
    if !asked_question {
        improvements.push(IMPROVE_QUESTIONS.to_string());
    }

    let overall_comment = match score {
        80..=100 => "Excellent work! You engaged thoroughly with the scenario.",
        60..=79 => "Good job! Solid participation with room to go deeper.",
        40..=59 => "Fair effort. More active engagement would strengthen the practice.",
        _ => "Keep practicing! Try to participate more actively in the scenario.",
    }
    .to_string();

    ScenarioFeedback {
        score,
        strengths,
        improvements,
        overall_comment,
    }
}

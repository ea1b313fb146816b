/// Role-play session engine — scenario state machine and NPC reply synthesis.
///
/// Wires together scenario validation, transcript management, rule-based
/// counterpart replies, and end-of-session feedback.
use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use thiserror::Error;

use crate::core::feedback;
use crate::core::keywords;
use crate::schema::message::{ScenarioFeedback, ScenarioMessage, Speaker};
use crate::schema::scenario::{Role, Scenario};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("role '{role_id}' is not defined in scenario '{scenario_id}'")]
    InvalidRole {
        role_id: String,
        scenario_id: String,
    },
    #[error("no active session")]
    NoActiveSession,
    #[error("a session for scenario '{0}' is already active")]
    SessionActive(String),
}

/// What `start_scenario` does when a session is already active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RestartPolicy {
    /// Discard the in-progress session and start fresh.
    #[default]
    Replace,
    /// Fail with `SessionError::SessionActive`; the caller must call
    /// `end_scenario` first.
    Reject,
}

/// The mutable run-time state of one in-progress scenario walkthrough.
#[derive(Debug, Clone)]
struct Session {
    scenario: Scenario,
    user_role_id: String,
    messages: Vec<ScenarioMessage>,
    started_at: DateTime<Utc>,
}

/// Idle-or-active, nothing in between. Ending a session is an atomic
/// transition that both computes feedback and returns to `Idle`.
#[derive(Debug, Clone)]
enum SessionState {
    Idle,
    Active(Session),
}

/// Drives a scripted multi-role scenario. Built via `RolePlayEngine::builder()`.
///
/// Each engine instance holds at most one active session; concurrent use of
/// one instance requires external serialization. NPC selection is the only
/// nondeterminism, and it is reproducible from the builder seed: each turn
/// draws from a `StdRng` seeded from the engine seed plus a turn counter.
#[derive(Debug)]
pub struct RolePlayEngine {
    state: SessionState,
    restart_policy: RestartPolicy,
    seed: u64,
    turn_count: u64,
}

/// Builder for constructing a `RolePlayEngine`.
pub struct RolePlayEngineBuilder {
    seed: u64,
    restart_policy: RestartPolicy,
}

impl Default for RolePlayEngine {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl RolePlayEngine {
    pub fn builder() -> RolePlayEngineBuilder {
        RolePlayEngineBuilder {
            seed: 0,
            restart_policy: RestartPolicy::default(),
        }
    }

    /// Begin a session for `scenario`, playing as `user_role_id`.
    ///
    /// Fails with `InvalidRole` (engine untouched) if the scenario does not
    /// define that role. With `RestartPolicy::Reject`, fails with
    /// `SessionActive` if a session is already running; with `Replace` the
    /// previous session is discarded without preserving its transcript.
    pub fn start_scenario(
        &mut self,
        scenario: Scenario,
        user_role_id: &str,
    ) -> Result<(), SessionError> {
        let role = scenario
            .role(user_role_id)
            .ok_or_else(|| SessionError::InvalidRole {
                role_id: user_role_id.to_string(),
                scenario_id: scenario.id.clone(),
            })?;

        if let SessionState::Active(ref session) = self.state {
            if self.restart_policy == RestartPolicy::Reject {
                return Err(SessionError::SessionActive(session.scenario.id.clone()));
            }
        }

        let messages = vec![
            ScenarioMessage::new(
                Speaker::System,
                format!("Welcome to the scenario: {}.", scenario.title),
            ),
            ScenarioMessage::new(Speaker::System, format!("You are playing as: {}.", role.name)),
            ScenarioMessage::new(
                Speaker::System,
                format!("Your objectives: {}", role.objectives.join(", ")),
            ),
        ];

        self.state = SessionState::Active(Session {
            user_role_id: user_role_id.to_string(),
            scenario,
            messages,
            started_at: Utc::now(),
        });
        Ok(())
    }

    /// Record a user message and synthesize the counterpart's reply.
    ///
    /// One NPC is picked uniformly at random among the non-user roles; if the
    /// scenario has none, the user message is recorded and `Ok(None)` is
    /// returned. The returned reference is the appended NPC reply.
    pub fn send_message(
        &mut self,
        message: &str,
    ) -> Result<Option<&ScenarioMessage>, SessionError> {
        let turn = self.turn_count;
        let seed = self.seed;
        let session = match self.state {
            SessionState::Active(ref mut s) => s,
            SessionState::Idle => return Err(SessionError::NoActiveSession),
        };
        self.turn_count += 1;

        session.messages.push(ScenarioMessage::new(
            Speaker::Role(session.user_role_id.clone()),
            message,
        ));

        let counterparts = session.scenario.counterpart_roles(&session.user_role_id);
        if counterparts.is_empty() {
            return Ok(None);
        }

        let mut rng = StdRng::seed_from_u64(seed.wrapping_add(turn.wrapping_mul(7919)));
        // Checked non-empty above.
        let Some(npc) = counterparts.choose(&mut rng).copied() else {
            return Ok(None);
        };

        let reply = synthesize_reply(message, npc);
        let npc_id = npc.id.clone();
        session
            .messages
            .push(ScenarioMessage::new(Speaker::Role(npc_id), reply));
        Ok(session.messages.last())
    }

    /// Grade the session and reset to idle. The feedback is the only durable
    /// output; the transcript is discarded.
    pub fn end_scenario(&mut self) -> Result<ScenarioFeedback, SessionError> {
        self.end_scenario_at(Utc::now())
    }

    // Clock seam: feedback's elapsed-time component is computed against the
    // supplied instant so the duration band can be tested without sleeping.
    fn end_scenario_at(&mut self, now: DateTime<Utc>) -> Result<ScenarioFeedback, SessionError> {
        let session = match self.state {
            SessionState::Active(ref s) => s,
            SessionState::Idle => return Err(SessionError::NoActiveSession),
        };

        let report = feedback::synthesize(
            &session.scenario,
            &session.user_role_id,
            &session.messages,
            session.started_at,
            now,
        );
        self.state = SessionState::Idle;
        Ok(report)
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, SessionState::Active(_))
    }

    /// The scenario of the active session, if any.
    pub fn current_scenario(&self) -> Option<&Scenario> {
        match self.state {
            SessionState::Active(ref s) => Some(&s.scenario),
            SessionState::Idle => None,
        }
    }

    /// The role the user is playing in the active session, if any.
    pub fn user_role_id(&self) -> Option<&str> {
        match self.state {
            SessionState::Active(ref s) => Some(s.user_role_id.as_str()),
            SessionState::Idle => None,
        }
    }

    /// The transcript so far. Empty when idle.
    pub fn messages(&self) -> &[ScenarioMessage] {
        match self.state {
            SessionState::Active(ref s) => &s.messages,
            SessionState::Idle => &[],
        }
    }
}

impl RolePlayEngineBuilder {
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn restart_policy(mut self, policy: RestartPolicy) -> Self {
        self.restart_policy = policy;
        self
    }

    pub fn build(self) -> RolePlayEngine {
        RolePlayEngine {
            state: SessionState::Idle,
            restart_policy: self.restart_policy,
            seed: self.seed,
            turn_count: 0,
        }
    }
}

/// Rule-based counterpart reply. Deliberately a fixed-priority keyword stub,
/// not a generative model; the rule order is part of the contract.
fn synthesize_reply(user_message: &str, npc: &Role) -> String {
    if keywords::contains_any(user_message, &["hello", "hi"]) {
        return format!("Hello! I'm {}. Let's begin whenever you're ready.", npc.name);
    }
    if keywords::contains_any(user_message, &["help", "assist"]) {
        let objective = npc
            .objectives
            .first()
            .map(String::as_str)
            .unwrap_or(npc.description.as_str());
        return format!("Happy to help. My first priority here is: {}.", objective);
    }
    if keywords::contains_any(user_message, &["question", "?"]) {
        return "That's a fair question. Let me give you my perspective on it.".to_string();
    }
    format!("I see. For context: {}", npc.description)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    use crate::schema::scenario::Difficulty;

    fn make_scenario(npc_count: usize) -> Scenario {
        let mut roles = vec![Role {
            id: "trainee".to_string(),
            name: "Trainee".to_string(),
            description: "The person practicing.".to_string(),
            objectives: vec!["Run the drill".to_string()],
        }];
        for i in 0..npc_count {
            roles.push(Role {
                id: format!("npc-{i}"),
                name: format!("Counterpart {i}"),
                description: format!("Counterpart number {i}."),
                objectives: vec![format!("Objective {i}")],
            });
        }
        Scenario {
            id: "drill".to_string(),
            title: "Practice Drill".to_string(),
            description: "A short drill.".to_string(),
            roles,
            difficulty: Difficulty::Beginner,
            duration_minutes: 10,
        }
    }

    #[test]
    fn start_seeds_three_system_messages() {
        let mut engine = RolePlayEngine::default();
        engine.start_scenario(make_scenario(1), "trainee").unwrap();

        let msgs = engine.messages();
        assert_eq!(msgs.len(), 3);
        assert!(msgs.iter().all(|m| m.speaker == Speaker::System));
        assert!(msgs[0].message.contains("Practice Drill"));
        assert!(msgs[1].message.contains("Trainee"));
        assert!(msgs[2].message.contains("Run the drill"));
    }

    #[test]
    fn objectives_line_joins_with_comma() {
        let mut scenario = make_scenario(0);
        scenario.roles[0].objectives =
            vec!["First".to_string(), "Second".to_string(), "Third".to_string()];
        let mut engine = RolePlayEngine::default();
        engine.start_scenario(scenario, "trainee").unwrap();
        assert!(engine.messages()[2]
            .message
            .contains("First, Second, Third"));
    }

    #[test]
    fn invalid_role_leaves_engine_idle() {
        let mut engine = RolePlayEngine::default();
        let err = engine
            .start_scenario(make_scenario(1), "director")
            .unwrap_err();
        assert!(matches!(err, SessionError::InvalidRole { .. }));
        assert!(!engine.is_active());
        assert!(engine.messages().is_empty());
    }

    #[test]
    fn invalid_role_does_not_disturb_active_session() {
        let mut engine = RolePlayEngine::default();
        engine.start_scenario(make_scenario(1), "trainee").unwrap();
        engine.send_message("hello").unwrap();
        let before = engine.messages().len();

        let err = engine
            .start_scenario(make_scenario(1), "director")
            .unwrap_err();
        assert!(matches!(err, SessionError::InvalidRole { .. }));
        assert!(engine.is_active());
        assert_eq!(engine.messages().len(), before);
    }

    #[test]
    fn send_message_requires_active_session() {
        let mut engine = RolePlayEngine::default();
        assert!(matches!(
            engine.send_message("hello"),
            Err(SessionError::NoActiveSession)
        ));
    }

    #[test]
    fn end_scenario_requires_active_session() {
        let mut engine = RolePlayEngine::default();
        assert!(matches!(
            engine.end_scenario(),
            Err(SessionError::NoActiveSession)
        ));
    }

    #[test]
    fn send_message_appends_user_then_npc() {
        let mut engine = RolePlayEngine::default();
        engine.start_scenario(make_scenario(1), "trainee").unwrap();

        let reply = engine.send_message("hello there").unwrap();
        assert!(reply.is_some());
        let msgs = engine.messages();
        assert_eq!(msgs.len(), 5);
        assert!(msgs[3].speaker.is_role("trainee"));
        assert_eq!(msgs[3].message, "hello there");
        assert!(msgs[4].speaker.is_role("npc-0"));
    }

    #[test]
    fn no_counterparts_means_no_reply() {
        let mut engine = RolePlayEngine::default();
        engine.start_scenario(make_scenario(0), "trainee").unwrap();
        let reply = engine.send_message("hello").unwrap();
        assert!(reply.is_none());
        assert_eq!(engine.messages().len(), 4);
    }

    #[test]
    fn reply_rule_priority_order() {
        let npc = Role {
            id: "agent".to_string(),
            name: "Agent".to_string(),
            description: "A support agent.".to_string(),
            objectives: vec!["Resolve the ticket".to_string()],
        };

        // Greeting wins over everything else.
        assert!(synthesize_reply("hi, can you help?", &npc).contains("I'm Agent"));
        // Help beats the question rule.
        assert!(synthesize_reply("please assist, one question?", &npc)
            .contains("Resolve the ticket"));
        // Question rule fires on the keyword or the mark.
        assert!(synthesize_reply("a question about billing", &npc).contains("fair question"));
        assert!(synthesize_reply("billing broke again?", &npc).contains("fair question"));
        // Fallback quotes the description.
        assert!(synthesize_reply("the weather is nice", &npc).contains("A support agent."));
    }

    #[test]
    fn reply_help_without_objectives_falls_back_to_description() {
        let npc = Role {
            id: "agent".to_string(),
            name: "Agent".to_string(),
            description: "A support agent.".to_string(),
            objectives: vec![],
        };
        assert!(synthesize_reply("help me out", &npc).contains("A support agent."));
    }

    #[test]
    fn npc_selection_deterministic_per_seed() {
        let run = |seed: u64| -> Vec<String> {
            let mut engine = RolePlayEngine::builder().seed(seed).build();
            engine.start_scenario(make_scenario(4), "trainee").unwrap();
            (0..8)
                .map(|_| {
                    let reply = engine.send_message("just checking in").unwrap().unwrap();
                    match &reply.speaker {
                        Speaker::Role(id) => id.clone(),
                        Speaker::System => unreachable!(),
                    }
                })
                .collect()
        };

        assert_eq!(run(42), run(42));

        let mut found_different = false;
        for seed in 0..20 {
            if run(seed) != run(42) {
                found_different = true;
                break;
            }
        }
        assert!(found_different, "Expected some seed to pick differently");
    }

    #[test]
    fn replace_policy_discards_previous_session() {
        let mut engine = RolePlayEngine::default();
        engine.start_scenario(make_scenario(1), "trainee").unwrap();
        engine.send_message("first run").unwrap();

        engine.start_scenario(make_scenario(1), "trainee").unwrap();
        // Fresh transcript: the system preamble only.
        assert_eq!(engine.messages().len(), 3);
    }

    #[test]
    fn reject_policy_requires_explicit_end() {
        let mut engine = RolePlayEngine::builder()
            .restart_policy(RestartPolicy::Reject)
            .build();
        engine.start_scenario(make_scenario(1), "trainee").unwrap();

        let err = engine
            .start_scenario(make_scenario(1), "trainee")
            .unwrap_err();
        assert!(matches!(err, SessionError::SessionActive(ref id) if id == "drill"));

        engine.end_scenario().unwrap();
        engine.start_scenario(make_scenario(1), "trainee").unwrap();
    }

    #[test]
    fn end_scenario_resets_to_idle() {
        let mut engine = RolePlayEngine::default();
        engine.start_scenario(make_scenario(1), "trainee").unwrap();
        engine.send_message("hello").unwrap();

        let feedback = engine.end_scenario().unwrap();
        assert!(feedback.score <= 100);
        assert!(!engine.is_active());
        assert!(engine.current_scenario().is_none());
        assert!(engine.user_role_id().is_none());
        assert!(engine.messages().is_empty());
        assert!(matches!(
            engine.send_message("again"),
            Err(SessionError::NoActiveSession)
        ));
    }

    #[test]
    fn duration_component_counts_at_half_nominal_time() {
        let mut engine = RolePlayEngine::default();
        engine.start_scenario(make_scenario(1), "trainee").unwrap();
        for i in 0..5 {
            engine.send_message(&format!("message {i}")).unwrap();
        }

        let started = match engine.state {
            SessionState::Active(ref s) => s.started_at,
            SessionState::Idle => unreachable!(),
        };
        let feedback = engine
            .end_scenario_at(started + Duration::minutes(5))
            .unwrap();
        // 30 participation + 30 duration + 40 objectives proxy.
        assert_eq!(feedback.score, 100);
    }
}

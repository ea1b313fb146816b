//! Converse Engine — conversational analysis for practice and feedback.
//!
//! Pairs a lexicon-based sentiment scorer (per-text polarity, batch, and
//! trend analysis) with a scripted role-play session engine that drives a
//! multi-role scenario, synthesizes counterpart replies from fixed rules,
//! and grades the user's participation at the end. Pure, synchronous
//! computation — no NLU, no model inference, no I/O.

pub mod core;
pub mod presets;
pub mod schema;

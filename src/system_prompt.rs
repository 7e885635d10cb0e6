//! Prompts and request construction for the Socratic dialogue
//!
//! The log keeps a short seed prompt at position 0. Requests never carry the
//! seed; every request is built with the fuller Socratic instruction instead.

use crate::dialogue::{Role, Turn};
use crate::llm::{LlmMessage, LlmRequest, SystemContent};

/// Seed system turn stored at the head of the dialogue log
pub const SEED_PROMPT: &str =
    "You are a Socratic philosopher. Always reply with thoughtful questions.";

/// Instruction sent with every completion request
pub const SOCRATIC_INSTRUCTION: &str = "You are a Socratic philosopher. Normally respond with \
thoughtful questions, but if the user directly asks for your perspective or explanation, provide \
a brief philosophical insight first, then follow up with a question.";

/// Build the completion request for the visible history (seed excluded)
pub fn build_request(history: &[Turn]) -> LlmRequest {
    let messages = history
        .iter()
        .filter_map(|turn| match turn.role() {
            Role::User => Some(LlmMessage::user(turn.content())),
            Role::Assistant => Some(LlmMessage::assistant(turn.content())),
            Role::System => {
                tracing::warn!("Skipping unexpected system turn in dialogue history");
                None
            }
        })
        .collect();

    LlmRequest {
        system: vec![SystemContent::new(SOCRATIC_INSTRUCTION)],
        messages,
    }
}

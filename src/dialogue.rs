//! In-memory dialogue log
//!
//! Position 0 always holds the seed system turn. Turns are only ever
//! appended; `reset` is the one way to drop them.

#[cfg(test)]
mod proptests;

use crate::system_prompt::SEED_PROMPT;
use chrono::Local;

/// Wall-clock format used for turn timestamps
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Current local time as a turn timestamp
pub fn timestamp_now() -> String {
    Local::now().format(TIMESTAMP_FORMAT).to_string()
}

/// Who produced a turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    /// Uppercase label used in exported transcripts
    pub fn label(self) -> &'static str {
        match self {
            Role::System => "SYSTEM",
            Role::User => "USER",
            Role::Assistant => "ASSISTANT",
        }
    }
}

/// One message in the dialogue. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    role: Role,
    content: String,
    timestamp: Option<String>,
}

impl Turn {
    fn new(role: Role, content: String, timestamp: Option<String>) -> Self {
        Self {
            role,
            content,
            timestamp,
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn timestamp(&self) -> Option<&str> {
        self.timestamp.as_deref()
    }
}

/// Ordered dialogue, seeded with the system turn
#[derive(Debug, Clone)]
pub struct DialogueLog {
    turns: Vec<Turn>,
}

impl DialogueLog {
    pub fn new() -> Self {
        Self {
            turns: vec![Self::seed_turn()],
        }
    }

    fn seed_turn() -> Turn {
        Turn::new(Role::System, SEED_PROMPT.to_string(), None)
    }

    pub fn append_user(&mut self, text: impl Into<String>, timestamp: Option<String>) {
        self.turns.push(Turn::new(Role::User, text.into(), timestamp));
    }

    pub fn append_assistant(&mut self, text: impl Into<String>, timestamp: Option<String>) {
        self.turns
            .push(Turn::new(Role::Assistant, text.into(), timestamp));
    }

    /// Drop every turn and re-seed
    pub fn reset(&mut self) {
        self.turns.clear();
        self.turns.push(Self::seed_turn());
    }

    /// All turns after the seed, in insertion order
    pub fn turns_excluding_seed(&self) -> &[Turn] {
        self.turns.get(1..).unwrap_or_default()
    }

    /// Every turn, seed included
    pub fn all_turns(&self) -> &[Turn] {
        &self.turns
    }
}

impl Default for DialogueLog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_seeded(log: &DialogueLog) {
        let all = log.all_turns();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].role(), Role::System);
        assert_eq!(all[0].content(), SEED_PROMPT);
        assert!(log.turns_excluding_seed().is_empty());
    }

    #[test]
    fn test_new_log_is_seeded() {
        assert_seeded(&DialogueLog::new());
    }

    #[test]
    fn test_reset_restores_seed() {
        let mut log = DialogueLog::new();
        log.append_user("What is virtue?", Some("2024-01-01 10:00:00".into()));
        log.append_assistant("What do you think it is?", None);
        log.reset();
        assert_seeded(&log);
    }

    #[test]
    fn test_append_order_and_roles() {
        let mut log = DialogueLog::new();
        log.append_user("Q", Some("t1".into()));
        log.append_assistant("A", Some("t2".into()));
        log.append_user("Q", Some("t3".into()));

        let turns = log.turns_excluding_seed();
        assert_eq!(turns.len(), 3);
        assert_eq!(turns[0].role(), Role::User);
        assert_eq!(turns[1].role(), Role::Assistant);
        assert_eq!(turns[2].role(), Role::User);
        assert_eq!(turns[1].content(), "A");
        assert_eq!(turns[2].timestamp(), Some("t3"));
        // Duplicates are kept
        assert_eq!(turns[0].content(), turns[2].content());
    }

    #[test]
    fn test_role_labels() {
        assert_eq!(Role::User.label(), "USER");
        assert_eq!(Role::Assistant.label(), "ASSISTANT");
        assert_eq!(Role::System.label(), "SYSTEM");
    }

    #[test]
    fn test_timestamp_format() {
        let ts = timestamp_now();
        assert!(chrono::NaiveDateTime::parse_from_str(&ts, TIMESTAMP_FORMAT).is_ok());
    }
}

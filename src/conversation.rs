//! One shared Socratic conversation
//!
//! Owns the dialogue log behind a mutex and runs the question pipeline:
//! log the question, normalize and categorize it, ask the model with the
//! history, log the reply.

pub mod traits;

#[cfg(test)]
pub mod testing;

pub use traits::*;

use crate::classifier::Classifier;
use crate::dialogue::{timestamp_now, DialogueLog, Turn};
use crate::export::write_transcript;
use crate::nlp::normalize;
use crate::system_prompt::build_request;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Result of asking one question
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AskOutcome {
    /// The model replied; `category` is the classifier's label for the question
    Answered { category: String },
    /// The completion call failed. The question stays in the log.
    Failed { error: String },
}

/// What one question produced, with the visible turns as they stood when it finished
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AskReply {
    pub outcome: AskOutcome,
    pub turns: Vec<Turn>,
}

pub struct Conversation {
    log: Mutex<DialogueLog>,
    llm: Arc<dyn LlmClient>,
    classifier: Arc<Classifier>,
}

impl Conversation {
    pub fn new(llm: Arc<dyn LlmClient>, classifier: Arc<Classifier>) -> Self {
        Self {
            log: Mutex::new(DialogueLog::new()),
            llm,
            classifier,
        }
    }

    /// Ask one question.
    ///
    /// The log stays locked for the whole exchange, so concurrent questions
    /// are answered one at a time and each reply directly follows its
    /// question. The returned turns are read before the log is released.
    pub async fn ask(&self, question: &str) -> AskReply {
        let mut log = self.log.lock().await;
        log.append_user(question, Some(timestamp_now()));

        let normalized = normalize(question);
        // Categorized on the raw text, which is what the model was trained on
        let category = self.classifier.classify(question).to_string();
        tracing::debug!(
            normalized = %normalized,
            category = %category,
            "Question categorized"
        );

        let request = build_request(log.turns_excluding_seed());
        let outcome = match self.llm.complete(&request).await {
            Ok(response) => {
                log.append_assistant(response.text(), Some(timestamp_now()));
                tracing::info!(
                    category = %category,
                    turns = log.turns_excluding_seed().len(),
                    "Question answered"
                );
                AskOutcome::Answered { category }
            }
            Err(e) => {
                tracing::warn!(
                    model = self.llm.model_id(),
                    kind = ?e.kind,
                    error = %e,
                    "Completion failed; keeping the question in the log"
                );
                AskOutcome::Failed {
                    error: format!("Unexpected error: {e}"),
                }
            }
        };

        AskReply {
            outcome,
            turns: log.turns_excluding_seed().to_vec(),
        }
    }

    /// Clear the log back to the seed turn
    pub async fn reset(&self) {
        self.log.lock().await.reset();
        tracing::info!("Conversation reset");
    }

    /// Snapshot of the visible turns
    pub async fn transcript(&self) -> Vec<Turn> {
        self.log.lock().await.turns_excluding_seed().to_vec()
    }

    /// Write the visible turns to the export file in `dir`.
    ///
    /// Holds the log while writing so the file matches one consistent state.
    pub async fn export(&self, dir: &Path) -> io::Result<PathBuf> {
        let log = self.log.lock().await;
        write_transcript(dir, log.turns_excluding_seed()).await
    }
}

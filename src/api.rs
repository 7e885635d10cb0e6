//! HTTP surface of the Socratic chat
//!
//! Server-rendered pages for asking, resetting and downloading the dialogue.

mod assets;
mod handlers;
mod types;


pub use handlers::create_router;

use crate::conversation::Conversation;
use std::path::PathBuf;
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub conversation: Arc<Conversation>,
    /// Directory the transcript export is written to
    pub export_dir: Arc<PathBuf>,
}

impl AppState {
    pub fn new(conversation: Conversation, export_dir: PathBuf) -> Self {
        Self {
            conversation: Arc::new(conversation),
            export_dir: Arc::new(export_dir),
        }
    }
}

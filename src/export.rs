//! Plain-text transcript export

use crate::dialogue::{timestamp_now, Turn};
use std::fmt::Write as _;
use std::io;
use std::path::{Path, PathBuf};

/// File name of the exported transcript, overwritten on every export
pub const EXPORT_FILE_NAME: &str = "chat_history.txt";

/// Format turns as `[<timestamp>] <ROLE>: <content>` blocks, each followed by
/// a blank line. Turns without a timestamp get the current time.
pub fn format_transcript(turns: &[Turn]) -> String {
    let mut out = String::new();
    for turn in turns {
        let timestamp = turn
            .timestamp()
            .map_or_else(timestamp_now, ToString::to_string);
        // Writing into a String cannot fail
        let _ = write!(
            out,
            "[{timestamp}] {}: {}\n\n",
            turn.role().label(),
            turn.content()
        );
    }
    out
}

/// Write the transcript into `dir` and return the file path
pub async fn write_transcript(dir: &Path, turns: &[Turn]) -> io::Result<PathBuf> {
    let path = dir.join(EXPORT_FILE_NAME);
    tokio::fs::write(&path, format_transcript(turns)).await?;
    tracing::info!(path = %path.display(), turns = turns.len(), "Transcript exported");
    Ok(path)
}

//! HTML rendering of the chat page

use crate::dialogue::{Role, Turn};
use html_escape::encode_text;
use std::fmt::Write as _;

const BOOTSTRAP_CSS: &str = "https://cdn.jsdelivr.net/npm/bootstrap@5.3.0/dist/css/bootstrap.min.css";

/// Render the page for the visible turns with optional status and error banners.
///
/// Every piece of dynamic text is escaped.
pub fn render_transcript(turns: &[Turn], status: Option<&str>, error: Option<&str>) -> String {
    let mut chat = String::new();
    for turn in turns {
        push_bubble(&mut chat, turn);
    }

    let status_html = status
        .filter(|s| !s.is_empty())
        .map(|s| {
            format!(
                "<div class='alert alert-success'><strong>{}</strong></div>",
                encode_text(s)
            )
        })
        .unwrap_or_default();
    let error_html = error
        .filter(|e| !e.is_empty())
        .map(|e| format!("<div class='alert alert-danger mt-3'>{}</div>", encode_text(e)))
        .unwrap_or_default();

    format!(
        r#"<!DOCTYPE html>
<html>
    <head>
        <meta charset="utf-8">
        <title>Socratic Chat</title>
        <link rel="stylesheet" href="{BOOTSTRAP_CSS}">
        <link rel="stylesheet" href="/assets/chat.css">
    </head>
    <body class="container mt-5">
        <h2 class="mb-3">Socratic Dialogue</h2>

        <form action="/ask" method="post" class="mb-3">
            <div class="input-group">
                <input type="text" class="form-control" name="question" placeholder="Type your question..." required>
                <button type="submit" class="btn btn-primary">Send</button>
            </div>
        </form>

        <form action="/reset" method="post" class="mb-4">
            <button type="submit" class="btn btn-outline-danger btn-sm">Reset Chat</button>
        </form>
        <form action="/download" method="get" class="mb-3 d-inline">
            <button type="submit" class="btn btn-outline-secondary btn-sm">Download Chat</button>
        </form>

        {status_html}
        <div class="chat-box mb-4">{chat}</div>
        {error_html}
    </body>
</html>
"#
    )
}

fn push_bubble(out: &mut String, turn: &Turn) {
    let (align, colors) = match turn.role() {
        Role::User => ("text-end", "bg-primary text-white"),
        Role::Assistant => ("text-start", "bg-light text-dark"),
        // Never shown
        Role::System => return,
    };
    let time = turn.timestamp().map(encode_text).unwrap_or_default();
    // Writing into a String cannot fail
    let _ = write!(
        out,
        "
        <div class='{align}'>
            <div class='d-inline-block {colors} p-2 rounded mb-2 text-break bubble'>
                {content}
                <div class='small text-muted'>{time}</div>
            </div>
        </div>",
        content = encode_text(turn.content()),
    );
}

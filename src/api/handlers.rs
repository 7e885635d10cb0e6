//! HTTP request handlers

use super::assets::serve_static;
use super::types::{AskForm, ErrorResponse};
use super::AppState;
use crate::conversation::{AskOutcome, AskReply};
use crate::export::EXPORT_FILE_NAME;
use crate::render::render_transcript;
use axum::{
    extract::{rejection::FormRejection, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Form, Json, Router,
};

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(show_chat))
        .route("/ask", post(ask_question))
        .route("/reset", post(reset_chat))
        .route("/download", get(download_chat))
        .route("/assets/*path", get(serve_static))
        .route("/version", get(get_version))
        .with_state(state)
}

// ============================================================
// Chat page
// ============================================================

async fn show_chat(State(state): State<AppState>) -> Html<String> {
    let turns = state.conversation.transcript().await;
    Html(render_transcript(&turns, None, None))
}

async fn ask_question(
    State(state): State<AppState>,
    form: Result<Form<AskForm>, FormRejection>,
) -> Result<Html<String>, AppError> {
    let Form(form) = form.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
    if form.question.trim().is_empty() {
        return Err(AppError::BadRequest("Question must not be empty".to_string()));
    }

    let AskReply { outcome, turns } = state.conversation.ask(&form.question).await;

    let page = match outcome {
        AskOutcome::Answered { category } => {
            render_transcript(&turns, Some(&format!("Category: {category}")), None)
        }
        AskOutcome::Failed { error } => render_transcript(&turns, None, Some(&error)),
    };
    Ok(Html(page))
}

async fn reset_chat(State(state): State<AppState>) -> Html<String> {
    state.conversation.reset().await;
    Html(render_transcript(&[], None, None))
}

// ============================================================
// Export
// ============================================================

async fn download_chat(State(state): State<AppState>) -> Result<Response, AppError> {
    let path = state
        .conversation
        .export(&state.export_dir)
        .await
        .map_err(|e| AppError::Internal(format!("Download failed: {e}")))?;
    let body = tokio::fs::read(&path)
        .await
        .map_err(|e| AppError::Internal(format!("Download failed: {e}")))?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{EXPORT_FILE_NAME}\""),
            ),
        ],
        body,
    )
        .into_response())
}

// ============================================================
// Version
// ============================================================

async fn get_version() -> &'static str {
    concat!("socratic-chat ", env!("CARGO_PKG_VERSION"))
}

// ============================================================
// Error Handling
// ============================================================

#[derive(Debug)]
enum AppError {
    BadRequest(String),
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "Request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        let body = Json(ErrorResponse::new(message));
        (status, body).into_response()
    }
}

//! `OpenAI` chat-completions provider implementation

use super::types::{LlmMessage, LlmRequest, LlmResponse, MessageRole, Usage};
use super::{LlmError, LlmService};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Chat models served through the chat/completions endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenAIModel {
    Gpt35Turbo,
    Gpt4oMini,
    Gpt4o,
}

impl OpenAIModel {
    pub const ALL: &'static [OpenAIModel] = &[
        OpenAIModel::Gpt35Turbo,
        OpenAIModel::Gpt4oMini,
        OpenAIModel::Gpt4o,
    ];

    pub fn api_name(self) -> &'static str {
        match self {
            OpenAIModel::Gpt35Turbo => "gpt-3.5-turbo",
            OpenAIModel::Gpt4oMini => "gpt-4o-mini",
            OpenAIModel::Gpt4o => "gpt-4o",
        }
    }

    pub fn from_api_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|m| m.api_name() == name)
    }
}

/// `OpenAI` service implementation
pub struct OpenAIService {
    client: Client,
    api_key: String,
    project_id: Option<String>,
    model: OpenAIModel,
    base_url: String,
}

impl OpenAIService {
    pub fn new(
        api_key: String,
        project_id: Option<String>,
        model: OpenAIModel,
        gateway: Option<&str>,
    ) -> Result<Self, LlmError> {
        let base_url = match gateway {
            Some(gw) => format!("{}/openai/v1/chat/completions", gw.trim_end_matches('/')),
            None => DEFAULT_BASE_URL.to_string(),
        };

        let client = Client::builder()
            .timeout(Duration::from_secs(300))
            .build()
            .map_err(|e| LlmError::unknown(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_key,
            project_id,
            model,
            base_url,
        })
    }

    fn translate_request(&self, request: &LlmRequest) -> OpenAIRequest {
        let mut messages = Vec::new();

        if !request.system.is_empty() {
            let system_text = request
                .system
                .iter()
                .map(|s| s.text.as_str())
                .collect::<Vec<_>>()
                .join("\n\n");

            messages.push(OpenAIMessage {
                role: "system".to_string(),
                content: Some(system_text),
            });
        }

        messages.extend(request.messages.iter().map(Self::translate_message));

        OpenAIRequest {
            model: self.model.api_name().to_string(),
            messages,
            stream: false,
        }
    }

    fn translate_message(msg: &LlmMessage) -> OpenAIMessage {
        let role = match msg.role {
            MessageRole::User => "user",
            MessageRole::Assistant => "assistant",
        };
        OpenAIMessage {
            role: role.to_string(),
            content: Some(msg.content.clone()),
        }
    }

    fn normalize_response(resp: OpenAIResponse) -> Result<LlmResponse, LlmError> {
        let choice = resp
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| LlmError::unknown("No choices in response"))?;

        let content = choice
            .message
            .content
            .filter(|text| !text.trim().is_empty())
            .ok_or_else(|| LlmError::unknown("Response contained no text"))?;

        let usage = resp.usage.map_or_else(Usage::default, |u| Usage {
            input_tokens: u64::from(u.prompt_tokens),
            output_tokens: u64::from(u.completion_tokens),
        });

        Ok(LlmResponse {
            content,
            end_turn: choice.finish_reason.as_deref() == Some("stop"),
            usage,
        })
    }

    /// Map a non-success HTTP status and body to an error
    fn error_from_status(status: reqwest::StatusCode, body: &str) -> LlmError {
        if let Ok(error_resp) = serde_json::from_str::<OpenAIErrorResponse>(body) {
            let message = error_resp.error.message;
            return match status.as_u16() {
                401 | 403 => LlmError::auth(format!("Authentication failed: {message}")),
                429 => LlmError::rate_limit(format!("Rate limit exceeded: {message}")),
                400 => LlmError::invalid_request(format!("Invalid request: {message}")),
                500..=599 => LlmError::server_error(format!("Server error: {message}")),
                _ => LlmError::unknown(format!("HTTP {status}: {message}")),
            };
        }
        LlmError::unknown(format!("HTTP {status} error: {body}"))
    }
}

#[async_trait]
impl LlmService for OpenAIService {
    async fn complete(&self, request: &LlmRequest) -> Result<LlmResponse, LlmError> {
        let openai_request = self.translate_request(request);

        let mut builder = self
            .client
            .post(&self.base_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json");
        if let Some(project) = &self.project_id {
            builder = builder.header("OpenAI-Project", project);
        }

        let response = builder.json(&openai_request).send().await.map_err(|e| {
            if e.is_timeout() {
                LlmError::network(format!("Request timeout: {e}"))
            } else if e.is_connect() {
                LlmError::network(format!("Connection failed: {e}"))
            } else {
                LlmError::unknown(format!("Request failed: {e}"))
            }
        })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| LlmError::network(format!("Failed to read response: {e}")))?;

        if !status.is_success() {
            return Err(Self::error_from_status(status, &body));
        }

        let openai_response: OpenAIResponse = serde_json::from_str(&body).map_err(|e| {
            LlmError::unknown(format!("Failed to parse response: {e} - body: {body}"))
        })?;

        Self::normalize_response(openai_response)
    }

    fn model_id(&self) -> &str {
        self.model.api_name()
    }
}

// OpenAI API types

#[derive(Debug, Serialize)]
struct OpenAIRequest {
    model: String,
    messages: Vec<OpenAIMessage>,
    stream: bool,
}

#[derive(Debug, Serialize, Deserialize)]
struct OpenAIMessage {
    role: String,
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAIResponse {
    choices: Vec<OpenAIChoice>,
    #[serde(default)]
    usage: Option<OpenAIUsage>,
}

#[derive(Debug, Deserialize)]
struct OpenAIChoice {
    message: OpenAIMessage,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[allow(clippy::struct_field_names)]
struct OpenAIUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct OpenAIErrorResponse {
    error: OpenAIError,
}

#[derive(Debug, Deserialize)]
struct OpenAIError {
    message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::{LlmErrorKind, SystemContent};
    use reqwest::StatusCode;

    fn service(gateway: Option<&str>) -> OpenAIService {
        OpenAIService::new("key".into(), None, OpenAIModel::Gpt35Turbo, gateway).unwrap()
    }

    #[test]
    fn test_system_prompt_comes_first() {
        let request = LlmRequest {
            system: vec![SystemContent::new("Be Socratic.")],
            messages: vec![LlmMessage::user("Q"), LlmMessage::assistant("A")],
        };
        let translated = service(None).translate_request(&request);
        let json = serde_json::to_value(&translated).unwrap();

        assert_eq!(json["model"], "gpt-3.5-turbo");
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][0]["content"], "Be Socratic.");
        assert_eq!(json["messages"][1]["role"], "user");
        assert_eq!(json["messages"][2]["role"], "assistant");
        assert_eq!(json["messages"][2]["content"], "A");
        assert_eq!(json["stream"], false);
    }

    #[test]
    fn test_gateway_url() {
        assert_eq!(service(None).base_url, DEFAULT_BASE_URL);
        assert_eq!(
            service(Some("https://gw.example.com/")).base_url,
            "https://gw.example.com/openai/v1/chat/completions"
        );
    }

    #[test]
    fn test_normalize_response() {
        let resp: OpenAIResponse = serde_json::from_str(
            r#"{"choices":[{"message":{"role":"assistant","content":"Why do you ask?"},
                "finish_reason":"stop"}],
                "usage":{"prompt_tokens":12,"completion_tokens":5,"total_tokens":17}}"#,
        )
        .unwrap();
        let normalized = OpenAIService::normalize_response(resp).unwrap();
        assert_eq!(normalized.text(), "Why do you ask?");
        assert!(normalized.end_turn);
        assert_eq!(normalized.usage.input_tokens, 12);
    }

    #[test]
    fn test_normalize_rejects_empty() {
        let resp: OpenAIResponse = serde_json::from_str(r#"{"choices":[]}"#).unwrap();
        assert!(OpenAIService::normalize_response(resp).is_err());

        let resp: OpenAIResponse = serde_json::from_str(
            r#"{"choices":[{"message":{"role":"assistant","content":null},"finish_reason":"stop"}]}"#,
        )
        .unwrap();
        assert!(OpenAIService::normalize_response(resp).is_err());
    }

    #[test]
    fn test_error_classification() {
        let body = r#"{"error":{"message":"Incorrect API key","type":"invalid_request_error"}}"#;
        let err = OpenAIService::error_from_status(StatusCode::UNAUTHORIZED, body);
        assert_eq!(err.kind, LlmErrorKind::Auth);
        assert!(err.message.contains("Incorrect API key"));

        let err = OpenAIService::error_from_status(StatusCode::TOO_MANY_REQUESTS, body);
        assert_eq!(err.kind, LlmErrorKind::RateLimit);

        let err = OpenAIService::error_from_status(StatusCode::BAD_GATEWAY, "<html>");
        assert_eq!(err.kind, LlmErrorKind::Unknown);
    }

    #[test]
    fn test_model_names() {
        assert_eq!(
            OpenAIModel::from_api_name("gpt-4o-mini"),
            Some(OpenAIModel::Gpt4oMini)
        );
        assert_eq!(OpenAIModel::from_api_name("claude"), None);
    }
}

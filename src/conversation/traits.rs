//! Trait abstractions for conversation I/O
//!
//! The completion call goes through [`LlmClient`] so the conversation can be
//! tested with a mock.

use crate::llm::{LlmError, LlmRequest, LlmResponse, ModelRegistry};
use async_trait::async_trait;
use std::sync::Arc;

/// Client for making LLM requests
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Complete an LLM request
    async fn complete(&self, request: &LlmRequest) -> Result<LlmResponse, LlmError>;

    /// Get the model ID
    fn model_id(&self) -> &str;
}

#[async_trait]
impl<T: LlmClient + ?Sized> LlmClient for Arc<T> {
    async fn complete(&self, request: &LlmRequest) -> Result<LlmResponse, LlmError> {
        (**self).complete(request).await
    }

    fn model_id(&self) -> &str {
        (**self).model_id()
    }
}

/// Adapter to use `ModelRegistry` as `LlmClient`.
///
/// The model is resolved per call, so missing credentials surface as a
/// request error rather than a startup failure.
pub struct RegistryLlmClient {
    registry: Arc<ModelRegistry>,
    model_id: String,
}

impl RegistryLlmClient {
    pub fn new(registry: Arc<ModelRegistry>, model_id: String) -> Self {
        Self { registry, model_id }
    }
}

#[async_trait]
impl LlmClient for RegistryLlmClient {
    async fn complete(&self, request: &LlmRequest) -> Result<LlmResponse, LlmError> {
        let Some(llm) = self.registry.get(&self.model_id) else {
            if self.registry.has_models() {
                return Err(LlmError::invalid_request(format!(
                    "Unknown model {}; available: {}",
                    self.model_id,
                    self.registry.available_models().join(", ")
                )));
            }
            return Err(LlmError::not_configured(
                "No LLM available: set OPENAI_API_KEY and OPENAI_PROJECT_ID",
            ));
        };
        llm.complete(request).await
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }
}

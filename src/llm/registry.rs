//! Model registry for the configured chat models

use super::{LlmService, LoggingService, OpenAIModel, OpenAIService};
use std::collections::HashMap;
use std::sync::Arc;

/// Model used when `DEFAULT_MODEL` is not set
pub const FALLBACK_MODEL: &str = "gpt-3.5-turbo";

/// Configuration for LLM providers, read once at startup
#[derive(Debug, Clone, Default)]
pub struct LlmConfig {
    pub openai_api_key: Option<String>,
    pub openai_project_id: Option<String>,
    /// Gateway base URL that handles authentication itself
    pub gateway: Option<String>,
    /// Default model ID
    pub default_model: Option<String>,
}

impl LlmConfig {
    pub fn from_env() -> Self {
        Self {
            openai_api_key: std::env::var("OPENAI_API_KEY").ok(),
            openai_project_id: std::env::var("OPENAI_PROJECT_ID").ok(),
            gateway: std::env::var("LLM_GATEWAY").ok(),
            default_model: std::env::var("DEFAULT_MODEL").ok(),
        }
    }
}

/// Registry of available LLM models
pub struct ModelRegistry {
    services: HashMap<String, Arc<dyn LlmService>>,
    default_model: String,
}

impl ModelRegistry {
    pub fn new(config: &LlmConfig) -> Self {
        let mut services: HashMap<String, Arc<dyn LlmService>> = HashMap::new();

        for model in OpenAIModel::ALL {
            if let Some(service) = Self::try_create_model(*model, config) {
                services.insert(model.api_name().to_string(), service);
            }
        }

        let default_model = match config.default_model.as_deref() {
            None => FALLBACK_MODEL.to_string(),
            Some(id) if OpenAIModel::from_api_name(id).is_some() => id.to_string(),
            Some(id) => {
                tracing::warn!(
                    requested = id,
                    fallback = FALLBACK_MODEL,
                    "DEFAULT_MODEL is not a known model; using the fallback"
                );
                FALLBACK_MODEL.to_string()
            }
        };

        Self {
            services,
            default_model,
        }
    }

    /// Try to create a model service, validating prerequisites
    fn try_create_model(model: OpenAIModel, config: &LlmConfig) -> Option<Arc<dyn LlmService>> {
        // In gateway mode the gateway handles the actual authentication
        let api_key = if config.gateway.is_some() {
            "implicit".to_string()
        } else {
            config
                .openai_api_key
                .clone()
                .filter(|key| !key.is_empty())?
        };

        match OpenAIService::new(
            api_key,
            config.openai_project_id.clone(),
            model,
            config.gateway.as_deref(),
        ) {
            Ok(service) => Some(Arc::new(LoggingService::new(Arc::new(service)))),
            Err(e) => {
                tracing::warn!(model = model.api_name(), error = %e, "Failed to create model");
                None
            }
        }
    }

    /// Get a model by ID
    pub fn get(&self, model_id: &str) -> Option<Arc<dyn LlmService>> {
        self.services.get(model_id).cloned()
    }

    /// Get the default model
    pub fn default(&self) -> Option<Arc<dyn LlmService>> {
        self.get(&self.default_model)
    }

    /// Get the default model ID
    pub fn default_model_id(&self) -> &str {
        &self.default_model
    }

    /// List all available model IDs
    pub fn available_models(&self) -> Vec<String> {
        let mut models: Vec<_> = self.services.keys().cloned().collect();
        models.sort();
        models
    }

    /// Check if any models are available
    pub fn has_models(&self) -> bool {
        !self.services.is_empty()
    }
}

use async_openai::{config::OpenAIConfig, error::OpenAIError, Client};
use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::json;

use crate::services::completion_provider::{CompletionProvider, CompletionRequest, ProviderError};

/// Model selection and credentials, fixed for the lifetime of a provider.
#[derive(Clone, Debug)]
pub struct ProviderCredentials {
    pub api_key: SecretString,
    pub organization_id: Option<String>,
    pub project_id: Option<String>,
    pub model: String,
}

/// Chat completion provider backed by the OpenAI API.
pub struct OpenAiCompletionProvider {
    client: Client<OpenAIConfig>,
    model: String,
}

impl OpenAiCompletionProvider {
    pub fn new(credentials: ProviderCredentials) -> Self {
        let mut config = OpenAIConfig::new().with_api_key(credentials.api_key.expose_secret());
        if let Some(organization_id) = &credentials.organization_id {
            config = config.with_org_id(organization_id);
        }
        if let Some(project_id) = &credentials.project_id {
            config = config.with_project_id(project_id);
        }

        Self {
            client: Client::with_config(config),
            model: credentials.model,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl CompletionProvider for OpenAiCompletionProvider {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, ProviderError> {
        let body = json!({
            "model": self.model,
            "messages": [{ "role": "user", "content": request.prompt }],
            "temperature": request.temperature,
            "max_tokens": request.max_tokens,
            "n": request.completion_count,
        });

        let response: ChatCompletionBody = self.client.chat().create_byot(body).await?;
        first_choice_text(response)
    }
}

#[derive(Debug, Deserialize)]
struct ChatCompletionBody {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

fn first_choice_text(response: ChatCompletionBody) -> Result<String, ProviderError> {
    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| ProviderError::MalformedResponse("response contained no choices".to_string()))?;

    choice
        .message
        .content
        .ok_or_else(|| ProviderError::MalformedResponse("first choice had no text content".to_string()))
}

impl From<OpenAIError> for ProviderError {
    fn from(err: OpenAIError) -> Self {
        match err {
            OpenAIError::Reqwest(err) => ProviderError::Network(err.to_string()),
            OpenAIError::ApiError(api) => classify_api_error(api.r#type.as_deref(), &api.message),
            other => ProviderError::MalformedResponse(other.to_string()),
        }
    }
}

/// Maps an API error body onto the fault taxonomy using its `type` and message.
fn classify_api_error(kind: Option<&str>, message: &str) -> ProviderError {
    let lowered = message.to_ascii_lowercase();
    let message = message.to_string();

    match kind {
        Some("insufficient_quota") => ProviderError::QuotaExceeded(message),
        Some("rate_limit_exceeded" | "requests" | "tokens") => ProviderError::RateLimited(message),
        Some("server_error" | "service_unavailable") => ProviderError::Unavailable(message),
        Some("authentication_error" | "permission_error") => ProviderError::Authentication(message),
        _ if lowered.contains("api key") || lowered.contains("unauthorized") => {
            ProviderError::Authentication(message)
        }
        _ if lowered.contains("quota") => ProviderError::QuotaExceeded(message),
        _ if lowered.contains("rate limit") => ProviderError::RateLimited(message),
        _ if lowered.contains("overloaded") || lowered.contains("temporarily unavailable") => {
            ProviderError::Unavailable(message)
        }
        _ => ProviderError::Rejected(message),
    }
}

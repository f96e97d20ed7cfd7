use std::env;
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};

use crate::errors::{AppError, AppResult};
use crate::services::openai_provider::ProviderCredentials;
use crate::services::question_generator::{GenerationSettings, RetryPolicy};

#[derive(Clone, Debug)]
pub struct Config {
    pub openai_api_key: SecretString,
    pub openai_org_id: Option<String>,
    pub openai_project_id: Option<String>,
    pub openai_model: String,
    pub openai_max_tokens: u32,
    pub openai_temperature: f32,
    pub provider_timeout_secs: u64,
    pub provider_max_retries: u32,
    pub provider_retry_backoff_ms: u64,
    pub web_server_host: String,
    pub web_server_port: u16,
    pub cors_allowed_origin: String,
}

fn optional_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn parsed_var<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            openai_api_key: SecretString::from(env::var("OPENAI_API_KEY").unwrap_or_default()),
            openai_org_id: optional_var("OPENAI_ORG_ID"),
            openai_project_id: optional_var("OPENAI_PROJECT_ID"),
            openai_model: env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string()),
            openai_max_tokens: parsed_var("OPENAI_MAX_TOKENS", 1000),
            openai_temperature: parsed_var("OPENAI_TEMPERATURE", 0.7),
            provider_timeout_secs: parsed_var("PROVIDER_TIMEOUT_SECS", 60),
            provider_max_retries: parsed_var("PROVIDER_MAX_RETRIES", 2),
            provider_retry_backoff_ms: parsed_var("PROVIDER_RETRY_BACKOFF_MS", 500),
            web_server_host: env::var("WEB_SERVER_HOST")
                .unwrap_or_else(|_| "localhost".to_string()),
            web_server_port: parsed_var("WEB_SERVER_PORT", 8080),
            cors_allowed_origin: env::var("CORS_ALLOWED_ORIGIN")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
        }
    }

    /// Rejects settings the provider would refuse on every call.
    pub fn validate(&self) -> AppResult<()> {
        if self.openai_api_key.expose_secret().trim().is_empty() {
            return Err(AppError::ValidationError(
                "OPENAI_API_KEY is not set".to_string(),
            ));
        }

        if !(0.0..=2.0).contains(&self.openai_temperature) {
            return Err(AppError::ValidationError(format!(
                "OPENAI_TEMPERATURE must be between 0.0 and 2.0, got {}",
                self.openai_temperature
            )));
        }

        if self.openai_max_tokens == 0 || self.provider_timeout_secs == 0 {
            return Err(AppError::ValidationError(
                "OPENAI_MAX_TOKENS and PROVIDER_TIMEOUT_SECS must be positive".to_string(),
            ));
        }

        Ok(())
    }

    pub fn provider_credentials(&self) -> ProviderCredentials {
        ProviderCredentials {
            api_key: self.openai_api_key.clone(),
            organization_id: self.openai_org_id.clone(),
            project_id: self.openai_project_id.clone(),
            model: self.openai_model.clone(),
        }
    }

    pub fn generation_settings(&self) -> GenerationSettings {
        let retry = RetryPolicy {
            max_retries: self.provider_max_retries,
            initial_backoff: Duration::from_millis(self.provider_retry_backoff_ms),
            ..RetryPolicy::default()
        };

        GenerationSettings {
            max_tokens: self.openai_max_tokens,
            temperature: self.openai_temperature,
            timeout: Duration::from_secs(self.provider_timeout_secs),
            retry,
            ..GenerationSettings::default()
        }
    }

    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            openai_api_key: SecretString::from("sk-test-key".to_string()),
            openai_org_id: Some("org-test".to_string()),
            openai_project_id: None,
            openai_model: "gpt-4o-mini".to_string(),
            openai_max_tokens: 1000,
            openai_temperature: 0.7,
            provider_timeout_secs: 60,
            provider_max_retries: 2,
            provider_retry_backoff_ms: 500,
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 8080,
            cors_allowed_origin: "http://localhost:3000".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_env_with_defaults() {
        let config = Config::from_env();

        // Should use env vars if set, or fall back to defaults
        assert!(!config.openai_model.is_empty());
        assert!(!config.web_server_host.is_empty());
        assert!(config.web_server_port > 0);
    }

    #[test]
    fn test_validate_accepts_test_config() {
        assert!(Config::test_config().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_missing_key() {
        let config = Config {
            openai_api_key: SecretString::from(String::new()),
            ..Config::test_config()
        };

        assert!(matches!(config.validate(), Err(AppError::ValidationError(_))));
    }

    #[test]
    fn test_validate_rejects_out_of_range_temperature() {
        let config = Config {
            openai_temperature: 3.5,
            ..Config::test_config()
        };

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_generation_settings_follow_config() {
        let config = Config {
            provider_timeout_secs: 15,
            provider_max_retries: 4,
            provider_retry_backoff_ms: 250,
            ..Config::test_config()
        };
        let settings = config.generation_settings();

        assert_eq!(settings.max_tokens, 1000);
        assert_eq!(settings.completion_count, 1);
        assert_eq!(settings.timeout, Duration::from_secs(15));
        assert_eq!(settings.retry.max_retries, 4);
        assert_eq!(settings.retry.initial_backoff, Duration::from_millis(250));
    }

    #[test]
    fn test_provider_credentials_copy_model_and_org() {
        let credentials = Config::test_config().provider_credentials();

        assert_eq!(credentials.model, "gpt-4o-mini");
        assert_eq!(credentials.organization_id.as_deref(), Some("org-test"));
        assert_eq!(credentials.api_key.expose_secret(), "sk-test-key");
    }
}

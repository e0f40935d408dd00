use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::{
    config::Config,
    errors::{AppError, AppResult, GenerationError},
    generator::prompt::Prompt,
};

/// Upstream text-generation API. Returns the raw assistant message content.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, prompt: &Prompt) -> Result<String, GenerationError>;
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

/// OpenAI-compatible chat completions client, pointed at OpenRouter by default.
pub struct OpenRouterClient {
    http: reqwest::Client,
    api_key: Option<SecretString>,
    base_url: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
    referer: String,
    title: String,
}

impl OpenRouterClient {
    pub fn from_config(config: &Config) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.generation_timeout_secs))
            .build()
            .map_err(|e| AppError::InternalError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            api_key: config.openrouter_api_key.clone(),
            base_url: config.openrouter_base_url.trim_end_matches('/').to_string(),
            model: config.openrouter_model.clone(),
            temperature: config.generation_temperature,
            max_tokens: config.generation_max_tokens,
            referer: config.app_referer.clone(),
            title: config.app_title.clone(),
        })
    }
}

#[async_trait]
impl CompletionClient for OpenRouterClient {
    async fn complete(&self, prompt: &Prompt) -> Result<String, GenerationError> {
        let api_key = self.api_key.as_ref().ok_or(GenerationError::NotConfigured)?;

        let body = ChatCompletionRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &prompt.system,
                },
                ChatMessage {
                    role: "user",
                    content: &prompt.user,
                },
            ],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        log::info!("Requesting question generation from model {}", self.model);

        let response = self
            .http
            .post(format!("{}/chat/completions", self.base_url))
            .header(AUTHORIZATION, format!("Bearer {}", api_key.expose_secret()))
            .header(CONTENT_TYPE, "application/json")
            .header("HTTP-Referer", &self.referer)
            .header("X-Title", &self.title)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                log::error!("Failed to reach generation API: {}", e);
                GenerationError::Transport(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            log::error!(
                "Generation API returned {}: {}",
                status,
                text.chars().take(200).collect::<String>()
            );
            return Err(GenerationError::Upstream {
                status: status.as_u16(),
            });
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| GenerationError::MalformedResponse(e.to_string()))?;

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| GenerationError::MalformedResponse("response has no content".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prompt() -> Prompt {
        Prompt {
            system: "system".to_string(),
            user: "user".to_string(),
        }
    }

    #[actix_web::test]
    async fn test_missing_api_key_fails_before_any_request() {
        let mut config = Config::test_config();
        config.openrouter_api_key = None;
        let client = OpenRouterClient::from_config(&config).unwrap();

        assert_eq!(
            client.complete(&prompt()).await,
            Err(GenerationError::NotConfigured)
        );
    }

    #[actix_web::test]
    async fn test_unreachable_upstream_is_a_transport_error() {
        let mut config = Config::test_config();
        config.openrouter_base_url = "http://127.0.0.1:9".to_string();
        config.generation_timeout_secs = 2;
        let client = OpenRouterClient::from_config(&config).unwrap();

        assert!(matches!(
            client.complete(&prompt()).await,
            Err(GenerationError::Transport(_))
        ));
    }

    #[test]
    fn test_request_body_shape() {
        let body = ChatCompletionRequest {
            model: "deepseek/deepseek-r1",
            messages: vec![ChatMessage {
                role: "user",
                content: "hi",
            }],
            temperature: 0.7,
            max_tokens: 2000,
        };
        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(json["model"], "deepseek/deepseek-r1");
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["max_tokens"], 2000);
    }

    #[test]
    fn test_completion_response_parsing() {
        let parsed: ChatCompletionResponse = serde_json::from_str(
            r#"{"choices":[{"message":{"role":"assistant","content":"[]"}}]}"#,
        )
        .unwrap();
        assert_eq!(parsed.choices[0].message.content.as_deref(), Some("[]"));
    }
}

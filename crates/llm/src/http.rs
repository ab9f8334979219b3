//! OpenAI-compatible chat-completions oracle
//!
//! Works with any provider exposing `POST {base_url}/chat/completions`
//! (Groq, OpenAI, OpenRouter, local vLLM/Ollama gateways).

use std::time::Duration;

use async_trait::async_trait;
use call_qc_config::OracleConfig;
use call_qc_core::{Oracle, OracleError};
use serde::{Deserialize, Serialize};

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessageResponse,
}

#[derive(Deserialize)]
struct ChatMessageResponse {
    #[serde(default)]
    content: Option<String>,
}

/// Chat-completions client
#[derive(Debug, Clone)]
pub struct ChatCompletionsOracle {
    client: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: String,
    temperature: f32,
    timeout: Duration,
}

impl ChatCompletionsOracle {
    pub fn new(
        base_url: &str,
        model: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, OracleError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| OracleError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: format!("{}/chat/completions", base_url.trim_end_matches('/')),
            model: model.into(),
            api_key: api_key.into(),
            temperature: 0.0,
            timeout,
        })
    }

    /// Build from settings; a missing API key is `NotConfigured`
    pub fn from_config(config: &OracleConfig) -> Result<Self, OracleError> {
        let api_key = config
            .resolved_api_key()
            .ok_or_else(|| OracleError::NotConfigured("no API key for openai_compatible provider".to_string()))?;

        Ok(Self::new(&config.base_url, config.model.clone(), api_key, config.timeout())?
            .with_temperature(config.temperature))
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl Oracle for ChatCompletionsOracle {
    async fn complete(&self, system: &str, user: &str) -> Result<String, OracleError> {
        let body = ChatRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
            temperature: self.temperature,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    OracleError::Timeout(self.timeout.as_millis() as u64)
                } else {
                    OracleError::Transport(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(OracleError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| OracleError::Transport(format!("invalid response body: {}", e)))?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or(OracleError::EmptyResponse)
    }

    fn name(&self) -> &str {
        "chat_completions"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_join() {
        let oracle =
            ChatCompletionsOracle::new("https://api.groq.com/openai/v1/", "m", "k", Duration::from_secs(1)).unwrap();
        assert_eq!(oracle.endpoint(), "https://api.groq.com/openai/v1/chat/completions");
        assert_eq!(oracle.model(), "m");
    }

    #[test]
    fn test_missing_key_not_configured() {
        let config = OracleConfig {
            api_key: Some("   ".to_string()),
            ..OracleConfig::default()
        };
        // blank configured key falls through to the environment
        if std::env::var(call_qc_config::settings::API_KEY_ENV).is_err() {
            assert!(matches!(
                ChatCompletionsOracle::from_config(&config),
                Err(OracleError::NotConfigured(_))
            ));
        }
    }

    #[test]
    fn test_request_shape() {
        let body = ChatRequest {
            model: "llama",
            messages: [
                ChatMessage {
                    role: "system",
                    content: "s",
                },
                ChatMessage {
                    role: "user",
                    content: "u",
                },
            ],
            temperature: 0.0,
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["messages"][1]["role"], "user");
        assert_eq!(value["model"], "llama");
    }
}

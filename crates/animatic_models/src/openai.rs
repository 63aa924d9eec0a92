//! OpenAI chat-completions client implementation.

use animatic_core::{GenerateRequest, GenerateResponse, Output, Role};
use animatic_error::{AnimaticResult, ConfigError, HttpError, JsonError};
use animatic_interface::AnimaticDriver;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, instrument};

const OPENAI_API_URL: &str = "https://api.openai.com/v1/chat/completions";
const DEFAULT_MODEL: &str = "gpt-4o";

/// OpenAI chat-completions API client.
///
/// Speaks the plain chat-completions protocol, so any compatible endpoint
/// (a proxy, a local server) can stand in via [`with_base_url`](Self::with_base_url).
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
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

impl OpenAiClient {
    /// Creates a new client for the hosted OpenAI endpoint.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        debug!("Creating new OpenAI client");
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: model.into(),
            base_url: OPENAI_API_URL.to_string(),
        }
    }

    /// Creates a client from the `OPENAI_API_KEY` environment variable,
    /// with `OPENAI_MODEL` overriding the default model.
    ///
    /// # Errors
    ///
    /// Returns an error if the API key variable is unset.
    pub fn from_env() -> AnimaticResult<Self> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .map_err(|_| ConfigError::new("OPENAI_API_KEY is not set"))?;
        let model =
            std::env::var("OPENAI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        Ok(Self::new(api_key, model))
    }

    /// Point the client at a different chat-completions endpoint.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Converts a generation request to the chat-completions wire shape.
    fn convert_request(&self, request: &GenerateRequest) -> ChatRequest {
        let messages = request
            .messages
            .iter()
            .map(|msg| ChatMessage {
                role: match msg.role {
                    Role::System => "system",
                    Role::User => "user",
                    Role::Assistant => "assistant",
                },
                content: msg.content.clone(),
            })
            .collect();

        ChatRequest {
            model: request.model.clone().unwrap_or_else(|| self.model.clone()),
            messages,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        }
    }
}

#[async_trait::async_trait]
impl AnimaticDriver for OpenAiClient {
    #[instrument(skip(self, request), fields(model = %self.model))]
    async fn generate(&self, request: &GenerateRequest) -> AnimaticResult<GenerateResponse> {
        let chat_request = self.convert_request(request);
        debug!(
            messages = chat_request.messages.len(),
            "Sending request to chat-completions endpoint"
        );

        let response = self
            .client
            .post(&self.base_url)
            .bearer_auth(&self.api_key)
            .json(&chat_request)
            .send()
            .await
            .map_err(|e| {
                error!(error = ?e, "Failed to send request to chat-completions endpoint");
                HttpError::new(format!("Request failed: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %body, "Chat-completions endpoint returned error");
            return Err(HttpError::new(format!("API error {}: {}", status, body)).into());
        }

        let chat_response: ChatResponse = response.json().await.map_err(|e| {
            error!(error = ?e, "Failed to parse chat-completions response");
            JsonError::new(format!("Failed to parse response: {}", e))
        })?;

        let text = chat_response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_default();

        debug!(response_length = text.len(), "Received chat-completions response");
        Ok(GenerateResponse {
            outputs: vec![Output::Text(text)],
        })
    }

    fn provider_name(&self) -> &'static str {
        "openai"
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use animatic_core::Message;

    #[test]
    fn converts_roles_and_settings() {
        let client = OpenAiClient::new("test-key", "gpt-4o");
        let request = GenerateRequest::builder()
            .messages(vec![
                Message::system("You are an assistant."),
                Message::user("Order these clips."),
            ])
            .max_tokens(Some(1_500))
            .temperature(Some(0.6))
            .build()
            .unwrap();

        let chat = client.convert_request(&request);
        assert_eq!(chat.model, "gpt-4o");
        assert_eq!(chat.messages[0].role, "system");
        assert_eq!(chat.messages[1].role, "user");
        assert_eq!(chat.max_tokens, Some(1_500));
        assert_eq!(chat.temperature, Some(0.6));
    }

    #[test]
    fn request_model_overrides_client_default() {
        let client = OpenAiClient::new("test-key", "gpt-4o");
        let request = GenerateRequest::builder()
            .messages(vec![Message::user("hi")])
            .model(Some("gpt-4o-mini".to_string()))
            .build()
            .unwrap();

        let chat = client.convert_request(&request);
        assert_eq!(chat.model, "gpt-4o-mini");
    }

    #[test]
    fn optional_settings_stay_off_the_wire() {
        let client = OpenAiClient::new("test-key", "gpt-4o");
        let request = GenerateRequest::builder()
            .messages(vec![Message::user("hi")])
            .build()
            .unwrap();

        let chat = client.convert_request(&request);
        let wire = serde_json::to_string(&chat).unwrap();
        assert!(!wire.contains("max_tokens"));
        assert!(!wire.contains("temperature"));
    }

    #[test]
    fn from_env_requires_the_api_key() {
        // The variable is absent in the test environment unless a developer
        // exported it; only assert the error path when it is missing.
        if std::env::var("OPENAI_API_KEY").is_err() {
            assert!(OpenAiClient::from_env().is_err());
        }
    }
}

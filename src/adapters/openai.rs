use crate::config::toml_config::GenerationConfig;
use crate::domain::model::Secret;
use crate::utils::error::{EtlError, Result};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

/// OpenAI 相容的 chat completions 客戶端
pub struct ChatClient {
    client: Client,
    config: GenerationConfig,
    api_key: Secret,
}

impl ChatClient {
    pub fn new(client: Client, config: GenerationConfig, api_key: Secret) -> Self {
        Self {
            client,
            config,
            api_key,
        }
    }

    fn headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        let bearer = HeaderValue::from_str(&format!("Bearer {}", self.api_key.expose())).map_err(
            |_| EtlError::InvalidConfigValueError {
                field: "OPENAI_API_KEY".to_string(),
                value: self.api_key.to_string(),
                reason: "contains characters not allowed in an HTTP header".to_string(),
            },
        )?;
        headers.insert(AUTHORIZATION, bearer);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Ok(headers)
    }

    pub fn build_request(&self, prompt: &str) -> ChatRequest {
        ChatRequest {
            model: self.config.model.clone(),
            messages: vec![
                ChatMessage::system(self.config.system_prompt.clone()),
                ChatMessage::user(prompt),
            ],
        }
    }

    /// 回傳第一個 choice 的內容，不做任何結構驗證
    pub async fn complete(&self, prompt: &str) -> Result<String> {
        let request = self.build_request(prompt);

        tracing::debug!(model = %request.model, prompt_chars = prompt.chars().count(), "Chat completion request");

        let response = self
            .client
            .post(&self.config.endpoint)
            .headers(self.headers()?)
            .json(&request)
            .send()
            .await
            .map_err(EtlError::GenerationTransportError)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(EtlError::GenerationApiError {
                status: status.as_u16(),
                body,
            });
        }

        let body = response
            .text()
            .await
            .map_err(EtlError::GenerationTransportError)?;
        let parsed: ChatResponse =
            serde_json::from_str(&body).map_err(|e| EtlError::GenerationResponseError {
                message: format!("invalid JSON: {}", e),
            })?;

        parsed
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| EtlError::GenerationResponseError {
                message: "response has no choices".to_string(),
            })?
            .message
            .content
            .ok_or_else(|| EtlError::GenerationResponseError {
                message: "first choice has no content".to_string(),
            })
    }
}

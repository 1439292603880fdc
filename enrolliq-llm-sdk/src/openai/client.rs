use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};

use crate::{
    error::LlmError,
    openai::types::{
        OpenAIChatCompletionRequest, OpenAIChatCompletionResponse, OpenAIErrorResponse,
        OpenAIMessage, OpenAIRole,
    },
};

/// Request timeout; the synthesis caller treats expiry as a service failure.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// OpenAI-compatible LLM client
pub struct OpenAIClient {
    api_key: String,
    base_url: String,
    http_client: reqwest::Client,
}

impl OpenAIClient {
    /// Create a new client with the given API key
    pub fn new(api_key: impl Into<String>) -> Result<Self, LlmError> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(LlmError::authentication("API key cannot be empty"));
        }

        let http_client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| LlmError::Network { source: e })?;

        Ok(Self {
            api_key,
            base_url: "https://api.openai.com".to_string(),
            http_client,
        })
    }

    /// Set a custom base URL for any Chat-Completions-compatible API
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Create a chat completion using the Chat Completions API
    pub async fn create_chat_completion(
        &self,
        request: OpenAIChatCompletionRequest,
    ) -> Result<OpenAIChatCompletionResponse, LlmError> {
        let url = format!("{}/v1/chat/completions", self.base_url);

        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", self.api_key))
                .map_err(|_| LlmError::authentication("Invalid API key format"))?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let response = self
            .http_client
            .post(&url)
            .headers(headers)
            .json(&request)
            .send()
            .await
            .map_err(|e| LlmError::Network { source: e })?;

        let status = response.status();

        if status.is_success() {
            let openai_response: OpenAIChatCompletionResponse = response
                .json()
                .await
                .map_err(|e| LlmError::internal(format!("Failed to parse response: {}", e)))?;
            Ok(openai_response)
        } else {
            // Extract retry-after header before consuming the response
            let retry_after = if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                response
                    .headers()
                    .get("retry-after")
                    .and_then(|h| h.to_str().ok())
                    .and_then(|s| s.parse::<u64>().ok())
            } else {
                None
            };

            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());

            // Prefer the structured error message when the body parses
            let message = match serde_json::from_str::<OpenAIErrorResponse>(&error_text) {
                Ok(error_response) => error_response.error.message,
                Err(_) => error_text,
            };

            Err(map_status_error(status, message, retry_after))
        }
    }
}

fn map_status_error(
    status: reqwest::StatusCode,
    message: String,
    retry_after: Option<u64>,
) -> LlmError {
    match status {
        reqwest::StatusCode::BAD_REQUEST => LlmError::invalid_request(message),
        reqwest::StatusCode::UNAUTHORIZED => LlmError::authentication(message),
        reqwest::StatusCode::FORBIDDEN => LlmError::authentication(message),
        reqwest::StatusCode::PAYLOAD_TOO_LARGE => LlmError::invalid_request("Request too large"),
        reqwest::StatusCode::TOO_MANY_REQUESTS => LlmError::rate_limit(message, retry_after),
        _ => LlmError::api_error(status.as_u16(), message),
    }
}

impl OpenAIChatCompletionResponse {
    /// Get the content of the first choice, empty when no choice came back
    pub fn content(&self) -> &str {
        self.choices
            .first()
            .map(|c| c.message.content.as_str())
            .unwrap_or("")
    }
}

#[async_trait]
impl crate::client::LlmClient for OpenAIClient {
    async fn complete(
        &self,
        request: crate::types::CompletionRequest,
    ) -> Result<crate::types::CompletionResponse, LlmError> {
        let mut openai_messages = Vec::with_capacity(request.messages.len() + 1);

        // The generic request carries the system prompt out of band
        if let Some(system) = &request.system {
            openai_messages.push(OpenAIMessage::system(system.clone()));
        }

        for msg in request.messages {
            let role = match msg.role {
                crate::types::Role::User => OpenAIRole::User,
                crate::types::Role::Assistant => OpenAIRole::Assistant,
                crate::types::Role::System => OpenAIRole::System,
            };
            openai_messages.push(OpenAIMessage::new(role, msg.content));
        }

        let openai_request = OpenAIChatCompletionRequest {
            model: request.model,
            messages: openai_messages,
            max_completion_tokens: Some(request.max_tokens),
            temperature: request.temperature,
            top_p: request.top_p,
            stop: request.stop_sequences,
        };

        let openai_response = self.create_chat_completion(openai_request).await?;

        let choice = openai_response
            .choices
            .first()
            .ok_or_else(|| LlmError::internal("No completion choices returned"))?;

        Ok(crate::types::CompletionResponse {
            content: choice.message.content.clone(),
            role: match choice.message.role {
                OpenAIRole::User => crate::types::Role::User,
                OpenAIRole::Assistant => crate::types::Role::Assistant,
                OpenAIRole::System => crate::types::Role::System,
            },
            usage: crate::types::Usage {
                input_tokens: openai_response.usage.prompt_tokens,
                output_tokens: openai_response.usage.completion_tokens,
            },
            stop_reason: choice.finish_reason.clone(),
        })
    }

    fn provider_name(&self) -> &str {
        crate::providers::OPENAI
    }

    fn model_name(&self) -> &str {
        crate::models::openai::GPT_4O_ID
    }
}

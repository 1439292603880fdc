//! OpenAI Chat Completions API wire types.
//!
//! - **Endpoint:** `/v1/chat/completions`
//! - **Request Type:** [`OpenAIChatCompletionRequest`]
//! - **Response Type:** [`OpenAIChatCompletionResponse`]
//!
//! Any service that speaks this wire format (not only api.openai.com) can be
//! targeted by pointing the client at a different base URL.

use serde::{Deserialize, Serialize};

/// A message in the OpenAI conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAIMessage {
    /// Role of the message sender
    pub role: OpenAIRole,
    /// Content of the message
    pub content: String,
}

/// Role of an OpenAI message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OpenAIRole {
    /// System message
    System,
    /// User message
    User,
    /// Assistant message
    Assistant,
}

impl OpenAIMessage {
    /// Create a new text message
    pub fn new<S: Into<String>>(role: OpenAIRole, content: S) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    /// Create a system message
    pub fn system<S: Into<String>>(content: S) -> Self {
        Self::new(OpenAIRole::System, content)
    }

    /// Create a user message
    pub fn user<S: Into<String>>(content: S) -> Self {
        Self::new(OpenAIRole::User, content)
    }

    /// Create an assistant message
    pub fn assistant<S: Into<String>>(content: S) -> Self {
        Self::new(OpenAIRole::Assistant, content)
    }
}

/// Chat Completions API request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAIChatCompletionRequest {
    /// The model to use for generation
    pub model: String,
    /// Conversation messages, system first
    pub messages: Vec<OpenAIMessage>,
    /// Maximum completion tokens to generate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_completion_tokens: Option<u32>,
    /// Sampling temperature (0.0 for deterministic output)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    /// Top-p sampling parameter
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
    /// Stop sequences
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop: Option<Vec<String>>,
}

/// Chat Completions API response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAIChatCompletionResponse {
    /// Unique identifier for the completion
    pub id: String,
    /// Model used for generation
    pub model: String,
    /// Completion choices (first one carries the answer)
    pub choices: Vec<OpenAIChoice>,
    /// Token usage information
    pub usage: OpenAIUsage,
}

/// One completion choice
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAIChoice {
    /// Index of this choice
    pub index: u32,
    /// Generated message
    pub message: OpenAIChoiceMessage,
    /// Why generation stopped
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
}

/// Message inside a completion choice
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAIChoiceMessage {
    /// Role of the generated message
    pub role: OpenAIRole,
    /// Generated text (absent for refusals on some gateways)
    #[serde(default)]
    pub content: String,
}

/// Token usage information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAIUsage {
    /// Number of prompt tokens
    #[serde(default)]
    pub prompt_tokens: u32,
    /// Number of completion tokens
    #[serde(default)]
    pub completion_tokens: u32,
    /// Total number of tokens
    #[serde(default)]
    pub total_tokens: u32,
}

/// OpenAI API error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAIErrorResponse {
    /// Error details
    pub error: OpenAIError,
}

/// OpenAI API error details
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAIError {
    /// Error message
    pub message: String,
    /// Error type
    #[serde(rename = "type")]
    pub error_type: String,
    /// Error code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Parameter that caused the error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub param: Option<String>,
}

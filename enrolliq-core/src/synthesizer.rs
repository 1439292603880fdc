//! Natural-language-to-SQL translation.

use std::sync::Arc;

use enrolliq_llm_sdk::{
    client::LlmClient,
    error::LlmError,
    types::{CompletionRequest, Message},
};
use shared_types::SchemaDescription;
use thiserror::Error;

use crate::prompt::build_system_prompt;

/// Generated queries are short; one statement never needs more.
const MAX_COMPLETION_TOKENS: u32 = 512;

#[derive(Error, Debug)]
pub enum SynthesisError {
    /// The generation service was unreachable or errored.
    #[error("generation service failed: {0}")]
    Llm(#[from] LlmError),

    /// The service answered, but nothing was left after cleanup.
    #[error("generation service returned empty text")]
    EmptyCompletion,
}

/// Translates a free-text question into a single SQL query string.
///
/// Holds the injected LLM client and the immutable schema description; the
/// system prompt is built once at construction. Decoding is pinned to
/// temperature 0.0 so identical questions produce identical queries.
pub struct SqlSynthesizer {
    client: Arc<dyn LlmClient>,
    model: String,
    schema: SchemaDescription,
    system_prompt: String,
}

impl SqlSynthesizer {
    pub fn new(
        client: Arc<dyn LlmClient>,
        model: impl Into<String>,
        schema: SchemaDescription,
    ) -> Self {
        let system_prompt = build_system_prompt(&schema);
        Self {
            client,
            model: model.into(),
            schema,
            system_prompt,
        }
    }

    pub fn schema(&self) -> &SchemaDescription {
        &self.schema
    }

    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    /// Synthesize a query for the question. Best effort: the text is cleaned
    /// up but not parsed here; validation happens before execution.
    pub async fn synthesize(&self, question: &str) -> Result<String, SynthesisError> {
        let request = CompletionRequest {
            messages: vec![Message::user(question)],
            max_tokens: MAX_COMPLETION_TOKENS,
            model: self.model.clone(),
            system: Some(self.system_prompt.clone()),
            temperature: Some(0.0),
            top_p: None,
            stop_sequences: None,
        };

        let response = self.client.complete(request).await?;

        let sql = strip_code_fences(&response.content);
        if sql.is_empty() {
            return Err(SynthesisError::EmptyCompletion);
        }

        tracing::debug!(question, sql = %sql, "synthesized query");
        Ok(sql)
    }
}

/// Remove fenced code-block delimiters (```sql and bare ```) and trim.
///
/// Idempotent: stripping already-stripped text is a no-op.
pub fn strip_code_fences(text: &str) -> String {
    text.replace("```sql", "")
        .replace("```", "")
        .trim()
        .to_string()
}

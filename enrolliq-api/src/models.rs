use serde::{Deserialize, Serialize};
use shared_types::{ChartSpec, ResultTable, SchemaDescription};

#[derive(Debug, Deserialize)]
pub struct AskRequest {
    pub question: String,
}

/// Both chart specs share the same axes; the renderer shows them as tabs.
#[derive(Debug, Serialize)]
pub struct ChartsPayload {
    pub bar: ChartSpec,
    pub pie: ChartSpec,
}

#[derive(Debug, Serialize)]
pub struct AskSuccessResponse {
    /// Always "ok"
    pub status: String,
    /// The generated query, for display alongside the results
    pub sql: String,
    pub row_count: usize,
    pub table: ResultTable,
    /// Aligned-text rendering of the table
    pub formatted: String,
    /// `None` when the table shape does not support charting
    #[serde(skip_serializing_if = "Option::is_none")]
    pub charts: Option<ChartsPayload>,
}

/// Zero rows: informational, distinct from failure.
#[derive(Debug, Serialize)]
pub struct AskEmptyResponse {
    /// Always "empty"
    pub status: String,
    pub sql: String,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// One of "synthesis_failed", "rejected", "execution_failed", "bad_request"
    pub status: String,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sql: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SchemaResponse {
    pub schema: SchemaDescription,
    /// Suggested questions shown to first-time users.
    pub example_questions: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
}

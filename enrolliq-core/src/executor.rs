//! Boundary contract for the relational store.

use async_trait::async_trait;
use shared_types::ResultTable;
use thiserror::Error;

/// Execution failed. The message is the store's diagnostic text, passed
/// through verbatim so it can be shown to the user.
#[derive(Error, Debug, Clone)]
pub enum ExecutionError {
    /// Connection refused, authentication rejected, network unreachable.
    #[error("failed to connect to the store: {0}")]
    Connect(String),

    /// The store rejected or failed the query itself.
    #[error("{0}")]
    Query(String),
}

impl ExecutionError {
    /// The store-native diagnostic text.
    pub fn diagnostic(&self) -> &str {
        match self {
            ExecutionError::Connect(message) => message,
            ExecutionError::Query(message) => message,
        }
    }
}

/// Executes one textual query per call against the relational store.
///
/// Implementations must not truncate or reinterpret the query text. Injected
/// into [`crate::service::AskService`]; never read from ambient global state.
#[async_trait]
pub trait QueryExecutor: Send + Sync {
    async fn execute(&self, sql: &str) -> Result<ResultTable, ExecutionError>;
}

//! The sequential ask pipeline.
//!
//! One question triggers exactly one synthesis call, at most one execution
//! and at most one chart selection, strictly in that order. No retries: every
//! failure is surfaced once and needs a new user-initiated attempt.

use std::sync::Arc;

use shared_types::{ChartSpec, ResultTable, SchemaDescription};
use thiserror::Error;
use tracing::{info, warn};

use crate::chart::select_charts;
use crate::executor::{ExecutionError, QueryExecutor};
use crate::synthesizer::{SqlSynthesizer, SynthesisError};
use crate::validate::{validate_against_schema, ValidationError};

/// What a successful pipeline run produced.
#[derive(Debug, Clone)]
pub enum AskOutcome {
    /// The query matched rows. `charts` is `None` when the table has no
    /// categorical/numeric column pair; the caller shows the table only.
    Rows {
        sql: String,
        table: ResultTable,
        charts: Option<(ChartSpec, ChartSpec)>,
    },
    /// The query ran but matched nothing. Informational, not a failure;
    /// usually an overly specific or mistyped filter.
    Empty { sql: String },
}

/// The three failure kinds, never conflated.
#[derive(Error, Debug)]
pub enum AskError {
    #[error("cannot generate query: {0}")]
    Synthesis(#[from] SynthesisError),

    #[error("generated query was rejected: {reason}")]
    Rejected {
        sql: String,
        #[source]
        reason: ValidationError,
    },

    #[error(transparent)]
    Execution(#[from] ExecutionError),
}

/// Question in, outcome out. Both collaborators are injected.
pub struct AskService {
    synthesizer: SqlSynthesizer,
    executor: Arc<dyn QueryExecutor>,
}

impl AskService {
    pub fn new(synthesizer: SqlSynthesizer, executor: Arc<dyn QueryExecutor>) -> Self {
        Self {
            synthesizer,
            executor,
        }
    }

    pub fn schema(&self) -> &SchemaDescription {
        self.synthesizer.schema()
    }

    pub async fn ask(&self, question: &str) -> Result<AskOutcome, AskError> {
        let sql = self.synthesizer.synthesize(question).await?;

        if let Err(reason) = validate_against_schema(&sql, self.synthesizer.schema()) {
            warn!(sql = %sql, %reason, "rejecting generated query");
            return Err(AskError::Rejected { sql, reason });
        }

        let table = self.executor.execute(&sql).await?;

        if table.is_empty() {
            info!(sql = %sql, "query matched no rows");
            return Ok(AskOutcome::Empty { sql });
        }

        let charts = select_charts(&table);
        info!(
            sql = %sql,
            rows = table.row_count(),
            charted = charts.is_some(),
            "query answered"
        );

        Ok(AskOutcome::Rows { sql, table, charts })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use enrolliq_llm_sdk::client::LlmClient;
    use enrolliq_llm_sdk::error::LlmError;
    use enrolliq_llm_sdk::types::{CompletionRequest, CompletionResponse, Role, Usage};
    use serde_json::json;
    use shared_types::{ColumnMeta, ValueType};
    use std::sync::atomic::{AtomicBool, Ordering};

    struct FixedCompletion(String);

    #[async_trait]
    impl LlmClient for FixedCompletion {
        async fn complete(
            &self,
            _request: CompletionRequest,
        ) -> Result<CompletionResponse, LlmError> {
            Ok(CompletionResponse {
                content: self.0.clone(),
                role: Role::Assistant,
                usage: Usage::default(),
                stop_reason: Some("stop".to_string()),
            })
        }

        fn provider_name(&self) -> &str {
            "fixed"
        }

        fn model_name(&self) -> &str {
            "fixed-model"
        }
    }

    enum FakeStore {
        Table(ResultTable),
        Refused(String),
    }

    struct FakeExecutor {
        store: FakeStore,
        called: AtomicBool,
    }

    impl FakeExecutor {
        fn with_table(table: ResultTable) -> Arc<Self> {
            Arc::new(Self {
                store: FakeStore::Table(table),
                called: AtomicBool::new(false),
            })
        }

        fn unreachable(diagnostic: &str) -> Arc<Self> {
            Arc::new(Self {
                store: FakeStore::Refused(diagnostic.to_string()),
                called: AtomicBool::new(false),
            })
        }
    }

    #[async_trait]
    impl QueryExecutor for FakeExecutor {
        async fn execute(&self, _sql: &str) -> Result<ResultTable, ExecutionError> {
            self.called.store(true, Ordering::SeqCst);
            match &self.store {
                FakeStore::Table(table) => Ok(table.clone()),
                FakeStore::Refused(diagnostic) => {
                    Err(ExecutionError::Connect(diagnostic.clone()))
                }
            }
        }
    }

    fn service(completion: &str, executor: Arc<FakeExecutor>) -> AskService {
        let synthesizer = SqlSynthesizer::new(
            Arc::new(FixedCompletion(completion.to_string())),
            "gpt-4o",
            SchemaDescription::enrollment(),
        );
        AskService::new(synthesizer, executor)
    }

    fn department_totals() -> ResultTable {
        ResultTable::new(
            vec![
                ColumnMeta::new("DepartmentName", ValueType::Text),
                ColumnMeta::new("total", ValueType::Integer),
            ],
            vec![
                vec![json!("資訊工程系"), json!(412)],
                vec![json!("企業管理系"), json!(377)],
            ],
        )
    }

    const GROUPING_SQL: &str = "```sql\nSELECT DepartmentName, SUM(TotalStudents) AS total \
                                FROM CU_ST_1_1 WHERE fyy = '113' GROUP BY DepartmentName\n```";

    #[tokio::test]
    async fn test_grouping_scenario_yields_rows_and_charts() {
        let executor = FakeExecutor::with_table(department_totals());
        let svc = service(GROUPING_SQL, executor.clone());

        let outcome = svc.ask("113學年各系所學生人數統計").await.unwrap();
        match outcome {
            AskOutcome::Rows { sql, table, charts } => {
                assert!(sql.contains("GROUP BY DepartmentName"));
                assert!(sql.contains("SUM(TotalStudents)"));
                assert!(sql.contains("fyy = '113'"));
                assert!(!sql.contains("```"));
                assert_eq!(table.column_names(), vec!["DepartmentName", "total"]);
                assert_eq!(table.row_count(), 2);

                let (bar, pie) = charts.expect("axes exist");
                assert_eq!(bar.category_column, "DepartmentName");
                assert_eq!(bar.value_column, "total");
                assert_eq!(pie.title, "DepartmentName 佔比");
            }
            other => panic!("expected rows, got {other:?}"),
        }
        assert!(executor.called.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_unreachable_store_surfaces_execution_failure() {
        let executor =
            FakeExecutor::unreachable("connection refused: could not reach 203.64.37.61");
        let svc = service(GROUPING_SQL, executor);

        let err = svc.ask("113學年各系所學生人數統計").await.unwrap_err();
        match err {
            AskError::Execution(execution) => {
                assert!(!execution.diagnostic().is_empty());
                assert!(execution.diagnostic().contains("connection refused"));
            }
            other => panic!("expected execution failure, got {other}"),
        }
    }

    #[tokio::test]
    async fn test_zero_rows_is_the_empty_path_not_a_failure() {
        let empty = ResultTable::new(
            vec![
                ColumnMeta::new("DepartmentName", ValueType::Text),
                ColumnMeta::new("total", ValueType::Integer),
            ],
            vec![],
        );
        let svc = service(GROUPING_SQL, FakeExecutor::with_table(empty));

        let outcome = svc.ask("999學年各系所學生人數統計").await.unwrap();
        assert!(matches!(outcome, AskOutcome::Empty { .. }));
    }

    #[tokio::test]
    async fn test_rejected_query_never_reaches_the_store() {
        let executor = FakeExecutor::with_table(department_totals());
        let svc = service(
            "SELECT secret FROM AdminUsers",
            executor.clone(),
        );

        let err = svc.ask("anything").await.unwrap_err();
        match err {
            AskError::Rejected { sql, reason } => {
                assert!(sql.contains("AdminUsers"));
                assert_eq!(reason, ValidationError::UnknownTable("AdminUsers".to_string()));
            }
            other => panic!("expected rejection, got {other}"),
        }
        assert!(!executor.called.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_synthesis_failure_never_reaches_the_store() {
        let executor = FakeExecutor::with_table(department_totals());
        let svc = service("```sql\n```", executor.clone());

        let err = svc.ask("anything").await.unwrap_err();
        assert!(matches!(
            err,
            AskError::Synthesis(SynthesisError::EmptyCompletion)
        ));
        assert!(!executor.called.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_table_without_numeric_columns_falls_back_to_table_only() {
        let names_only = ResultTable::new(
            vec![ColumnMeta::new("DepartmentName", ValueType::Text)],
            vec![vec![json!("資訊工程系")]],
        );
        let svc = service(
            "SELECT DepartmentName FROM CU_ST_1_1",
            FakeExecutor::with_table(names_only),
        );

        match svc.ask("列出系所").await.unwrap() {
            AskOutcome::Rows { charts, .. } => assert!(charts.is_none()),
            other => panic!("expected rows, got {other:?}"),
        }
    }
}

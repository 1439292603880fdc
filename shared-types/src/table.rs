use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Inferred type of a result column.
///
/// One type per column, assigned from the store's column metadata, never from
/// row contents. `Boolean` and `Other` columns belong to neither the numeric
/// nor the categorical set when selecting chart axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    Integer,
    Float,
    Text,
    Boolean,
    Other,
}

impl ValueType {
    pub fn is_numeric(self) -> bool {
        matches!(self, ValueType::Integer | ValueType::Float)
    }

    pub fn is_categorical(self) -> bool {
        matches!(self, ValueType::Text)
    }
}

/// Name and inferred type of one result column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMeta {
    pub name: String,
    pub ty: ValueType,
}

impl ColumnMeta {
    pub fn new(name: impl Into<String>, ty: ValueType) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

/// Tabular output of executing a query.
///
/// Columns keep the store's left-to-right order; each row holds one JSON
/// value per column (string, number or null). Produced by the executor,
/// consumed by the chart selector and by direct display, then discarded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultTable {
    pub columns: Vec<ColumnMeta>,
    pub rows: Vec<Vec<Value>>,
}

impl ResultTable {
    pub fn new(columns: Vec<ColumnMeta>, rows: Vec<Vec<Value>>) -> Self {
        Self { columns, rows }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }
}

use serde::{Deserialize, Serialize};

/// Semantic tag for a schema column.
///
/// `Code` marks string-typed columns that hold code-like values (academic
/// year, school code). They must be compared with string literals even when
/// the values look numeric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    Text,
    Code,
    Integer,
}

/// One column of the described table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDescription {
    /// Column name as it appears in the store.
    pub name: String,
    /// Store-level type, e.g. `varchar(10)` or `int`.
    pub sql_type: String,
    /// Human-readable label shown to the user and to the model.
    pub label: String,
    /// Illustrative value, shown to the model to ground literal formatting.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
    pub kind: ColumnKind,
}

impl ColumnDescription {
    pub fn new(
        name: impl Into<String>,
        sql_type: impl Into<String>,
        label: impl Into<String>,
        kind: ColumnKind,
    ) -> Self {
        Self {
            name: name.into(),
            sql_type: sql_type.into(),
            label: label.into(),
            example: None,
            kind,
        }
    }

    pub fn with_example(mut self, example: impl Into<String>) -> Self {
        self.example = Some(example.into());
        self
    }
}

/// Static description of the table the assistant answers questions about.
///
/// Immutable for the process lifetime; injected into every synthesis request
/// as grounding context and used as the allow-list for query validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaDescription {
    /// Table name in the store.
    pub table: String,
    /// Human-readable title of the table.
    pub title: String,
    pub columns: Vec<ColumnDescription>,
}

impl SchemaDescription {
    /// The enrollment statistics table `CU_ST_1_1` (各系所學制在學學生人數統計表).
    pub fn enrollment() -> Self {
        Self {
            table: "CU_ST_1_1".to_string(),
            title: "各系所學制在學學生人數統計表".to_string(),
            columns: vec![
                ColumnDescription::new("fyy", "varchar(10)", "學年", ColumnKind::Code)
                    .with_example("113"),
                ColumnDescription::new("SchoolStatCode", "char(10)", "學校代碼", ColumnKind::Code),
                ColumnDescription::new(
                    "DepartmentName",
                    "varchar(100)",
                    "系所名稱",
                    ColumnKind::Text,
                )
                .with_example("資訊工程系"),
                ColumnDescription::new(
                    "ProgramClass",
                    "varchar(100)",
                    "學制班別",
                    ColumnKind::Text,
                )
                .with_example("日間部四技"),
                ColumnDescription::new(
                    "TotalStudents",
                    "int",
                    "在學學生數小計",
                    ColumnKind::Integer,
                ),
                ColumnDescription::new("MaleStudents", "int", "在學學生數男", ColumnKind::Integer),
                ColumnDescription::new(
                    "FemaleStudents",
                    "int",
                    "在學學生數女",
                    ColumnKind::Integer,
                ),
            ],
        }
    }

    /// Column lookup by name, case-insensitive (store identifiers are).
    pub fn column(&self, name: &str) -> Option<&ColumnDescription> {
        self.columns
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(name))
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    /// Columns that hold string-typed codes (compared with string literals).
    pub fn code_columns(&self) -> impl Iterator<Item = &ColumnDescription> {
        self.columns
            .iter()
            .filter(|c| c.kind == ColumnKind::Code)
    }
}

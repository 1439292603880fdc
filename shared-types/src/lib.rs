pub mod chart;
pub mod schema;
pub mod table;

pub use chart::{ChartKind, ChartSpec};
pub use schema::{ColumnDescription, ColumnKind, SchemaDescription};
pub use table::{ColumnMeta, ResultTable, ValueType};

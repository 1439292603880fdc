//! Chart axis selection.
//!
//! Deterministic, type-driven: only column order and column types matter,
//! never row contents or row order.

use shared_types::{ChartSpec, ResultTable};

/// Pick chart axes for a result table.
///
/// The first categorical column (original left-to-right order) becomes the
/// category axis and the first numeric column the value axis. This is a
/// fixed tie-break, not a best-guess heuristic. Returns `None` when the
/// table has no categorical or no numeric column; the caller falls back to
/// tabular display. A table with zero rows but typed columns still yields
/// specs.
pub fn select_charts(table: &ResultTable) -> Option<(ChartSpec, ChartSpec)> {
    let category = table.columns.iter().find(|c| c.ty.is_categorical())?;
    let value = table.columns.iter().find(|c| c.ty.is_numeric())?;

    Some((
        ChartSpec::bar(&category.name, &value.name),
        ChartSpec::pie(&category.name, &value.name),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use shared_types::{ChartKind, ColumnMeta, ValueType};

    fn table(columns: Vec<ColumnMeta>, rows: Vec<Vec<serde_json::Value>>) -> ResultTable {
        ResultTable::new(columns, rows)
    }

    #[test]
    fn test_no_numeric_column_yields_no_chart() {
        let t = table(
            vec![
                ColumnMeta::new("DepartmentName", ValueType::Text),
                ColumnMeta::new("ProgramClass", ValueType::Text),
            ],
            vec![vec![json!("資訊工程系"), json!("日間部四技")]],
        );
        assert!(select_charts(&t).is_none());
    }

    #[test]
    fn test_no_categorical_column_yields_no_chart() {
        let t = table(
            vec![
                ColumnMeta::new("MaleStudents", ValueType::Integer),
                ColumnMeta::new("FemaleStudents", ValueType::Integer),
            ],
            vec![vec![json!(60), json!(40)]],
        );
        assert!(select_charts(&t).is_none());
    }

    #[test]
    fn test_exactly_one_of_each_selects_those_axes() {
        let t = table(
            vec![
                ColumnMeta::new("DepartmentName", ValueType::Text),
                ColumnMeta::new("total", ValueType::Integer),
            ],
            vec![vec![json!("資訊工程系"), json!(120)]],
        );
        let (bar, pie) = select_charts(&t).unwrap();
        assert_eq!(bar.kind, ChartKind::Bar);
        assert_eq!(bar.category_column, "DepartmentName");
        assert_eq!(bar.value_column, "total");
        assert_eq!(bar.title, "DepartmentName vs total");
        assert_eq!(pie.kind, ChartKind::Pie);
        assert_eq!(pie.title, "DepartmentName 佔比");
        assert!(bar.show_values && pie.show_values);
    }

    #[test]
    fn test_column_order_decides_axes() {
        // [A(text), B(number), C(text), D(number)] selects (A, B)
        let t = table(
            vec![
                ColumnMeta::new("A", ValueType::Text),
                ColumnMeta::new("B", ValueType::Float),
                ColumnMeta::new("C", ValueType::Text),
                ColumnMeta::new("D", ValueType::Integer),
            ],
            vec![vec![json!("x"), json!(1.5), json!("y"), json!(2)]],
        );
        let (bar, _) = select_charts(&t).unwrap();
        assert_eq!(bar.category_column, "A");
        assert_eq!(bar.value_column, "B");
    }

    #[test]
    fn test_numeric_before_categorical_still_picks_first_of_each() {
        let t = table(
            vec![
                ColumnMeta::new("total", ValueType::Integer),
                ColumnMeta::new("DepartmentName", ValueType::Text),
            ],
            vec![],
        );
        let (bar, _) = select_charts(&t).unwrap();
        assert_eq!(bar.category_column, "DepartmentName");
        assert_eq!(bar.value_column, "total");
    }

    #[test]
    fn test_boolean_and_other_columns_belong_to_neither_set() {
        let t = table(
            vec![
                ColumnMeta::new("active", ValueType::Boolean),
                ColumnMeta::new("blob", ValueType::Other),
            ],
            vec![vec![json!(true), json!(null)]],
        );
        assert!(select_charts(&t).is_none());
    }

    #[test]
    fn test_zero_rows_with_typed_columns_still_yields_specs() {
        let t = table(
            vec![
                ColumnMeta::new("DepartmentName", ValueType::Text),
                ColumnMeta::new("total", ValueType::Integer),
            ],
            vec![],
        );
        assert!(select_charts(&t).is_some());
    }

    #[test]
    fn test_selection_ignores_row_order() {
        let columns = vec![
            ColumnMeta::new("DepartmentName", ValueType::Text),
            ColumnMeta::new("total", ValueType::Integer),
        ];
        let forward = table(
            columns.clone(),
            vec![
                vec![json!("資訊工程系"), json!(120)],
                vec![json!("企業管理系"), json!(95)],
            ],
        );
        let reversed = table(
            columns,
            vec![
                vec![json!("企業管理系"), json!(95)],
                vec![json!("資訊工程系"), json!(120)],
            ],
        );
        assert_eq!(select_charts(&forward), select_charts(&reversed));
    }
}

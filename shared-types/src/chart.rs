use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
    Pie,
}

/// Rendering-surface instruction for one chart.
///
/// Derived deterministically from a result table; carries column names, not
/// data. `show_values` asks the renderer to print the numeric value on or
/// next to each data point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub category_column: String,
    pub value_column: String,
    pub title: String,
    pub show_values: bool,
}

impl ChartSpec {
    pub fn bar(category: &str, value: &str) -> Self {
        Self {
            kind: ChartKind::Bar,
            category_column: category.to_string(),
            value_column: value.to_string(),
            title: format!("{category} vs {value}"),
            show_values: true,
        }
    }

    /// Pie chart framed as share-of-whole (佔比) over the category column.
    pub fn pie(category: &str, value: &str) -> Self {
        Self {
            kind: ChartKind::Pie,
            category_column: category.to_string(),
            value_column: value.to_string(),
            title: format!("{category} 佔比"),
            show_values: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_spec_title() {
        let spec = ChartSpec::bar("DepartmentName", "total");
        assert_eq!(spec.kind, ChartKind::Bar);
        assert_eq!(spec.title, "DepartmentName vs total");
        assert!(spec.show_values);
    }

    #[test]
    fn test_pie_spec_title() {
        let spec = ChartSpec::pie("DepartmentName", "total");
        assert_eq!(spec.kind, ChartKind::Pie);
        assert_eq!(spec.title, "DepartmentName 佔比");
        assert_eq!(spec.value_column, "total");
    }
}

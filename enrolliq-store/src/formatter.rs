//! Result table formatting for direct display.
//!
//! Aligned column format with separators, a row-count line, and smart
//! truncation: long strings cut at 50 characters, large result sets show the
//! first 20 rows.
//!
//! ```text
//! Query returned 3 rows.
//!
//! DepartmentName | total
//! ---------------+------
//! 資訊工程系      | 412
//! 企業管理系      | 377
//! 電機工程系      | 398
//! ```

use shared_types::ResultTable;

const MAX_DISPLAY_ROWS: usize = 20;
const MAX_CELL_CHARS: usize = 50;

pub fn format_result_table(table: &ResultTable) -> String {
    if table.is_empty() {
        return "Query executed successfully but returned no rows.".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!("Query returned {} rows.\n\n", table.row_count()));

    if table.columns.is_empty() {
        return output;
    }

    let mut col_widths: Vec<usize> = table.columns.iter().map(|c| c.name.chars().count()).collect();

    for row in &table.rows {
        for (i, cell) in row.iter().enumerate() {
            if i < col_widths.len() {
                let cell_str = format_cell_value(cell);
                col_widths[i] = col_widths[i].max(cell_str.chars().count());
            }
        }
    }

    let header_row: Vec<String> = table
        .columns
        .iter()
        .enumerate()
        .map(|(i, col)| pad(&col.name, col_widths[i]))
        .collect();
    output.push_str(&header_row.join(" | "));
    output.push('\n');

    let separator: Vec<String> = col_widths.iter().map(|&width| "-".repeat(width)).collect();
    output.push_str(&separator.join("-+-"));
    output.push('\n');

    for row in table.rows.iter().take(MAX_DISPLAY_ROWS) {
        let formatted_row: Vec<String> = row
            .iter()
            .enumerate()
            .map(|(i, cell)| pad(&format_cell_value(cell), col_widths[i]))
            .collect();
        output.push_str(&formatted_row.join(" | "));
        output.push('\n');
    }

    if table.row_count() > MAX_DISPLAY_ROWS {
        output.push_str(&format!(
            "\n... and {} more rows",
            table.row_count() - MAX_DISPLAY_ROWS
        ));
    }

    output
}

fn pad(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len >= width {
        text.to_string()
    } else {
        format!("{}{}", text, " ".repeat(width - len))
    }
}

fn format_cell_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::Null => "NULL".to_string(),
        serde_json::Value::String(s) => {
            if s.chars().count() > MAX_CELL_CHARS {
                let cut: String = s.chars().take(MAX_CELL_CHARS - 3).collect();
                format!("{}...", cut)
            } else {
                s.clone()
            }
        }
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        _ => value.to_string(),
    }
}

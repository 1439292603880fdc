//! Instruction-context construction for query synthesis.
//!
//! Pure data-to-string: the exact prompt text can be asserted in tests
//! without touching the network.

use shared_types::{ColumnKind, SchemaDescription};

/// Build the system prompt that constrains the model to the given schema.
///
/// Embeds the table name, every column with its store type, label and example
/// value, and the fixed authoring rules. Built once per synthesizer, reused
/// for every request.
pub fn build_system_prompt(schema: &SchemaDescription) -> String {
    let mut prompt = String::new();

    prompt.push_str(
        "You are a SQL expert. Convert the user's question into a single SQL \
         query against the schema below.\n\n",
    );

    prompt.push_str(&format!("Table: {} ({})\n", schema.table, schema.title));
    prompt.push_str("Columns:\n");
    for column in &schema.columns {
        prompt.push_str(&format!(
            "- {} ({}, {})",
            column.name, column.sql_type, column.label
        ));
        if let Some(example) = &column.example {
            match column.kind {
                ColumnKind::Integer => prompt.push_str(&format!(" -> e.g. {example}")),
                _ => prompt.push_str(&format!(" -> e.g. '{example}'")),
            }
        }
        prompt.push('\n');
    }

    prompt.push_str("\nRULES:\n");
    prompt.push_str("1. Return bare SQL text only. No markdown fences such as ```sql.\n");
    prompt.push_str(
        "2. For \"how many\" / \"total\" style questions, use SUM over the count \
         column together with GROUP BY on the relevant category column(s).\n",
    );
    prompt.push_str(&format!(
        "3. String comparisons against text columns must use the wide-character \
         literal form with an N prefix (e.g. {}).\n",
        text_literal_example(schema)
    ));

    let code_columns: Vec<&str> = schema.code_columns().map(|c| c.name.as_str()).collect();
    if !code_columns.is_empty() {
        prompt.push_str(&format!(
            "4. The column(s) {} are string-typed codes; compare them with string \
             literals (e.g. {}), never numeric literals.\n",
            code_columns.join(", "),
            code_literal_example(schema)
        ));
    }
    prompt.push_str(
        "5. Use only the table and columns listed above. Never invent columns or tables.\n",
    );

    prompt
}

/// `DepartmentName = N'資訊工程系'` style example for rule 3.
fn text_literal_example(schema: &SchemaDescription) -> String {
    schema
        .columns
        .iter()
        .find(|c| c.kind == ColumnKind::Text && c.example.is_some())
        .map(|c| format!("{} = N'{}'", c.name, c.example.as_deref().unwrap_or("")))
        .unwrap_or_else(|| "Name = N'...'".to_string())
}

/// `fyy = '113'` style example for rule 4.
fn code_literal_example(schema: &SchemaDescription) -> String {
    schema
        .code_columns()
        .find(|c| c.example.is_some())
        .map(|c| format!("{} = '{}'", c.name, c.example.as_deref().unwrap_or("")))
        .unwrap_or_else(|| "code = '...'".to_string())
}

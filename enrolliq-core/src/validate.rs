//! Allow-list validation of generated queries.
//!
//! The synthesizer is instructed to stay inside the schema, but instructions
//! are not enforcement. Before execution every query is parsed and checked:
//! single statement, SELECT only, no write keywords, and every referenced
//! table and column must exist in the schema description (projection aliases
//! are admitted, so `SUM(TotalStudents) AS total ... ORDER BY total` passes).
//!
//! Parsing uses the MS SQL dialect because that is the dialect the authoring
//! rules target (`N'...'` wide-character literals).

use shared_types::SchemaDescription;
use sqlparser::ast::{
    Expr, FunctionArg, FunctionArgExpr, FunctionArguments, GroupByExpr, Query, Select, SelectItem,
    SetExpr, Statement, TableFactor, TableWithJoins,
};
use sqlparser::dialect::MsSqlDialect;
use sqlparser::parser::Parser;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("query is not parseable SQL: {0}")]
    Parse(String),

    #[error("empty SQL statement")]
    Empty,

    #[error("multiple SQL statements are not allowed")]
    MultipleStatements,

    #[error("only SELECT queries are allowed")]
    NotSelect,

    #[error("use of '{0}' is not allowed in queries")]
    ForbiddenKeyword(String),

    #[error("unknown table: {0}")]
    UnknownTable(String),

    #[error("unknown column: {0}")]
    UnknownColumn(String),
}

const FORBIDDEN_KEYWORDS: [&str; 13] = [
    "DROP", "DELETE", "UPDATE", "INSERT", "CREATE", "ALTER", "TRUNCATE", "EXEC", "EXECUTE",
    "MERGE", "CALL", "GRANT", "REVOKE",
];

/// Validate a generated query against the schema allow-list.
pub fn validate_against_schema(
    sql: &str,
    schema: &SchemaDescription,
) -> Result<(), ValidationError> {
    let trimmed = sql.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty);
    }

    // Fast pre-parse check; the parser below catches the rest
    if trimmed.ends_with(';') && trimmed.matches(';').count() > 1 {
        return Err(ValidationError::MultipleStatements);
    }

    let dialect = MsSqlDialect {};
    let statements = Parser::parse_sql(&dialect, trimmed)
        .map_err(|e| ValidationError::Parse(e.to_string()))?;

    match statements.len() {
        0 => return Err(ValidationError::Empty),
        1 => {}
        _ => return Err(ValidationError::MultipleStatements),
    }

    let query = match &statements[0] {
        Statement::Query(query) => query,
        _ => return Err(ValidationError::NotSelect),
    };

    scan_keywords(trimmed)?;

    let mut checker = SchemaChecker::new(schema);
    checker.check_query(query)
}

/// Word-boundary scan for write keywords, so `created_at` never trips `CREATE`.
fn scan_keywords(sql: &str) -> Result<(), ValidationError> {
    let upper = sql.to_uppercase();
    for keyword in FORBIDDEN_KEYWORDS {
        let pattern = regex::Regex::new(&format!(r"\b{}\b", regex::escape(keyword)))
            .map_err(|e| ValidationError::Parse(e.to_string()))?;
        if pattern.is_match(&upper) {
            return Err(ValidationError::ForbiddenKeyword(keyword.to_string()));
        }
    }
    Ok(())
}

/// Walks the query AST checking table and column references.
struct SchemaChecker<'a> {
    schema: &'a SchemaDescription,
    /// Lowercased table names and aliases in scope.
    tables: Vec<String>,
    /// Lowercased projection aliases (usable in GROUP BY / ORDER BY / HAVING).
    aliases: Vec<String>,
}

impl<'a> SchemaChecker<'a> {
    fn new(schema: &'a SchemaDescription) -> Self {
        Self {
            schema,
            tables: Vec::new(),
            aliases: Vec::new(),
        }
    }

    fn check_query(&mut self, query: &Query) -> Result<(), ValidationError> {
        self.check_set_expr(&query.body)?;
        if let Some(order_by) = &query.order_by {
            for order_expr in &order_by.exprs {
                self.check_expr(&order_expr.expr)?;
            }
        }
        Ok(())
    }

    fn check_set_expr(&mut self, set_expr: &SetExpr) -> Result<(), ValidationError> {
        match set_expr {
            SetExpr::Select(select) => self.check_select(select),
            SetExpr::Query(query) => self.check_query(query),
            SetExpr::SetOperation { left, right, .. } => {
                self.check_set_expr(left)?;
                self.check_set_expr(right)
            }
            _ => Ok(()),
        }
    }

    fn check_select(&mut self, select: &Select) -> Result<(), ValidationError> {
        // Tables first so qualified references resolve, then projection
        // aliases, then the remaining clauses.
        for table_with_joins in &select.from {
            self.check_table_with_joins(table_with_joins)?;
        }

        for item in &select.projection {
            if let SelectItem::ExprWithAlias { alias, .. } = item {
                self.aliases.push(alias.value.to_lowercase());
            }
        }

        for item in &select.projection {
            match item {
                SelectItem::UnnamedExpr(expr) => self.check_expr(expr)?,
                SelectItem::ExprWithAlias { expr, .. } => self.check_expr(expr)?,
                SelectItem::QualifiedWildcard(name, _) => self.check_qualifier(name)?,
                SelectItem::Wildcard(_) => {}
            }
        }

        if let Some(selection) = &select.selection {
            self.check_expr(selection)?;
        }

        if let GroupByExpr::Expressions(exprs, _) = &select.group_by {
            for expr in exprs {
                self.check_expr(expr)?;
            }
        }

        if let Some(having) = &select.having {
            self.check_expr(having)?;
        }

        Ok(())
    }

    fn check_table_with_joins(
        &mut self,
        table_with_joins: &TableWithJoins,
    ) -> Result<(), ValidationError> {
        self.check_table_factor(&table_with_joins.relation)?;
        for join in &table_with_joins.joins {
            self.check_table_factor(&join.relation)?;
        }
        Ok(())
    }

    fn check_table_factor(&mut self, table_factor: &TableFactor) -> Result<(), ValidationError> {
        match table_factor {
            TableFactor::Table { name, alias, .. } => {
                self.check_table_name(name)?;
                if let Some(alias) = alias {
                    self.tables.push(alias.name.value.to_lowercase());
                }
                Ok(())
            }
            TableFactor::Derived {
                subquery, alias, ..
            } => {
                self.check_query(subquery)?;
                if let Some(alias) = alias {
                    self.tables.push(alias.name.value.to_lowercase());
                }
                Ok(())
            }
            TableFactor::NestedJoin {
                table_with_joins, ..
            } => self.check_table_with_joins(table_with_joins),
            _ => Ok(()),
        }
    }

    fn check_table_name(
        &mut self,
        name: &sqlparser::ast::ObjectName,
    ) -> Result<(), ValidationError> {
        // Qualified names (dbo.CU_ST_1_1) are judged by their last part.
        let table = match name.0.last() {
            Some(ident) => ident.value.as_str(),
            None => return Err(ValidationError::UnknownTable(String::new())),
        };
        if !table.eq_ignore_ascii_case(&self.schema.table) {
            return Err(ValidationError::UnknownTable(table.to_string()));
        }
        self.tables.push(table.to_lowercase());
        Ok(())
    }

    /// A wildcard qualifier (`t.*`) may be a table name or an alias in scope.
    fn check_qualifier(
        &self,
        name: &sqlparser::ast::ObjectName,
    ) -> Result<(), ValidationError> {
        let qualifier = match name.0.last() {
            Some(ident) => ident.value.as_str(),
            None => return Ok(()),
        };
        if qualifier.eq_ignore_ascii_case(&self.schema.table)
            || self.tables.contains(&qualifier.to_lowercase())
        {
            Ok(())
        } else {
            Err(ValidationError::UnknownTable(qualifier.to_string()))
        }
    }

    fn check_column(&self, name: &str) -> Result<(), ValidationError> {
        if self.schema.has_column(name) || self.aliases.contains(&name.to_lowercase()) {
            Ok(())
        } else {
            Err(ValidationError::UnknownColumn(name.to_string()))
        }
    }

    fn check_expr(&mut self, expr: &Expr) -> Result<(), ValidationError> {
        match expr {
            Expr::Identifier(ident) => self.check_column(&ident.value),
            Expr::CompoundIdentifier(parts) => {
                if let Some((column, qualifier)) = parts.split_last() {
                    for part in qualifier {
                        let q = part.value.to_lowercase();
                        if !self.tables.contains(&q) {
                            return Err(ValidationError::UnknownTable(part.value.clone()));
                        }
                    }
                    self.check_column(&column.value)
                } else {
                    Ok(())
                }
            }
            Expr::BinaryOp { left, right, .. } => {
                self.check_expr(left)?;
                self.check_expr(right)
            }
            Expr::UnaryOp { expr, .. } => self.check_expr(expr),
            Expr::Nested(expr) => self.check_expr(expr),
            Expr::IsNull(expr) | Expr::IsNotNull(expr) => self.check_expr(expr),
            Expr::Between {
                expr, low, high, ..
            } => {
                self.check_expr(expr)?;
                self.check_expr(low)?;
                self.check_expr(high)
            }
            Expr::Like { expr, pattern, .. } | Expr::ILike { expr, pattern, .. } => {
                self.check_expr(expr)?;
                self.check_expr(pattern)
            }
            Expr::InList { expr, list, .. } => {
                self.check_expr(expr)?;
                for item in list {
                    self.check_expr(item)?;
                }
                Ok(())
            }
            Expr::InSubquery { expr, subquery, .. } => {
                self.check_expr(expr)?;
                self.check_query(subquery)
            }
            Expr::Subquery(subquery) => self.check_query(subquery),
            Expr::Cast { expr, .. } => self.check_expr(expr),
            Expr::Function(function) => self.check_function(function),
            // Literals and anything else carry no schema references.
            _ => Ok(()),
        }
    }

    fn check_function(
        &mut self,
        function: &sqlparser::ast::Function,
    ) -> Result<(), ValidationError> {
        match &function.args {
            FunctionArguments::List(list) => {
                for arg in &list.args {
                    let arg_expr = match arg {
                        FunctionArg::Named { arg, .. } => arg,
                        FunctionArg::Unnamed(arg) => arg,
                    };
                    match arg_expr {
                        FunctionArgExpr::Expr(expr) => self.check_expr(expr)?,
                        FunctionArgExpr::QualifiedWildcard(name) => {
                            self.check_qualifier(name)?;
                        }
                        FunctionArgExpr::Wildcard => {}
                    }
                }
                Ok(())
            }
            FunctionArguments::Subquery(subquery) => self.check_query(subquery),
            FunctionArguments::None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema() -> SchemaDescription {
        SchemaDescription::enrollment()
    }

    #[test]
    fn test_accepts_the_canonical_grouping_query() {
        let sql = "SELECT DepartmentName, SUM(TotalStudents) AS total \
                   FROM CU_ST_1_1 WHERE fyy = '113' GROUP BY DepartmentName";
        assert!(validate_against_schema(sql, &schema()).is_ok());
    }

    #[test]
    fn test_accepts_wide_character_literals() {
        let sql = "SELECT MaleStudents, FemaleStudents FROM CU_ST_1_1 \
                   WHERE DepartmentName = N'資訊工程系' AND fyy = '113'";
        assert!(validate_against_schema(sql, &schema()).is_ok());
    }

    #[test]
    fn test_accepts_projection_alias_in_order_by() {
        let sql = "SELECT DepartmentName, SUM(TotalStudents) AS total FROM CU_ST_1_1 \
                   GROUP BY DepartmentName ORDER BY total DESC";
        assert!(validate_against_schema(sql, &schema()).is_ok());
    }

    #[test]
    fn test_accepts_qualified_references() {
        let sql = "SELECT t.DepartmentName FROM CU_ST_1_1 AS t WHERE t.fyy = '113'";
        assert!(validate_against_schema(sql, &schema()).is_ok());
    }

    #[test]
    fn test_rejects_unknown_column() {
        let sql = "SELECT GraduateStudents FROM CU_ST_1_1";
        assert_eq!(
            validate_against_schema(sql, &schema()),
            Err(ValidationError::UnknownColumn("GraduateStudents".to_string()))
        );
    }

    #[test]
    fn test_rejects_unknown_table() {
        let sql = "SELECT DepartmentName FROM CU_ST_9_9";
        assert_eq!(
            validate_against_schema(sql, &schema()),
            Err(ValidationError::UnknownTable("CU_ST_9_9".to_string()))
        );
    }

    #[test]
    fn test_rejects_unknown_column_in_where() {
        let sql = "SELECT DepartmentName FROM CU_ST_1_1 WHERE campus = N'北區'";
        assert_eq!(
            validate_against_schema(sql, &schema()),
            Err(ValidationError::UnknownColumn("campus".to_string()))
        );
    }

    #[test]
    fn test_rejects_non_select_statements() {
        assert_eq!(
            validate_against_schema("UPDATE CU_ST_1_1 SET fyy = '114'", &schema()),
            Err(ValidationError::NotSelect)
        );
        assert!(matches!(
            validate_against_schema("DROP TABLE CU_ST_1_1", &schema()),
            Err(ValidationError::NotSelect | ValidationError::Parse(_))
        ));
        assert!(matches!(
            validate_against_schema("DELETE FROM CU_ST_1_1", &schema()),
            Err(ValidationError::NotSelect)
        ));
    }

    #[test]
    fn test_rejects_multiple_statements() {
        let sql = "SELECT fyy FROM CU_ST_1_1; SELECT fyy FROM CU_ST_1_1";
        assert_eq!(
            validate_against_schema(sql, &schema()),
            Err(ValidationError::MultipleStatements)
        );
    }

    #[test]
    fn test_trailing_semicolon_is_fine() {
        let sql = "SELECT fyy FROM CU_ST_1_1;";
        assert!(validate_against_schema(sql, &schema()).is_ok());
    }

    #[test]
    fn test_rejects_empty_text() {
        assert_eq!(
            validate_against_schema("   ", &schema()),
            Err(ValidationError::Empty)
        );
    }

    #[test]
    fn test_rejects_gibberish() {
        assert!(matches!(
            validate_against_schema("this is not sql", &schema()),
            Err(ValidationError::Parse(_) | ValidationError::NotSelect)
        ));
    }

    #[test]
    fn test_column_check_is_case_insensitive() {
        let sql = "SELECT departmentname FROM cu_st_1_1";
        assert!(validate_against_schema(sql, &schema()).is_ok());
    }

    #[test]
    fn test_count_star_is_allowed() {
        let sql = "SELECT ProgramClass, COUNT(*) AS n FROM CU_ST_1_1 GROUP BY ProgramClass";
        assert!(validate_against_schema(sql, &schema()).is_ok());
    }
}

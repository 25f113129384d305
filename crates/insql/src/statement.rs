//! Per-statement build context.

use crate::condition::Condition;
use crate::dialect::Dialect;
use crate::expr::{ExprColumns, ExprValue};
use crate::quoter::Quoter;
use crate::table::Table;
use crate::writer::StatementWriter;

/// Everything an insert generator needs besides the columns and values:
/// dialect, target table, expression columns and an optional filter.
///
/// A `Statement` is built fresh for one statement and discarded afterwards.
///
/// # Example
/// ```
/// use insql::{Condition, Statement, StdDialect, Table};
///
/// let dialect = StdDialect::postgres();
/// let stmt = Statement::new(&dialect, Table::new("user").with_autoincrement("id"))
///     .set_expr("created", "NOW()")
///     .where_cond(Condition::gt("age", 18));
/// assert_eq!(stmt.table_name(), "user");
/// assert!(stmt.conds().is_valid());
/// ```
#[derive(Clone)]
pub struct Statement<'a> {
    dialect: &'a dyn Dialect,
    table: Table,
    table_name: Option<String>,
    expr_columns: ExprColumns,
    conds: Condition,
}

impl<'a> Statement<'a> {
    pub fn new(dialect: &'a dyn Dialect, table: Table) -> Self {
        Self {
            dialect,
            table,
            table_name: None,
            expr_columns: ExprColumns::new(),
            conds: Condition::default(),
        }
    }

    /// Write into `name` instead of the table's own name (e.g. a sharded table).
    pub fn with_table_name(mut self, name: impl Into<String>) -> Self {
        self.table_name = Some(name.into());
        self
    }

    /// Insert `column` with a SQL expression instead of a bound value.
    pub fn set_expr(mut self, column: impl Into<String>, value: impl Into<ExprValue>) -> Self {
        self.expr_columns.push(column, value);
        self
    }

    /// Replace the filter condition.
    pub fn where_cond(mut self, cond: Condition) -> Self {
        self.conds = cond;
        self
    }

    /// AND `cond` onto the filter condition.
    pub fn and(mut self, cond: Condition) -> Self {
        self.conds = if self.conds.is_valid() {
            self.conds.and_also(cond)
        } else {
            cond
        };
        self
    }

    /// OR `cond` onto the filter condition.
    pub fn or(mut self, cond: Condition) -> Self {
        self.conds = if self.conds.is_valid() {
            self.conds.or_else(cond)
        } else {
            cond
        };
        self
    }

    pub fn dialect(&self) -> &'a dyn Dialect {
        self.dialect
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    /// Effective target table name.
    pub fn table_name(&self) -> &str {
        self.table_name.as_deref().unwrap_or(&self.table.name)
    }

    pub fn expr_columns(&self) -> &ExprColumns {
        &self.expr_columns
    }

    pub fn conds(&self) -> &Condition {
        &self.conds
    }

    pub(crate) fn quoter(&self) -> Quoter {
        self.dialect.quoter()
    }

    /// A fresh `String`-backed writer using this dialect's placeholders.
    pub fn writer(&self) -> StatementWriter {
        StatementWriter::new(self.dialect.placeholder())
    }
}

impl std::fmt::Debug for Statement<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Statement")
            .field("db_type", &self.dialect.db_type())
            .field("table", &self.table)
            .field("table_name", &self.table_name)
            .field("expr_columns", &self.expr_columns)
            .field("conds", &self.conds)
            .finish()
    }
}

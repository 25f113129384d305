//! Columns whose insert value is a SQL expression instead of a bound argument.

use crate::condition::Condition;
use crate::error::BuildResult;
use crate::quoter::Quoter;
use crate::writer::StatementWriter;
use std::fmt;

/// Value expression for an expression column.
#[derive(Debug, Clone, PartialEq)]
pub enum ExprValue {
    /// Raw SQL fragment, written verbatim (e.g. `NOW()`, `version + 1`)
    Raw(String),
    /// Boolean sub-expression, written in parentheses with its arguments bound in place
    Cond(Condition),
}

impl From<&str> for ExprValue {
    fn from(sql: &str) -> Self {
        ExprValue::Raw(sql.to_string())
    }
}

impl From<String> for ExprValue {
    fn from(sql: String) -> Self {
        ExprValue::Raw(sql)
    }
}

impl From<Condition> for ExprValue {
    fn from(cond: Condition) -> Self {
        ExprValue::Cond(cond)
    }
}

#[derive(Debug, Clone, PartialEq)]
struct ExprColumn {
    column: String,
    value: ExprValue,
}

/// Ordered set of expression columns.
///
/// Setting a column twice replaces its expression in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExprColumns {
    columns: Vec<ExprColumn>,
}

impl ExprColumns {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the expression for `column`.
    pub fn push(&mut self, column: impl Into<String>, value: impl Into<ExprValue>) {
        let column = column.into();
        let value = value.into();
        match self.columns.iter_mut().find(|c| c.column == column) {
            Some(existing) => existing.value = value,
            None => self.columns.push(ExprColumn { column, value }),
        }
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Column names, in insertion order.
    pub fn col_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.column.as_str()).collect()
    }

    /// Check whether `column` already has an expression.
    pub fn contains(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c.column == column)
    }

    /// Write the expressions, comma-joined, in column order.
    pub fn write_values<W: fmt::Write>(
        &self,
        w: &mut StatementWriter<W>,
        quoter: &Quoter,
    ) -> BuildResult<()> {
        for (i, col) in self.columns.iter().enumerate() {
            if i > 0 {
                w.push(",")?;
            }
            match &col.value {
                ExprValue::Raw(sql) => {
                    w.push(sql)?;
                }
                ExprValue::Cond(cond) => {
                    w.push("(")?;
                    cond.write_to(w, quoter)?;
                    w.push(")")?;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::PlaceholderStyle;
    use crate::value::Value;

    #[test]
    fn keeps_insertion_order_and_replaces() {
        let mut exprs = ExprColumns::new();
        exprs.push("created", "NOW()");
        exprs.push("version", "1");
        exprs.push("created", "CURRENT_TIMESTAMP");
        assert_eq!(exprs.col_names(), vec!["created", "version"]);
        assert!(exprs.contains("version"));

        let mut w = StatementWriter::new(PlaceholderStyle::Question);
        exprs.write_values(&mut w, &Quoter::none()).unwrap();
        assert_eq!(w.sql(), "CURRENT_TIMESTAMP,1");
        assert!(w.args().is_empty());
    }

    #[test]
    fn condition_expression_binds_in_place() {
        let mut exprs = ExprColumns::new();
        exprs.push("is_adult", Condition::gte("age", 18));
        let mut w = StatementWriter::new(PlaceholderStyle::Dollar);
        w.push_bind("x").unwrap().push(",").unwrap();
        exprs.write_values(&mut w, &Quoter::none()).unwrap();
        assert_eq!(w.sql(), "$1,(age >= $2)");
        assert_eq!(w.args(), &[Value::from("x"), Value::Int(18)]);
    }
}

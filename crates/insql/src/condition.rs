//! WHERE-clause condition trees.
//!
//! This module provides [`Op`] (operator) and [`Condition`] for building the
//! filter of a conditional insert (`INSERT ... SELECT ... WHERE ...`). A condition
//! renders itself into a [`StatementWriter`], quoting columns with the dialect
//! quoter and binding its own arguments in left-to-right order.
//!
//! # Example
//! ```
//! use insql::{Condition, PlaceholderStyle, Quoter, StatementWriter};
//!
//! let cond = Condition::gt("age", 18).and_also(Condition::in_list("role", vec!["a", "b"]));
//! let mut w = StatementWriter::new(PlaceholderStyle::Question);
//! cond.write_to(&mut w, &Quoter::none())?;
//! assert_eq!(w.sql(), "age > ? AND role IN (?,?)");
//! # Ok::<(), insql::BuildError>(())
//! ```

use crate::error::{BuildError, BuildResult};
use crate::quoter::Quoter;
use crate::value::Value;
use crate::writer::StatementWriter;
use std::fmt;

/// Query operator for building conditions.
#[derive(Debug, Clone)]
pub enum Op<T> {
    /// Equal: column = value
    Eq(T),
    /// Not equal: column <> value
    Ne(T),
    /// Greater than: column > value
    Gt(T),
    /// Greater than or equal: column >= value
    Gte(T),
    /// Less than: column < value
    Lt(T),
    /// Less than or equal: column <= value
    Lte(T),
    /// LIKE pattern match
    Like(T),
    /// NOT LIKE pattern match
    NotLike(T),
    /// IS NULL
    IsNull,
    /// IS NOT NULL
    IsNotNull,
    /// IN (list)
    In(Vec<T>),
    /// NOT IN (list)
    NotIn(Vec<T>),
    /// BETWEEN a AND b
    Between(T, T),
    /// NOT BETWEEN a AND b
    NotBetween(T, T),
}

#[derive(Debug, Clone, PartialEq)]
enum ConditionValue {
    Single(Value),
    Pair(Value, Value),
    List(Vec<Value>),
    None,
}

#[derive(Debug, Clone, PartialEq)]
enum ConditionInner {
    /// Raw SQL fragment; each `?` binds the next argument.
    Raw { sql: String, args: Vec<Value> },
    Expr {
        column: String,
        operator: &'static str,
        value: ConditionValue,
    },
    And(Vec<Condition>),
    Or(Vec<Condition>),
    Not(Box<Condition>),
}

/// A boolean filter expression.
///
/// `Condition::default()` is an empty `AND` group, which is not
/// [valid](Condition::is_valid) and therefore means "no WHERE".
#[derive(Debug, Clone, PartialEq)]
pub struct Condition(ConditionInner);

impl Default for Condition {
    fn default() -> Self {
        Condition(ConditionInner::And(Vec::new()))
    }
}

impl Condition {
    /// Create a structured condition from a column name and operator.
    pub fn new<T: Into<Value>>(column: impl Into<String>, op: Op<T>) -> Self {
        let (operator, value) = match op {
            Op::Eq(v) => ("=", ConditionValue::Single(v.into())),
            Op::Ne(v) => ("<>", ConditionValue::Single(v.into())),
            Op::Gt(v) => (">", ConditionValue::Single(v.into())),
            Op::Gte(v) => (">=", ConditionValue::Single(v.into())),
            Op::Lt(v) => ("<", ConditionValue::Single(v.into())),
            Op::Lte(v) => ("<=", ConditionValue::Single(v.into())),
            Op::Like(v) => ("LIKE", ConditionValue::Single(v.into())),
            Op::NotLike(v) => ("NOT LIKE", ConditionValue::Single(v.into())),
            Op::IsNull => ("IS NULL", ConditionValue::None),
            Op::IsNotNull => ("IS NOT NULL", ConditionValue::None),
            Op::In(vals) => (
                "IN",
                ConditionValue::List(vals.into_iter().map(Into::into).collect()),
            ),
            Op::NotIn(vals) => (
                "NOT IN",
                ConditionValue::List(vals.into_iter().map(Into::into).collect()),
            ),
            Op::Between(from, to) => ("BETWEEN", ConditionValue::Pair(from.into(), to.into())),
            Op::NotBetween(from, to) => (
                "NOT BETWEEN",
                ConditionValue::Pair(from.into(), to.into()),
            ),
        };

        Condition(ConditionInner::Expr {
            column: column.into(),
            operator,
            value,
        })
    }

    /// Create a raw SQL condition with `?` markers for its arguments.
    ///
    /// Each `?` is rewritten to the dialect placeholder when rendered.
    /// Fails if the number of `?` markers differs from the number of arguments.
    ///
    /// Be careful with SQL injection: `sql` is written verbatim.
    pub fn expr<I>(sql: impl Into<String>, args: I) -> BuildResult<Self>
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        let sql = sql.into();
        let args: Vec<Value> = args.into_iter().map(Into::into).collect();
        let markers = sql.matches('?').count();
        if markers != args.len() {
            return Err(BuildError::validation(format!(
                "Condition::expr: {markers} placeholder(s) but {} argument(s) in '{sql}'",
                args.len()
            )));
        }
        Ok(Condition(ConditionInner::Raw { sql, args }))
    }

    /// Create a raw SQL condition without arguments, written verbatim.
    ///
    /// Fails if `sql` contains a `?` marker; use [`Condition::expr`] to bind arguments.
    pub fn raw(sql: impl Into<String>) -> BuildResult<Self> {
        Self::expr(sql, Vec::<Value>::new())
    }

    /// All of `conds` must hold.
    pub fn and(conds: impl IntoIterator<Item = Condition>) -> Self {
        Condition(ConditionInner::And(conds.into_iter().collect()))
    }

    /// Any of `conds` must hold.
    pub fn or(conds: impl IntoIterator<Item = Condition>) -> Self {
        Condition(ConditionInner::Or(conds.into_iter().collect()))
    }

    /// Negate `cond`.
    #[allow(clippy::should_implement_trait)]
    pub fn not(cond: Condition) -> Self {
        Condition(ConditionInner::Not(Box::new(cond)))
    }

    /// `self AND other`, flattening into an existing `AND` group.
    pub fn and_also(self, other: Condition) -> Self {
        match self.0 {
            ConditionInner::And(mut conds) => {
                conds.push(other);
                Condition(ConditionInner::And(conds))
            }
            inner => Condition::and([Condition(inner), other]),
        }
    }

    /// `self OR other`, flattening into an existing `OR` group.
    pub fn or_else(self, other: Condition) -> Self {
        match self.0 {
            ConditionInner::Or(mut conds) => {
                conds.push(other);
                Condition(ConditionInner::Or(conds))
            }
            inner => Condition::or([Condition(inner), other]),
        }
    }

    // ==================== Convenience constructors ====================

    /// column = value
    pub fn eq(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(column, Op::Eq(value.into()))
    }

    /// column <> value
    pub fn ne(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(column, Op::Ne(value.into()))
    }

    /// column > value
    pub fn gt(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(column, Op::Gt(value.into()))
    }

    /// column >= value
    pub fn gte(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(column, Op::Gte(value.into()))
    }

    /// column < value
    pub fn lt(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(column, Op::Lt(value.into()))
    }

    /// column <= value
    pub fn lte(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(column, Op::Lte(value.into()))
    }

    /// column LIKE pattern
    pub fn like(column: impl Into<String>, pattern: impl Into<Value>) -> Self {
        Self::new(column, Op::Like(pattern.into()))
    }

    /// column NOT LIKE pattern
    pub fn not_like(column: impl Into<String>, pattern: impl Into<Value>) -> Self {
        Self::new(column, Op::NotLike(pattern.into()))
    }

    /// column IS NULL
    pub fn is_null(column: impl Into<String>) -> Self {
        Self::new(column, Op::<Value>::IsNull)
    }

    /// column IS NOT NULL
    pub fn is_not_null(column: impl Into<String>) -> Self {
        Self::new(column, Op::<Value>::IsNotNull)
    }

    /// column IN (values...)
    pub fn in_list<T: Into<Value>>(column: impl Into<String>, values: Vec<T>) -> Self {
        Self::new(column, Op::In(values))
    }

    /// column NOT IN (values...)
    pub fn not_in<T: Into<Value>>(column: impl Into<String>, values: Vec<T>) -> Self {
        Self::new(column, Op::NotIn(values))
    }

    /// column BETWEEN from AND to
    pub fn between<T: Into<Value>>(column: impl Into<String>, from: T, to: T) -> Self {
        Self::new(column, Op::Between(from, to))
    }

    /// column NOT BETWEEN from AND to
    pub fn not_between<T: Into<Value>>(column: impl Into<String>, from: T, to: T) -> Self {
        Self::new(column, Op::NotBetween(from, to))
    }

    /// Whether this condition renders to anything.
    ///
    /// Only empty groups (and raw blanks) are invalid.
    pub fn is_valid(&self) -> bool {
        match &self.0 {
            ConditionInner::Raw { sql, .. } => !sql.trim().is_empty(),
            ConditionInner::Expr { .. } => true,
            ConditionInner::And(conds) | ConditionInner::Or(conds) => {
                conds.iter().any(Condition::is_valid)
            }
            ConditionInner::Not(cond) => cond.is_valid(),
        }
    }

    fn is_group(&self) -> bool {
        match &self.0 {
            ConditionInner::And(conds) | ConditionInner::Or(conds) => {
                let mut valid = conds.iter().filter(|c| c.is_valid());
                match (valid.next(), valid.next()) {
                    (Some(_), Some(_)) => true,
                    // a single-child group renders as its child
                    (Some(only), None) => only.is_group(),
                    _ => false,
                }
            }
            ConditionInner::Raw { .. } => true,
            _ => false,
        }
    }

    /// Render this condition into `w`, binding its arguments in order.
    pub fn write_to<W: fmt::Write>(
        &self,
        w: &mut StatementWriter<W>,
        quoter: &Quoter,
    ) -> BuildResult<()> {
        match &self.0 {
            ConditionInner::Raw { sql, args } => {
                for (i, piece) in sql.split('?').enumerate() {
                    if i > 0 {
                        w.push_bind(args[i - 1].clone())?;
                    }
                    w.push(piece)?;
                }
            }
            ConditionInner::Expr {
                column,
                operator,
                value,
            } => match value {
                ConditionValue::List(vals) if vals.is_empty() => {
                    // Empty IN list - always false / true
                    w.push(if *operator == "IN" { "1=0" } else { "1=1" })?;
                }
                ConditionValue::Single(v) => {
                    w.push_ident(quoter, column)?.push(" ")?.push(operator)?.push(" ")?;
                    w.push_bind(v.clone())?;
                }
                ConditionValue::Pair(a, b) => {
                    w.push_ident(quoter, column)?.push(" ")?.push(operator)?.push(" ")?;
                    w.push_bind(a.clone())?.push(" AND ")?.push_bind(b.clone())?;
                }
                ConditionValue::List(vals) => {
                    w.push_ident(quoter, column)?.push(" ")?.push(operator)?.push(" (")?;
                    w.push_binds(vals.iter().cloned())?.push(")")?;
                }
                ConditionValue::None => {
                    w.push_ident(quoter, column)?.push(" ")?.push(operator)?;
                }
            },
            ConditionInner::And(conds) => write_group(w, quoter, conds, " AND ")?,
            ConditionInner::Or(conds) => write_group(w, quoter, conds, " OR ")?,
            ConditionInner::Not(cond) => {
                w.push("NOT (")?;
                cond.write_to(w, quoter)?;
                w.push(")")?;
            }
        }
        Ok(())
    }
}

fn write_group<W: fmt::Write>(
    w: &mut StatementWriter<W>,
    quoter: &Quoter,
    conds: &[Condition],
    sep: &str,
) -> BuildResult<()> {
    let valid: Vec<&Condition> = conds.iter().filter(|c| c.is_valid()).collect();
    let wrap = valid.len() > 1;
    for (i, cond) in valid.into_iter().enumerate() {
        if i > 0 {
            w.push(sep)?;
        }
        if wrap && cond.is_group() {
            w.push("(")?;
            cond.write_to(w, quoter)?;
            w.push(")")?;
        } else {
            cond.write_to(w, quoter)?;
        }
    }
    Ok(())
}

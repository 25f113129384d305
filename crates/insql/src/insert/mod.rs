//! INSERT statement generation.
//!
//! Two generators hang off [`Statement`]:
//!
//! - [`Statement::gen_insert_sql`] builds a row insert from parallel column/value
//!   lists and handles every dialect branch: empty rows, generated-key retrieval
//!   (`OUTPUT`, `RETURNING`, Oracle sequences) and conditional inserts
//!   (`INSERT ... SELECT ... FROM ... WHERE ...`).
//! - [`Statement::gen_insert_map_sql`] builds the simpler map-driven insert, with
//!   no empty-row or generated-key handling.
//!
//! Placeholders and arguments are written in lockstep through a
//! [`StatementWriter`]: insert values first, then expression-column arguments,
//! then the condition's arguments.
//!
//! # Example
//! ```
//! use insql::{Statement, StdDialect, Table, Value};
//!
//! let dialect = StdDialect::postgres();
//! let stmt = Statement::new(&dialect, Table::new("user").with_autoincrement("id"));
//! let w = stmt.gen_insert_sql(&["name"], ["alice"])?;
//! assert_eq!(w.sql(), r#"INSERT INTO "user" ("name") VALUES ($1) RETURNING "id""#);
//! assert_eq!(w.args(), &[Value::from("alice")]);
//! # Ok::<(), insql::BuildError>(())
//! ```

use crate::dialect::DbType;
use crate::error::{BuildError, BuildResult};
use crate::statement::Statement;
use crate::value::Value;
use crate::writer::StatementWriter;
use std::collections::BTreeMap;
use std::fmt;


/// How a dialect hands back the value of an autoincrement column.
///
/// Exactly one mechanism applies per dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyRetrieval {
    /// `OUTPUT Inserted.<col>` right after the column list (MSSQL)
    OutputClause,
    /// Trailing `RETURNING <col>` (PostgreSQL)
    Returning,
    /// Column filled from `<sequence>.nextval` (Oracle)
    Sequence,
    /// Nothing in the statement; the caller asks for the last insert id
    LastInsertId,
}

impl KeyRetrieval {
    pub fn for_db_type(db_type: DbType) -> Self {
        match db_type {
            DbType::Mssql => KeyRetrieval::OutputClause,
            DbType::Postgres => KeyRetrieval::Returning,
            DbType::Oracle => KeyRetrieval::Sequence,
            DbType::MySql | DbType::Sqlite | DbType::Other => KeyRetrieval::LastInsertId,
        }
    }
}

/// Empty-row syntax of a dialect; `None` means an explicit column list is always written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EmptyRow {
    /// `VALUES ()`
    EmptyValues,
    /// `DEFAULT VALUES`
    DefaultValues,
}

impl EmptyRow {
    fn for_db_type(db_type: DbType) -> Option<Self> {
        match db_type {
            DbType::MySql => Some(EmptyRow::EmptyValues),
            DbType::Postgres | DbType::Mssql | DbType::Sqlite | DbType::Other => {
                Some(EmptyRow::DefaultValues)
            }
            DbType::Oracle => None,
        }
    }
}

fn collect_args<I>(args: I) -> Vec<Value>
where
    I: IntoIterator,
    I::Item: Into<Value>,
{
    args.into_iter().map(Into::into).collect()
}

fn check_arity(columns: usize, values: usize) -> BuildResult<()> {
    if columns != values {
        #[cfg(feature = "tracing")]
        tracing::warn!(target: "insql.sql", columns, values, "insert column/value count mismatch");
        return Err(BuildError::mismatch(columns, values));
    }
    Ok(())
}

impl Statement<'_> {
    fn key_retrieval(&self) -> Option<(KeyRetrieval, &str)> {
        let col = self.table().autoincrement()?;
        Some((KeyRetrieval::for_db_type(self.dialect().db_type()), col))
    }

    /// Emit ` OUTPUT Inserted.<col>` for MSSQL tables with an autoincrement column.
    fn write_insert_output<W: fmt::Write>(&self, w: &mut StatementWriter<W>) -> BuildResult<()> {
        if let Some((KeyRetrieval::OutputClause, col)) = self.key_retrieval() {
            w.push(" OUTPUT Inserted.")?.push_ident(&self.quoter(), col)?;
        }
        Ok(())
    }

    #[cfg(feature = "tracing")]
    fn trace_built(&self, kind: &'static str, sql: &str, param_count: usize) {
        tracing::debug!(
            target: "insql.sql",
            kind,
            dialect = %self.dialect().db_type(),
            table = self.table_name(),
            param_count,
            sql = %sql,
            "built insert statement"
        );
    }

    /// Generate an INSERT for one row described by parallel column/value lists.
    ///
    /// A row is empty only when it has neither plain columns nor expression
    /// columns; expression-only rows keep their column list instead of taking
    /// the `VALUES ()` / `DEFAULT VALUES` branch.
    ///
    /// Returns the writer so callers can keep composing onto it.
    pub fn gen_insert_sql<S, I>(&self, col_names: &[S], args: I) -> BuildResult<StatementWriter>
    where
        S: AsRef<str>,
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        let w = self.gen_insert_sql_into(self.writer(), col_names, args)?;
        #[cfg(feature = "tracing")]
        self.trace_built("values", w.sql(), w.placeholder_count());
        Ok(w)
    }

    /// Like [`gen_insert_sql`](Self::gen_insert_sql), appending to a caller-supplied writer.
    ///
    /// The writer is consumed: on error nothing is handed back.
    pub fn gen_insert_sql_into<W, S, I>(
        &self,
        mut w: StatementWriter<W>,
        col_names: &[S],
        args: I,
    ) -> BuildResult<StatementWriter<W>>
    where
        W: fmt::Write,
        S: AsRef<str>,
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        let args = collect_args(args);
        check_arity(col_names.len(), args.len())?;

        let db_type = self.dialect().db_type();
        let quoter = self.quoter();
        let table_name = self.table_name();
        let exprs = self.expr_columns();
        let sequence_col = match self.key_retrieval() {
            Some((KeyRetrieval::Sequence, col)) => Some(col),
            _ => None,
        };

        if self.conds().is_valid() && sequence_col.is_some() {
            return Err(BuildError::unsupported(format!(
                "conditional insert into '{table_name}' with a sequence-backed autoincrement column"
            )));
        }

        let has_plain_columns = !col_names.is_empty();
        let has_columns = has_plain_columns || !exprs.is_empty();
        // an empty row has no SELECT list to filter
        let conditional = has_columns && self.conds().is_valid();

        w.push("INSERT INTO ")?.push_ident(&quoter, table_name)?;

        match (has_columns, EmptyRow::for_db_type(db_type)) {
            (false, Some(EmptyRow::EmptyValues)) => {
                w.push(" VALUES ()")?;
            }
            (false, Some(EmptyRow::DefaultValues)) => {
                self.write_insert_output(&mut w)?;
                w.push(" DEFAULT VALUES")?;
            }
            _ => {
                let mut columns: Vec<&str> = col_names.iter().map(AsRef::as_ref).collect();
                columns.extend(sequence_col);
                columns.extend(exprs.col_names());

                w.push(" (")?.push_idents(&quoter, &columns, ",")?.push(")")?;
                self.write_insert_output(&mut w)?;

                if conditional {
                    w.push(" SELECT ")?.push_binds(args)?;
                    if !exprs.is_empty() {
                        if has_plain_columns {
                            w.push(",")?;
                        }
                        exprs.write_values(&mut w, &quoter)?;
                    }
                    w.push(" FROM ")?.push_ident(&quoter, table_name)?.push(" WHERE ")?;
                    self.conds().write_to(&mut w, &quoter)?;
                } else {
                    w.push(" VALUES (")?.push_binds(args)?;

                    let mut wrote_value = has_plain_columns;
                    if sequence_col.is_some() {
                        if wrote_value {
                            w.push(",")?;
                        }
                        w.push(&self.dialect().sequence_name(table_name))?.push(".nextval")?;
                        wrote_value = true;
                    }

                    if !exprs.is_empty() {
                        if wrote_value {
                            w.push(",")?;
                        }
                        exprs.write_values(&mut w, &quoter)?;
                    }
                    w.push(")")?;
                }
            }
        }

        if let Some((KeyRetrieval::Returning, col)) = self.key_retrieval() {
            w.push(" RETURNING ")?.push_ident(&quoter, col)?;
        }

        Ok(w)
    }

    /// Generate an INSERT for a dynamically supplied column list.
    ///
    /// `columns` must be non-empty and match `args` in length. No generated-key
    /// clause is emitted.
    pub fn gen_insert_map_sql<S, I>(
        &self,
        columns: &[S],
        args: I,
    ) -> BuildResult<(String, Vec<Value>)>
    where
        S: AsRef<str>,
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        let w = self.gen_insert_map_sql_into(self.writer(), columns, args)?;
        #[cfg(feature = "tracing")]
        self.trace_built("map", w.sql(), w.placeholder_count());
        Ok(w.finish())
    }

    /// Like [`gen_insert_map_sql`](Self::gen_insert_map_sql), appending to a caller-supplied writer.
    pub fn gen_insert_map_sql_into<W, S, I>(
        &self,
        mut w: StatementWriter<W>,
        columns: &[S],
        args: I,
    ) -> BuildResult<StatementWriter<W>>
    where
        W: fmt::Write,
        S: AsRef<str>,
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        let args = collect_args(args);
        if columns.is_empty() {
            return Err(BuildError::EmptyColumns(format!(
                "map insert into '{}' needs at least one column",
                self.table_name()
            )));
        }
        check_arity(columns.len(), args.len())?;

        let quoter = self.quoter();
        let table_name = self.table_name();
        let exprs = self.expr_columns();

        let mut names: Vec<&str> = columns.iter().map(AsRef::as_ref).collect();
        names.extend(exprs.col_names());

        w.push("INSERT INTO ")?.push_ident(&quoter, table_name)?.push(" (")?;
        w.push_idents(&quoter, &names, ",")?;

        if self.conds().is_valid() {
            w.push(") SELECT ")?.push_binds(args)?;
            if !exprs.is_empty() {
                w.push(",")?;
                exprs.write_values(&mut w, &quoter)?;
            }
            w.push(" FROM ")?.push_ident(&quoter, table_name)?.push(" WHERE ")?;
            self.conds().write_to(&mut w, &quoter)?;
        } else {
            w.push(") VALUES (")?.push_binds(args)?;
            if !exprs.is_empty() {
                w.push(",")?;
                exprs.write_values(&mut w, &quoter)?;
            }
            w.push(")")?;
        }

        Ok(w)
    }

    /// Generate a map-driven INSERT from a column → value map.
    ///
    /// Columns are emitted in sorted order.
    pub fn gen_insert_map(&self, map: &BTreeMap<String, Value>) -> BuildResult<(String, Vec<Value>)> {
        let columns: Vec<&str> = map.keys().map(String::as_str).collect();
        self.gen_insert_map_sql(&columns, map.values().cloned())
    }
}

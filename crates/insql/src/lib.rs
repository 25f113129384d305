//! # insql
//!
//! Dialect-aware INSERT statement generation.
//!
//! Given a table, a dialect, column/value pairs, optional SQL expression
//! columns and an optional filter, `insql` produces the dialect-specific
//! INSERT text together with the ordered list of bound arguments. It never
//! talks to a database.
//!
//! ## Features
//!
//! - **Five dialects**: MySQL, PostgreSQL, MSSQL, Oracle, SQLite (plus a plain fallback)
//! - **Lockstep placeholders**: `?`, `$n`, `@pn` or `:n`, always matching the argument list
//! - **Generated keys**: `OUTPUT Inserted.<col>`, `RETURNING <col>` or `seq_<table>.nextval`
//! - **Conditional inserts**: `INSERT ... SELECT ... FROM ... WHERE ...`
//! - **Composable output**: the values path returns a [`StatementWriter`] you can keep writing to
//!
//! ```
//! use insql::{Condition, Statement, StdDialect, Table, Value};
//!
//! let dialect = StdDialect::mssql();
//! let users = Table::new("user").with_autoincrement("id");
//!
//! let w = Statement::new(&dialect, users.clone()).gen_insert_sql(&["name"], ["bob"])?;
//! assert_eq!(w.sql(), "INSERT INTO [user] ([name]) OUTPUT Inserted.[id] VALUES (@p1)");
//!
//! let (sql, args) = Statement::new(&dialect, users)
//!     .where_cond(Condition::gt("age", 18))
//!     .gen_insert_map_sql(&["name"], ["carol"])?;
//! assert_eq!(sql, "INSERT INTO [user] ([name]) SELECT @p1 FROM [user] WHERE [age] > @p2");
//! assert_eq!(args, vec![Value::from("carol"), Value::Int(18)]);
//! # Ok::<(), insql::BuildError>(())
//! ```

pub mod condition;
pub mod dialect;
pub mod error;
pub mod expr;
pub mod insert;
pub mod quoter;
pub mod statement;
pub mod table;
pub mod value;
pub mod writer;

pub use condition::{Condition, Op};
pub use dialect::{DbType, Dialect, PlaceholderStyle, StdDialect};
pub use error::{BuildError, BuildResult};
pub use expr::{ExprColumns, ExprValue};
pub use insert::KeyRetrieval;
pub use quoter::{QuotePolicy, Quoter};
pub use statement::Statement;
pub use table::Table;
pub use value::Value;
pub use writer::StatementWriter;

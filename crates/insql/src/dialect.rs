//! SQL dialects.
//!
//! A [`Dialect`] tells the generators which database they are writing for
//! ([`DbType`]), how to quote identifiers ([`Quoter`]), which placeholder
//! syntax to emit ([`PlaceholderStyle`]), and how Oracle sequence names are
//! derived. [`StdDialect`] covers the built-in databases; implement the trait
//! yourself to plug in a custom one.
//!
//! # Example
//! ```
//! use insql::{DbType, Dialect, StdDialect};
//!
//! let d: StdDialect = "postgres".parse::<DbType>()?.into();
//! assert_eq!(d.quoter().quote("user"), "\"user\"");
//! # Ok::<(), insql::BuildError>(())
//! ```

use crate::error::BuildError;
use crate::quoter::{QuotePolicy, Quoter};
use serde::Deserialize;
use std::fmt::{self, Write};
use std::str::FromStr;

/// Database product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum DbType {
    MySql,
    Postgres,
    Mssql,
    Oracle,
    Sqlite,
    /// Any other database: `?` placeholders, unquoted identifiers.
    Other,
}

impl DbType {
    /// Canonical lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            DbType::MySql => "mysql",
            DbType::Postgres => "postgres",
            DbType::Mssql => "mssql",
            DbType::Oracle => "oracle",
            DbType::Sqlite => "sqlite",
            DbType::Other => "other",
        }
    }

    /// Default placeholder syntax for this database.
    pub fn placeholder(&self) -> PlaceholderStyle {
        match self {
            DbType::Postgres => PlaceholderStyle::Dollar,
            DbType::Mssql => PlaceholderStyle::AtP,
            DbType::Oracle => PlaceholderStyle::Colon,
            DbType::MySql | DbType::Sqlite | DbType::Other => PlaceholderStyle::Question,
        }
    }

    /// Default identifier quoter for this database.
    pub fn quoter(&self) -> Quoter {
        match self {
            DbType::MySql | DbType::Sqlite => Quoter::new('`', '`', QuotePolicy::Always),
            DbType::Postgres => Quoter::new('"', '"', QuotePolicy::Always),
            DbType::Mssql => Quoter::new('[', ']', QuotePolicy::Always),
            DbType::Oracle => Quoter::new('"', '"', QuotePolicy::Reserved),
            DbType::Other => Quoter::none(),
        }
    }
}

impl fmt::Display for DbType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DbType {
    type Err = BuildError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mysql" => Ok(DbType::MySql),
            "postgres" | "postgresql" | "pg" | "pgx" => Ok(DbType::Postgres),
            "mssql" | "sqlserver" => Ok(DbType::Mssql),
            "oracle" | "oci8" | "godror" => Ok(DbType::Oracle),
            "sqlite" | "sqlite3" => Ok(DbType::Sqlite),
            "other" => Ok(DbType::Other),
            other => Err(BuildError::UnknownDialect(other.to_string())),
        }
    }
}

impl TryFrom<String> for DbType {
    type Error = BuildError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// Placeholder syntax for bound arguments.
///
/// Numbered styles are 1-based over the whole statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaceholderStyle {
    /// `?`
    Question,
    /// `$1, $2, ...`
    Dollar,
    /// `@p1, @p2, ...`
    AtP,
    /// `:1, :2, ...`
    Colon,
}

impl PlaceholderStyle {
    /// Write the placeholder for the 1-based argument `index`.
    pub fn write_to<W: Write + ?Sized>(self, out: &mut W, index: usize) -> fmt::Result {
        match self {
            PlaceholderStyle::Question => out.write_char('?'),
            PlaceholderStyle::Dollar => write!(out, "${index}"),
            PlaceholderStyle::AtP => write!(out, "@p{index}"),
            PlaceholderStyle::Colon => write!(out, ":{index}"),
        }
    }
}

/// The dialect seam consumed by the generators.
pub trait Dialect {
    /// Which database this dialect targets.
    fn db_type(&self) -> DbType;

    /// Identifier quoter.
    fn quoter(&self) -> Quoter;

    /// Placeholder syntax.
    fn placeholder(&self) -> PlaceholderStyle {
        self.db_type().placeholder()
    }

    /// Sequence backing the autoincrement column of `table` (used verbatim as
    /// `<sequence>.nextval`).
    fn sequence_name(&self, table: &str) -> String {
        prefixed_sequence_name("seq_", table)
    }
}

/// `seq_user` for `user`, `hr.seq_user` for `hr.user`.
fn prefixed_sequence_name(prefix: &str, table: &str) -> String {
    match table.rsplit_once('.') {
        Some((schema, name)) => format!("{schema}.{prefix}{name}"),
        None => format!("{prefix}{table}"),
    }
}

/// Built-in dialect, configured from a [`DbType`] with optional overrides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StdDialect {
    db_type: DbType,
    quoter: Quoter,
    placeholder: PlaceholderStyle,
    sequence_prefix: String,
}

impl StdDialect {
    /// Create a dialect with the defaults of `db_type`.
    pub fn new(db_type: DbType) -> Self {
        Self {
            db_type,
            quoter: db_type.quoter(),
            placeholder: db_type.placeholder(),
            sequence_prefix: "seq_".to_string(),
        }
    }

    pub fn mysql() -> Self {
        Self::new(DbType::MySql)
    }

    pub fn postgres() -> Self {
        Self::new(DbType::Postgres)
    }

    pub fn mssql() -> Self {
        Self::new(DbType::Mssql)
    }

    pub fn oracle() -> Self {
        Self::new(DbType::Oracle)
    }

    pub fn sqlite() -> Self {
        Self::new(DbType::Sqlite)
    }

    pub fn other() -> Self {
        Self::new(DbType::Other)
    }

    /// Override the identifier quoting policy.
    pub fn with_quote_policy(mut self, policy: QuotePolicy) -> Self {
        self.quoter = self.quoter.with_policy(policy);
        self
    }

    /// Override the placeholder syntax.
    pub fn with_placeholder(mut self, placeholder: PlaceholderStyle) -> Self {
        self.placeholder = placeholder;
        self
    }

    /// Override the Oracle sequence name prefix (default `seq_`).
    pub fn with_sequence_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.sequence_prefix = prefix.into();
        self
    }
}

impl From<DbType> for StdDialect {
    fn from(db_type: DbType) -> Self {
        Self::new(db_type)
    }
}

impl Dialect for StdDialect {
    fn db_type(&self) -> DbType {
        self.db_type
    }

    fn quoter(&self) -> Quoter {
        self.quoter
    }

    fn placeholder(&self) -> PlaceholderStyle {
        self.placeholder
    }

    fn sequence_name(&self, table: &str) -> String {
        prefixed_sequence_name(&self.sequence_prefix, table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_driver_names() {
        assert_eq!("postgresql".parse::<DbType>().unwrap(), DbType::Postgres);
        assert_eq!("SQLServer".parse::<DbType>().unwrap(), DbType::Mssql);
        assert_eq!("sqlite3".parse::<DbType>().unwrap(), DbType::Sqlite);
        assert_eq!("oci8".parse::<DbType>().unwrap(), DbType::Oracle);
        assert!(matches!(
            "db2".parse::<DbType>(),
            Err(BuildError::UnknownDialect(name)) if name == "db2"
        ));
    }

    #[test]
    fn display_round_trips_through_from_str() {
        for db in [
            DbType::MySql,
            DbType::Postgres,
            DbType::Mssql,
            DbType::Oracle,
            DbType::Sqlite,
            DbType::Other,
        ] {
            assert_eq!(db.to_string().parse::<DbType>().unwrap(), db);
        }
    }

    #[test]
    fn deserializes_from_config_string() {
        let db: DbType = serde_json::from_str(r#""pg""#).unwrap();
        assert_eq!(db, DbType::Postgres);
        assert!(serde_json::from_str::<DbType>(r#""nope""#).is_err());

        let p: PlaceholderStyle = serde_json::from_str(r#""at_p""#).unwrap();
        assert_eq!(p, PlaceholderStyle::AtP);
    }

    #[test]
    fn placeholders_render_per_style() {
        let mut s = String::new();
        PlaceholderStyle::Question.write_to(&mut s, 3).unwrap();
        PlaceholderStyle::Dollar.write_to(&mut s, 3).unwrap();
        PlaceholderStyle::AtP.write_to(&mut s, 3).unwrap();
        PlaceholderStyle::Colon.write_to(&mut s, 3).unwrap();
        assert_eq!(s, "?$3@p3:3");
    }

    #[test]
    fn sequence_name_keeps_schema() {
        let d = StdDialect::oracle();
        assert_eq!(d.sequence_name("user"), "seq_user");
        assert_eq!(d.sequence_name("hr.user"), "hr.seq_user");
        assert_eq!(
            StdDialect::oracle().with_sequence_prefix("SQ_").sequence_name("t"),
            "SQ_t"
        );
    }

    #[test]
    fn overrides_apply() {
        let d = StdDialect::mysql()
            .with_quote_policy(QuotePolicy::Never)
            .with_placeholder(PlaceholderStyle::Dollar);
        assert_eq!(d.quoter().quote("user"), "user");
        assert_eq!(d.placeholder(), PlaceholderStyle::Dollar);
        assert_eq!(d.db_type(), DbType::MySql);
    }
}

//! Statement buffer with bound arguments.
//!
//! [`StatementWriter`] keeps SQL text and arguments side by side: every
//! [`push_bind`](StatementWriter::push_bind) writes exactly one placeholder and
//! appends exactly one argument, so the placeholder count always equals
//! `args().len()`.
//!
//! The SQL sink is any [`fmt::Write`]; `String` is the default. A sink that
//! rejects a write surfaces as [`BuildError::Write`](crate::BuildError::Write)
//! from the call that hit it.
//!
//! # Example
//! ```
//! use insql::{PlaceholderStyle, StatementWriter};
//!
//! let mut w = StatementWriter::new(PlaceholderStyle::Dollar);
//! w.push("SELECT * FROM users WHERE a = ")?.push_bind(1)?.push(" AND b = ")?.push_bind("x")?;
//! assert_eq!(w.sql(), "SELECT * FROM users WHERE a = $1 AND b = $2");
//! assert_eq!(w.args().len(), 2);
//! # Ok::<(), insql::BuildError>(())
//! ```

use crate::dialect::PlaceholderStyle;
use crate::error::BuildResult;
use crate::quoter::Quoter;
use crate::value::Value;
use std::fmt;

/// SQL sink plus the ordered argument list bound to its placeholders.
#[must_use]
#[derive(Debug, Clone)]
pub struct StatementWriter<W = String> {
    sink: W,
    args: Vec<Value>,
    placeholder: PlaceholderStyle,
}

impl StatementWriter<String> {
    /// Create a writer backed by an empty `String`.
    pub fn new(placeholder: PlaceholderStyle) -> Self {
        Self::with_sink(String::new(), placeholder)
    }

    /// The SQL written so far.
    pub fn sql(&self) -> &str {
        &self.sink
    }

    /// Consume the writer, returning the SQL text and its arguments.
    pub fn finish(self) -> (String, Vec<Value>) {
        (self.sink, self.args)
    }
}

impl<W: fmt::Write> StatementWriter<W> {
    /// Create a writer over a caller-supplied sink.
    pub fn with_sink(sink: W, placeholder: PlaceholderStyle) -> Self {
        Self {
            sink,
            args: Vec::new(),
            placeholder,
        }
    }

    /// Append raw SQL.
    pub fn push(&mut self, sql: &str) -> BuildResult<&mut Self> {
        self.sink.write_str(sql)?;
        Ok(self)
    }

    /// Append an identifier, quoted by `quoter`.
    pub fn push_ident(&mut self, quoter: &Quoter, ident: &str) -> BuildResult<&mut Self> {
        quoter.quote_to(&mut self.sink, ident)?;
        Ok(self)
    }

    /// Append identifiers, each quoted by `quoter`, joined by `sep`.
    pub fn push_idents<S: AsRef<str>>(
        &mut self,
        quoter: &Quoter,
        idents: &[S],
        sep: &str,
    ) -> BuildResult<&mut Self> {
        quoter.join_to(&mut self.sink, idents, sep)?;
        Ok(self)
    }

    /// Append one placeholder and bind its value.
    pub fn push_bind(&mut self, value: impl Into<Value>) -> BuildResult<&mut Self> {
        self.placeholder
            .write_to(&mut self.sink, self.args.len() + 1)?;
        self.args.push(value.into());
        Ok(self)
    }

    /// Append a comma-separated placeholder per value and bind them in order.
    ///
    /// An empty input writes nothing.
    pub fn push_binds<I>(&mut self, values: I) -> BuildResult<&mut Self>
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        for (i, value) in values.into_iter().enumerate() {
            if i > 0 {
                self.push(",")?;
            }
            self.push_bind(value)?;
        }
        Ok(self)
    }

    /// Arguments bound so far, in placeholder order.
    pub fn args(&self) -> &[Value] {
        &self.args
    }

    /// Number of placeholders written so far.
    pub fn placeholder_count(&self) -> usize {
        self.args.len()
    }

    /// Placeholder syntax used by this writer.
    pub fn placeholder(&self) -> PlaceholderStyle {
        self.placeholder
    }

    /// The underlying sink.
    pub fn sink(&self) -> &W {
        &self.sink
    }

    /// Consume the writer, returning the sink and the arguments.
    pub fn into_parts(self) -> (W, Vec<Value>) {
        (self.sink, self.args)
    }
}

impl fmt::Display for StatementWriter<String> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.sink)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quoter::QuotePolicy;

    /// Sink that accepts `budget` bytes and then fails.
    #[derive(Debug)]
    struct Limited {
        out: String,
        budget: usize,
    }

    impl fmt::Write for Limited {
        fn write_str(&mut self, s: &str) -> fmt::Result {
            if s.len() > self.budget {
                return Err(fmt::Error);
            }
            self.budget -= s.len();
            self.out.push_str(s);
            Ok(())
        }
    }

    #[test]
    fn builds_placeholders_in_order() {
        let mut w = StatementWriter::new(PlaceholderStyle::AtP);
        w.push("a = ").unwrap().push_bind(1).unwrap();
        w.push(" AND b = ").unwrap().push_bind("x").unwrap();
        assert_eq!(w.sql(), "a = @p1 AND b = @p2");
        assert_eq!(w.args(), &[Value::Int(1), Value::from("x")]);
    }

    #[test]
    fn push_binds_renders_commas() {
        let mut w = StatementWriter::new(PlaceholderStyle::Colon);
        w.push_binds(vec![1, 2, 3]).unwrap();
        assert_eq!(w.sql(), ":1,:2,:3");
        assert_eq!(w.placeholder_count(), 3);
    }

    #[test]
    fn push_binds_empty_writes_nothing() {
        let mut w = StatementWriter::new(PlaceholderStyle::Question);
        w.push_binds(Vec::<Value>::new()).unwrap();
        assert_eq!(w.sql(), "");
        assert!(w.args().is_empty());
    }

    #[test]
    fn push_idents_quotes_each() {
        let q = Quoter::new('"', '"', QuotePolicy::Always);
        let mut w = StatementWriter::new(PlaceholderStyle::Dollar);
        w.push_idents(&q, &["id", "name"], ",").unwrap();
        assert_eq!(w.to_string(), r#""id","name""#);
    }

    #[test]
    fn sink_failure_is_write_fault() {
        let sink = Limited {
            out: String::new(),
            budget: 4,
        };
        let mut w = StatementWriter::with_sink(sink, PlaceholderStyle::Question);
        w.push("abcd").unwrap();
        let err = w.push_bind(1).unwrap_err();
        assert!(err.is_write_fault());
        // the argument is not bound when its placeholder could not be written
        assert!(w.args().is_empty());
        assert_eq!(w.sink().out, "abcd");
    }
}

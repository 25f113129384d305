//! Dialect-aware identifier quoting.
//!
//! A [`Quoter`] wraps table and column names in the quote characters of a dialect:
//!
//! - Dotted names (`schema.table`) are quoted segment by segment
//! - A segment already wrapped in the quote characters is emitted unchanged
//! - `*` is never quoted
//! - The closing quote character inside a name is escaped by doubling it
//!
//! # Example
//! ```
//! use insql::{Quoter, QuotePolicy};
//!
//! let q = Quoter::new('[', ']', QuotePolicy::Always);
//! assert_eq!(q.quote("dbo.user"), "[dbo].[user]");
//! ```

use std::collections::HashSet;
use std::fmt::{self, Write};
use std::sync::OnceLock;

/// When a [`Quoter`] wraps an identifier segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuotePolicy {
    /// Quote every segment.
    Always,
    /// Never quote; identifiers are written verbatim.
    Never,
    /// Quote only reserved words (e.g. `user`, `order`, `level`).
    Reserved,
}

const RESERVED_WORDS: &[&str] = &[
    "access", "add", "all", "alter", "and", "any", "as", "asc", "audit", "between", "by",
    "char", "check", "cluster", "column", "comment", "compress", "connect", "create",
    "current", "date", "decimal", "default", "delete", "desc", "distinct", "drop", "else",
    "exclusive", "exists", "file", "float", "for", "from", "grant", "group", "having",
    "identified", "immediate", "in", "increment", "index", "initial", "insert", "integer",
    "intersect", "into", "is", "join", "key", "level", "like", "limit", "lock", "long",
    "maxextents", "minus", "mode", "modify", "noaudit", "nocompress", "not", "nowait",
    "null", "number", "of", "offline", "offset", "on", "online", "option", "or", "order",
    "pctfree", "primary", "prior", "privileges", "public", "raw", "rename", "resource",
    "revoke", "row", "rowid", "rownum", "rows", "select", "session", "set", "share",
    "size", "smallint", "start", "successful", "synonym", "sysdate", "table", "then", "to",
    "trigger", "uid", "union", "unique", "update", "user", "validate", "values", "varchar",
    "varchar2", "view", "whenever", "where", "with",
];

static RESERVED_SET: OnceLock<HashSet<&'static str>> = OnceLock::new();

/// Check whether `word` is a reserved SQL word (case-insensitive).
pub fn is_reserved(word: &str) -> bool {
    RESERVED_SET
        .get_or_init(|| RESERVED_WORDS.iter().copied().collect())
        .contains(word.to_ascii_lowercase().as_str())
}

/// Identifier quoter for one dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quoter {
    pub prefix: char,
    pub suffix: char,
    pub policy: QuotePolicy,
}

impl Quoter {
    /// Create a quoter from its quote characters and policy.
    pub const fn new(prefix: char, suffix: char, policy: QuotePolicy) -> Self {
        Self {
            prefix,
            suffix,
            policy,
        }
    }

    /// A quoter that writes identifiers verbatim.
    pub const fn none() -> Self {
        Self::new('"', '"', QuotePolicy::Never)
    }

    /// Override the quoting policy.
    pub const fn with_policy(mut self, policy: QuotePolicy) -> Self {
        self.policy = policy;
        self
    }

    fn needs_quote(&self, segment: &str) -> bool {
        if segment == "*" || self.is_quoted(segment) {
            return false;
        }
        match self.policy {
            QuotePolicy::Always => true,
            QuotePolicy::Never => false,
            QuotePolicy::Reserved => is_reserved(segment),
        }
    }

    /// A segment counts as quoted only if every suffix character inside it is doubled.
    fn is_quoted(&self, segment: &str) -> bool {
        let Some(inner) = segment
            .strip_prefix(self.prefix)
            .and_then(|rest| rest.strip_suffix(self.suffix))
        else {
            return false;
        };
        let mut chars = inner.chars();
        while let Some(ch) = chars.next() {
            if ch == self.suffix && chars.next() != Some(self.suffix) {
                return false;
            }
        }
        true
    }

    /// Write `ident` into `out`, quoting each dotted segment as needed.
    pub fn quote_to<W: Write + ?Sized>(&self, out: &mut W, ident: &str) -> fmt::Result {
        let ident = ident.trim();
        if ident.is_empty() {
            return Ok(());
        }

        for (i, segment) in ident.split('.').enumerate() {
            if i > 0 {
                out.write_char('.')?;
            }
            let segment = segment.trim();
            if !self.needs_quote(segment) {
                out.write_str(segment)?;
                continue;
            }

            out.write_char(self.prefix)?;
            for ch in segment.chars() {
                if ch == self.suffix {
                    out.write_char(ch)?;
                }
                out.write_char(ch)?;
            }
            out.write_char(self.suffix)?;
        }
        Ok(())
    }

    /// Quote `ident` into a new string.
    pub fn quote(&self, ident: &str) -> String {
        let mut out = String::with_capacity(ident.len() + 2);
        // Writing into a String cannot fail.
        let _ = self.quote_to(&mut out, ident);
        out
    }

    /// Quote every identifier and join them with `sep`.
    pub fn join_to<W, S>(&self, out: &mut W, idents: &[S], sep: &str) -> fmt::Result
    where
        W: Write + ?Sized,
        S: AsRef<str>,
    {
        for (i, ident) in idents.iter().enumerate() {
            if i > 0 {
                out.write_str(sep)?;
            }
            self.quote_to(out, ident.as_ref())?;
        }
        Ok(())
    }

    /// Quote every identifier and join them with `sep` into a new string.
    pub fn join<S: AsRef<str>>(&self, idents: &[S], sep: &str) -> String {
        let mut out = String::new();
        let _ = self.join_to(&mut out, idents, sep);
        out
    }
}

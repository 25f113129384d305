//! Error types for insql

use thiserror::Error;

/// Result type alias for statement generation
pub type BuildResult<T> = Result<T, BuildError>;

/// Error types for statement generation.
///
/// [`BuildError::Write`] is the only runtime fault: the output sink refused a write.
/// Every other variant reports a caller contract violation and is raised before
/// anything is written.
#[derive(Debug, Error)]
pub enum BuildError {
    /// The SQL sink rejected a write
    #[error("Write fault: SQL sink rejected a write")]
    Write(#[from] std::fmt::Error),

    /// Column and value lists have different lengths
    #[error("Argument mismatch: {columns} column(s) but {values} value(s)")]
    ArgumentMismatch { columns: usize, values: usize },

    /// An insert that requires at least one column got none
    #[error("Empty columns: {0}")]
    EmptyColumns(String),

    /// Combination of dialect and statement shape that has no defined SQL form
    #[error("Unsupported: {0}")]
    Unsupported(String),

    /// Unknown dialect name
    #[error("Unknown dialect: {0}")]
    UnknownDialect(String),

    /// Malformed input (e.g. raw expression placeholder count)
    #[error("Validation error: {0}")]
    Validation(String),
}

impl BuildError {
    /// Create an argument mismatch error
    pub fn mismatch(columns: usize, values: usize) -> Self {
        Self::ArgumentMismatch { columns, values }
    }

    /// Create an unsupported error
    pub fn unsupported(message: impl Into<String>) -> Self {
        Self::Unsupported(message.into())
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Check if this is a sink write fault
    pub fn is_write_fault(&self) -> bool {
        matches!(self, Self::Write(_))
    }

    /// Check if this is a caller contract violation rather than a runtime fault
    pub fn is_contract_violation(&self) -> bool {
        !self.is_write_fault()
    }
}

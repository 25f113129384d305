/// Target table metadata, as supplied by the mapping layer.
///
/// # Example
///
/// ```rust
/// use insql::Table;
///
/// let users = Table::new("user").with_autoincrement("id");
/// assert_eq!(users.autoincrement(), Some("id"));
/// assert_eq!(Table::new("log").autoincrement(), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub name: String,
    /// Autoincrement column; empty means none.
    pub autoincrement: String,
}

impl Table {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            autoincrement: String::new(),
        }
    }

    pub fn with_autoincrement(mut self, col: impl Into<String>) -> Self {
        self.autoincrement = col.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The autoincrement column, if the table has one.
    pub fn autoincrement(&self) -> Option<&str> {
        Some(self.autoincrement.as_str()).filter(|col| !col.is_empty())
    }
}

//! Reference table errors.
//!
//! The city and contact tables are loaded once at start-up, either from the
//! copies embedded in the binary or from override files. These errors mean
//! the process should refuse to start.

/// Errors from loading or validating a reference table.
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    /// Failed to read a table file
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse table JSON
    #[error("failed to parse table JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Table content violates an invariant
    #[error("invalid table entry: {0}")]
    Invalid(String),
}

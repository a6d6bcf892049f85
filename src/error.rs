//! Error types for book-path operations.

use thiserror::Error;

/// Errors that can occur while resolving book paths.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A `..` segment tried to climb above the package root.
    #[error("path escapes the package root: {path}")]
    PathEscapesRoot { path: String },
}

pub type Result<T> = std::result::Result<T, Error>;

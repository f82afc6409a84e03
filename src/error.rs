//! Error types for taskmgr.
//!
//! Domain failures are reported through [`Error`]; every variant renders a
//! message that can be shown to the user as-is. Data-file lines that cannot
//! be decoded produce a [`ParseError`], wrapped in a [`LineError`] that
//! remembers where the line came from.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for taskmgr operations.
#[derive(Error, Debug)]
pub enum Error {
    #[error("User '{0}' does not exist.")]
    UnknownUser(String),

    #[error("Wrong password.")]
    WrongPassword,

    #[error("Username '{0}' already exists. Please choose a different username.")]
    UsernameTaken(String),

    #[error("Passwords don't match.")]
    PasswordMismatch,

    #[error("{field} must not be empty.")]
    EmptyField { field: &'static str },

    #[error("{field} must not contain ';' or line breaks.")]
    InvalidField { field: &'static str },

    #[error("Invalid date '{0}'. Please use the format YYYY-MM-DD.")]
    InvalidDate(String),

    #[error("Task {0} does not exist.")]
    NoSuchTask(usize),

    #[error("This task is already completed.")]
    AlreadyCompleted,

    #[error("No user is logged in.")]
    NotLoggedIn,

    #[error("You do not have permission to view statistics. Only 'admin' can perform this action.")]
    NotAdmin,

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Wraps an I/O error with the path it happened on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result alias for taskmgr operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Why a single data-file line could not be decoded.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("expected {expected} fields, found {found}")]
    FieldCount { expected: usize, found: usize },

    #[error("invalid date '{0}' (expected YYYY-MM-DD)")]
    InvalidDate(String),

    #[error("invalid completion flag '{0}' (expected Yes or No)")]
    InvalidFlag(String),

    #[error("{field} is empty")]
    EmptyField { field: &'static str },
}

/// A rejected line, with its location in the source file.
#[derive(Error, Debug, Clone)]
#[error("{}:{line}: {source} in {raw:?}", .path.display())]
pub struct LineError {
    pub path: PathBuf,
    /// 1-based line number.
    pub line: usize,
    pub raw: String,
    #[source]
    pub source: ParseError,
}

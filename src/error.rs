//! Error types for the command shell
//!
//! The store itself is total and has no error type; failures only arise when
//! a host turns text into store operations.

use thiserror::Error;

// == Shell Error Enum ==
/// Errors raised while parsing or executing a shell command line.
#[derive(Error, Debug)]
pub enum ShellError {
    /// Blank input line
    #[error("empty command")]
    Empty,

    /// Verb not recognised
    #[error("unknown command '{0}'")]
    UnknownCommand(String),

    /// Wrong number of arguments for a verb
    #[error("wrong number of arguments for '{0}'")]
    WrongArity(String),

    /// Argument expected to be an integer
    #[error("value is not an integer: {0}")]
    InvalidInteger(String),

    /// Quoted argument never closed
    #[error("unterminated quoted argument")]
    UnterminatedQuote,

    /// Stats could not be rendered
    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

// == Result Type Alias ==
/// Convenience Result type for the command shell.
pub type Result<T> = std::result::Result<T, ShellError>;

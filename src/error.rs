//! Error handling for woformat.
//! Defines the error type and result alias used by every materialization step.

use std::io;
use thiserror::Error;

/// Errors raised while materializing project files.
///
/// Configuration problems (no rule for a target, unreadable config file) and
/// I/O failures are both fatal for the run; nothing here is retried.
#[derive(Error, Debug)]
pub enum Error {
    /// Represents errors that occur during file system operations
    #[error("IO error: {0}.")]
    IoError(#[from] io::Error),

    /// Represents build configuration errors, e.g. a target without a template rule
    #[error("Configuration error: {0}.")]
    ConfigError(String),

    /// A template identifier that the resource loader cannot resolve
    #[error("Template not found: '{template}'.")]
    TemplateNotFound { template: String },

    /// Represents errors that occur while compiling a filter set
    #[error("Filter error: {0}.")]
    FilterError(String),

    /// Represents validation failures in user input or data
    #[error("Validation error: {0}.")]
    ValidationError(String),
}

/// Convenience type alias for Results with [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// # Arguments
/// * `err` - The Error to handle
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: Error) {
    eprintln!("{err}");
    std::process::exit(1);
}

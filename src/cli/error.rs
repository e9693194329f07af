//! cli::error
//!
//! Fatal CLI errors that carry their own exit code.
//!
//! # Design
//!
//! Only two error kinds ever escape the matcher/dispatcher as thrown
//! failures: [`CliError`] (precondition and other user-facing fatal errors,
//! with a chosen exit code) and everything else (unexpected, mapped to 255 at
//! the single top-level catch in `cli::run`). Conversion and grammar errors
//! stay local to the matcher as boolean/warning outcomes.

use thiserror::Error;

/// Exit code for missing-precondition failures (e.g. no project root).
pub const EXIT_PRECONDITION: u8 = 2;

/// Exit code for unexpected, unclassified errors.
pub const EXIT_UNEXPECTED: u8 = 255;

/// A fatal CLI error with a user-facing message and its own exit code.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct CliError {
    message: String,
    exit_code: u8,
}

impl CliError {
    /// Create an error with an explicit exit code.
    pub fn new(message: impl Into<String>, exit_code: u8) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// A failed execution precondition (raised before the commandlet runs).
    pub fn precondition(message: impl Into<String>) -> Self {
        Self::new(message, EXIT_PRECONDITION)
    }

    /// An internal invariant violation; indicates a bug in this crate.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(format!("internal error: {}", message.into()), EXIT_UNEXPECTED)
    }

    /// The process exit code this error maps to.
    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

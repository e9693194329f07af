//! process
//!
//! Process execution for tool commandlets.
//!
//! # Design
//!
//! A fluent builder over `std::process::Command`. Only commandlet `run`
//! implementations spawn processes; the matcher and dispatcher never touch
//! this module. Execution is synchronous with no timeout at this layer.

use std::path::PathBuf;
use std::process::Command;

use thiserror::Error;

use crate::log::Logger;

/// How a non-zero exit status is handled by [`ProcessContext::run`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorHandling {
    /// Non-zero exit is an error.
    Throw,
    /// Non-zero exit logs a warning and returns the status.
    Warn,
    /// Non-zero exit is returned silently.
    Ignore,
}

/// Errors from process execution.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// Executable could not be spawned.
    #[error("failed to run '{executable}': {source}")]
    Spawn {
        executable: String,
        #[source]
        source: std::io::Error,
    },

    /// Process exited with a non-zero status under [`ErrorHandling::Throw`].
    #[error("'{executable}' exited with status {status}")]
    NonZeroExit { executable: String, status: i32 },
}

/// Builder for one synchronous process invocation.
#[derive(Debug)]
pub struct ProcessContext {
    executable: String,
    args: Vec<String>,
    directory: Option<PathBuf>,
    env: Vec<(String, String)>,
    error_handling: ErrorHandling,
}

impl ProcessContext {
    /// Create a context for the given executable.
    pub fn new(executable: impl Into<String>) -> Self {
        Self {
            executable: executable.into(),
            args: Vec::new(),
            directory: None,
            env: Vec::new(),
            error_handling: ErrorHandling::Throw,
        }
    }

    /// Working directory for the process.
    pub fn directory(mut self, directory: PathBuf) -> Self {
        self.directory = Some(directory);
        self
    }

    /// Add a single argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Add multiple arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Set an environment variable for the process.
    pub fn env(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((name.into(), value.into()));
        self
    }

    /// Choose how a non-zero exit status is handled.
    pub fn error_handling(mut self, handling: ErrorHandling) -> Self {
        self.error_handling = handling;
        self
    }

    /// Run the process to completion and return its exit status.
    pub fn run(self, log: &Logger) -> Result<i32, ProcessError> {
        let mut command = Command::new(&self.executable);
        command.args(&self.args);
        if let Some(directory) = &self.directory {
            command.current_dir(directory);
        }
        for (name, value) in &self.env {
            command.env(name, value);
        }
        log.debug(format!(
            "running {} {}",
            self.executable,
            self.args.join(" ")
        ));
        let status = command.status().map_err(|source| ProcessError::Spawn {
            executable: self.executable.clone(),
            source,
        })?;
        let code = status.code().unwrap_or(-1);
        if code != 0 {
            match self.error_handling {
                ErrorHandling::Throw => {
                    return Err(ProcessError::NonZeroExit {
                        executable: self.executable,
                        status: code,
                    })
                }
                ErrorHandling::Warn => {
                    log.warning(format!("'{}' exited with status {}", self.executable, code));
                }
                ErrorHandling::Ignore => {}
            }
        }
        Ok(code)
    }
}

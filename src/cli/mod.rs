//! cli
//!
//! Command-line interface layer: argument sequence, matcher, dispatcher,
//! and the interactive shell.
//!
//! # Responsibilities
//!
//! - Turn raw tokens into a bound, validated invocation of one commandlet
//! - Map outcomes and errors to process exit codes
//! - Own the single top-level catch for fatal errors
//!
//! # Exit codes
//!
//! - `0` - success (including a bare `--version` invocation)
//! - `1` - no commandlet matched or validation rejected the input
//! - precondition failures carry their own code via [`CliError`]
//! - `255` - unexpected errors, reported with an issue-report pointer

pub mod args;
pub mod dispatch;
pub mod error;
pub mod matcher;
pub mod shell;

pub use error::CliError;

use anyhow::Result;

use crate::commandlet::{ContextCommandlet, Registry};
use crate::context::GlobalContext;
use crate::log::Logger;

use args::Arguments;

const ISSUE_URL: &str = "https://github.com/toolshed-dev/toolshed/issues/new?labels=bug&title=";

/// Run the CLI with the given raw tokens and return the process exit code.
///
/// Zero tokens enter the interactive shell; otherwise the tokens are
/// dispatched once. This is the only place errors are turned into codes.
pub fn run(raw_args: &[String]) -> u8 {
    let cwd = std::env::current_dir().unwrap_or_else(|_| ".".into());
    let mut ctx = GlobalContext::new(cwd);
    let registry = Registry::with_builtins();
    let context_cmd = ContextCommandlet::new();

    let outcome = if raw_args.is_empty() {
        shell::run_loop(&mut ctx, &registry, &context_cmd)
    } else {
        run_once(raw_args, &registry, &context_cmd, &mut ctx)
    };
    match outcome {
        Ok(code) => code,
        Err(error) => report_fatal(error, &ctx.log),
    }
}

/// Dispatch one token sequence (phases A and B).
fn run_once(
    raw_args: &[String],
    registry: &Registry,
    context_cmd: &ContextCommandlet,
    ctx: &mut GlobalContext,
) -> Result<u8> {
    let arguments = Arguments::new(raw_args.to_vec());
    let residual = dispatch::pre_parse(arguments.start(), context_cmd, ctx);
    dispatch::dispatch(residual, registry, ctx)
}

/// The single top-level catch: classify the error and pick the exit code.
fn report_fatal(error: anyhow::Error, log: &Logger) -> u8 {
    if let Some(cli) = error.downcast_ref::<CliError>() {
        log.error(cli);
        return cli.exit_code();
    }
    log.error(format!(
        "An unexpected error occurred: {:#}\n\
         If the problem is not on your end, please file a bug:\n\
         {}{}",
        error,
        ISSUE_URL,
        urlencode(&error.to_string())
    ));
    error::EXIT_UNEXPECTED
}

/// Minimal percent-encoding for the issue-title query parameter.
fn urlencode(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for byte in raw.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            b' ' => out.push('+'),
            other => out.push_str(&format!("%{:02X}", other)),
        }
    }
    out
}

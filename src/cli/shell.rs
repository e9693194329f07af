//! cli::shell
//!
//! Interactive shell loop for the zero-argument invocation mode.
//!
//! # Design
//!
//! Cooperative and single-threaded: the blocking line read is the only
//! suspension point per iteration. Each accepted line is whitespace-split
//! (no quoting) and dispatched exactly like a one-shot invocation against
//! the session's global context. Transient run params are reset after every
//! line; the project root and log threshold persist for the session.
//!
//! Ctrl-C discards the current line and continues; Ctrl-D ends the session
//! with success. An error from a successfully dispatched command ends the
//! session with failure; mere no-match outcomes are reported and the loop
//! continues.

use std::path::PathBuf;

use anyhow::Result;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use crate::commandlet::{ContextCommandlet, Registry};
use crate::context::GlobalContext;

use super::args::Arguments;
use super::dispatch;

const PROMPT: &str = "tsd> ";

/// Run the interactive loop; returns the session's exit code.
pub fn run_loop(
    ctx: &mut GlobalContext,
    registry: &Registry,
    context_cmd: &ContextCommandlet,
) -> Result<u8> {
    let mut editor = DefaultEditor::new()?;
    let history = history_path();
    if let Some(path) = &history {
        let _ = editor.load_history(path);
    }

    let exit_code = loop {
        match editor.readline(PROMPT) {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                if line == "exit" || line == "quit" {
                    break dispatch::EXIT_SUCCESS;
                }
                let _ = editor.add_history_entry(line);

                let arguments = Arguments::from_line(line);
                let residual = dispatch::pre_parse(arguments.start(), context_cmd, ctx);
                let outcome = dispatch::dispatch(residual, registry, ctx);
                ctx.reset_run_params();
                match outcome {
                    // No-match (non-zero) outcomes were already reported;
                    // the session continues.
                    Ok(_) => {}
                    Err(error) => {
                        ctx.log
                            .error(format!("error while running '{}': {:#}", line, error));
                        break dispatch::EXIT_NO_MATCH;
                    }
                }
            }
            // Ctrl-C: discard the line, keep the session.
            Err(ReadlineError::Interrupted) => continue,
            // Ctrl-D: end of input.
            Err(ReadlineError::Eof) => break dispatch::EXIT_SUCCESS,
            Err(error) => return Err(error.into()),
        }
    };

    if let Some(path) = &history {
        if let Some(parent) = path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        let _ = editor.save_history(path);
    }
    Ok(exit_code)
}

fn history_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|dir| dir.join("toolshed").join("history.txt"))
}

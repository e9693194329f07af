//! cli::dispatch
//!
//! Two-phase dispatch: global-option pre-parse, then command resolution.
//!
//! # Design
//!
//! Phase A consumes leading tokens recognized as global options of the
//! [`ContextCommandlet`] and applies them to the global context; the first
//! unrecognized token ends the phase without error. Phase B resolves the
//! residual sequence to exactly one commandlet: fast path by leading keyword
//! first, then the exhaustive scan in registration order. The first match
//! executes; if none matches, the unconsumed tokens are reported, help runs
//! as the fallback action, and the invocation fails with exit code 1.

use anyhow::Result;

use crate::commandlet::{ContextCommandlet, Registry};
use crate::context::GlobalContext;
use crate::property::{Bindings, BoundValue, PropertyKind, PropertySpec};

use super::args::ArgCursor;
use super::error::CliError;
use super::matcher;

/// Exit code of a dispatched invocation that completed.
pub const EXIT_SUCCESS: u8 = 0;

/// Exit code when no commandlet matched or validation rejected the input.
pub const EXIT_NO_MATCH: u8 = 1;

/// Phase A: bind leading global options and apply them to the context.
///
/// Returns the residual cursor where command resolution starts. Recognized
/// value options take their value inline (`--home=DIR`) or from the next
/// token (`--home DIR`); flags bind by presence. The first token whose key
/// is not a context option ends the phase.
pub fn pre_parse<'a>(
    start: ArgCursor<'a>,
    context_cmd: &ContextCommandlet,
    ctx: &mut GlobalContext,
) -> ArgCursor<'a> {
    let log = ctx.log;
    let grammar = context_cmd.grammar();
    let mut bindings = Bindings::new();
    let mut pending: Option<&PropertySpec> = None;
    let mut cursor = start;

    while !cursor.is_end() {
        let Some(raw) = cursor.raw() else { break };
        if let Some(property) = pending {
            if let Err(error) = property.bind(raw, &mut bindings) {
                log.warning(format!(
                    "invalid value '{}' for global option '{}': {}",
                    raw,
                    property.name(),
                    error
                ));
            }
            pending = None;
        } else {
            let Some(property) = cursor.key().and_then(|key| grammar.find_option(key)) else {
                break;
            };
            if let Some(value) = cursor.value() {
                if let Err(error) = property.bind(value, &mut bindings) {
                    log.warning(format!(
                        "invalid value '{}' for global option '{}': {}",
                        value,
                        property.name(),
                        error
                    ));
                }
            } else if property.kind() == PropertyKind::Flag {
                bindings.set(property.name(), BoundValue::Bool(true));
            } else {
                pending = Some(property);
            }
        }
        cursor = cursor.advance(true);
    }
    if let Some(property) = pending {
        log.error(format!("missing value for option {}", property.name()));
    }
    context_cmd.apply(ctx, &bindings);
    cursor
}

/// Phase B: resolve the residual sequence to one commandlet and execute it.
///
/// Returns the process exit code; fatal errors (precondition failures,
/// execution errors) are returned as `Err` for the single top-level catch.
pub fn dispatch(
    cursor: ArgCursor<'_>,
    registry: &Registry,
    ctx: &mut GlobalContext,
) -> Result<u8> {
    if cursor.is_end() {
        // Nothing left after the global options (e.g. a bare `--version`).
        return Ok(EXIT_SUCCESS);
    }
    let keyword = cursor.raw().unwrap_or_default();
    let fast_path = registry.first_keyword_index(keyword);
    if let Some(index) = fast_path {
        if try_candidate(cursor, registry, index, ctx)? {
            return Ok(EXIT_SUCCESS);
        }
    }
    for index in 0..registry.len() {
        if Some(index) == fast_path {
            continue;
        }
        if try_candidate(cursor, registry, index, ctx)? {
            return Ok(EXIT_SUCCESS);
        }
    }
    if !cursor.is_end() {
        ctx.log
            .error(format!("invalid arguments: {}", cursor.rest().join(" ")));
    }
    run_help_fallback(registry, ctx)?;
    Ok(EXIT_NO_MATCH)
}

/// Match one candidate; on success check its precondition and run it.
///
/// Returns whether the candidate matched (and therefore ran). A matched
/// candidate with an unmet project-root precondition is a fatal error, not a
/// fallthrough to further candidates.
fn try_candidate(
    cursor: ArgCursor<'_>,
    registry: &Registry,
    index: usize,
    ctx: &mut GlobalContext,
) -> Result<bool> {
    let commandlet = registry.get(index);
    let Some(bindings) = matcher::apply(cursor, commandlet, &ctx.log) else {
        ctx.log.trace(format!("commandlet '{}' did not match", commandlet.name()));
        return Ok(false);
    };
    ctx.log
        .debug(format!("running commandlet '{}'", commandlet.name()));
    if commandlet.requires_project_root() && ctx.project_root().is_none() {
        return Err(CliError::precondition(format!(
            "command '{}' requires a project; no {} found upward of {} (use --home <dir>)",
            commandlet.name(),
            crate::config::SETTINGS_FILE,
            ctx.cwd.display()
        ))
        .into());
    }
    commandlet.run(ctx, registry, &bindings)?;
    Ok(true)
}

fn run_help_fallback(registry: &Registry, ctx: &mut GlobalContext) -> Result<()> {
    let Some(help) = registry.by_name("help") else {
        return Ok(());
    };
    let mut bindings = Bindings::new();
    bindings.set("help", BoundValue::Bool(true));
    help.run(ctx, registry, &bindings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::args::Arguments;
    use crate::log::LogLevel;
    use std::fs;
    use tempfile::TempDir;

    fn tokens(items: &[&str]) -> Arguments {
        Arguments::new(items.iter().map(|t| t.to_string()).collect())
    }

    fn project() -> (TempDir, GlobalContext) {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(crate::config::SETTINGS_FILE), "").unwrap();
        let ctx = GlobalContext::new(dir.path().to_path_buf());
        (dir, ctx)
    }

    fn no_project() -> (TempDir, GlobalContext) {
        let dir = TempDir::new().unwrap();
        let ctx = GlobalContext::new(dir.path().to_path_buf());
        (dir, ctx)
    }

    mod phase_a {
        use super::*;

        #[test]
        fn consumes_leading_global_options() {
            let (_dir, mut ctx) = no_project();
            let context_cmd = ContextCommandlet::new();
            let arguments = tokens(&["--debug", "help"]);
            let residual = pre_parse(arguments.start(), &context_cmd, &mut ctx);
            assert_eq!(ctx.log.threshold(), LogLevel::Debug);
            assert_eq!(residual.raw(), Some("help"));
        }

        #[test]
        fn separate_value_is_consumed() {
            let (_outside, mut ctx) = no_project();
            let target = TempDir::new().unwrap();
            fs::write(target.path().join(crate::config::SETTINGS_FILE), "").unwrap();

            let context_cmd = ContextCommandlet::new();
            let home = target.path().display().to_string();
            let arguments = tokens(&["--home", &home, "install", "gradle"]);
            let residual = pre_parse(arguments.start(), &context_cmd, &mut ctx);
            assert_eq!(ctx.project_root(), Some(target.path()));
            assert_eq!(residual.raw(), Some("install"));
        }

        #[test]
        fn unrecognized_token_ends_phase_without_error() {
            let (_dir, mut ctx) = no_project();
            let context_cmd = ContextCommandlet::new();
            let arguments = tokens(&["install", "--debug"]);
            let residual = pre_parse(arguments.start(), &context_cmd, &mut ctx);
            // --debug belongs to phase B now
            assert_eq!(residual.raw(), Some("install"));
            assert_eq!(ctx.log.threshold(), LogLevel::Info);
        }
    }

    mod phase_b {
        use super::*;

        #[test]
        fn empty_residual_is_success() {
            let (_dir, mut ctx) = no_project();
            let registry = Registry::with_builtins();
            let arguments = tokens(&[]);
            let code = dispatch(arguments.start(), &registry, &mut ctx).unwrap();
            assert_eq!(code, EXIT_SUCCESS);
        }

        #[test]
        fn help_dispatches_via_fast_path() {
            let (_dir, mut ctx) = no_project();
            let registry = Registry::with_builtins();
            let arguments = tokens(&["help"]);
            let code = dispatch(arguments.start(), &registry, &mut ctx).unwrap();
            assert_eq!(code, EXIT_SUCCESS);
        }

        #[test]
        fn unknown_token_falls_back_to_help_with_code_1() {
            let (_dir, mut ctx) = no_project();
            let registry = Registry::with_builtins();
            let arguments = tokens(&["zzz-unknown"]);
            let code = dispatch(arguments.start(), &registry, &mut ctx).unwrap();
            assert_eq!(code, EXIT_NO_MATCH);
        }

        #[test]
        fn install_executes_inside_a_project() {
            let (dir, mut ctx) = project();
            let registry = Registry::with_builtins();
            let arguments = tokens(&["install", "gradle", "--version=8.5"]);
            let code = dispatch(arguments.start(), &registry, &mut ctx).unwrap();
            assert_eq!(code, EXIT_SUCCESS);
            assert_eq!(
                crate::tool::installed_version(dir.path(), "gradle").as_deref(),
                Some("8.5")
            );
        }

        #[test]
        fn matched_candidate_without_project_root_is_fatal() {
            let (_dir, mut ctx) = no_project();
            let registry = Registry::with_builtins();
            let arguments = tokens(&["install", "gradle"]);
            let err = dispatch(arguments.start(), &registry, &mut ctx).unwrap_err();
            let cli = err.downcast_ref::<CliError>().unwrap();
            assert_eq!(cli.exit_code(), crate::cli::error::EXIT_PRECONDITION);
        }

        #[test]
        fn fast_path_owner_shadows_other_candidates() {
            use crate::commandlet::install::InstallCommandlet;

            // Two commandlets accept "install gradle"; only the first
            // registered one owns the fast path and gets executed.
            let mut registry = Registry::new();
            registry.register(Box::new(InstallCommandlet::new()));
            registry.register(Box::new(InstallCommandlet::new()));
            assert_eq!(registry.first_keyword_index("install"), Some(0));

            let (dir, mut ctx) = project();
            let arguments = tokens(&["install", "gradle"]);
            let code = dispatch(arguments.start(), &registry, &mut ctx).unwrap();
            assert_eq!(code, EXIT_SUCCESS);
            assert!(crate::tool::installed_version(dir.path(), "gradle").is_some());
        }

        #[test]
        fn transient_params_do_not_leak_across_invocations() {
            let (_dir, mut ctx) = project();
            let registry = Registry::with_builtins();
            let context_cmd = ContextCommandlet::new();

            let line1 = tokens(&["--force", "help"]);
            let residual = pre_parse(line1.start(), &context_cmd, &mut ctx);
            dispatch(residual, &registry, &mut ctx).unwrap();
            assert!(ctx.force);
            ctx.reset_run_params();

            let line2 = tokens(&["help"]);
            let residual = pre_parse(line2.start(), &context_cmd, &mut ctx);
            dispatch(residual, &registry, &mut ctx).unwrap();
            assert!(!ctx.force);
        }
    }
}

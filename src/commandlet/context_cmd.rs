//! commandlet::context_cmd
//!
//! The distinguished global-option commandlet consumed by dispatch phase A.
//!
//! # Design
//!
//! This unit is always active and is not registered in the registry: the
//! dispatcher binds leading recognized options against it before command
//! resolution ever starts. Applying the bindings mutates the global context.
//! Log threshold and project root persist for the session; `--batch` and
//! `--force` are transient run params reset after each shell line.

use crate::context::GlobalContext;
use crate::log::LogLevel;
use crate::property::{Bindings, PropertyKind, PropertySpec, ValueType};

use super::Grammar;

/// Global options recognized before command resolution.
pub struct ContextCommandlet {
    grammar: Grammar,
}

impl ContextCommandlet {
    pub fn new() -> Self {
        let grammar = Grammar::new()
            .option(PropertySpec::new("--version", PropertyKind::Flag).with_alias("-v"))
            .option(PropertySpec::new("--debug", PropertyKind::Flag).with_alias("-d"))
            .option(PropertySpec::new("--trace", PropertyKind::Flag))
            .option(PropertySpec::new("--quiet", PropertyKind::Flag).with_alias("-q"))
            .option(PropertySpec::new("--batch", PropertyKind::Flag).with_alias("-b"))
            .option(PropertySpec::new("--force", PropertyKind::Flag).with_alias("-f"))
            .option(
                PropertySpec::new("--home", PropertyKind::Value(ValueType::Path))
                    .with_alias("--project-dir"),
            )
            .option(PropertySpec::new(
                "--log-level",
                PropertyKind::Value(ValueType::LogLevel),
            ));
        Self { grammar }
    }

    pub fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    /// Apply phase-A bindings to the global context.
    ///
    /// The log threshold is only touched when a verbosity option was actually
    /// given, so a level set on one shell line persists for the session.
    pub fn apply(&self, ctx: &mut GlobalContext, bindings: &Bindings) {
        if let Some(level) = bindings.get_log_level("--log-level") {
            ctx.log.set_threshold(level);
        } else {
            let trace = bindings.get_flag("--trace");
            let debug = bindings.get_flag("--debug");
            let quiet = bindings.get_flag("--quiet");
            if trace || debug || quiet {
                ctx.log.set_threshold(LogLevel::from_flags(trace, debug, quiet));
            }
        }
        if let Some(home) = bindings.get_path("--home") {
            ctx.set_project_root(home.clone());
        }
        if bindings.get_flag("--batch") {
            ctx.batch = true;
        }
        if bindings.get_flag("--force") {
            ctx.force = true;
        }
        if bindings.get_flag("--version") {
            ctx.log
                .info(format!("toolshed {}", env!("CARGO_PKG_VERSION")));
        }
    }
}

impl Default for ContextCommandlet {
    fn default() -> Self {
        Self::new()
    }
}

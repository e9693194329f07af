//! variable
//!
//! Typed tool environment variable definitions.
//!
//! # Design
//!
//! A [`VariableDef`] names one exported variable (e.g. `GRADLE_HOME`) with an
//! optional legacy name honored for backwards compatibility. Resolution order
//! is: process environment (current name, then legacy name), then the
//! computed default. The `env` commandlet and the process layer both consume
//! [`tool_exports`].

use std::env;

use crate::context::GlobalContext;
use crate::tool;

/// Definition of one exported environment variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariableDef {
    name: &'static str,
    legacy_name: Option<&'static str>,
}

impl VariableDef {
    /// Create a definition with no legacy name.
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            legacy_name: None,
        }
    }

    /// Attach a legacy name consulted after the current one.
    pub const fn with_legacy(name: &'static str, legacy_name: &'static str) -> Self {
        Self {
            name,
            legacy_name: Some(legacy_name),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn legacy_name(&self) -> Option<&'static str> {
        self.legacy_name
    }

    /// Value from the process environment, preferring the current name.
    pub fn from_env(&self) -> Option<String> {
        env::var(self.name)
            .ok()
            .or_else(|| self.legacy_name.and_then(|legacy| env::var(legacy).ok()))
    }

    /// Resolve against the environment, falling back to `default`.
    pub fn resolve(&self, default: Option<String>) -> Option<String> {
        self.from_env().or(default)
    }
}

/// Variables exported for the project's installed tools.
///
/// One `<TOOL>_HOME` entry per installed tool, pointing at the active
/// install. Empty outside a project.
pub fn tool_exports(ctx: &GlobalContext) -> Vec<(String, String)> {
    let Some(root) = ctx.project_root() else {
        return Vec::new();
    };
    tool::KNOWN_TOOLS
        .iter()
        .filter_map(|descriptor| {
            let home = tool::installed_home(root, descriptor.name)?;
            let def = VariableDef::new(descriptor.home_var);
            let value = def.resolve(Some(home.display().to_string()))?;
            Some((descriptor.home_var.to_string(), value))
        })
        .collect()
}

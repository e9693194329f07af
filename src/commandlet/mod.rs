//! commandlet
//!
//! Command units, their grammars, and the registry.
//!
//! # Design
//!
//! A commandlet is a named unit exposing a keyed option table and an ordered
//! positional list ([`Grammar`]), a validation hook, and an execution hook.
//! Commandlets are immutable after construction: the values bound while
//! matching live in a per-attempt `Bindings`, never on the commandlet itself,
//! so a rejected candidate leaves no residue (see `cli::matcher`).
//!
//! # Invariants
//!
//! - A property belongs to exactly one of the option table or the positional
//!   list of its grammar
//! - Commandlets are constructed once at registry initialization and reused
//!   read-only for every matching attempt of the process

pub mod context_cmd;
pub mod env_cmd;
pub mod help;
pub mod install;
pub mod registry;
pub mod tool_cmd;
pub mod uninstall;
pub mod version_cmd;
pub mod versions;

pub use context_cmd::ContextCommandlet;
pub use registry::Registry;

use std::collections::HashMap;

use anyhow::Result;

use crate::context::GlobalContext;
use crate::property::{Bindings, PropertyKind, PropertySpec};

/// Option table plus ordered positional list of one commandlet.
#[derive(Debug, Default)]
pub struct Grammar {
    options: Vec<PropertySpec>,
    positionals: Vec<PropertySpec>,
    option_index: HashMap<String, usize>,
}

impl Grammar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a named option, keyed by its name and alias.
    pub fn option(mut self, spec: PropertySpec) -> Self {
        debug_assert!(
            !matches!(spec.kind(), PropertyKind::Keyword),
            "keywords are positional"
        );
        let index = self.options.len();
        self.option_index.insert(spec.name().to_string(), index);
        if let Some(alias) = spec.alias() {
            self.option_index.insert(alias.to_string(), index);
        }
        self.options.push(spec);
        self
    }

    /// Append a property to the ordered positional list.
    pub fn positional(mut self, spec: PropertySpec) -> Self {
        self.positionals.push(spec);
        self
    }

    /// Look up a named option by key (name or alias). O(1).
    pub fn find_option(&self, key: &str) -> Option<&PropertySpec> {
        self.option_index.get(key).map(|&i| &self.options[i])
    }

    /// All named options, in declaration order.
    pub fn options(&self) -> &[PropertySpec] {
        &self.options
    }

    /// The ordered positional list.
    pub fn positionals(&self) -> &[PropertySpec] {
        &self.positionals
    }

    /// The fixed leading keyword, if the first positional is a keyword.
    ///
    /// Commandlets with one are eligible for the registry fast path.
    pub fn first_keyword(&self) -> Option<&str> {
        self.positionals
            .first()
            .filter(|spec| spec.kind() == PropertyKind::Keyword)
            .map(PropertySpec::name)
    }

    /// Whether every required property has a binding.
    pub fn required_satisfied(&self, bindings: &Bindings) -> bool {
        self.options
            .iter()
            .chain(self.positionals.iter())
            .filter(|spec| spec.is_required())
            .all(|spec| bindings.is_bound(spec.name()))
    }

    /// One-line usage synopsis, e.g. `install <tool> [--version]`.
    pub fn synopsis(&self) -> String {
        let mut parts = Vec::new();
        for spec in &self.positionals {
            let part = match spec.kind() {
                PropertyKind::Keyword => spec.name().to_string(),
                _ if spec.is_multi_valued() => format!("[<{}>...]", spec.name()),
                _ if spec.is_required() => format!("<{}>", spec.name()),
                _ => format!("[<{}>]", spec.name()),
            };
            parts.push(part);
        }
        for spec in &self.options {
            let part = match spec.kind() {
                PropertyKind::Flag => format!("[{}]", spec.name()),
                _ => format!("[{} <value>]", spec.name()),
            };
            parts.push(part);
        }
        parts.join(" ")
    }
}

/// A named command unit.
///
/// Implementations hold only immutable grammar and configuration; all
/// per-invocation state arrives through `Bindings`.
pub trait Commandlet {
    /// Display name (also the help lookup key).
    fn name(&self) -> &str;

    /// One-line description for help output.
    fn summary(&self) -> &str;

    /// The argument grammar matched against this commandlet.
    fn grammar(&self) -> &Grammar;

    /// Whether execution requires a resolved project root.
    fn requires_project_root(&self) -> bool {
        false
    }

    /// Cross-property validation; the final verdict of a match attempt.
    ///
    /// The default accepts iff every required property is bound.
    fn validate(&self, bindings: &Bindings) -> bool {
        self.grammar().required_satisfied(bindings)
    }

    /// Execute with successfully matched bindings.
    fn run(&self, ctx: &mut GlobalContext, registry: &Registry, bindings: &Bindings)
        -> Result<()>;
}

//! commandlet::registry
//!
//! All registered commandlets, with a first-keyword fast path.
//!
//! # Design
//!
//! The registry keeps commandlets in registration order (the exhaustive
//! fallback scan is deterministic) plus a map from fixed leading keyword to
//! the owning commandlet. A commandlet whose first positional is a keyword
//! claims that literal; when two commandlets share a leading token, the one
//! registered first owns the fast path and the other is only reachable
//! through the fallback scan.

use std::collections::HashMap;

use super::{
    env_cmd::EnvCommandlet,
    help::HelpCommandlet,
    install::InstallCommandlet,
    tool_cmd::ToolCommandlet,
    uninstall::UninstallCommandlet,
    version_cmd::VersionCommandlet,
    versions::{GetVersionCommandlet, SetVersionCommandlet},
    Commandlet,
};
use crate::tool;

/// Commandlet registry.
#[derive(Default)]
pub struct Registry {
    commandlets: Vec<Box<dyn Commandlet>>,
    first_keyword: HashMap<String, usize>,
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with all built-in commandlets registered.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(HelpCommandlet::new()));
        registry.register(Box::new(VersionCommandlet::new()));
        registry.register(Box::new(EnvCommandlet::new()));
        registry.register(Box::new(InstallCommandlet::new()));
        registry.register(Box::new(UninstallCommandlet::new()));
        registry.register(Box::new(GetVersionCommandlet::new()));
        registry.register(Box::new(SetVersionCommandlet::new()));
        for descriptor in tool::KNOWN_TOOLS {
            registry.register(Box::new(ToolCommandlet::new(descriptor)));
        }
        registry
    }

    /// Register a commandlet, claiming its leading keyword if unclaimed.
    pub fn register(&mut self, commandlet: Box<dyn Commandlet>) {
        let index = self.commandlets.len();
        if let Some(keyword) = commandlet.grammar().first_keyword() {
            self.first_keyword
                .entry(keyword.to_string())
                .or_insert(index);
        }
        self.commandlets.push(commandlet);
    }

    /// Number of registered commandlets.
    pub fn len(&self) -> usize {
        self.commandlets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commandlets.is_empty()
    }

    /// Commandlet at a registration index.
    pub fn get(&self, index: usize) -> &dyn Commandlet {
        self.commandlets[index].as_ref()
    }

    /// Fast path: index of the commandlet owning `token` as leading keyword.
    pub fn first_keyword_index(&self, token: &str) -> Option<usize> {
        self.first_keyword.get(token).copied()
    }

    /// Fast path: the commandlet owning `token` as its leading keyword.
    pub fn by_first_keyword(&self, token: &str) -> Option<&dyn Commandlet> {
        self.first_keyword_index(token).map(|i| self.get(i))
    }

    /// Look up a commandlet by display name (help detail view).
    pub fn by_name(&self, name: &str) -> Option<&dyn Commandlet> {
        self.commandlets
            .iter()
            .map(Box::as_ref)
            .find(|c| c.name() == name)
    }

    /// All commandlets in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn Commandlet> {
        self.commandlets.iter().map(Box::as_ref)
    }
}

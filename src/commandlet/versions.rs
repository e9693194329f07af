//! commandlet::versions
//!
//! The `get-version` and `set-version` commandlets for pinned tool versions.
//!
//! Both share the leading token shape `<keyword> <tool>`; each keyword is a
//! distinct fast-path literal so the dispatcher resolves them in O(1).

use anyhow::Result;

use crate::cli::CliError;
use crate::context::GlobalContext;
use crate::property::{Bindings, PropertyKind, PropertySpec, ValueType};
use crate::tool;

use super::{Commandlet, Grammar, Registry};

/// `get-version <tool>`
pub struct GetVersionCommandlet {
    grammar: Grammar,
}

impl GetVersionCommandlet {
    pub fn new() -> Self {
        let grammar = Grammar::new()
            .positional(PropertySpec::keyword("get-version"))
            .positional(PropertySpec::required(
                "tool",
                PropertyKind::Value(ValueType::Tool),
            ));
        Self { grammar }
    }
}

impl Default for GetVersionCommandlet {
    fn default() -> Self {
        Self::new()
    }
}

impl Commandlet for GetVersionCommandlet {
    fn name(&self) -> &str {
        "get-version"
    }

    fn summary(&self) -> &str {
        "Print the installed or configured version of a tool"
    }

    fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    fn run(
        &self,
        ctx: &mut GlobalContext,
        _registry: &Registry,
        bindings: &Bindings,
    ) -> Result<()> {
        let name = bindings
            .get_str("tool")
            .ok_or_else(|| CliError::internal("get-version: missing tool binding"))?;
        let installed = ctx
            .project_root()
            .and_then(|root| tool::installed_version(root, name));
        let version = match installed {
            Some(version) => version,
            None => tool::resolve_version(None, &ctx.settings, name),
        };
        ctx.log.info(version);
        Ok(())
    }
}

/// `set-version <tool> <version>`
pub struct SetVersionCommandlet {
    grammar: Grammar,
}

impl SetVersionCommandlet {
    pub fn new() -> Self {
        let grammar = Grammar::new()
            .positional(PropertySpec::keyword("set-version"))
            .positional(PropertySpec::required(
                "tool",
                PropertyKind::Value(ValueType::Tool),
            ))
            .positional(PropertySpec::required(
                "version",
                PropertyKind::Value(ValueType::Version),
            ));
        Self { grammar }
    }
}

impl Default for SetVersionCommandlet {
    fn default() -> Self {
        Self::new()
    }
}

impl Commandlet for SetVersionCommandlet {
    fn name(&self) -> &str {
        "set-version"
    }

    fn summary(&self) -> &str {
        "Pin a tool version in the project settings"
    }

    fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    fn requires_project_root(&self) -> bool {
        true
    }

    fn run(
        &self,
        ctx: &mut GlobalContext,
        _registry: &Registry,
        bindings: &Bindings,
    ) -> Result<()> {
        let name = bindings
            .get_str("tool")
            .ok_or_else(|| CliError::internal("set-version: missing tool binding"))?;
        let version = bindings
            .get_str("version")
            .ok_or_else(|| CliError::internal("set-version: missing version binding"))?;
        let root = ctx
            .project_root()
            .ok_or_else(|| {
                CliError::internal("set-version: project root precondition not checked")
            })?
            .to_path_buf();
        ctx.settings.set_tool_version(name, version);
        ctx.settings.save(&root)?;
        ctx.log.info(format!("{} pinned to {}", name, version));
        Ok(())
    }
}

//! commandlet::uninstall
//!
//! The `uninstall` commandlet: remove an installed tool from the project.

use anyhow::Result;

use crate::cli::CliError;
use crate::context::GlobalContext;
use crate::property::{Bindings, PropertyKind, PropertySpec, ValueType};
use crate::tool::{self, ToolError};

use super::{Commandlet, Grammar, Registry};

/// `uninstall <tool>`
pub struct UninstallCommandlet {
    grammar: Grammar,
}

impl UninstallCommandlet {
    pub fn new() -> Self {
        let grammar = Grammar::new()
            .positional(PropertySpec::keyword("uninstall"))
            .positional(PropertySpec::required(
                "tool",
                PropertyKind::Value(ValueType::Tool),
            ));
        Self { grammar }
    }
}

impl Default for UninstallCommandlet {
    fn default() -> Self {
        Self::new()
    }
}

impl Commandlet for UninstallCommandlet {
    fn name(&self) -> &str {
        "uninstall"
    }

    fn summary(&self) -> &str {
        "Remove an installed tool from the project"
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
            .ok_or_else(|| CliError::internal("uninstall: missing tool binding"))?;
        let root = ctx
            .project_root()
            .ok_or_else(|| CliError::internal("uninstall: project root precondition not checked"))?
            .to_path_buf();
        match tool::uninstall(&root, name) {
            Ok(version) => {
                ctx.log.info(format!("uninstalled {} {}", name, version));
                Ok(())
            }
            Err(err @ ToolError::NotInstalled(_)) => {
                Err(CliError::new(err.to_string(), 1).into())
            }
            Err(err) => Err(err.into()),
        }
    }
}

//! commandlet::tool_cmd
//!
//! Per-tool run commandlets: `tsd gradle clean build`, `tsd mvn package`.
//!
//! # Design
//!
//! One commandlet per entry of the known-tool table. The grammar is the tool
//! name as a keyword discriminator followed by a multi-valued trailing `args`
//! slot, so everything after the tool name is passed through to the tool.
//! Running installs the tool first if it is missing, then spawns the
//! executable with the tool home exported.

use anyhow::Result;

use crate::context::GlobalContext;
use crate::process::ProcessContext;
use crate::property::{Bindings, PropertyKind, PropertySpec, ValueType};
use crate::tool::{self, ToolDescriptor};
use crate::cli::CliError;

use super::{Commandlet, Grammar, Registry};

/// `<tool> [<args>...]`
pub struct ToolCommandlet {
    descriptor: &'static ToolDescriptor,
    grammar: Grammar,
}

impl ToolCommandlet {
    pub fn new(descriptor: &'static ToolDescriptor) -> Self {
        let grammar = Grammar::new()
            .positional(PropertySpec::keyword(descriptor.name))
            .positional(
                PropertySpec::new("args", PropertyKind::Value(ValueType::Str))
                    .with_multi_valued(true),
            );
        Self {
            descriptor,
            grammar,
        }
    }

    pub fn descriptor(&self) -> &'static ToolDescriptor {
        self.descriptor
    }
}

impl Commandlet for ToolCommandlet {
    fn name(&self) -> &str {
        self.descriptor.name
    }

    fn summary(&self) -> &str {
        self.descriptor.summary
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
        let root = ctx
            .project_root()
            .ok_or_else(|| CliError::internal("tool run: project root precondition not checked"))?
            .to_path_buf();
        let name = self.descriptor.name;
        let home = match tool::installed_home(&root, name) {
            Some(home) => home,
            None => {
                let version = tool::resolve_version(None, &ctx.settings, name);
                ctx.log
                    .info(format!("installing {} {} on demand", name, version));
                tool::install(&root, name, &version)?
            }
        };
        let status = ProcessContext::new(self.descriptor.executable)
            .directory(ctx.cwd.clone())
            .env(self.descriptor.home_var, home.display().to_string())
            .args(bindings.get_list("args").iter().cloned())
            .run(&ctx.log)?;
        ctx.log.debug(format!("{} exited with status {}", name, status));
        Ok(())
    }
}

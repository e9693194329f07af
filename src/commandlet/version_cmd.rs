//! commandlet::version_cmd
//!
//! The `version` commandlet. Equivalent to the global `--version` flag.

use anyhow::Result;

use crate::context::GlobalContext;
use crate::property::{Bindings, PropertySpec};

use super::{Commandlet, Grammar, Registry};

/// `version`
pub struct VersionCommandlet {
    grammar: Grammar,
}

impl VersionCommandlet {
    pub fn new() -> Self {
        let grammar = Grammar::new().positional(PropertySpec::keyword("version"));
        Self { grammar }
    }
}

impl Default for VersionCommandlet {
    fn default() -> Self {
        Self::new()
    }
}

impl Commandlet for VersionCommandlet {
    fn name(&self) -> &str {
        "version"
    }

    fn summary(&self) -> &str {
        "Print the toolshed version"
    }

    fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    fn run(
        &self,
        ctx: &mut GlobalContext,
        _registry: &Registry,
        _bindings: &Bindings,
    ) -> Result<()> {
        ctx.log
            .info(format!("toolshed {}", env!("CARGO_PKG_VERSION")));
        Ok(())
    }
}

//! commandlet::env_cmd
//!
//! The `env` commandlet: print exported variables for installed tools.

use anyhow::Result;

use crate::context::GlobalContext;
use crate::property::{Bindings, PropertySpec};
use crate::variable;

use super::{Commandlet, Grammar, Registry};

/// `env`
pub struct EnvCommandlet {
    grammar: Grammar,
}

impl EnvCommandlet {
    pub fn new() -> Self {
        let grammar = Grammar::new().positional(PropertySpec::keyword("env"));
        Self { grammar }
    }
}

impl Default for EnvCommandlet {
    fn default() -> Self {
        Self::new()
    }
}

impl Commandlet for EnvCommandlet {
    fn name(&self) -> &str {
        "env"
    }

    fn summary(&self) -> &str {
        "Print exported tool variables for the project"
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
        _bindings: &Bindings,
    ) -> Result<()> {
        for (name, value) in variable::tool_exports(ctx) {
            ctx.log.info(format!("{}={}", name, value));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tool;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn prints_nothing_without_installs() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(crate::config::SETTINGS_FILE), "").unwrap();
        let mut ctx = GlobalContext::new(dir.path().to_path_buf());
        let registry = Registry::new();
        let cmd = EnvCommandlet::new();
        let mut bindings = Bindings::new();
        PropertySpec::keyword("env").bind("", &mut bindings).unwrap();
        cmd.run(&mut ctx, &registry, &bindings).unwrap();
    }

    #[test]
    fn requires_project_root() {
        assert!(EnvCommandlet::new().requires_project_root());
    }

    #[test]
    fn exports_follow_installs() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(crate::config::SETTINGS_FILE), "").unwrap();
        tool::install(dir.path(), "mvn", "3.9.6").unwrap();

        let ctx = GlobalContext::new(dir.path().to_path_buf());
        let exports = variable::tool_exports(&ctx);
        assert!(exports.iter().any(|(name, _)| name == "M2_HOME"));
    }
}

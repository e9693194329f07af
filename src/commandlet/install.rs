//! commandlet::install
//!
//! The `install` commandlet: install a tool into the project.

use anyhow::Result;

use crate::cli::CliError;
use crate::context::GlobalContext;
use crate::property::{Bindings, PropertyKind, PropertySpec, ValueType};
use crate::tool;

use super::{Commandlet, Grammar, Registry};

/// `install <tool> [--version <v>]`
pub struct InstallCommandlet {
    grammar: Grammar,
}

impl InstallCommandlet {
    pub fn new() -> Self {
        let grammar = Grammar::new()
            .positional(PropertySpec::keyword("install"))
            .positional(PropertySpec::required(
                "tool",
                PropertyKind::Value(ValueType::Tool),
            ))
            .option(PropertySpec::new(
                "--version",
                PropertyKind::Value(ValueType::Version),
            ));
        Self { grammar }
    }
}

impl Default for InstallCommandlet {
    fn default() -> Self {
        Self::new()
    }
}

impl Commandlet for InstallCommandlet {
    fn name(&self) -> &str {
        "install"
    }

    fn summary(&self) -> &str {
        "Install a tool into the project"
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
        // The matcher guarantees required bindings; a miss here is a bug.
        let name = bindings
            .get_str("tool")
            .ok_or_else(|| CliError::internal("install: missing tool binding"))?;
        let root = ctx
            .project_root()
            .ok_or_else(|| CliError::internal("install: project root precondition not checked"))?
            .to_path_buf();
        let version = tool::resolve_version(bindings.get_str("--version"), &ctx.settings, name);
        if !ctx.force {
            if let Some(installed) = tool::installed_version(&root, name) {
                if installed == version {
                    ctx.log
                        .info(format!("{} {} is already installed", name, installed));
                    return Ok(());
                }
            }
        }
        let home = tool::install(&root, name, &version)?;
        ctx.log.info(format!(
            "installed {} {} at {}",
            name,
            version,
            home.display()
        ));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn project_ctx() -> (TempDir, GlobalContext) {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(crate::config::SETTINGS_FILE), "").unwrap();
        let ctx = GlobalContext::new(dir.path().to_path_buf());
        (dir, ctx)
    }

    #[test]
    fn grammar_shape() {
        let cmd = InstallCommandlet::new();
        assert_eq!(cmd.grammar().first_keyword(), Some("install"));
        assert!(cmd.grammar().find_option("--version").is_some());
        assert!(cmd.requires_project_root());
    }

    #[test]
    fn installs_resolved_version() {
        let (dir, mut ctx) = project_ctx();
        ctx.settings.set_tool_version("gradle", "8.5");

        let cmd = InstallCommandlet::new();
        let registry = Registry::new();
        let mut bindings = Bindings::new();
        PropertySpec::keyword("install").bind("", &mut bindings).unwrap();
        PropertySpec::new("tool", PropertyKind::Value(ValueType::Tool))
            .bind("gradle", &mut bindings)
            .unwrap();

        cmd.run(&mut ctx, &registry, &bindings).unwrap();
        assert_eq!(
            tool::installed_version(dir.path(), "gradle").as_deref(),
            Some("8.5")
        );
    }

    #[test]
    fn version_flag_wins() {
        let (dir, mut ctx) = project_ctx();
        ctx.settings.set_tool_version("gradle", "8.5");

        let cmd = InstallCommandlet::new();
        let registry = Registry::new();
        let mut bindings = Bindings::new();
        PropertySpec::keyword("install").bind("", &mut bindings).unwrap();
        PropertySpec::new("tool", PropertyKind::Value(ValueType::Tool))
            .bind("gradle", &mut bindings)
            .unwrap();
        PropertySpec::new("--version", PropertyKind::Value(ValueType::Version))
            .bind("9.0", &mut bindings)
            .unwrap();

        cmd.run(&mut ctx, &registry, &bindings).unwrap();
        assert_eq!(
            tool::installed_version(dir.path(), "gradle").as_deref(),
            Some("9.0")
        );
    }
}

//! commandlet::help
//!
//! The `help` commandlet; also executed as the fallback action when no
//! candidate matched an invocation.

use anyhow::Result;

use crate::context::GlobalContext;
use crate::property::{Bindings, PropertyKind, PropertySpec, ValueType};

use super::{Commandlet, ContextCommandlet, Grammar, Registry};

/// `help [command]`
pub struct HelpCommandlet {
    grammar: Grammar,
}

impl HelpCommandlet {
    pub fn new() -> Self {
        let grammar = Grammar::new()
            .positional(PropertySpec::keyword("help"))
            .positional(PropertySpec::new(
                "command",
                PropertyKind::Value(ValueType::Str),
            ));
        Self { grammar }
    }

    fn print_overview(&self, ctx: &GlobalContext, registry: &Registry) {
        ctx.log.info(format!(
            "toolshed {} - per-project developer tooling",
            env!("CARGO_PKG_VERSION")
        ));
        ctx.log.info("");
        ctx.log.info("usage: tsd [options] <command> [arguments]");
        ctx.log.info("");
        ctx.log.info("commands:");
        for commandlet in registry.iter() {
            ctx.log.info(format!(
                "  {:<32} {}",
                commandlet.grammar().synopsis(),
                commandlet.summary()
            ));
        }
        ctx.log.info("");
        ctx.log.info("options:");
        for option in ContextCommandlet::new().grammar().options() {
            let key = match option.alias() {
                Some(alias) => format!("{}, {}", option.name(), alias),
                None => option.name().to_string(),
            };
            ctx.log.info(format!("  {}", key));
        }
    }

    fn print_detail(&self, ctx: &GlobalContext, commandlet: &dyn Commandlet) {
        ctx.log.info(format!(
            "{} - {}",
            commandlet.name(),
            commandlet.summary()
        ));
        ctx.log
            .info(format!("usage: tsd {}", commandlet.grammar().synopsis()));
    }
}

impl Default for HelpCommandlet {
    fn default() -> Self {
        Self::new()
    }
}

impl Commandlet for HelpCommandlet {
    fn name(&self) -> &str {
        "help"
    }

    fn summary(&self) -> &str {
        "Show usage for all commands or one command"
    }

    fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    fn run(
        &self,
        ctx: &mut GlobalContext,
        registry: &Registry,
        bindings: &Bindings,
    ) -> Result<()> {
        match bindings.get_str("command").and_then(|n| registry.by_name(n)) {
            Some(commandlet) => self.print_detail(ctx, commandlet),
            None => self.print_overview(ctx, registry),
        }
        Ok(())
    }
}

//! Help command implementation; also renders the main menu.

use crate::shell::command::{Command, CommandRegistry, CommandResult, ShellContext};

/// Command to display the menu or help for one command.
pub struct HelpCommand;

/// The option list shown after login and by `help`.
pub fn render_menu(registry: &CommandRegistry) -> String {
    let mut output = String::from("Select one of the following options:\n");
    for cmd in registry.commands() {
        output.push_str(&format!("  {:<6}- {}\n", cmd.name(), cmd.description()));
    }
    output.push_str("\nType 'help <option>' for details.");
    output
}

impl Command for HelpCommand {
    fn name(&self) -> &str {
        "help"
    }

    fn aliases(&self) -> &[&str] {
        &["h", "?"]
    }

    fn description(&self) -> &str {
        "Show this menu"
    }

    fn usage(&self) -> &str {
        "help [option]"
    }

    fn help(&self) -> &str {
        "Without arguments, lists the menu options.\n\
         With an option code or name, shows detailed help for it.\n\n\
         Examples:\n  \
           help\n  \
           help vm"
    }

    fn execute(&self, args: &[&str], ctx: &mut ShellContext) -> CommandResult {
        let Some(registry) = ctx.registry else {
            return CommandResult::error("Help not available (no registry)");
        };

        let Some(&cmd_name) = args.first() else {
            return CommandResult::success(render_menu(registry));
        };

        match registry.get(cmd_name) {
            Some(cmd) => {
                let aliases = cmd.aliases();
                let alias_str = if aliases.is_empty() {
                    String::new()
                } else {
                    format!("\nAliases: {}", aliases.join(", "))
                };
                CommandResult::success(format!(
                    "{}\n\nUsage: {}{}\n\n{}",
                    cmd.description().to_uppercase(),
                    cmd.usage(),
                    alias_str,
                    cmd.help()
                ))
            }
            None => CommandResult::error(format!(
                "Unknown option: '{}'\nType 'help' to see available options.",
                cmd_name
            )),
        }
    }

    fn max_args(&self) -> usize {
        1
    }
}

//! Exit command implementation.

use crate::shell::command::{Command, CommandResult, ShellContext};

/// Command to save everything and leave the shell.
pub struct ExitCommand;

impl Command for ExitCommand {
    fn name(&self) -> &str {
        "e"
    }

    fn aliases(&self) -> &[&str] {
        &["exit", "quit", "q"]
    }

    fn description(&self) -> &str {
        "Exit"
    }

    fn help(&self) -> &str {
        "Save users and tasks, then exit.\n\n\
         If saving fails the shell stays open so you can try again."
    }

    fn execute(&self, _args: &[&str], ctx: &mut ShellContext) -> CommandResult {
        match ctx.app.save_all() {
            Ok(()) => {
                log::info!("User requested exit");
                ctx.prompt.say("Goodbye!!!");
                CommandResult::Exit
            }
            Err(e) => {
                log::error!("Failed to save before exit: {}", e);
                CommandResult::error(format!("Failed to save: {}", e))
            }
        }
    }
}

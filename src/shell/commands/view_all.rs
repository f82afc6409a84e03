//! View-all command implementation.

use crate::shell::command::{Command, CommandResult, ShellContext};
use crate::task::TaskCard;

/// Command to list every task.
pub struct ViewAllCommand;

impl Command for ViewAllCommand {
    fn name(&self) -> &str {
        "va"
    }

    fn aliases(&self) -> &[&str] {
        &["view-all"]
    }

    fn description(&self) -> &str {
        "View all tasks"
    }

    fn execute(&self, _args: &[&str], ctx: &mut ShellContext) -> CommandResult {
        let tasks = ctx.app.tasks().list_all();
        log::debug!("Listing {} tasks", tasks.len());

        if tasks.is_empty() {
            return CommandResult::success("There are no tasks yet.");
        }

        let cards = tasks
            .iter()
            .enumerate()
            .map(|(i, task)| TaskCard { number: i + 1, task }.to_string())
            .collect::<Vec<_>>()
            .join("\n");

        CommandResult::success(format!("Viewing all tasks:\n{}", cards))
    }
}

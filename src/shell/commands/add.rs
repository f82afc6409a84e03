//! Add command implementation.

use crate::error::Error;
use crate::shell::command::{Command, CommandResult, ShellContext};
use crate::shell::highlighter::OutputHighlighter;
use crate::task::parse_date;

/// Command to create a task and assign it to a user.
pub struct AddCommand;

impl AddCommand {
    fn run(&self, ctx: &mut ShellContext) -> anyhow::Result<CommandResult> {
        let assignee = ctx.ask("Name of person assigned to task: ")?;
        if !ctx.app.users().contains(&assignee) {
            return Err(Error::UnknownUser(assignee).into());
        }

        let title = ctx.prompt.read_line("Title of Task: ")?;
        let description = ctx.prompt.read_line("Description of Task: ")?;

        let due_date = loop {
            let input = ctx.ask("Due date of task (YYYY-MM-DD): ")?;
            match parse_date(&input) {
                Ok(date) => break date,
                Err(e) => ctx.prompt.say(&OutputHighlighter::error(&e.to_string())),
            }
        };

        log::debug!("Adding task '{}' for {}", title, assignee);
        ctx.app.add_task(&assignee, &title, &description, due_date)?;
        Ok(CommandResult::success("Task successfully added."))
    }
}

impl Command for AddCommand {
    fn name(&self) -> &str {
        "a"
    }

    fn aliases(&self) -> &[&str] {
        &["add"]
    }

    fn description(&self) -> &str {
        "Add a task"
    }

    fn help(&self) -> &str {
        "Create a task and assign it to a registered user.\n\n\
         Prompts for the assignee (Tab completes usernames), a title, a\n\
         description and a due date in YYYY-MM-DD format. The due date is\n\
         asked again until it is valid."
    }

    fn execute(&self, _args: &[&str], ctx: &mut ShellContext) -> CommandResult {
        CommandResult::from_outcome(self.run(ctx))
    }
}

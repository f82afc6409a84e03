//! View-mine command: lists the user's tasks and lets them complete or edit one.

use crate::error::Error;
use crate::shell::command::{Command, CommandResult, ShellContext};
use crate::task::OwnTaskCard;
use crate::tasks::TaskEdit;

/// Command to show and act on the logged-in user's tasks.
pub struct ViewMineCommand;

fn optional(answer: String) -> Option<String> {
    (!answer.is_empty()).then_some(answer)
}

impl ViewMineCommand {
    fn run(&self, ctx: &mut ShellContext) -> anyhow::Result<CommandResult> {
        let (listing, indices) = {
            let mine = ctx.app.my_tasks()?;
            let listing = mine
                .iter()
                .enumerate()
                .map(|(i, (_, task))| OwnTaskCard { number: i + 1, task: *task }.to_string())
                .collect::<Vec<_>>();
            let indices: Vec<(usize, bool)> =
                mine.iter().map(|(idx, task)| (*idx, task.completed)).collect();
            (listing, indices)
        };

        ctx.prompt.say("Viewing your tasks:");
        if listing.is_empty() {
            ctx.prompt.say("You have no tasks assigned.");
        } else {
            ctx.prompt.say(&listing.join("\n\n"));
        }

        let choice = ctx.ask(
            "Enter the task number to edit or mark as complete, or '-1' to return to the main menu: ",
        )?;
        if choice == "-1" {
            return Ok(CommandResult::ok());
        }

        let (index, completed) = match choice.parse::<usize>() {
            Ok(n) if (1..=indices.len()).contains(&n) => indices[n - 1],
            _ => return Ok(CommandResult::error("Invalid task number.")),
        };
        if completed {
            return Err(Error::AlreadyCompleted.into());
        }

        let action = ctx
            .ask("Enter 'complete' to mark the task as complete or 'edit' to edit the task: ")?
            .to_lowercase();

        match action.as_str() {
            "complete" => {
                ctx.app.complete_task(index)?;
                Ok(CommandResult::success("Task marked as completed."))
            }
            "edit" => {
                let edit = TaskEdit {
                    assignee: optional(ctx.ask(
                        "Enter the new username for the task (leave blank to keep current): ",
                    )?),
                    due_date: optional(ctx.ask(
                        "Enter the new due date for the task (YYYY-MM-DD) or leave blank to keep current: ",
                    )?),
                };
                match ctx.app.edit_task(index, edit) {
                    Ok(()) => Ok(CommandResult::success("Task updated successfully.")),
                    Err(e) => Ok(CommandResult::error(format!("{} Task not updated.", e))),
                }
            }
            _ => Ok(CommandResult::error("Invalid option.")),
        }
    }
}

impl Command for ViewMineCommand {
    fn name(&self) -> &str {
        "vm"
    }

    fn aliases(&self) -> &[&str] {
        &["view-mine"]
    }

    fn description(&self) -> &str {
        "View my tasks"
    }

    fn help(&self) -> &str {
        "List the tasks assigned to you, numbered from 1.\n\n\
         Pick a number to act on that task, or -1 to go back. An open task\n\
         can be marked complete, or edited: give a new assignee and/or a new\n\
         due date, leaving either blank to keep it. An edit with any invalid\n\
         value changes nothing."
    }

    fn execute(&self, _args: &[&str], ctx: &mut ShellContext) -> CommandResult {
        CommandResult::from_outcome(self.run(ctx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::App;
    use crate::shell::prompt::ScriptedPrompt;
    use crate::task::parse_date;
    use crate::trie::Trie;
    use std::sync::RwLock;
    use tempfile::TempDir;

    fn setup(dir: &TempDir) -> App {
        let mut app = App::open(dir.path()).unwrap();
        app.login("admin", "password").unwrap();
        app.register("bob", "pw1", "pw1").unwrap();
        let due = parse_date("2099-01-01").unwrap();
        app.add_task("bob", "Theirs", "", due).unwrap();
        app.add_task("admin", "Mine", "", due).unwrap();
        app
    }

    fn run(app: &mut App, answers: &[&str]) -> (CommandResult, ScriptedPrompt) {
        let mut prompt = ScriptedPrompt::new(answers.iter().copied());
        let trie = RwLock::new(Trie::new());
        let result = {
            let mut ctx = ShellContext::new(app, &mut prompt, &trie);
            ViewMineCommand.execute(&[], &mut ctx)
        };
        (result, prompt)
    }

    #[test]
    fn test_complete_own_task() {
        let dir = TempDir::new().unwrap();
        let mut app = setup(&dir);

        let (result, prompt) = run(&mut app, &["1", "complete"]);

        assert!(matches!(result, CommandResult::Success(Some(_))));
        assert!(prompt.transcript().contains("1. Task: Mine"));
        assert!(!prompt.transcript().contains("Theirs"));
        assert!(app.tasks().list_all()[1].completed);
        assert!(!app.tasks().list_all()[0].completed);

        let (result, _) = run(&mut app, &["1"]);
        assert!(matches!(result, CommandResult::Error(msg) if msg.contains("already completed")));
    }

    #[test]
    fn test_edit_own_task() {
        let dir = TempDir::new().unwrap();
        let mut app = setup(&dir);

        let (result, _) = run(&mut app, &["1", "edit", "", "2030-05-05"]);

        assert!(matches!(result, CommandResult::Success(Some(_))));
        let task = &app.tasks().list_all()[1];
        assert_eq!(task.username, "admin");
        assert_eq!(task.due_date, parse_date("2030-05-05").unwrap());
    }

    #[test]
    fn test_rejected_edit_changes_nothing() {
        let dir = TempDir::new().unwrap();
        let mut app = setup(&dir);

        let (result, _) = run(&mut app, &["1", "edit", "bob", "soon"]);

        assert!(matches!(result, CommandResult::Error(msg) if msg.contains("Task not updated")));
        assert_eq!(app.tasks().list_all()[1].username, "admin");
    }

    #[test]
    fn test_invalid_selection() {
        let dir = TempDir::new().unwrap();
        let mut app = setup(&dir);

        let (result, _) = run(&mut app, &["2"]);
        assert!(matches!(result, CommandResult::Error(msg) if msg == "Invalid task number."));

        let (result, _) = run(&mut app, &["-1"]);
        assert!(matches!(result, CommandResult::Success(None)));

        let (result, _) = run(&mut app, &["1", "delete"]);
        assert!(matches!(result, CommandResult::Error(msg) if msg == "Invalid option."));
    }
}

//! Register command implementation.

use crate::error::Error;
use crate::shell::command::{Command, CommandResult, ShellContext};

/// Command to register a new user.
pub struct RegisterCommand;

impl RegisterCommand {
    fn run(&self, ctx: &mut ShellContext) -> anyhow::Result<CommandResult> {
        let username = ctx.ask("New Username: ")?;
        if ctx.app.users().contains(&username) {
            return Err(Error::UsernameTaken(username).into());
        }

        let password = ctx.prompt.read_secret("New Password: ")?;
        let confirm = ctx.prompt.read_secret("Confirm Password: ")?;

        if let Err(e) = ctx.app.register(&username, &password, &confirm) {
            return Ok(CommandResult::error(format!(
                "{} User registration failed.",
                e
            )));
        }

        if let Ok(mut trie) = ctx.user_trie.write() {
            trie.insert(&username);
        }
        Ok(CommandResult::success("User registration successful."))
    }
}

impl Command for RegisterCommand {
    fn name(&self) -> &str {
        "r"
    }

    fn aliases(&self) -> &[&str] {
        &["register"]
    }

    fn description(&self) -> &str {
        "Register a user"
    }

    fn help(&self) -> &str {
        "Register a new user.\n\n\
         Prompts for a username, which must not exist yet, then for the\n\
         password twice. The user file is updated immediately."
    }

    fn execute(&self, _args: &[&str], ctx: &mut ShellContext) -> CommandResult {
        CommandResult::from_outcome(self.run(ctx))
    }
}

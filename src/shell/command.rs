//! Command trait and registry for the shell.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, RwLock};

use crate::app::App;
use crate::shell::prompt::Prompt;
use crate::trie::Trie;

/// Result of executing a command.
#[derive(Debug, Clone)]
pub enum CommandResult {
    /// Command executed successfully with optional message.
    Success(Option<String>),
    /// Command failed with error message.
    Error(String),
    /// Signal to exit the shell.
    Exit,
}

impl CommandResult {
    pub fn success(msg: impl Into<String>) -> Self {
        CommandResult::Success(Some(msg.into()))
    }

    pub fn ok() -> Self {
        CommandResult::Success(None)
    }

    pub fn error(msg: impl Into<String>) -> Self {
        CommandResult::Error(msg.into())
    }

    /// Folds a fallible command body into a result; errors become messages.
    pub fn from_outcome(outcome: anyhow::Result<CommandResult>) -> Self {
        outcome.unwrap_or_else(|e| CommandResult::error(e.to_string()))
    }
}

/// Context available to commands during execution.
pub struct ShellContext<'a> {
    /// The application state.
    pub app: &'a mut App,
    /// Where follow-up questions are asked and intermediate output goes.
    pub prompt: &'a mut dyn Prompt,
    /// Reference to the command registry for the help command.
    pub registry: Option<&'a CommandRegistry>,
    /// Usernames offered for completion; updated on registration.
    pub user_trie: &'a RwLock<Trie>,
}

impl<'a> ShellContext<'a> {
    pub fn new(app: &'a mut App, prompt: &'a mut dyn Prompt, user_trie: &'a RwLock<Trie>) -> Self {
        Self {
            app,
            prompt,
            registry: None,
            user_trie,
        }
    }

    pub fn with_registry(mut self, registry: &'a CommandRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Asks a question and returns the answer without surrounding whitespace.
    pub fn ask(&mut self, question: &str) -> anyhow::Result<String> {
        Ok(self.prompt.read_line(question)?.trim().to_string())
    }
}

/// A menu command.
pub trait Command: Send + Sync {
    /// The menu code, e.g. `va`.
    fn name(&self) -> &str;

    fn aliases(&self) -> &[&str] {
        &[]
    }

    /// One-line description shown in the menu.
    fn description(&self) -> &str;

    fn usage(&self) -> &str {
        self.name()
    }

    /// Detailed help text.
    fn help(&self) -> &str {
        self.description()
    }

    fn execute(&self, args: &[&str], ctx: &mut ShellContext) -> CommandResult;

    fn max_args(&self) -> usize {
        0
    }
}

impl fmt::Debug for dyn Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name())
            .field("description", &self.description())
            .finish()
    }
}

/// Registry of all available commands.
pub struct CommandRegistry {
    commands: HashMap<String, Arc<dyn Command>>,
    /// Primary names in registration (menu) order.
    order: Vec<String>,
    /// Alias to primary name mapping.
    aliases: HashMap<String, String>,
    /// Trie for command name completion.
    command_trie: Trie,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self {
            commands: HashMap::new(),
            order: Vec::new(),
            aliases: HashMap::new(),
            command_trie: Trie::new(),
        }
    }

    pub fn register(&mut self, command: Arc<dyn Command>) {
        let name = command.name().to_string();

        self.command_trie.insert(&name);
        for alias in command.aliases() {
            self.aliases.insert(alias.to_string(), name.clone());
            self.command_trie.insert(alias);
        }

        if !self.commands.contains_key(&name) {
            self.order.push(name.clone());
        }
        self.commands.insert(name, command);
    }

    /// Looks up a command by name or alias, ignoring case.
    pub fn get(&self, name: &str) -> Option<Arc<dyn Command>> {
        let name = name.to_lowercase();
        if let Some(cmd) = self.commands.get(&name) {
            return Some(Arc::clone(cmd));
        }
        let primary = self.aliases.get(&name)?;
        self.commands.get(primary).map(Arc::clone)
    }

    /// Commands in menu order.
    pub fn commands(&self) -> impl Iterator<Item = &Arc<dyn Command>> {
        self.order.iter().filter_map(|name| self.commands.get(name))
    }

    /// Command names and aliases starting with `prefix`.
    pub fn completions(&self, prefix: &str) -> Vec<String> {
        self.command_trie.completions(prefix)
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestCommand;

    impl Command for TestCommand {
        fn name(&self) -> &str {
            "t"
        }

        fn aliases(&self) -> &[&str] {
            &["test", "tst"]
        }

        fn description(&self) -> &str {
            "A test command"
        }

        fn execute(&self, _args: &[&str], _ctx: &mut ShellContext) -> CommandResult {
            CommandResult::ok()
        }
    }

    struct OtherCommand;

    impl Command for OtherCommand {
        fn name(&self) -> &str {
            "o"
        }

        fn description(&self) -> &str {
            "Another command"
        }

        fn execute(&self, _args: &[&str], _ctx: &mut ShellContext) -> CommandResult {
            CommandResult::Exit
        }
    }

    #[test]
    fn test_registry_register_and_get() {
        let mut registry = CommandRegistry::new();
        registry.register(Arc::new(TestCommand));

        assert!(registry.get("t").is_some());
        assert!(registry.get("TEST").is_some());
        assert!(registry.get("tst").is_some());
        assert!(registry.get("unknown").is_none());
    }

    #[test]
    fn test_registry_keeps_menu_order() {
        let mut registry = CommandRegistry::new();
        registry.register(Arc::new(TestCommand));
        registry.register(Arc::new(OtherCommand));

        let names: Vec<&str> = registry.commands().map(|c| c.name()).collect();
        assert_eq!(names, vec!["t", "o"]);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_registry_completions() {
        let mut registry = CommandRegistry::new();
        registry.register(Arc::new(TestCommand));

        assert_eq!(registry.completions("te"), vec!["test"]);
        assert_eq!(registry.completions("t"), vec!["t", "test", "tst"]);
    }

    #[test]
    fn test_from_outcome() {
        let failed = CommandResult::from_outcome(Err(anyhow::anyhow!("boom")));
        assert!(matches!(failed, CommandResult::Error(msg) if msg == "boom"));

        let ok = CommandResult::from_outcome(Ok(CommandResult::ok()));
        assert!(matches!(ok, CommandResult::Success(None)));
    }
}

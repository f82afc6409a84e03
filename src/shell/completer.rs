//! Trie-based tab completion.
//!
//! The menu line completes command codes (and command names after `help`);
//! follow-up prompts complete usernames.

use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Helper};
use std::sync::{Arc, RwLock};

use crate::shell::command::CommandRegistry;
use crate::trie::Trie;

fn pairs(words: Vec<String>) -> Vec<Pair> {
    words
        .into_iter()
        .map(|s| Pair {
            display: s.clone(),
            replacement: s,
        })
        .collect()
}

/// Completer for the main menu line.
pub struct MenuCompleter {
    registry: Arc<CommandRegistry>,
}

/// What the cursor is positioned on.
#[derive(Debug, PartialEq, Eq)]
enum CompletionContext<'a> {
    Command { partial: &'a str },
    Argument { command: &'a str, partial: &'a str },
}

impl MenuCompleter {
    pub fn new(registry: Arc<CommandRegistry>) -> Self {
        Self { registry }
    }

    fn complete_command(&self, partial: &str) -> Vec<Pair> {
        pairs(self.registry.completions(&partial.to_lowercase()))
    }

    fn parse_context<'a>(&self, line: &'a str, pos: usize) -> CompletionContext<'a> {
        let line_to_pos = &line[..pos];
        let parts: Vec<&str> = line_to_pos.split_whitespace().collect();
        let ends_with_space = line_to_pos.ends_with(' ');

        match parts.as_slice() {
            [] => CompletionContext::Command { partial: "" },
            [command] if !ends_with_space => CompletionContext::Command { partial: *command },
            [command, ..] => CompletionContext::Argument {
                command: *command,
                partial: if ends_with_space {
                    ""
                } else {
                    parts.last().copied().unwrap_or("")
                },
            },
        }
    }
}

impl Completer for MenuCompleter {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        match self.parse_context(line, pos) {
            CompletionContext::Command { partial } => {
                Ok((pos - partial.len(), self.complete_command(partial)))
            }
            CompletionContext::Argument { command, partial } => {
                let takes_command = self
                    .registry
                    .get(command)
                    .is_some_and(|cmd| cmd.name() == "help");
                let completions = if takes_command {
                    self.complete_command(partial)
                } else {
                    vec![]
                };
                Ok((pos - partial.len(), completions))
            }
        }
    }
}

/// Rustyline helper for follow-up prompts: completes known usernames.
pub struct UsernameHelper {
    user_trie: Arc<RwLock<Trie>>,
}

impl UsernameHelper {
    pub fn new(user_trie: Arc<RwLock<Trie>>) -> Self {
        Self { user_trie }
    }

    fn complete_username(&self, partial: &str) -> Vec<Pair> {
        match self.user_trie.read() {
            Ok(trie) => pairs(trie.completions(partial)),
            Err(_) => vec![],
        }
    }
}

impl Completer for UsernameHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let partial = line[..pos].trim_start();
        Ok((pos - partial.len(), self.complete_username(partial)))
    }
}

impl Hinter for UsernameHelper {
    type Hint = String;
}

impl Highlighter for UsernameHelper {}

impl Validator for UsernameHelper {}

impl Helper for UsernameHelper {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::commands::register_all;

    fn setup_completer() -> MenuCompleter {
        let mut registry = CommandRegistry::new();
        register_all(&mut registry);
        MenuCompleter::new(Arc::new(registry))
    }

    #[test]
    fn test_complete_command_partial() {
        let completer = setup_completer();
        let displays: Vec<String> = completer
            .complete_command("v")
            .into_iter()
            .map(|p| p.display)
            .collect();

        assert!(displays.contains(&"va".to_string()));
        assert!(displays.contains(&"vm".to_string()));
        assert!(displays.contains(&"view-all".to_string()));
    }

    #[test]
    fn test_parse_context() {
        let completer = setup_completer();

        assert_eq!(
            completer.parse_context("v", 1),
            CompletionContext::Command { partial: "v" }
        );
        assert_eq!(
            completer.parse_context("", 0),
            CompletionContext::Command { partial: "" }
        );
        assert_eq!(
            completer.parse_context("help g", 6),
            CompletionContext::Argument {
                command: "help",
                partial: "g"
            }
        );
        assert_eq!(
            completer.parse_context("help ", 5),
            CompletionContext::Argument {
                command: "help",
                partial: ""
            }
        );
    }

    #[test]
    fn test_complete_username() {
        let mut trie = Trie::new();
        trie.insert("admin");
        trie.insert("adam");
        trie.insert("bob");
        let helper = UsernameHelper::new(Arc::new(RwLock::new(trie)));

        let displays: Vec<String> = helper
            .complete_username("ad")
            .into_iter()
            .map(|p| p.display)
            .collect();
        assert_eq!(displays, vec!["adam", "admin"]);
    }
}

//! Shell module - rustyline-based interactive menu.
//!
//! This module provides:
//! - The login loop
//! - The menu loop with completion, highlighting, hints and history
//! - The menu commands (see [`commands`])

pub mod command;
pub mod commands;
pub mod completer;
pub mod highlighter;
pub mod hints;
pub mod history;
pub mod prompt;

use anyhow::Result;
use rustyline::completion::Completer;
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::FileHistory;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};
use std::borrow::Cow;
use std::sync::{Arc, RwLock};

use crate::app::App;
use crate::logging::timed;
use crate::trie::Trie;
use crate::users::UserStore;

use command::{CommandRegistry, CommandResult, ShellContext};
use commands::{register_all, render_menu};
use completer::MenuCompleter;
use highlighter::{MenuHighlighter, OutputHighlighter};
use hints::MenuHinter;
use history::HistoryConfig;
use prompt::{Prompt, is_cancelled};

/// The prompt displayed on the menu line.
const PROMPT: &str = "taskmgr> ";

/// Combined rustyline helper for the menu line.
pub struct MenuHelper {
    completer: MenuCompleter,
    highlighter: MenuHighlighter,
    hinter: MenuHinter,
}

impl MenuHelper {
    pub fn new(registry: Arc<CommandRegistry>) -> Self {
        Self {
            completer: MenuCompleter::new(Arc::clone(&registry)),
            highlighter: MenuHighlighter::new(Arc::clone(&registry)),
            hinter: MenuHinter::new(registry),
        }
    }
}

impl Completer for MenuHelper {
    type Candidate = rustyline::completion::Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Self::Candidate>)> {
        self.completer.complete(line, pos, ctx)
    }
}

impl Highlighter for MenuHelper {
    fn highlight<'l>(&self, line: &'l str, pos: usize) -> Cow<'l, str> {
        self.highlighter.highlight(line, pos)
    }

    fn highlight_prompt<'b, 's: 'b, 'p: 'b>(
        &'s self,
        prompt: &'p str,
        default: bool,
    ) -> Cow<'b, str> {
        self.highlighter.highlight_prompt(prompt, default)
    }

    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        self.highlighter.highlight_hint(hint)
    }

    fn highlight_candidate<'c>(
        &self,
        candidate: &'c str,
        completion: rustyline::CompletionType,
    ) -> Cow<'c, str> {
        self.highlighter.highlight_candidate(candidate, completion)
    }

    fn highlight_char(&self, line: &str, pos: usize, kind: rustyline::highlight::CmdKind) -> bool {
        self.highlighter.highlight_char(line, pos, kind)
    }
}

impl Hinter for MenuHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, ctx: &Context<'_>) -> Option<Self::Hint> {
        self.hinter.hint(line, pos, ctx)
    }
}

impl Validator for MenuHelper {}

impl Helper for MenuHelper {}

/// Configuration for the shell.
pub struct ShellConfig {
    pub history: HistoryConfig,
    /// Whether to print the menu when the shell starts.
    pub show_menu: bool,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            history: HistoryConfig::default(),
            show_menu: true,
        }
    }
}

/// The interactive shell.
pub struct Shell {
    registry: Arc<CommandRegistry>,
    /// Known usernames, shared with the follow-up prompt's completer.
    user_trie: Arc<RwLock<Trie>>,
    config: ShellConfig,
}

impl Shell {
    pub fn new() -> Self {
        Self::with_config(ShellConfig::default())
    }

    pub fn with_config(config: ShellConfig) -> Self {
        let mut registry = CommandRegistry::new();
        register_all(&mut registry);

        Self {
            registry: Arc::new(registry),
            user_trie: Arc::new(RwLock::new(Trie::new())),
            config,
        }
    }

    /// Shared username trie, for wiring up a [`prompt::TerminalPrompt`].
    pub fn user_trie(&self) -> Arc<RwLock<Trie>> {
        Arc::clone(&self.user_trie)
    }

    fn init_user_trie(&self, users: &UserStore) {
        if let Ok(mut trie) = self.user_trie.write() {
            trie.clear();
            for name in users.usernames() {
                trie.insert(name);
            }
            log::debug!("Initialized user trie with {} entries", trie.len());
        }
    }

    /// Asks for credentials until a login succeeds.
    ///
    /// Returns `false` if input ends before anyone logs in.
    pub fn login(&self, app: &mut App, prompt: &mut dyn Prompt) -> Result<bool> {
        self.init_user_trie(app.users());

        loop {
            prompt.say("LOGIN");
            let username = match prompt.read_line("Username: ") {
                Ok(line) => line,
                Err(e) if is_cancelled(&e) => continue,
                Err(_) => return Ok(false),
            };
            let password = match prompt.read_secret("Password: ") {
                Ok(line) => line,
                Err(e) if is_cancelled(&e) => continue,
                Err(_) => return Ok(false),
            };

            match app.login(username.trim(), &password) {
                Ok(()) => {
                    prompt.say(&OutputHighlighter::success("Login Successful!"));
                    return Ok(true);
                }
                Err(_) => {
                    prompt.say(&OutputHighlighter::error("Invalid username or password."));
                }
            }
        }
    }

    /// Runs the menu loop until the user exits.
    pub fn run(&self, app: &mut App, prompt: &mut dyn Prompt) -> Result<()> {
        let helper = MenuHelper::new(Arc::clone(&self.registry));
        let mut editor: Editor<MenuHelper, FileHistory> = Editor::new()?;
        editor.set_helper(Some(helper));
        self.config.history.load_into(&mut editor)?;

        if self.config.show_menu {
            println!("{}", render_menu(&self.registry));
        }

        log::info!("Shell started");

        loop {
            match editor.readline(PROMPT) {
                Ok(line) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }
                    let _ = editor.add_history_entry(line);

                    match self.execute_line(line, app, prompt) {
                        CommandResult::Success(Some(msg)) => println!("{}", msg),
                        CommandResult::Success(None) => {}
                        CommandResult::Error(msg) => {
                            eprintln!("{}", OutputHighlighter::error(&msg));
                        }
                        CommandResult::Exit => break,
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    log::debug!("Interrupted (Ctrl-C)");
                }
                Err(ReadlineError::Eof) => {
                    println!("e");
                    log::info!("EOF received (Ctrl-D)");
                    // Input is gone, so leave even if the save failed.
                    if let CommandResult::Error(msg) = self.execute_line("e", app, prompt) {
                        eprintln!("{}", OutputHighlighter::error(&msg));
                    }
                    break;
                }
                Err(err) => {
                    eprintln!("{}", OutputHighlighter::error(&format!("Error: {}", err)));
                    log::error!("Readline error: {}", err);
                    break;
                }
            }
        }

        if let Err(e) = self.config.history.save_from(&mut editor) {
            log::warn!("Failed to save history: {}", e);
        }

        log::info!("Shell exited");
        Ok(())
    }

    /// Parses and executes one menu line.
    pub fn execute_line(&self, line: &str, app: &mut App, prompt: &mut dyn Prompt) -> CommandResult {
        let mut parts = line.split_whitespace();
        let Some(cmd_name) = parts.next() else {
            return CommandResult::ok();
        };
        let args: Vec<&str> = parts.collect();

        log::debug!("Executing command: {} with args: {:?}", cmd_name, args);

        let Some(cmd) = self.registry.get(cmd_name) else {
            return CommandResult::error(format!(
                "Invalid option '{}'. Type 'help' to see available options.",
                cmd_name
            ));
        };
        if args.len() > cmd.max_args() {
            return CommandResult::error(format!("Usage: {}", cmd.usage()));
        }

        let mut ctx =
            ShellContext::new(app, prompt, &self.user_trie).with_registry(&self.registry);
        timed(&format!("Command '{}'", cmd.name()), || {
            cmd.execute(&args, &mut ctx)
        })
    }
}

impl Default for Shell {
    fn default() -> Self {
        Self::new()
    }
}

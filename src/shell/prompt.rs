//! Follow-up questions asked by commands.
//!
//! The terminal implementation uses a second rustyline editor with username
//! completion and reads passwords without echo. [`ScriptedPrompt`] replays
//! canned answers and captures output, for driving the shell in tests.

use anyhow::Result;
use rustyline::Editor;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use std::collections::VecDeque;
use std::sync::{Arc, RwLock};
use thiserror::Error;

use crate::shell::completer::UsernameHelper;
use crate::trie::Trie;

/// Why a prompt produced no answer.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptError {
    /// The user pressed Ctrl-C; the question may be asked again.
    #[error("Cancelled.")]
    Cancelled,
    /// Input ended (Ctrl-D or a closed stdin).
    #[error("Input closed.")]
    Closed,
}

/// True when `err` is a [`PromptError::Cancelled`].
pub fn is_cancelled(err: &anyhow::Error) -> bool {
    err.downcast_ref::<PromptError>() == Some(&PromptError::Cancelled)
}

/// Source of answers and sink for intermediate output.
pub trait Prompt {
    /// Reads one line of input after showing `prompt`.
    fn read_line(&mut self, prompt: &str) -> Result<String>;

    /// Reads a line without echoing it.
    fn read_secret(&mut self, prompt: &str) -> Result<String>;

    /// Shows text to the user.
    fn say(&mut self, text: &str);
}

/// Interactive prompt on the controlling terminal.
pub struct TerminalPrompt {
    editor: Editor<UsernameHelper, DefaultHistory>,
}

impl TerminalPrompt {
    pub fn new(user_trie: Arc<RwLock<Trie>>) -> Result<Self> {
        let mut editor: Editor<UsernameHelper, DefaultHistory> = Editor::new()?;
        editor.set_helper(Some(UsernameHelper::new(user_trie)));
        Ok(Self { editor })
    }
}

impl Prompt for TerminalPrompt {
    fn read_line(&mut self, prompt: &str) -> Result<String> {
        match self.editor.readline(prompt) {
            Ok(line) => Ok(line),
            Err(ReadlineError::Interrupted) => Err(PromptError::Cancelled.into()),
            Err(ReadlineError::Eof) => Err(PromptError::Closed.into()),
            Err(e) => Err(e.into()),
        }
    }

    fn read_secret(&mut self, prompt: &str) -> Result<String> {
        Ok(rpassword::prompt_password(prompt)?)
    }

    fn say(&mut self, text: &str) {
        println!("{}", text);
    }
}

/// Replays a fixed list of answers.
#[derive(Debug, Default)]
pub struct ScriptedPrompt {
    /// `None` stands for a cancelled question.
    answers: VecDeque<Option<String>>,
    /// Questions asked so far, in order.
    pub asked: Vec<String>,
    /// Text passed to [`Prompt::say`], in order.
    pub output: Vec<String>,
}

impl ScriptedPrompt {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(|a| Some(a.into())).collect(),
            ..Default::default()
        }
    }

    /// Makes the next question come back cancelled, as after Ctrl-C.
    pub fn cancel_first(mut self) -> Self {
        self.answers.push_front(None);
        self
    }

    /// All captured output joined by newlines.
    pub fn transcript(&self) -> String {
        self.output.join("\n")
    }

    pub fn remaining(&self) -> usize {
        self.answers.len()
    }
}

impl Prompt for ScriptedPrompt {
    fn read_line(&mut self, prompt: &str) -> Result<String> {
        self.asked.push(prompt.to_string());
        match self.answers.pop_front() {
            Some(Some(answer)) => Ok(answer),
            Some(None) => Err(PromptError::Cancelled.into()),
            None => Err(PromptError::Closed.into()),
        }
    }

    fn read_secret(&mut self, prompt: &str) -> Result<String> {
        self.read_line(prompt)
    }

    fn say(&mut self, text: &str) {
        self.output.push(text.to_string());
    }
}

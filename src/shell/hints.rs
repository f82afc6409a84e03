//! Inline hints on the menu line.

use rustyline::Context;
use rustyline::hint::Hinter;
use std::sync::Arc;

use crate::shell::command::CommandRegistry;

/// Suggests the rest of a command code, or describes a complete one.
pub struct MenuHinter {
    registry: Arc<CommandRegistry>,
}

impl MenuHinter {
    pub fn new(registry: Arc<CommandRegistry>) -> Self {
        Self { registry }
    }

    fn get_hint(&self, line: &str) -> Option<String> {
        if line.ends_with(' ') {
            return None;
        }
        let mut parts = line.split_whitespace();
        let typed = parts.next()?;
        if parts.next().is_some() {
            return None;
        }

        if let Some(cmd) = self.registry.get(typed) {
            return Some(format!("  {}", cmd.description()));
        }

        let lowered = typed.to_lowercase();
        match self.registry.completions(&lowered).as_slice() {
            [only] => only.strip_prefix(lowered.as_str()).map(str::to_string),
            _ => None,
        }
    }
}

impl Hinter for MenuHinter {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<Self::Hint> {
        if pos < line.len() {
            return None;
        }
        self.get_hint(line)
    }
}

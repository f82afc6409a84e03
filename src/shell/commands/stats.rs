//! Display-statistics command implementation.

use std::io;

use crate::error::Error;
use crate::report::ReportKind;
use crate::shell::command::{Command, CommandResult, ShellContext};
use crate::shell::highlighter::OutputHighlighter;

/// Command to show the report files. Restricted to `admin`.
pub struct StatsCommand;

/// Message shown in place of a report that could not be read.
fn unreadable(kind: ReportKind, err: &Error) -> String {
    match err {
        Error::Io { source, .. } if source.kind() == io::ErrorKind::NotFound => {
            format!("{} file not found.", kind.title())
        }
        _ => format!("Could not read {}: {}", kind.title(), err),
    }
}

impl StatsCommand {
    fn run(&self, ctx: &mut ShellContext) -> anyhow::Result<CommandResult> {
        let stats = ctx.app.statistics()?;

        let mut sections = Vec::new();
        if stats.generated {
            sections.push("Reports generated successfully!".to_string());
        }
        for (kind, content) in stats.sections {
            match content {
                Ok(text) => sections.push(format!(
                    "{}\n{}",
                    OutputHighlighter::heading(&format!("{}:", kind.title())),
                    text.trim_end()
                )),
                Err(e) => {
                    log::warn!("Could not read {}: {}", kind.file_name(), e);
                    sections.push(OutputHighlighter::warning(&unreadable(kind, &e)));
                }
            }
        }

        Ok(CommandResult::success(sections.join("\n\n")))
    }
}

impl Command for StatsCommand {
    fn name(&self) -> &str {
        "ds"
    }

    fn aliases(&self) -> &[&str] {
        &["stats", "statistics"]
    }

    fn description(&self) -> &str {
        "Display statistics"
    }

    fn help(&self) -> &str {
        "Show the task and user overview reports (admin only).\n\n\
         The reports are generated first if they do not exist yet."
    }

    fn execute(&self, _args: &[&str], ctx: &mut ShellContext) -> CommandResult {
        CommandResult::from_outcome(self.run(ctx))
    }
}

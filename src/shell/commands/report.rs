//! Generate-reports command implementation.

use crate::shell::command::{Command, CommandResult, ShellContext};

/// Command to regenerate the overview report files.
pub struct ReportCommand;

impl Command for ReportCommand {
    fn name(&self) -> &str {
        "gr"
    }

    fn aliases(&self) -> &[&str] {
        &["report", "generate"]
    }

    fn description(&self) -> &str {
        "Generate reports"
    }

    fn help(&self) -> &str {
        "Write task_overview.txt and user_overview.txt to the data directory,\n\
         replacing any earlier reports."
    }

    fn execute(&self, _args: &[&str], ctx: &mut ShellContext) -> CommandResult {
        match ctx.app.generate_reports() {
            Ok(paths) => {
                for path in &paths {
                    log::debug!("Report written: {}", path.display());
                }
                CommandResult::success("Reports generated successfully!")
            }
            Err(e) => {
                log::error!("Failed to generate reports: {}", e);
                CommandResult::error(e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::App;
    use crate::report::reports_missing;
    use crate::shell::prompt::ScriptedPrompt;
    use crate::trie::Trie;
    use std::sync::RwLock;
    use tempfile::TempDir;

    #[test]
    fn test_report_command_writes_files() {
        let dir = TempDir::new().unwrap();
        let mut app = App::open(dir.path()).unwrap();
        let mut prompt = ScriptedPrompt::default();
        let trie = RwLock::new(Trie::new());
        let mut ctx = ShellContext::new(&mut app, &mut prompt, &trie);

        assert!(reports_missing(dir.path()));
        let result = ReportCommand.execute(&[], &mut ctx);

        assert!(matches!(result, CommandResult::Success(Some(_))));
        assert!(!reports_missing(dir.path()));
    }
}

//! Aggregate statistics over users and tasks, and the two report files.

use chrono::NaiveDate;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::task::Task;
use crate::users::UserStore;

/// The two generated report files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    TaskOverview,
    UserOverview,
}

impl ReportKind {
    pub const ALL: [ReportKind; 2] = [ReportKind::TaskOverview, ReportKind::UserOverview];

    pub fn file_name(self) -> &'static str {
        match self {
            ReportKind::TaskOverview => "task_overview.txt",
            ReportKind::UserOverview => "user_overview.txt",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            ReportKind::TaskOverview => "Task Overview",
            ReportKind::UserOverview => "User Overview",
        }
    }

    pub fn path_in(self, dir: &Path) -> PathBuf {
        dir.join(self.file_name())
    }
}

fn percent(part: usize, whole: usize) -> f64 {
    part as f64 / whole as f64 * 100.0
}

/// Counts for a set of tasks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskCounts {
    pub total: usize,
    pub completed: usize,
    pub overdue: usize,
}

impl TaskCounts {
    pub fn tally<'a>(tasks: impl IntoIterator<Item = &'a Task>, today: NaiveDate) -> Self {
        tasks.into_iter().fold(Self::default(), |mut acc, task| {
            acc.total += 1;
            if task.completed {
                acc.completed += 1;
            } else if task.due_date < today {
                acc.overdue += 1;
            }
            acc
        })
    }

    pub fn uncompleted(&self) -> usize {
        self.total - self.completed
    }

    /// `None` when there are no tasks.
    pub fn percentage_completed(&self) -> Option<f64> {
        (self.total > 0).then(|| percent(self.completed, self.total))
    }

    pub fn percentage_incomplete(&self) -> Option<f64> {
        (self.total > 0).then(|| percent(self.uncompleted(), self.total))
    }

    pub fn percentage_overdue(&self) -> Option<f64> {
        (self.total > 0).then(|| percent(self.overdue, self.total))
    }
}

/// Per-user slice of the statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct UserSummary {
    pub username: String,
    pub counts: TaskCounts,
    /// Share of all tasks held by this user; `None` when they hold none.
    pub share: Option<f64>,
}

/// Statistics as of a given day.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub total_users: usize,
    pub tasks: TaskCounts,
    pub users: Vec<UserSummary>,
}

impl Report {
    pub fn compute(users: &UserStore, tasks: &[Task], today: NaiveDate) -> Self {
        let overall = TaskCounts::tally(tasks, today);

        let summaries = users
            .usernames()
            .map(|username| {
                let counts =
                    TaskCounts::tally(tasks.iter().filter(|t| t.username == username), today);
                UserSummary {
                    username: username.to_string(),
                    share: (counts.total > 0).then(|| percent(counts.total, overall.total)),
                    counts,
                }
            })
            .collect();

        Self {
            total_users: users.len(),
            tasks: overall,
            users: summaries,
        }
    }

    pub fn render_task_overview(&self) -> String {
        let t = &self.tasks;
        let mut out = String::new();
        let _ = writeln!(out, "Total tasks: {}", t.total);
        let _ = writeln!(out, "Completed tasks: {}", t.completed);
        let _ = writeln!(out, "Uncompleted tasks: {}", t.uncompleted());

        if let (Some(incomplete), Some(overdue)) =
            (t.percentage_incomplete(), t.percentage_overdue())
        {
            let _ = writeln!(out, "Overdue tasks: {}", t.overdue);
            let _ = writeln!(out, "Percentage of incomplete tasks: {:.2}%", incomplete);
            let _ = writeln!(out, "Percentage of overdue tasks: {:.2}%", overdue);
        }
        out
    }

    pub fn render_user_overview(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Total users: {}", self.total_users);
        let _ = writeln!(out, "Total tasks: {}", self.tasks.total);

        for user in &self.users {
            let c = &user.counts;
            let _ = writeln!(out, "\nUser: {}", user.username);
            let _ = writeln!(out, "Total tasks assigned: {}", c.total);

            if let (Some(share), Some(done), Some(open), Some(late)) = (
                user.share,
                c.percentage_completed(),
                c.percentage_incomplete(),
                c.percentage_overdue(),
            ) {
                let _ = writeln!(out, "Percentage of tasks assigned: {:.2}%", share);
                let _ = writeln!(out, "Percentage of completed tasks: {:.2}%", done);
                let _ = writeln!(out, "Percentage of uncompleted tasks: {:.2}%", open);
                let _ = writeln!(out, "Percentage of overdue tasks: {:.2}%", late);
            }
        }
        out
    }

    pub fn render(&self, kind: ReportKind) -> String {
        match kind {
            ReportKind::TaskOverview => self.render_task_overview(),
            ReportKind::UserOverview => self.render_user_overview(),
        }
    }

    /// Writes both report files into `dir`, replacing any previous run.
    pub fn write_to(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        ReportKind::ALL
            .iter()
            .map(|&kind| {
                let path = kind.path_in(dir);
                fs::write(&path, self.render(kind)).map_err(|e| Error::io(&path, e))?;
                log::debug!("Wrote {}", path.display());
                Ok(path)
            })
            .collect()
    }
}

/// True when either report file is absent from `dir`.
pub fn reports_missing(dir: &Path) -> bool {
    ReportKind::ALL.iter().any(|k| !k.path_in(dir).exists())
}

/// Reads one report back verbatim.
pub fn read_report(dir: &Path, kind: ReportKind) -> Result<String> {
    let path = kind.path_in(dir);
    fs::read_to_string(&path).map_err(|e| Error::io(&path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::DATE_FORMAT;
    use tempfile::TempDir;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, DATE_FORMAT).unwrap()
    }

    fn task(user: &str, due: &str, completed: bool) -> Task {
        let mut t = Task::new(user, "t", "d", date(due), date("2024-01-01")).unwrap();
        t.completed = completed;
        t
    }

    fn users(dir: &TempDir, content: &str) -> UserStore {
        let path = dir.path().join("user.txt");
        fs::write(&path, content).unwrap();
        UserStore::load(path).unwrap()
    }

    #[test]
    fn test_tally() {
        let today = date("2024-06-10");
        let tasks = vec![
            task("bob", "2024-06-01", false),
            task("bob", "2024-06-01", true),
            task("bob", "2024-06-10", false),
            task("bob", "2099-01-01", false),
        ];

        let counts = TaskCounts::tally(&tasks, today);
        assert_eq!(counts.total, 4);
        assert_eq!(counts.completed, 1);
        assert_eq!(counts.uncompleted(), 3);
        assert_eq!(counts.overdue, 1);
        assert_eq!(counts.percentage_incomplete(), Some(75.0));
        assert_eq!(counts.percentage_overdue(), Some(25.0));

        let sum = counts.percentage_incomplete().unwrap() + counts.percentage_completed().unwrap();
        assert!((sum - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_task_overview_has_no_percentages() {
        let dir = TempDir::new().unwrap();
        let report = Report::compute(&users(&dir, "admin;password"), &[], date("2024-01-01"));

        assert_eq!(
            report.render_task_overview(),
            "Total tasks: 0\nCompleted tasks: 0\nUncompleted tasks: 0\n"
        );
        assert!(!report.render_user_overview().contains('%'));
    }

    #[test]
    fn test_user_overview() {
        let dir = TempDir::new().unwrap();
        let store = users(&dir, "admin;password\nbob;pw1\ncarol;pw2");
        let tasks = vec![
            task("bob", "2024-01-05", false),
            task("bob", "2099-01-01", true),
            task("bob", "2099-01-01", false),
            task("admin", "2099-01-01", false),
        ];

        let report = Report::compute(&store, &tasks, date("2024-06-10"));
        let text = report.render_user_overview();

        assert!(text.starts_with("Total users: 3\nTotal tasks: 4\n"));
        assert!(text.contains(
            "\nUser: bob\n\
             Total tasks assigned: 3\n\
             Percentage of tasks assigned: 75.00%\n\
             Percentage of completed tasks: 33.33%\n\
             Percentage of uncompleted tasks: 66.67%\n\
             Percentage of overdue tasks: 33.33%\n"
        ));
        assert!(text.ends_with("\nUser: carol\nTotal tasks assigned: 0\n"));

        let overview = report.render_task_overview();
        assert!(overview.contains("Overdue tasks: 1\n"));
        assert!(overview.contains("Percentage of incomplete tasks: 75.00%\n"));
        assert!(overview.contains("Percentage of overdue tasks: 25.00%\n"));
    }

    #[test]
    fn test_write_and_read_back() {
        let dir = TempDir::new().unwrap();
        let store = users(&dir, "admin;password");
        let report = Report::compute(&store, &[], date("2024-01-01"));

        assert!(reports_missing(dir.path()));
        let written = report.write_to(dir.path()).unwrap();
        assert_eq!(written.len(), 2);
        assert!(!reports_missing(dir.path()));

        let text = read_report(dir.path(), ReportKind::TaskOverview).unwrap();
        assert_eq!(text, report.render_task_overview());
    }

    #[test]
    fn test_read_missing_report() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            read_report(dir.path(), ReportKind::UserOverview),
            Err(Error::Io { .. })
        ));
    }
}

//! Application context: the two stores and the session, owned in one place.
//!
//! Every operation the shell offers goes through [`App`]. Mutations are
//! written through to disk before the call returns.

use chrono::NaiveDate;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::report::{self, Report, ReportKind};
use crate::session::Session;
use crate::task::Task;
use crate::tasks::{TaskEdit, TaskStore};
use crate::users::UserStore;

/// Credential file name inside the data directory.
pub const USER_FILE: &str = "user.txt";
/// Task file name inside the data directory.
pub const TASK_FILE: &str = "tasks.txt";

/// Outcome of a statistics request.
#[derive(Debug)]
pub struct Statistics {
    /// Whether the reports had to be generated first.
    pub generated: bool,
    /// Report contents in display order; a failed read is a soft error.
    pub sections: Vec<(ReportKind, Result<String>)>,
}

#[derive(Debug)]
pub struct App {
    data_dir: PathBuf,
    users: UserStore,
    tasks: TaskStore,
    session: Session,
    fixed_today: Option<NaiveDate>,
}

impl App {
    /// Loads (or creates) the data files in `data_dir`.
    pub fn open(data_dir: impl Into<PathBuf>) -> Result<Self> {
        let data_dir = data_dir.into();
        let users = UserStore::load(data_dir.join(USER_FILE))?;
        let tasks = TaskStore::load(data_dir.join(TASK_FILE))?;

        log::info!(
            "Opened {} with {} users and {} tasks",
            data_dir.display(),
            users.len(),
            tasks.len()
        );

        Ok(Self {
            data_dir,
            users,
            tasks,
            session: Session::new(),
            fixed_today: None,
        })
    }

    /// Pins "today" to a fixed date instead of the local clock.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.fixed_today = Some(today);
        self
    }

    pub fn today(&self) -> NaiveDate {
        self.fixed_today
            .unwrap_or_else(|| chrono::Local::now().date_naive())
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn users(&self) -> &UserStore {
        &self.users
    }

    pub fn tasks(&self) -> &TaskStore {
        &self.tasks
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn current_user(&self) -> Result<&str> {
        self.session.user().ok_or(Error::NotLoggedIn)
    }

    pub fn login(&mut self, username: &str, password: &str) -> Result<()> {
        match self.users.authenticate(username, password) {
            Ok(()) => {
                self.session.begin(username);
                log::info!("User {} logged in", username);
                Ok(())
            }
            Err(e) => {
                log::info!("Login failed for {}: {}", username, e);
                Err(e)
            }
        }
    }

    pub fn register(&mut self, username: &str, password: &str, confirm: &str) -> Result<()> {
        self.current_user()?;
        self.users.register(username, password, confirm)
    }

    pub fn add_task(
        &mut self,
        assignee: &str,
        title: &str,
        description: &str,
        due_date: NaiveDate,
    ) -> Result<&Task> {
        self.current_user()?;
        let today = self.today();
        self.tasks
            .add(&self.users, assignee, title, description, due_date, today)
    }

    /// Tasks assigned to the logged-in user, with their global indices.
    pub fn my_tasks(&self) -> Result<Vec<(usize, &Task)>> {
        let user = self.current_user()?;
        Ok(self.tasks.list_for(user))
    }

    pub fn complete_task(&mut self, index: usize) -> Result<()> {
        self.current_user()?;
        self.tasks.mark_complete(index)
    }

    pub fn edit_task(&mut self, index: usize, edit: TaskEdit) -> Result<()> {
        self.current_user()?;
        self.tasks.edit(index, &self.users, edit)
    }

    /// Computes the statistics and rewrites both report files.
    pub fn generate_reports(&self) -> Result<Vec<PathBuf>> {
        let report = Report::compute(&self.users, self.tasks.list_all(), self.today());
        let paths = report.write_to(&self.data_dir)?;
        log::info!("Generated reports in {}", self.data_dir.display());
        Ok(paths)
    }

    /// Reads the reports back for display. Only `admin` may do this.
    pub fn statistics(&self) -> Result<Statistics> {
        if !self.session.is_admin() {
            return Err(Error::NotAdmin);
        }

        let generated = report::reports_missing(&self.data_dir);
        if generated {
            self.generate_reports()?;
        }

        let sections = ReportKind::ALL
            .iter()
            .map(|&kind| (kind, report::read_report(&self.data_dir, kind)))
            .collect();

        Ok(Statistics {
            generated,
            sections,
        })
    }

    /// Writes both stores back to disk.
    pub fn save_all(&mut self) -> Result<()> {
        self.tasks.save()?;
        self.users.save()
    }
}

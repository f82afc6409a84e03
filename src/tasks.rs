//! Task store backed by `tasks.txt`, plus the views and mutations built on it.
//!
//! The store owns every [`Task`]. Views hand out global indices so that a
//! change made through a filtered listing is visible everywhere. Every
//! mutation rewrites the whole file.

use chrono::NaiveDate;
use std::fs;
use std::path::PathBuf;

use crate::error::{Error, LineError, Result};
use crate::task::{Task, parse_date};
use crate::users::UserStore;

/// Requested changes to a task. `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskEdit {
    pub assignee: Option<String>,
    pub due_date: Option<String>,
}

impl TaskEdit {
    pub fn is_empty(&self) -> bool {
        self.assignee.is_none() && self.due_date.is_none()
    }
}

#[derive(Debug)]
pub struct TaskStore {
    path: PathBuf,
    tasks: Vec<Task>,
    rejected: Vec<LineError>,
    /// Set while the on-disk file still holds rejected lines not yet backed up.
    needs_backup: bool,
}

impl TaskStore {
    /// Loads the store from `path`, creating an empty file if needed.
    ///
    /// Malformed lines are skipped and logged. The first save after such a
    /// load copies the original file to `<name>.bak` before overwriting it.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        if !path.exists() {
            fs::write(&path, "").map_err(|e| Error::io(&path, e))?;
            log::info!("Created task file {}", path.display());
        }

        let content = fs::read_to_string(&path).map_err(|e| Error::io(&path, e))?;

        let mut tasks = Vec::new();
        let mut rejected = Vec::new();
        for (idx, raw) in content.split('\n').enumerate() {
            let raw = raw.trim_end_matches('\r');
            if raw.trim().is_empty() {
                continue;
            }
            match Task::parse_line(raw) {
                Ok(task) => tasks.push(task),
                Err(source) => {
                    let err = LineError {
                        path: path.clone(),
                        line: idx + 1,
                        raw: raw.to_string(),
                        source,
                    };
                    log::warn!("Skipping invalid task entry: {}", err);
                    rejected.push(err);
                }
            }
        }

        log::debug!("Loaded {} tasks from {}", tasks.len(), path.display());
        Ok(Self {
            needs_backup: !rejected.is_empty(),
            path,
            tasks,
            rejected,
        })
    }

    /// Path of the backup taken when malformed lines were skipped.
    pub fn backup_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".bak");
        self.path.with_file_name(name)
    }

    /// Overwrites the backing file with every task.
    pub fn save(&mut self) -> Result<()> {
        if self.needs_backup {
            let backup = self.backup_path();
            fs::copy(&self.path, &backup).map_err(|e| Error::io(&backup, e))?;
            log::warn!(
                "Backed up {} skipped task lines to {}",
                self.rejected.len(),
                backup.display()
            );
            self.needs_backup = false;
        }

        let content = self
            .tasks
            .iter()
            .map(Task::to_line)
            .collect::<Vec<_>>()
            .join("\n");
        fs::write(&self.path, content).map_err(|e| Error::io(&self.path, e))?;
        log::debug!("Saved {} tasks to {}", self.tasks.len(), self.path.display());
        Ok(())
    }

    /// Creates a task assigned to `assignee` and persists the store.
    pub fn add(
        &mut self,
        users: &UserStore,
        assignee: &str,
        title: &str,
        description: &str,
        due_date: NaiveDate,
        today: NaiveDate,
    ) -> Result<&Task> {
        if !users.contains(assignee) {
            return Err(Error::UnknownUser(assignee.to_string()));
        }
        let task = Task::new(assignee, title, description, due_date, today)?;

        self.tasks.push(task);
        if let Err(e) = self.save() {
            self.tasks.pop();
            return Err(e);
        }

        log::info!("Added task '{}' for {}", title, assignee);
        let idx = self.tasks.len() - 1;
        Ok(&self.tasks[idx])
    }

    /// Every task, in insertion order.
    pub fn list_all(&self) -> &[Task] {
        &self.tasks
    }

    /// Tasks assigned to `username`, paired with their global index.
    pub fn list_for(&self, username: &str) -> Vec<(usize, &Task)> {
        self.tasks
            .iter()
            .enumerate()
            .filter(|(_, t)| t.username == username)
            .collect()
    }

    pub fn get(&self, index: usize) -> Option<&Task> {
        self.tasks.get(index)
    }

    /// Marks the task at `index` as completed and persists the store.
    pub fn mark_complete(&mut self, index: usize) -> Result<()> {
        let task = self.tasks.get_mut(index).ok_or(Error::NoSuchTask(index))?;
        if task.completed {
            return Err(Error::AlreadyCompleted);
        }
        task.completed = true;

        if let Err(e) = self.save() {
            self.tasks[index].completed = false;
            return Err(e);
        }
        log::info!("Completed task '{}'", self.tasks[index].title);
        Ok(())
    }

    /// Applies `edit` to the task at `index`.
    ///
    /// Both fields are validated before either is applied. A rejected edit
    /// or a failed save leaves the task untouched.
    pub fn edit(&mut self, index: usize, users: &UserStore, edit: TaskEdit) -> Result<()> {
        if index >= self.tasks.len() {
            return Err(Error::NoSuchTask(index));
        }
        if let Some(assignee) = &edit.assignee {
            if !users.contains(assignee) {
                return Err(Error::UnknownUser(assignee.clone()));
            }
        }
        let due_date = edit.due_date.as_deref().map(parse_date).transpose()?;

        if edit.is_empty() {
            return Ok(());
        }

        let previous = self.tasks[index].clone();
        let task = &mut self.tasks[index];
        if let Some(assignee) = edit.assignee {
            task.username = assignee;
        }
        if let Some(due_date) = due_date {
            task.due_date = due_date;
        }

        if let Err(e) = self.save() {
            self.tasks[index] = previous;
            return Err(e);
        }
        let task = &self.tasks[index];
        log::info!(
            "Updated task '{}': assignee {} -> {}, due {} -> {}",
            task.title,
            previous.username,
            task.username,
            previous.due_date,
            task.due_date
        );
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Lines skipped during the last load.
    pub fn rejected(&self) -> &[LineError] {
        &self.rejected
    }
}

//! Task records and their `;`-delimited line format.

use chrono::NaiveDate;
use std::fmt;

use crate::error::{Error, ParseError, Result};

/// Date format used on disk and at every prompt.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

const FIELD_COUNT: usize = 6;

/// Parses a `YYYY-MM-DD` date typed by the user.
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), DATE_FORMAT)
        .map_err(|_| Error::InvalidDate(input.trim().to_string()))
}

/// Rejects text that would break the line format.
pub fn check_text(field: &'static str, value: &str, allow_empty: bool) -> Result<()> {
    if !allow_empty && value.is_empty() {
        return Err(Error::EmptyField { field });
    }
    if value.contains([';', '\n', '\r']) {
        return Err(Error::InvalidField { field });
    }
    Ok(())
}

/// A task assigned to a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub username: String,
    pub title: String,
    pub description: String,
    pub due_date: NaiveDate,
    pub assigned_date: NaiveDate,
    pub completed: bool,
}

impl Task {
    /// Builds a new, uncompleted task, validating the free-text fields.
    pub fn new(
        username: &str,
        title: &str,
        description: &str,
        due_date: NaiveDate,
        assigned_date: NaiveDate,
    ) -> Result<Self> {
        check_text("Username", username, false)?;
        check_text("Title", title, true)?;
        check_text("Description", description, true)?;

        Ok(Self {
            username: username.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            due_date,
            assigned_date,
            completed: false,
        })
    }

    /// Decodes a `username;title;description;due;assigned;Yes|No` line.
    pub fn parse_line(line: &str) -> std::result::Result<Self, ParseError> {
        let fields: Vec<&str> = line.split(';').collect();
        if fields.len() != FIELD_COUNT {
            return Err(ParseError::FieldCount {
                expected: FIELD_COUNT,
                found: fields.len(),
            });
        }
        if fields[0].is_empty() {
            return Err(ParseError::EmptyField { field: "username" });
        }

        let date = |s: &str| {
            NaiveDate::parse_from_str(s, DATE_FORMAT)
                .map_err(|_| ParseError::InvalidDate(s.to_string()))
        };
        let completed = match fields[5] {
            "Yes" => true,
            "No" => false,
            other => return Err(ParseError::InvalidFlag(other.to_string())),
        };

        Ok(Self {
            username: fields[0].to_string(),
            title: fields[1].to_string(),
            description: fields[2].to_string(),
            due_date: date(fields[3])?,
            assigned_date: date(fields[4])?,
            completed,
        })
    }

    pub fn to_line(&self) -> String {
        format!(
            "{};{};{};{};{};{}",
            self.username,
            self.title,
            self.description,
            self.due_date.format(DATE_FORMAT),
            self.assigned_date.format(DATE_FORMAT),
            self.completed_label()
        )
    }

    pub fn completed_label(&self) -> &'static str {
        if self.completed { "Yes" } else { "No" }
    }

    /// Uncompleted and due strictly before `today`.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        !self.completed && self.due_date < today
    }
}

/// Full listing of a task, as shown by "view all".
pub struct TaskCard<'a> {
    pub number: usize,
    pub task: &'a Task,
}

impl fmt::Display for TaskCard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let task = self.task;
        writeln!(f, "Task {}: {}", self.number, task.title)?;
        writeln!(f)?;
        writeln!(f, "Assigned to: {}", task.username)?;
        writeln!(f, "Date Assigned: {}", task.assigned_date.format(DATE_FORMAT))?;
        writeln!(f, "Due Date: {}", task.due_date.format(DATE_FORMAT))?;
        writeln!(f, "Task Description: {}", task.description)?;
        writeln!(f, "Completed: {}", task.completed_label())?;
        write!(f, "{}", "-".repeat(50))
    }
}

/// Short listing used by "view mine".
pub struct OwnTaskCard<'a> {
    pub number: usize,
    pub task: &'a Task,
}

impl fmt::Display for OwnTaskCard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let task = self.task;
        writeln!(f, "{}. Task: {}", self.number, task.title)?;
        writeln!(f, "Due Date: {}", task.due_date.format(DATE_FORMAT))?;
        writeln!(f, "Task Description: {}", task.description)?;
        write!(f, "Completed: {}", task.completed_label())
    }
}

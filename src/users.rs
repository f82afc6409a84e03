//! Credential store backed by `user.txt`.
//!
//! One `username;password` entry per line. Passwords are compared by exact
//! equality.

use std::fs;
use std::path::PathBuf;

use crate::error::{Error, LineError, ParseError, Result};
use crate::task::check_text;

/// Username of the privileged account.
pub const ADMIN: &str = "admin";

/// Contents written to a freshly created credential file.
pub const SEED_ENTRY: &str = "admin;password";

/// A single username/password pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    pub username: String,
    pub password: String,
}

impl Credential {
    /// Decodes a `username;password` line.
    pub fn parse_line(line: &str) -> std::result::Result<Self, ParseError> {
        let fields: Vec<&str> = line.split(';').collect();
        if fields.len() != 2 {
            return Err(ParseError::FieldCount {
                expected: 2,
                found: fields.len(),
            });
        }
        if fields[0].is_empty() {
            return Err(ParseError::EmptyField { field: "username" });
        }
        Ok(Self {
            username: fields[0].to_string(),
            password: fields[1].to_string(),
        })
    }

    pub fn to_line(&self) -> String {
        format!("{};{}", self.username, self.password)
    }
}

/// The set of known users, in file order followed by registration order.
#[derive(Debug)]
pub struct UserStore {
    path: PathBuf,
    entries: Vec<Credential>,
    rejected: Vec<LineError>,
}

impl UserStore {
    /// Loads the store from `path`, seeding it with the admin account if the
    /// file does not exist yet.
    ///
    /// Lines that do not split into exactly two fields are logged, recorded
    /// in [`rejected`](Self::rejected) and skipped.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        if !path.exists() {
            fs::write(&path, SEED_ENTRY).map_err(|e| Error::io(&path, e))?;
            log::info!("Created credential file {}", path.display());
        }

        let content = fs::read_to_string(&path).map_err(|e| Error::io(&path, e))?;

        let mut store = Self {
            path,
            entries: Vec::new(),
            rejected: Vec::new(),
        };

        for (idx, raw) in content.split('\n').enumerate() {
            let raw = raw.trim_end_matches('\r');
            if raw.trim().is_empty() {
                continue;
            }
            match Credential::parse_line(raw) {
                Ok(credential) => store.upsert(credential),
                Err(source) => {
                    let err = LineError {
                        path: store.path.clone(),
                        line: idx + 1,
                        raw: raw.to_string(),
                        source,
                    };
                    log::warn!("Skipping invalid user entry: {}", err);
                    store.rejected.push(err);
                }
            }
        }

        log::debug!(
            "Loaded {} users from {}",
            store.entries.len(),
            store.path.display()
        );
        Ok(store)
    }

    fn upsert(&mut self, credential: Credential) {
        match self
            .entries
            .iter_mut()
            .find(|c| c.username == credential.username)
        {
            Some(existing) => existing.password = credential.password,
            None => self.entries.push(credential),
        }
    }

    /// Checks a username/password pair.
    pub fn authenticate(&self, username: &str, password: &str) -> Result<()> {
        let credential = self
            .entries
            .iter()
            .find(|c| c.username == username)
            .ok_or_else(|| Error::UnknownUser(username.to_string()))?;

        if credential.password != password {
            return Err(Error::WrongPassword);
        }
        Ok(())
    }

    /// Adds a new user and writes the whole store back to disk.
    pub fn register(&mut self, username: &str, password: &str, confirm: &str) -> Result<()> {
        if self.contains(username) {
            return Err(Error::UsernameTaken(username.to_string()));
        }
        if password != confirm {
            return Err(Error::PasswordMismatch);
        }
        check_text("Username", username, false)?;
        check_text("Password", password, true)?;

        self.entries.push(Credential {
            username: username.to_string(),
            password: password.to_string(),
        });
        if let Err(e) = self.save() {
            self.entries.pop();
            return Err(e);
        }

        log::info!("Registered user {}", username);
        Ok(())
    }

    /// Overwrites the backing file with every entry.
    pub fn save(&self) -> Result<()> {
        let content = self
            .entries
            .iter()
            .map(Credential::to_line)
            .collect::<Vec<_>>()
            .join("\n");
        fs::write(&self.path, content).map_err(|e| Error::io(&self.path, e))?;
        log::debug!("Saved {} users to {}", self.entries.len(), self.path.display());
        Ok(())
    }

    pub fn contains(&self, username: &str) -> bool {
        self.entries.iter().any(|c| c.username == username)
    }

    /// Usernames in store order.
    pub fn usernames(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|c| c.username.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Lines skipped during the last load.
    pub fn rejected(&self) -> &[LineError] {
        &self.rejected
    }
}

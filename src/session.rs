//! The logged-in user for the life of the process.

use crate::users::ADMIN;

#[derive(Debug, Default)]
pub struct Session {
    user: Option<String>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a successful login. There is no logout.
    pub fn begin(&mut self, username: &str) {
        self.user = Some(username.to_string());
    }

    pub fn user(&self) -> Option<&str> {
        self.user.as_deref()
    }

    pub fn is_admin(&self) -> bool {
        self.user() == Some(ADMIN)
    }
}

//! taskmgr - a small multi-user task tracker for the terminal.
//!
//! Users and tasks live in two `;`-delimited text files. A logged-in user
//! can register users, add and assign tasks, review and update their own
//! tasks, and generate overview reports; only `admin` may display them.

pub mod app;
pub mod config;
pub mod error;
pub mod logging;
pub mod report;
pub mod session;
pub mod shell;
pub mod task;
pub mod tasks;
pub mod trie;
pub mod users;

// Re-export commonly used types
pub use app::App;
pub use config::AppConfig;
pub use error::{Error, Result};
pub use logging::{LogConfig, init_logging};
pub use shell::Shell;
pub use task::Task;
pub use tasks::{TaskEdit, TaskStore};
pub use trie::Trie;
pub use users::UserStore;

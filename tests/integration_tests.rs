//! Integration tests for taskmgr.
//!
//! These tests drive the application and the shell end to end against a
//! temporary data directory.

use std::fs;

use taskmgr::app::{App, TASK_FILE, USER_FILE};
use taskmgr::error::Error;
use taskmgr::report::ReportKind;
use taskmgr::shell::Shell;
use taskmgr::shell::command::CommandResult;
use taskmgr::shell::prompt::ScriptedPrompt;
use taskmgr::task::parse_date;
use taskmgr::tasks::{TaskEdit, TaskStore};
use tempfile::TempDir;

/// Creates a data directory holding admin/password and bob/pw1.
fn setup_test_env() -> TempDir {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    fs::write(temp_dir.path().join(USER_FILE), "admin;password\nbob;pw1")
        .expect("Failed to seed users");
    temp_dir
}

fn open_as(dir: &TempDir, user: &str, password: &str) -> App {
    let mut app = App::open(dir.path())
        .expect("Failed to open app")
        .with_today(parse_date("2024-06-10").unwrap());
    app.login(user, password).expect("Login failed");
    app
}

// ============================================================================
// Credential Tests
// ============================================================================

#[test]
fn test_fresh_directory_is_seeded() {
    let temp_dir = TempDir::new().unwrap();

    let mut app = App::open(temp_dir.path()).unwrap();

    assert_eq!(
        fs::read_to_string(temp_dir.path().join(USER_FILE)).unwrap(),
        "admin;password"
    );
    assert_eq!(fs::read_to_string(temp_dir.path().join(TASK_FILE)).unwrap(), "");
    assert!(app.login("admin", "password").is_ok());
}

#[test]
fn test_registration_is_persisted_and_usable() {
    let temp_dir = setup_test_env();
    let mut admin = open_as(&temp_dir, "admin", "password");

    admin.register("carol", "pw2", "pw2").unwrap();
    assert!(matches!(
        admin.register("carol", "other", "other"),
        Err(Error::UsernameTaken(_))
    ));
    assert!(matches!(
        admin.register("dave", "a", "b"),
        Err(Error::PasswordMismatch)
    ));

    let mut fresh = App::open(temp_dir.path()).unwrap();
    assert!(fresh.login("carol", "pw2").is_ok());
    assert!(fresh.login("dave", "a").is_err());
}

#[test]
fn test_login_failures() {
    let temp_dir = setup_test_env();
    let mut app = App::open(temp_dir.path()).unwrap();

    assert!(matches!(app.login("bob", "PW1"), Err(Error::WrongPassword)));
    assert!(matches!(app.login("nobody", "pw1"), Err(Error::UnknownUser(_))));
    assert!(app.session().user().is_none());
}

// ============================================================================
// Task Tests
// ============================================================================

#[test]
fn test_add_for_unknown_assignee_leaves_file_untouched() {
    let temp_dir = setup_test_env();
    let mut app = open_as(&temp_dir, "admin", "password");
    app.add_task("bob", "Existing", "", parse_date("2099-01-01").unwrap())
        .unwrap();
    let before = fs::read_to_string(temp_dir.path().join(TASK_FILE)).unwrap();

    let result = app.add_task("carol", "Nope", "", parse_date("2099-01-01").unwrap());

    assert!(matches!(result, Err(Error::UnknownUser(_))));
    assert_eq!(app.tasks().len(), 1);
    assert_eq!(
        fs::read_to_string(temp_dir.path().join(TASK_FILE)).unwrap(),
        before
    );
}

#[test]
fn test_task_store_round_trip() {
    let temp_dir = setup_test_env();
    let mut app = open_as(&temp_dir, "admin", "password");
    app.add_task("bob", "One", "first", parse_date("2024-01-31").unwrap())
        .unwrap();
    app.add_task("admin", "Two", "", parse_date("2099-02-28").unwrap())
        .unwrap();
    app.add_task("bob", "One", "first", parse_date("2024-01-31").unwrap())
        .unwrap();
    app.complete_task(1).unwrap();
    app.edit_task(
        2,
        TaskEdit {
            assignee: Some("admin".into()),
            due_date: None,
        },
    )
    .unwrap();

    let reloaded = TaskStore::load(temp_dir.path().join(TASK_FILE)).unwrap();

    assert_eq!(reloaded.list_all(), app.tasks().list_all());
    assert!(reloaded.rejected().is_empty());
}

#[test]
fn test_mark_complete_never_toggles_back() {
    let temp_dir = setup_test_env();
    let mut app = open_as(&temp_dir, "bob", "pw1");
    app.add_task("bob", "t", "", parse_date("2099-01-01").unwrap())
        .unwrap();

    app.complete_task(0).unwrap();
    assert!(matches!(app.complete_task(0), Err(Error::AlreadyCompleted)));
    assert!(app.tasks().list_all()[0].completed);
}

// ============================================================================
// Report Tests
// ============================================================================

#[test]
fn test_reports_with_no_tasks() {
    let temp_dir = setup_test_env();
    let app = open_as(&temp_dir, "admin", "password");

    app.generate_reports().unwrap();

    let tasks = fs::read_to_string(ReportKind::TaskOverview.path_in(temp_dir.path())).unwrap();
    assert!(!tasks.contains('%'));
    let users = fs::read_to_string(ReportKind::UserOverview.path_in(temp_dir.path())).unwrap();
    assert!(users.contains("User: admin\nTotal tasks assigned: 0"));
    assert!(users.contains("User: bob\nTotal tasks assigned: 0"));
}

#[test]
fn test_reports_count_overdue() {
    let temp_dir = setup_test_env();
    let mut app = open_as(&temp_dir, "admin", "password");
    app.add_task("bob", "late", "", parse_date("2024-06-09").unwrap())
        .unwrap();
    app.add_task("bob", "due today", "", parse_date("2024-06-10").unwrap())
        .unwrap();
    app.add_task("admin", "done late", "", parse_date("2024-01-01").unwrap())
        .unwrap();
    app.complete_task(2).unwrap();

    app.generate_reports().unwrap();

    let tasks = fs::read_to_string(ReportKind::TaskOverview.path_in(temp_dir.path())).unwrap();
    assert_eq!(
        tasks,
        "Total tasks: 3\n\
         Completed tasks: 1\n\
         Uncompleted tasks: 2\n\
         Overdue tasks: 1\n\
         Percentage of incomplete tasks: 66.67%\n\
         Percentage of overdue tasks: 33.33%\n"
    );
    let users = fs::read_to_string(ReportKind::UserOverview.path_in(temp_dir.path())).unwrap();
    assert!(users.contains("User: bob\nTotal tasks assigned: 2\n"));
    assert!(users.contains("Percentage of overdue tasks: 50.00%"));
}

// ============================================================================
// Shell Tests
// ============================================================================

#[test]
fn test_shell_scenario_for_bob() {
    let temp_dir = setup_test_env();
    let shell = Shell::new();

    // admin assigns a task to bob.
    let mut admin = App::open(temp_dir.path()).unwrap();
    let mut prompt = ScriptedPrompt::new(["admin", "password"]);
    assert!(shell.login(&mut admin, &mut prompt).unwrap());
    let mut prompt = ScriptedPrompt::new(["bob", "Ship it", "Release 1.0", "2099-01-01"]);
    assert!(matches!(
        shell.execute_line("a", &mut admin, &mut prompt),
        CommandResult::Success(_)
    ));

    // bob sees exactly one open task and completes it.
    let mut bob = App::open(temp_dir.path()).unwrap();
    let mut prompt = ScriptedPrompt::new(["bob", "pw1"]);
    assert!(shell.login(&mut bob, &mut prompt).unwrap());

    let mut prompt = ScriptedPrompt::new(["-1"]);
    shell.execute_line("vm", &mut bob, &mut prompt);
    let transcript = prompt.transcript();
    assert!(transcript.contains("1. Task: Ship it"));
    assert!(!transcript.contains("2. Task"));
    assert!(transcript.contains("Completed: No"));

    let mut prompt = ScriptedPrompt::new(["1", "complete"]);
    assert!(matches!(
        shell.execute_line("vm", &mut bob, &mut prompt),
        CommandResult::Success(Some(_))
    ));

    let mut prompt = ScriptedPrompt::new(["-1"]);
    shell.execute_line("vm", &mut bob, &mut prompt);
    assert!(prompt.transcript().contains("Completed: Yes"));

    // bob may generate reports but not display them.
    let mut prompt = ScriptedPrompt::default();
    assert!(matches!(
        shell.execute_line("ds", &mut bob, &mut prompt),
        CommandResult::Error(_)
    ));
    assert!(matches!(
        shell.execute_line("gr", &mut bob, &mut prompt),
        CommandResult::Success(_)
    ));

    let users = fs::read_to_string(ReportKind::UserOverview.path_in(temp_dir.path())).unwrap();
    assert!(users.contains("User: bob"));
    assert!(users.contains("Percentage of tasks assigned: 100.00%"));
    assert!(users.contains("Percentage of overdue tasks: 0.00%"));
}

#[test]
fn test_shell_admin_statistics_and_exit() {
    let temp_dir = setup_test_env();
    let shell = Shell::new();
    let mut app = open_as(&temp_dir, "admin", "password");

    let mut prompt = ScriptedPrompt::default();
    match shell.execute_line("ds", &mut app, &mut prompt) {
        CommandResult::Success(Some(text)) => {
            assert!(text.contains("Reports generated successfully!"));
            assert!(text.contains("Task Overview:"));
            assert!(text.contains("User Overview:"));
            assert!(text.contains("Total users: 2"));
        }
        other => panic!("Expected statistics, got {:?}", other),
    }

    fs::remove_file(temp_dir.path().join(TASK_FILE)).unwrap();
    assert!(matches!(
        shell.execute_line("e", &mut app, &mut prompt),
        CommandResult::Exit
    ));
    assert!(temp_dir.path().join(TASK_FILE).exists());
}

#[test]
fn test_shell_register_then_assign() {
    let temp_dir = setup_test_env();
    let shell = Shell::new();
    let mut app = open_as(&temp_dir, "admin", "password");

    let mut prompt = ScriptedPrompt::new(["carol", "pw3", "pw3"]);
    assert!(matches!(
        shell.execute_line("register", &mut app, &mut prompt),
        CommandResult::Success(_)
    ));

    let mut prompt = ScriptedPrompt::new(["carol", "Onboard", "", "2099-03-01"]);
    assert!(matches!(
        shell.execute_line("add", &mut app, &mut prompt),
        CommandResult::Success(_)
    ));
    assert_eq!(app.tasks().list_for("carol").len(), 1);

    let content = fs::read_to_string(temp_dir.path().join(USER_FILE)).unwrap();
    assert!(content.ends_with("carol;pw3"));
}

use anyhow::{Context, Result};
use std::process::ExitCode;

use taskmgr::shell::ShellConfig;
use taskmgr::shell::prompt::TerminalPrompt;
use taskmgr::{App, AppConfig, Shell, init_logging};

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(1)
        }
    }
}

fn run() -> Result<()> {
    let config = AppConfig::load()?;

    if let Err(e) = init_logging(&config.log) {
        eprintln!("Warning: logging disabled: {:#}", e);
    }

    let mut app = App::open(&config.data_dir).with_context(|| {
        format!("Failed to open task data in {}", config.data_dir.display())
    })?;

    for err in app.users().rejected() {
        println!("Invalid user data format: {}", err);
    }
    if !app.tasks().rejected().is_empty() {
        for err in app.tasks().rejected() {
            println!("Invalid task data format: {}", err);
        }
        println!(
            "These lines were skipped; the original file will be kept as {}.",
            app.tasks().backup_path().display()
        );
    }

    let shell = Shell::with_config(ShellConfig {
        history: config.history.clone(),
        show_menu: true,
    });
    let mut prompt = TerminalPrompt::new(shell.user_trie())?;

    if !shell.login(&mut app, &mut prompt)? {
        println!("Goodbye!");
        return Ok(());
    }

    shell.run(&mut app, &mut prompt)
}

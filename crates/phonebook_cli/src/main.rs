//! `phonebook` interactive shell.
//!
//! # Responsibility
//! - Resolve configuration from file and flags.
//! - Bootstrap the contact list and hand stdin lines to the controller.

mod shell;
mod terminal;

use clap::Parser;
use log::info;
use phonebook_core::db::open_db;
use phonebook_core::{
    core_version, init_logging, load_initial_contacts, ContactController, ContactStore, HttpRemoteSource,
    PhonebookConfig, RemoteSource, SqliteContactStorage,
};
use std::error::Error;
use std::io::{self, BufRead};
use std::path::PathBuf;
use std::process::ExitCode;
use terminal::{StdinConfirm, TerminalView};

/// Local contact manager with search, edit and delete.
#[derive(Parser, Debug)]
#[command(name = "phonebook")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// SQLite file holding the contact list
    #[arg(long)]
    db: Option<PathBuf>,

    /// URL fetched once when no contacts are stored yet
    #[arg(long)]
    remote_url: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Absolute directory for log files; logging is off without it
    #[arg(long)]
    log_dir: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("phonebook: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let config = resolve_config(cli)?;
    if let Some(log_dir) = &config.logging.log_dir {
        init_logging(&config.logging.level, log_dir)?;
    }

    let conn = open_db(&config.db_path).map_err(|err| {
        if err.is_schema_mismatch() {
            format!(
                "{err} ({}); pass --db to use another file",
                config.db_path.display()
            )
        } else {
            err.to_string()
        }
    })?;
    let storage = SqliteContactStorage::new(&conn);
    let remote = config
        .remote_url
        .as_deref()
        .map(|url| HttpRemoteSource::new(url).with_timeout(config.fetch_timeout()));

    println!("Loading contacts...");
    let outcome = load_initial_contacts(
        &storage,
        remote.as_ref().map(|source| source as &dyn RemoteSource),
    );

    let store = ContactStore::new(storage, outcome.contacts);
    let mut controller =
        ContactController::new(store, TerminalView::new(io::stdout()), StdinConfirm);
    controller.start();
    println!("phonebook {}. Type `help` for commands.", core_version());

    shell::run_shell(&mut controller, read_stdin_line, &mut io::stdout())?;
    info!("event=app_exit module=cli status=ok");
    Ok(())
}

fn resolve_config(cli: Cli) -> Result<PhonebookConfig, Box<dyn Error>> {
    let mut config = match &cli.config {
        Some(path) => PhonebookConfig::from_file(path)?,
        None => PhonebookConfig::default(),
    };
    if let Some(db) = cli.db {
        config.db_path = db;
    }
    if let Some(url) = cli.remote_url {
        config.remote_url = Some(url);
    }
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }
    if let Some(log_dir) = cli.log_dir {
        config.logging.log_dir = Some(log_dir);
    }
    config.validate()?;
    Ok(config)
}

fn read_stdin_line() -> io::Result<Option<String>> {
    let mut line = String::new();
    match io::stdin().lock().read_line(&mut line)? {
        0 => Ok(None),
        _ => Ok(Some(line)),
    }
}

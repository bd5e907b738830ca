//! `feedbackdesk` - customer feedback form
//!
//! This binary opens the feedback store and runs either the interactive form
//! or one of the one-shot commands.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::io::{self, BufRead};

use anyhow::Context;
use clap::Parser;
use tracing::error;

use feedbackdesk::cli::prompt::{SecretPrompt, TerminalPrompt};
use feedbackdesk::cli::render::render_records;
use feedbackdesk::cli::session::Session;
use feedbackdesk::cli::{
    Cli, Command, ConfigCommand, FormCommand, ListCommand, StatusCommand, SubmitCommand,
};
use feedbackdesk::{
    authorize_and_list, init_logging, submit, Config, Draft, FeedbackStore, SqliteStore,
    Unavailable,
};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbosity());

    let config = Config::load_from(cli.config.clone()).context("loading configuration")?;

    match cli.command_or_default() {
        Command::Form(form_cmd) => handle_form(&config, &form_cmd),
        Command::Submit(submit_cmd) => handle_submit(&config, submit_cmd),
        Command::List(list_cmd) => handle_list(&config, &list_cmd),
        Command::Status(status_cmd) => handle_status(&config, &status_cmd),
        Command::Config(config_cmd) => handle_config(&config, config_cmd),
    }
}

fn open_store(config: &Config) -> anyhow::Result<SqliteStore> {
    let path = config.database_path();
    SqliteStore::open(&path)
        .with_context(|| format!("Failed to initialize database at {}", path.display()))
}

fn handle_form(config: &Config, cmd: &FormCommand) -> anyhow::Result<()> {
    // Keep the form usable without persistence; every action will report why.
    let store: Box<dyn FeedbackStore> = match open_store(config) {
        Ok(store) => Box::new(store),
        Err(e) => {
            error!("{e:#}");
            eprintln!("Database Error: {e:#}");
            eprintln!("Continuing without saving; submissions will fail until this is fixed.");
            Box::new(Unavailable::new(format!("{e:#}")))
        }
    };

    let admin = config.admin_credential();
    let stdin = io::stdin();
    let mut session = Session::new(
        store.as_ref(),
        &admin,
        stdin.lock(),
        io::stdout(),
        TerminalPrompt::new(),
        cmd.format,
    );
    session.run()?;
    Ok(())
}

fn handle_submit(config: &Config, cmd: SubmitCommand) -> anyhow::Result<()> {
    let store = open_store(config)?;
    let mut draft = Draft::new(cmd.name, cmd.email, cmd.feedback);
    submit(&store, &mut draft)?;
    println!("Feedback submitted successfully!");
    Ok(())
}

fn handle_list(config: &Config, cmd: &ListCommand) -> anyhow::Result<()> {
    let store = open_store(config)?;

    let attempt = if cmd.password_stdin {
        let mut line = String::new();
        io::stdin().lock().read_line(&mut line)?;
        Some(line.trim_end_matches(['\n', '\r']).to_string())
    } else {
        TerminalPrompt::new().read_secret(
            "Enter Root Password: ",
            &mut io::stdin().lock(),
            &mut io::stdout(),
        )?
    };
    let Some(attempt) = attempt else {
        return Ok(());
    };

    let records = authorize_and_list(&store, &config.admin_credential(), &attempt)?;
    render_records(&mut io::stdout().lock(), &records, cmd.format)?;
    Ok(())
}

fn handle_status(config: &Config, cmd: &StatusCommand) -> anyhow::Result<()> {
    let path = config.database_path();
    let entries = if path.exists() {
        Some(open_store(config)?.count()?)
    } else {
        None
    };

    if cmd.json {
        let status = serde_json::json!({
            "database_path": path,
            "database_exists": entries.is_some(),
            "entries": entries.unwrap_or(0),
            "admin_configured": config.admin_credential().is_configured(),
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
    } else {
        println!("feedbackdesk status");
        println!("-------------------");
        println!("Database:      {}", path.display());
        match entries {
            Some(n) => println!("Entries:       {n}"),
            None => println!("Entries:       (database not created yet)"),
        }
        println!(
            "Admin view:    {}",
            if config.admin_credential().is_configured() {
                "enabled"
            } else {
                "disabled (no admin password configured)"
            }
        );
    }
    Ok(())
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            let shown = config.redacted();
            if json {
                println!("{}", serde_json::to_string_pretty(&shown)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Storage]");
                println!("  Database path:      {}", config.database_path().display());
                println!();
                println!("[Admin]");
                println!(
                    "  Password:           {}",
                    shown.admin.password.as_deref().unwrap_or("(not set)")
                );
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => println!("Configuration error: {e}"),
            }
        }
    }
    Ok(())
}

//! Command-line interface for feedbackdesk.
//!
//! This module provides the CLI structure, the interactive form session, and
//! the terminal plumbing (masked prompts, listing output) for the
//! `feedbackdesk` binary.

mod commands;
pub mod prompt;
pub mod render;
pub mod session;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    ConfigCommand, FormCommand, ListCommand, OutputFormat, StatusCommand, SubmitCommand,
};

/// feedbackdesk - Collect customer feedback
///
/// Fill in name, email and feedback, then submit. Stored entries can be
/// reviewed with the admin password.
#[derive(Debug, Parser)]
#[command(name = "feedbackdesk")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute (defaults to the interactive form)
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Open the interactive feedback form
    Form(FormCommand),

    /// Submit feedback in one shot
    Submit(SubmitCommand),

    /// View all feedback (requires the admin password)
    List(ListCommand),

    /// Show database location and entry count
    Status(StatusCommand),

    /// View or check configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        crate::logging::Verbosity::from_flags(self.verbose, self.quiet)
    }

    /// The command to run, falling back to the interactive form.
    #[must_use]
    pub fn command_or_default(self) -> Command {
        self.command
            .unwrap_or_else(|| Command::Form(FormCommand::default()))
    }
}

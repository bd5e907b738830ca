//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

/// Interactive form arguments.
#[derive(Debug, Default, Args)]
pub struct FormCommand {
    /// Output format used by View All
    #[arg(short, long, value_enum, default_value = "plain")]
    pub format: OutputFormat,
}

/// One-shot submission arguments.
#[derive(Debug, Args)]
pub struct SubmitCommand {
    /// Your name
    #[arg(short, long)]
    pub name: String,

    /// Your email address
    #[arg(short, long)]
    pub email: String,

    /// Your feedback
    #[arg(short, long)]
    pub feedback: String,
}

/// View All arguments.
#[derive(Debug, Args)]
pub struct ListCommand {
    /// Read the admin password from the first line of stdin instead of prompting
    #[arg(long)]
    pub password_stdin: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "plain")]
    pub format: OutputFormat,
}

/// Status command arguments.
#[derive(Debug, Args)]
pub struct StatusCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Output format for listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// One block per entry
    #[default]
    Plain,
    /// Formatted table
    Table,
    /// JSON output
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_default() {
        assert_eq!(OutputFormat::default(), OutputFormat::Plain);
        assert_eq!(FormCommand::default().format, OutputFormat::Plain);
    }

    #[test]
    fn test_submit_command_debug() {
        let cmd = SubmitCommand {
            name: "Alice".to_string(),
            email: "alice@example.com".to_string(),
            feedback: "Great".to_string(),
        };
        let debug_str = format!("{cmd:?}");
        assert!(debug_str.contains("Alice"));
    }

    #[test]
    fn test_config_command_debug() {
        let cmd = ConfigCommand::Show { json: false };
        assert!(format!("{cmd:?}").contains("Show"));
    }
}

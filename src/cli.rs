//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// EduPulse - survey collection and AI feedback analysis for safety training
///
/// Collect Likert-scale and free-text feedback after safety-education
/// sessions, then view aggregated statistics and an AI-generated summary
/// of the comments.
///
/// Examples:
///   edupulse submit -r 1=5 -r 2=4 -r 3=5 -r 4=4 -r 5=5 --comment "More drills"
///   edupulse stats --password 1234
///   edupulse analyze --password 1234
///   edupulse clear --password 1234 --yes
///   edupulse init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Path to configuration file
    ///
    /// If not specified, looks for .edupulse.toml in the current directory
    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Path of the survey data file (overrides config)
    #[arg(long, value_name = "FILE", global = true)]
    pub data_file: Option<String>,

    /// Gemini model to use for comment analysis
    #[arg(long, value_name = "NAME", global = true)]
    pub model: Option<String>,

    /// Gemini API key
    #[arg(long, value_name = "KEY", env = "GEMINI_API_KEY", global = true, hide_env_values = true)]
    pub api_key: Option<String>,

    /// Request timeout for the AI analysis in seconds
    #[arg(long, value_name = "SECS", global = true)]
    pub timeout: Option<u64>,

    /// Enable verbose logging output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// The action to perform.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Submit one survey response
    Submit {
        /// Rating answer as ID=VALUE (VALUE in 1..=5); repeat per question
        ///
        /// Example: -r 1=5 -r 2=4
        #[arg(short = 'r', long = "rating", value_name = "ID=VALUE")]
        ratings: Vec<String>,

        /// Free-text comment for the open question
        #[arg(long, value_name = "TEXT")]
        comment: Option<String>,
    },

    /// Show the admin dashboard with aggregated statistics
    Stats {
        /// Admin passphrase
        #[arg(short, long, env = "EDUPULSE_ADMIN_PASSWORD", hide_env_values = true)]
        password: String,

        /// Output format (markdown, json)
        #[arg(long, default_value = "markdown", value_name = "FORMAT")]
        format: OutputFormat,

        /// Write the report to a file instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// List all free-text responses with their submission times
    Comments {
        /// Admin passphrase
        #[arg(short, long, env = "EDUPULSE_ADMIN_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Run the AI analysis over all free-text responses
    Analyze {
        /// Admin passphrase
        #[arg(short, long, env = "EDUPULSE_ADMIN_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Delete all survey responses (bulk clear, irreversible)
    Clear {
        /// Admin passphrase
        #[arg(short, long, env = "EDUPULSE_ADMIN_PASSWORD", hide_env_values = true)]
        password: String,

        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },

    /// Generate a default .edupulse.toml configuration file
    InitConfig,
}

/// Output format for the stats report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Markdown format (default)
    #[default]
    Markdown,
    /// JSON format
    Json,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        // Check for conflicting options
        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        // Validate timeout if provided
        if let Some(timeout) = self.timeout {
            if timeout == 0 {
                return Err("Timeout must be at least 1 second".to_string());
            }
        }

        if let Command::Submit { ref ratings, .. } = self.command {
            for rating in ratings {
                parse_rating_arg(rating)?;
            }
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}

/// Parse a `-r ID=VALUE` rating argument.
pub fn parse_rating_arg(arg: &str) -> Result<(u32, i64), String> {
    let (id, value) = arg
        .split_once('=')
        .ok_or_else(|| format!("Invalid rating '{}': expected ID=VALUE", arg))?;

    let id: u32 = id
        .trim()
        .parse()
        .map_err(|_| format!("Invalid question id in rating '{}'", arg))?;

    let value: i64 = value
        .trim()
        .parse()
        .map_err(|_| format!("Invalid rating value in '{}'", arg))?;

    if !(1..=5).contains(&value) {
        return Err(format!(
            "Rating value for question {} must be between 1 and 5, got {}",
            id, value
        ));
    }

    Ok((id, value))
}

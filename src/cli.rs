//! CLI - Command Line Interface for CinemApp
//!
//! Every catalog action in the TUI is scriptable. All output is JSON-parseable.
//!
//! # Examples
//!
//! ```bash
//! # Two pages of popular movies, filtered client-side
//! cinemapp popular movie --pages 2 --search "spider"
//!
//! # Details with cast
//! cinemapp info 1396 --type tv --json
//!
//! # Check a login against the fixtures / user directory
//! cinemapp login --email demo@cinemapp.local --password demo
//! ```

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::io::IsTerminal;
use std::path::PathBuf;

use crate::error::CatalogError;
use crate::models::CatalogType;

// =============================================================================
// Exit Codes
// =============================================================================

/// Exit codes for CLI operations (semantic for scripting)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success
    Success = 0,
    /// General error (including unexpected response shapes)
    Error = 1,
    /// Invalid arguments (including a missing item id)
    InvalidArgs = 2,
    /// Network error
    NetworkError = 3,
    /// Credentials rejected
    LoginFailed = 4,
    /// Upstream API returned a non-success status
    UpstreamError = 5,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> std::process::ExitCode {
        std::process::ExitCode::from(code as u8)
    }
}

impl From<&CatalogError> for ExitCode {
    fn from(err: &CatalogError) -> ExitCode {
        match err {
            CatalogError::Network(_) => ExitCode::NetworkError,
            CatalogError::Upstream { .. } => ExitCode::UpstreamError,
            CatalogError::Parse(_) => ExitCode::Error,
            CatalogError::MissingId => ExitCode::InvalidArgs,
        }
    }
}

// =============================================================================
// Main CLI Structure
// =============================================================================

/// CinemApp - popular movies and TV shows in your terminal
///
/// Run without arguments to launch interactive TUI.
/// Use subcommands for scriptable automation.
#[derive(Parser, Debug)]
#[command(
    name = "cinemapp",
    version,
    about = "Browse popular movies and TV shows, keep a watch list",
    long_about = "A terminal catalog browser backed by TMDB.\n\n\
                  Run without arguments to launch the interactive TUI.\n\
                  Use subcommands for automation and scripting.",
    after_help = "EXAMPLES:\n\
                  cinemapp                               Launch interactive TUI\n\
                  cinemapp popular tv --pages 2          Two pages of popular shows\n\
                  cinemapp info 550 --type movie --json  Movie detail with cast"
)]
pub struct Cli {
    /// Output format as JSON (default for non-TTY)
    #[arg(long, short = 'j', global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Debug logging for cinemapp (RUST_LOG overrides)
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Path to config file
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to run (omit for TUI mode)
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// Check if running in CLI mode (has subcommand)
    pub fn is_cli_mode(&self) -> bool {
        self.command.is_some()
    }

    /// Check if JSON output should be used
    pub fn should_json(&self) -> bool {
        self.json || !std::io::stdout().is_terminal()
    }
}

// =============================================================================
// Subcommands
// =============================================================================

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List popular movies or TV shows
    #[command(visible_alias = "p")]
    Popular(PopularCmd),

    /// Get details for a movie or show
    #[command(visible_alias = "i")]
    Info(InfoCmd),

    /// Check credentials against the login fixtures
    Login(LoginCmd),

    /// Show the configured profile
    Profile(ProfileCmd),
}

/// Catalog selector
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogArg {
    #[value(alias = "movies")]
    Movie,
    #[value(alias = "shows")]
    Tv,
}

impl From<CatalogArg> for CatalogType {
    fn from(arg: CatalogArg) -> CatalogType {
        match arg {
            CatalogArg::Movie => CatalogType::Movie,
            CatalogArg::Tv => CatalogType::Tv,
        }
    }
}

// =============================================================================
// Popular Command
// =============================================================================

/// Load popular pages and print the (optionally filtered) list
#[derive(Args, Debug)]
pub struct PopularCmd {
    /// Which catalog to list
    #[arg(value_enum)]
    pub catalog: CatalogArg,

    /// Number of pages to load
    #[arg(long, short = 'p', default_value = "1", value_parser = clap::value_parser!(u32).range(1..=50))]
    pub pages: u32,

    /// Case-insensitive title filter applied after loading
    #[arg(long, short = 's')]
    pub search: Option<String>,

    /// Maximum number of results to print
    #[arg(long, short = 'l')]
    pub limit: Option<usize>,
}

// =============================================================================
// Info Command
// =============================================================================

/// Get detailed info for a movie or show
#[derive(Args, Debug)]
pub struct InfoCmd {
    /// TMDB id
    #[arg(required = true)]
    pub id: String,

    /// Catalog the id belongs to
    #[arg(long = "type", short = 't', value_enum)]
    pub kind: CatalogArg,
}

impl InfoCmd {
    /// Numeric id, `None` when the argument is not a positive integer
    pub fn parsed_id(&self) -> Option<u64> {
        self.id.trim().parse().ok().filter(|id| *id > 0)
    }
}

// =============================================================================
// Login / Profile Commands
// =============================================================================

/// Check an email/password pair
#[derive(Args, Debug)]
pub struct LoginCmd {
    #[arg(long, short = 'e')]
    pub email: String,

    #[arg(long, short = 'p')]
    pub password: String,
}

#[derive(Args, Debug)]
pub struct ProfileCmd {}

// =============================================================================
// JSON Output Types
// =============================================================================

/// Generic JSON output wrapper with status
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonOutput<T: Serialize> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "is_zero")]
    pub exit_code: i32,
}

fn is_zero(n: &i32) -> bool {
    *n == 0
}

impl<T: Serialize> JsonOutput<T> {
    /// Create success output with data
    pub fn success(data: T) -> Self {
        Self {
            data: Some(data),
            error: None,
            exit_code: 0,
        }
    }

    /// Create error output (no data)
    pub fn error_msg(msg: impl Into<String>, code: ExitCode) -> JsonOutput<()> {
        JsonOutput::<()> {
            data: None,
            error: Some(msg.into()),
            exit_code: code.into(),
        }
    }
}

// =============================================================================
// Output Helpers
// =============================================================================

/// Output handler for consistent formatting
#[derive(Debug, Clone, Copy)]
pub struct Output {
    pub json: bool,
    pub quiet: bool,
}

impl Output {
    pub fn new(cli: &Cli) -> Self {
        Self {
            json: cli.should_json(),
            quiet: cli.quiet,
        }
    }

    /// Print success data
    pub fn print<T: Serialize>(&self, data: T) -> anyhow::Result<()> {
        if self.json {
            let output = JsonOutput::success(data);
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else {
            println!("{}", serde_json::to_string_pretty(&data)?);
        }
        Ok(())
    }

    /// Print plain lines (text mode), or the data as JSON
    pub fn print_lines<T: Serialize>(&self, data: T, lines: &[String]) -> anyhow::Result<()> {
        if self.json {
            return self.print(data);
        }
        for line in lines {
            println!("{}", line);
        }
        Ok(())
    }

    /// Print error and return exit code
    pub fn error(&self, msg: impl Into<String>, code: ExitCode) -> ExitCode {
        let msg = msg.into();
        if self.json {
            let output = JsonOutput::<()>::error_msg(&msg, code);
            if let Ok(json) = serde_json::to_string_pretty(&output) {
                eprintln!("{}", json);
            }
        } else if !self.quiet {
            eprintln!("Error: {}", msg);
        }
        code
    }

    /// Print info message (suppressed in quiet mode)
    pub fn info(&self, msg: impl std::fmt::Display) {
        if !self.quiet && !self.json {
            eprintln!("{}", msg);
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

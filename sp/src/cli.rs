//! CLI command definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::debug;

/// SSC JE Architect - a 360-day civil engineering study plan
#[derive(Parser)]
#[command(
    name = "sp",
    about = "360-day SSC JE civil engineering study planner",
    version = env!("CARGO_PKG_VERSION"),
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[arg(
        short = 'l',
        long = "log-level",
        global = true,
        help = "Log level (TRACE, DEBUG, INFO, WARN, ERROR)"
    )]
    pub log_level: Option<String>,

    /// Subcommand to execute; launches the TUI when omitted
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the day-by-day plan
    Plan {
        /// Only this phase (1-based)
        #[arg(short, long)]
        phase: Option<usize>,
    },

    /// Show the phase, subject and topic for a day
    Show {
        /// Day number (clamped to 1-360)
        #[arg(allow_negative_numbers = true)]
        day: i64,
    },

    /// Generate a day's study module and save it as a text file
    Generate {
        /// Day number (clamped to 1-360)
        #[arg(allow_negative_numbers = true)]
        day: i64,

        /// Directory to write the module into (default: export.dir from config)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Check the curriculum tables for gaps, overlaps and missing topics
    Check,

    /// List the phases with their day ranges
    Phases,
}

/// Get the log file path
pub fn get_log_path() -> PathBuf {
    debug!("get_log_path: called");
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("studyplan")
        .join("logs")
        .join("studyplan.log")
}

/// After-help text listing where config and logs live
pub fn generate_after_help() -> String {
    debug!("generate_after_help: called");
    let user_config = crate::config::Config::user_config_path()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "(no config dir)".to_string());

    let mut help = String::new();
    help.push_str("Config search order:\n");
    help.push_str("  1. --config <PATH>\n");
    help.push_str("  2. ./.studyplan.yml\n");
    help.push_str(&format!("  3. {}\n", user_config));
    help.push('\n');
    help.push_str(&format!("Logs are written to: {}\n", get_log_path().display()));
    help
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_negative_day() {
        let cli = Cli::try_parse_from(["sp", "show", "-5"]).unwrap();
        assert!(matches!(cli.command, Some(Command::Show { day: -5 })));
    }

    #[test]
    fn test_parse_generate_with_output() {
        let cli = Cli::try_parse_from(["sp", "-l", "debug", "generate", "12", "--output", "/tmp/x"]).unwrap();
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
        match cli.command {
            Some(Command::Generate { day, output }) => {
                assert_eq!(day, 12);
                assert_eq!(output, Some(PathBuf::from("/tmp/x")));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_no_subcommand_means_tui() {
        let cli = Cli::try_parse_from(["sp"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_after_help_mentions_log_path() {
        assert!(generate_after_help().contains("studyplan.log"));
    }
}

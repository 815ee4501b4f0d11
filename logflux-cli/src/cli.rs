//! CLI argument parsing using clap derive API
//!
//! This module defines the command-line interface structure using clap's derive macros.
//! It is purely declarative with no side effects or I/O.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// LogFlux -- WAF false-positive feedback triage.
///
/// Use `logflux <COMMAND> --help` for subcommand details.
#[derive(Parser, Debug)]
#[command(name = "logflux", version, about, long_about = None)]
pub struct Cli {
    /// Path to the logflux.toml configuration file.
    ///
    /// When omitted, built-in defaults plus LOGFLUX_* environment overrides are used.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Override log level (trace, debug, info, warn, error).
    #[arg(long, global = true, value_parser = ["trace", "debug", "info", "warn", "error"])]
    pub log_level: Option<String>,

    /// Output format.
    #[arg(long, global = true, default_value = "text")]
    pub output: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON.
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Extract rule-exclusion candidates from a feedback suggestion.
    Suggest(SuggestArgs),

    /// Build rule-exclusion drafts from false-positive feedback records.
    Draft(DraftArgs),

    /// Manage configuration.
    Config(ConfigArgs),
}

// ---- suggest ----

/// Scan free-text suggestion for rule ids and tags.
#[derive(Args, Debug)]
pub struct SuggestArgs {
    /// Suggestion text. Multiple words are joined with spaces.
    ///
    /// Reads stdin when neither TEXT nor --file is given.
    #[arg(conflicts_with = "file")]
    pub text: Vec<String>,

    /// Read the suggestion from a file.
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Print only the first candidate (empty value when nothing matched).
    #[arg(long)]
    pub first: bool,

    /// Disable the bare 5-7 digit fallback scan.
    #[arg(long)]
    pub no_fallback: bool,
}

// ---- draft ----

/// Build exclusion drafts from feedback JSON.
#[derive(Args, Debug)]
pub struct DraftArgs {
    /// Feedback JSON file (a single record or an array). Use `-` for stdin.
    pub input: PathBuf,

    /// Also render the SecLang directives for the drafts.
    #[arg(long)]
    pub directives: bool,
}

// ---- config ----

/// Manage logflux configuration.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Validate the configuration file and report errors.
    Validate,
    /// Show the effective configuration (file + env overrides + defaults).
    Show {
        /// Show only a specific section (general, feedback, exclusion).
        #[arg(long)]
        section: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parse_suggest_text() {
        let cli = Cli::try_parse_from(["logflux", "suggest", "removeById", "941120"])
            .expect("parse succeeded");
        match cli.command {
            Commands::Suggest(args) => {
                assert_eq!(args.text, vec!["removeById", "941120"]);
                assert!(args.file.is_none());
                assert!(!args.first, "first should default to false");
                assert!(!args.no_fallback);
            }
            _ => panic!("expected Suggest command"),
        }
    }

    #[test]
    fn test_cli_parse_suggest_file_and_first() {
        let cli = Cli::try_parse_from([
            "logflux",
            "suggest",
            "--file",
            "/tmp/suggestion.txt",
            "--first",
            "--no-fallback",
        ])
        .expect("parse succeeded");
        match cli.command {
            Commands::Suggest(args) => {
                assert_eq!(args.file, Some(PathBuf::from("/tmp/suggestion.txt")));
                assert!(args.first);
                assert!(args.no_fallback);
                assert!(args.text.is_empty());
            }
            _ => panic!("expected Suggest command"),
        }
    }

    #[test]
    fn test_cli_parse_suggest_text_conflicts_with_file() {
        let result = Cli::try_parse_from(["logflux", "suggest", "tag x", "--file", "a.txt"]);
        assert!(result.is_err(), "TEXT and --file should conflict");
    }

    #[test]
    fn test_cli_parse_draft() {
        let cli = Cli::try_parse_from(["logflux", "draft", "feedback.json", "--directives"])
            .expect("parse succeeded");
        match cli.command {
            Commands::Draft(args) => {
                assert_eq!(args.input, PathBuf::from("feedback.json"));
                assert!(args.directives);
            }
            _ => panic!("expected Draft command"),
        }
    }

    #[test]
    fn test_cli_parse_draft_requires_input() {
        assert!(Cli::try_parse_from(["logflux", "draft"]).is_err());
    }

    #[test]
    fn test_cli_parse_config_validate() {
        let cli = Cli::try_parse_from(["logflux", "config", "validate"]).expect("parse succeeded");
        match cli.command {
            Commands::Config(args) => assert!(matches!(args.action, ConfigAction::Validate)),
            _ => panic!("expected Config command"),
        }
    }

    #[test]
    fn test_cli_parse_config_show_section() {
        let cli = Cli::try_parse_from(["logflux", "config", "show", "--section", "exclusion"])
            .expect("parse succeeded");
        match cli.command {
            Commands::Config(args) => match args.action {
                ConfigAction::Show { section } => {
                    assert_eq!(section.as_deref(), Some("exclusion"));
                }
                _ => panic!("expected Show action"),
            },
            _ => panic!("expected Config command"),
        }
    }

    #[test]
    fn test_cli_global_flags() {
        let cli = Cli::try_parse_from([
            "logflux",
            "suggest",
            "x",
            "--output",
            "json",
            "--log-level",
            "debug",
            "--config",
            "/etc/logflux.toml",
        ])
        .expect("parse succeeded");
        assert_eq!(cli.output, OutputFormat::Json);
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
        assert_eq!(cli.config, Some(PathBuf::from("/etc/logflux.toml")));
    }

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["logflux", "config", "validate"]).expect("parse succeeded");
        assert_eq!(cli.output, OutputFormat::Text);
        assert!(cli.config.is_none());
        assert!(cli.log_level.is_none());
    }

    #[test]
    fn test_cli_rejects_unknown_log_level() {
        let result = Cli::try_parse_from(["logflux", "--log-level", "verbose", "config", "validate"]);
        assert!(result.is_err(), "unknown log level should be rejected");

        let result = Cli::try_parse_from(["logflux", "--log-level", "DEBUG", "config", "validate"]);
        assert!(result.is_err(), "log level matches config values exactly");

        for level in ["trace", "debug", "info", "warn", "error"] {
            let cli = Cli::try_parse_from(["logflux", "--log-level", level, "config", "validate"])
                .expect("known level should parse");
            assert_eq!(cli.log_level.as_deref(), Some(level));
        }
    }

    #[test]
    fn test_cli_rejects_unknown_output_format() {
        assert!(Cli::try_parse_from(["logflux", "--output", "yaml", "config", "validate"]).is_err());
    }

    #[test]
    fn test_cli_command_factory_is_consistent() {
        Cli::command().debug_assert();
    }
}

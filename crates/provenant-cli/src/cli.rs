//! CLI command definitions and argument parsing.

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// Provenant - Provenance, trust and AI usage metadata for documents.
#[derive(Debug, Parser)]
#[command(name = "provenant")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Configuration file path (default: ~/.provenant/config.toml)
    #[arg(short, long, global = true, env = "PROVENANT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, global = true, default_value = "table")]
    pub format: CliFormat,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CliFormat {
    /// Human-readable tables (default)
    Table,
    /// Full report as JSON
    Json,
    /// Report as flat dotted keys
    Flat,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Analyze text documents
    Analyze(AnalyzeArgs),

    /// Inspect or check configuration
    Config(ConfigArgs),
}

/// Arguments for the analyze command.
#[derive(Debug, Parser)]
pub struct AnalyzeArgs {
    /// Files to analyze (txt, md, html)
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Declared license, e.g. CC-BY-4.0
    #[arg(short, long)]
    pub license: Option<String>,

    /// Declared document type, e.g. research_paper
    #[arg(short = 't', long)]
    pub doc_type: Option<String>,

    /// JSON file of NER entities applied to every input file
    #[arg(long)]
    pub ner: Option<PathBuf>,
}

/// Arguments for the config command.
#[derive(Debug, Parser)]
pub struct ConfigArgs {
    /// Config action
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Config actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration as TOML
    Show,

    /// Validate a configuration file
    Check {
        /// Configuration file to check
        path: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_analyze() {
        let cli = Cli::try_parse_from([
            "provenant",
            "-vv",
            "--format",
            "json",
            "analyze",
            "a.txt",
            "b.md",
            "--license",
            "CC-BY",
            "-t",
            "thesis",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.format, CliFormat::Json);
        match cli.command {
            Command::Analyze(args) => {
                assert_eq!(args.files.len(), 2);
                assert_eq!(args.license.as_deref(), Some("CC-BY"));
                assert_eq!(args.doc_type.as_deref(), Some("thesis"));
                assert!(args.ner.is_none());
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_analyze_requires_files() {
        assert!(Cli::try_parse_from(["provenant", "analyze"]).is_err());
    }

    #[test]
    fn test_parse_config_check() {
        let cli = Cli::try_parse_from(["provenant", "config", "check", "cfg.toml", "--no-color"])
            .unwrap();
        assert!(cli.no_color);
        assert_eq!(cli.format, CliFormat::Table);
        assert!(matches!(
            cli.command,
            Command::Config(ConfigArgs {
                action: ConfigAction::Check { .. }
            })
        ));
    }
}

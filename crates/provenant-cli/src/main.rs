//! Provenant CLI - document provenance and AI usage analysis.

use clap::Parser;
use provenant_cli::{
    cli::{Cli, Command},
    commands, config, logging,
    output::Formatter,
    Result,
};
use provenant_report::Analyzer;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let formatter = Formatter::new(cli.format, !cli.no_color);
    let config_path = cli.config.as_deref();

    match cli.command {
        Command::Analyze(args) => {
            let analyzer = Analyzer::new(config::load(config_path)?)?;
            commands::execute_analyze(args, &analyzer, &formatter)
        }
        Command::Config(args) => {
            commands::execute_config(args, || config::load(config_path), &formatter)
        }
    }
}

//! Config command implementation.

use crate::cli::{ConfigAction, ConfigArgs};
use crate::config;
use crate::error::Result;
use crate::output::Formatter;
use provenant_report::EngineConfig;

/// Execute the config command.
///
/// `show` prints the effective configuration; `check` loads and validates
/// a file independently of the effective one.
pub fn execute_config(
    args: ConfigArgs,
    effective: impl FnOnce() -> Result<EngineConfig>,
    formatter: &Formatter,
) -> Result<()> {
    match args.action {
        ConfigAction::Show => {
            let config = effective()?;
            print!("{}", config.to_toml()?);
        }
        ConfigAction::Check { path } => {
            config::load_file(&path)?;
            println!(
                "{}",
                formatter.success(&format!("{} is a valid configuration", path.display()))
            );
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::CliFormat;
    use crate::error::CliError;
    use std::fs;
    use tempfile::TempDir;

    fn formatter() -> Formatter {
        Formatter::new(CliFormat::Table, false)
    }

    #[test]
    fn test_show_defaults() {
        let args = ConfigArgs {
            action: ConfigAction::Show,
        };
        assert!(execute_config(args, || Ok(EngineConfig::default()), &formatter()).is_ok());
    }

    #[test]
    fn test_check_does_not_load_effective_config() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("strict.toml");
        fs::write(&path, EngineConfig::strict().to_toml().unwrap()).unwrap();

        let args = ConfigArgs {
            action: ConfigAction::Check { path },
        };
        let effective = || Err(CliError::Config("unused".into()));
        assert!(execute_config(args, effective, &formatter()).is_ok());
    }

    #[test]
    fn test_check_reports_invalid_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.toml");
        fs::write(&path, "[trust]\nprecision = 40\n").unwrap();

        let args = ConfigArgs {
            action: ConfigAction::Check { path },
        };
        let err = execute_config(args, || Ok(EngineConfig::default()), &formatter()).unwrap_err();
        assert!(err.to_string().contains("broken.toml"));
    }
}

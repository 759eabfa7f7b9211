//! Configuration file resolution for the CLI.

use crate::error::{CliError, Result};
use provenant_report::EngineConfig;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Get the default configuration file path.
pub fn default_path() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
    Ok(home.join(".provenant").join("config.toml"))
}

/// Load the engine configuration.
///
/// An explicit path must exist. Without one, the default path is used when
/// present, otherwise the built-in defaults.
pub fn load(explicit: Option<&Path>) -> Result<EngineConfig> {
    if let Some(path) = explicit {
        return load_file(path);
    }

    match default_path() {
        Ok(path) if path.exists() => load_file(&path),
        _ => {
            debug!("No configuration file, using built-in defaults");
            Ok(EngineConfig::default())
        }
    }
}

/// Load and validate one configuration file, naming it in any error.
pub fn load_file(path: &Path) -> Result<EngineConfig> {
    debug!("Loading configuration from {}", path.display());
    EngineConfig::load(path).map_err(|e| CliError::Config(format!("{}: {}", path.display(), e)))
}

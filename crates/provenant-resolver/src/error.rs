//! Error types for the Resolver

use thiserror::Error;

/// Errors that can occur while setting up resolution
#[derive(Error, Debug)]
pub enum ResolverError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

//! Error types for the analysis pipeline

use provenant_extractor::ExtractorError;
use provenant_policy::PolicyError;
use provenant_resolver::ResolverError;
use provenant_trust::TrustError;
use thiserror::Error;

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, EngineError>;

/// Errors raised while building the pipeline or emitting reports
///
/// Component variants are configuration errors and are raised before any
/// document is analyzed.
#[derive(Error, Debug)]
pub enum EngineError {
    /// Invalid `[extractor]` section
    #[error("[extractor] {0}")]
    Extractor(#[from] ExtractorError),

    /// Invalid `[resolver]` section
    #[error("[resolver] {0}")]
    Resolver(#[from] ResolverError),

    /// Invalid `[trust]` section
    #[error("[trust] {0}")]
    Trust(#[from] TrustError),

    /// Invalid `[policy]` section
    #[error("[policy] {0}")]
    Policy(#[from] PolicyError),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// TOML serialization error
    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

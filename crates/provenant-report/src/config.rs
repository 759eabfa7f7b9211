//! Pipeline configuration
//!
//! One TOML document with a section per stage:
//!
//! ```toml
//! [extractor]
//! max_scan_chars = 200000
//!
//! [resolver]
//! author_confidence_floor = 0.5
//!
//! [trust.weights]
//! authority = 0.3
//! document_type = 0.2
//! review = 0.25
//! currency = 0.15
//! completeness = 0.1
//!
//! [policy.document_type_restrictions]
//! legal_document = ["no_training"]
//! ```
//!
//! Missing sections and keys take their defaults; unknown ones are
//! rejected.

use crate::error::{EngineError, Result};
use provenant_extractor::{ExtractorConfig, ExtractorError};
use provenant_policy::PolicyConfig;
use provenant_resolver::{ResolverConfig, ResolverError};
use provenant_trust::TrustConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Configuration of every pipeline stage
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Signal extraction
    pub extractor: ExtractorConfig,
    /// Provenance resolution
    pub resolver: ResolverConfig,
    /// Trust scoring
    pub trust: TrustConfig,
    /// AI usage policy
    pub policy: PolicyConfig,
}

impl EngineConfig {
    /// Validate every section, reporting the first error with its section
    pub fn validate(&self) -> Result<()> {
        self.extractor
            .validate()
            .map_err(|e| EngineError::from(ExtractorError::Config(e)))?;
        self.resolver
            .validate()
            .map_err(|e| EngineError::from(ResolverError::Config(e)))?;
        self.trust.validate()?;
        self.policy.validate()?;
        Ok(())
    }

    /// Strict preset across all stages
    ///
    /// Extraction uses narrow scan windows so only cues near the head of
    /// the document count.
    pub fn strict() -> Self {
        Self {
            extractor: ExtractorConfig::aggressive(),
            resolver: ResolverConfig::strict(),
            trust: TrustConfig::strict(),
            policy: PolicyConfig::strict(),
        }
    }

    /// Lenient preset across all stages
    pub fn lenient() -> Self {
        Self {
            extractor: ExtractorConfig::lenient(),
            resolver: ResolverConfig::lenient(),
            trust: TrustConfig::lenient(),
            policy: PolicyConfig::default(),
        }
    }

    /// Parse configuration from a TOML string without validating it
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Serialize configuration to a TOML string
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Read, parse and validate a configuration file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config = Self::from_toml(&contents)?;
        config.validate()?;
        Ok(config)
    }
}

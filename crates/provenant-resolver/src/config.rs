//! Configuration for the Resolver

use provenant_domain::SignalOrigin;
use serde::{Deserialize, Serialize};

/// Rank of each evidence origin for fields resolved by precedence
///
/// Lower ranks win. Declared metadata outranks heuristic cues by default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OriginPrecedence {
    /// Rank of declared metadata
    pub metadata: u32,
    /// Rank of content heuristics
    pub content: u32,
    /// Rank of NER output
    pub ner: u32,
}

impl OriginPrecedence {
    /// Rank of an origin
    pub fn rank(&self, origin: SignalOrigin) -> u32 {
        match origin {
            SignalOrigin::Metadata => self.metadata,
            SignalOrigin::Content => self.content,
            SignalOrigin::Ner => self.ner,
        }
    }
}

impl Default for OriginPrecedence {
    fn default() -> Self {
        Self {
            metadata: 0,
            content: 1,
            ner: 2,
        }
    }
}

/// Configuration for the Resolver
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResolverConfig {
    /// Minimum confidence for an author candidate to be kept
    pub author_confidence_floor: f64,

    /// Confidence from which rival values of a single-valued field are reported
    pub ambiguity_threshold: f64,

    /// Origin ranks for document type, review status and license
    pub precedence: OriginPrecedence,
}

impl ResolverConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if !(0.0..=1.0).contains(&self.author_confidence_floor) {
            return Err(format!(
                "author_confidence_floor must be in [0, 1], got {}",
                self.author_confidence_floor
            ));
        }
        if !(0.0..=1.0).contains(&self.ambiguity_threshold) {
            return Err(format!(
                "ambiguity_threshold must be in [0, 1], got {}",
                self.ambiguity_threshold
            ));
        }
        Ok(())
    }

    /// Strict preset: only high-confidence authors are kept
    pub fn strict() -> Self {
        Self {
            author_confidence_floor: 0.7,
            ambiguity_threshold: 0.6,
            precedence: OriginPrecedence::default(),
        }
    }

    /// Lenient preset: weak author cues are kept too
    pub fn lenient() -> Self {
        Self {
            author_confidence_floor: 0.3,
            ambiguity_threshold: 0.8,
            precedence: OriginPrecedence::default(),
        }
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            author_confidence_floor: 0.5,
            ambiguity_threshold: 0.7,
            precedence: OriginPrecedence::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_are_valid() {
        assert!(ResolverConfig::default().validate().is_ok());
        assert!(ResolverConfig::strict().validate().is_ok());
        assert!(ResolverConfig::lenient().validate().is_ok());
    }

    #[test]
    fn test_floor_out_of_range() {
        let config = ResolverConfig {
            author_confidence_floor: 1.2,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = ResolverConfig {
            ambiguity_threshold: f64::NAN,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_default_precedence_prefers_metadata() {
        let precedence = OriginPrecedence::default();
        assert!(precedence.rank(SignalOrigin::Metadata) < precedence.rank(SignalOrigin::Content));
        assert!(precedence.rank(SignalOrigin::Content) < precedence.rank(SignalOrigin::Ner));
    }

    #[test]
    fn test_toml_round_trip() {
        let config = ResolverConfig::strict();
        let parsed = ResolverConfig::from_toml(&config.to_toml().unwrap()).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_partial_toml() {
        let config = ResolverConfig::from_toml("[precedence]\nner = 0\n").unwrap();
        assert_eq!(config.precedence.ner, 0);
        assert_eq!(config.precedence.metadata, 0);
        assert_eq!(config.author_confidence_floor, 0.5);
    }
}

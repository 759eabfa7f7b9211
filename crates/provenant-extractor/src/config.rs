//! Configuration for the Extractor

use serde::{Deserialize, Serialize};

/// Scan windows used by the extraction rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExtractorConfig {
    /// Maximum number of characters scanned; longer text is truncated
    pub max_scan_chars: usize,

    /// Number of leading non-empty lines searched for a byline
    pub header_lines: usize,

    /// Number of leading characters searched for dates
    pub head_chars: usize,

    /// Number of leading paragraphs searched for institutions
    pub paragraphs: usize,
}

impl ExtractorConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_scan_chars == 0 {
            return Err("max_scan_chars must be greater than 0".to_string());
        }
        if self.header_lines == 0 {
            return Err("header_lines must be greater than 0".to_string());
        }
        if self.head_chars == 0 {
            return Err("head_chars must be greater than 0".to_string());
        }
        if self.head_chars > self.max_scan_chars {
            return Err("head_chars cannot exceed max_scan_chars".to_string());
        }
        if self.paragraphs == 0 {
            return Err("paragraphs must be greater than 0".to_string());
        }
        Ok(())
    }
}

impl Default for ExtractorConfig {
    /// Default configuration with balanced settings
    fn default() -> Self {
        Self {
            max_scan_chars: 200_000,
            header_lines: 10,
            head_chars: 1_000,
            paragraphs: 5,
        }
    }
}

impl ExtractorConfig {
    /// Aggressive preset: narrow windows, fewer but more local cues
    pub fn aggressive() -> Self {
        Self {
            max_scan_chars: 50_000,
            header_lines: 5,
            head_chars: 500,
            paragraphs: 3,
        }
    }

    /// Lenient preset: wide windows, more candidates for the resolver
    pub fn lenient() -> Self {
        Self {
            max_scan_chars: 1_000_000,
            header_lines: 20,
            head_chars: 3_000,
            paragraphs: 10,
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(ExtractorConfig::default().validate().is_ok());
    }

    #[test]
    fn test_aggressive_config_is_valid() {
        assert!(ExtractorConfig::aggressive().validate().is_ok());
    }

    #[test]
    fn test_lenient_config_is_valid() {
        assert!(ExtractorConfig::lenient().validate().is_ok());
    }

    #[test]
    fn test_invalid_zero_windows() {
        let mut config = ExtractorConfig::default();
        config.header_lines = 0;
        assert!(config.validate().is_err());

        let mut config = ExtractorConfig::default();
        config.max_scan_chars = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_head_larger_than_scan_is_invalid() {
        let mut config = ExtractorConfig::default();
        config.head_chars = config.max_scan_chars + 1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = ExtractorConfig::from_toml("header_lines = 4").unwrap();
        assert_eq!(config.header_lines, 4);
        assert_eq!(config.max_scan_chars, 200_000);
    }

    #[test]
    fn test_toml_round_trip() {
        let config = ExtractorConfig::lenient();
        let toml_str = config.to_toml().unwrap();
        let parsed = ExtractorConfig::from_toml(&toml_str).unwrap();
        assert_eq!(config, parsed);
    }
}

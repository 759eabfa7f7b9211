//! Error types for trust scoring

use thiserror::Error;

/// Configuration errors raised before any document is scored
///
/// Every variant names the offending dimension, table key or parameter so
/// the configuration can be fixed without guessing.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TrustError {
    /// A dimension has no weight
    #[error("Configuration error: missing weight for dimension '{dimension}'")]
    MissingWeight {
        /// Dimension name
        dimension: String,
    },

    /// A weight names a dimension that does not exist
    #[error("Configuration error: unknown dimension '{name}' in weights")]
    UnknownDimension {
        /// Offending name
        name: String,
    },

    /// A weight is negative, above one or not a number
    #[error("Configuration error: weight {value} for dimension '{dimension}' must be in [0, 1]")]
    InvalidWeight {
        /// Dimension name
        dimension: String,
        /// Offending weight
        value: f64,
    },

    /// Weights do not sum to one
    #[error("Configuration error: weights sum to {sum}, expected 1.0")]
    WeightSum {
        /// Actual sum
        sum: f64,
    },

    /// A required table entry is absent
    #[error("Configuration error: table '{table}' has no entry for '{key}'")]
    MissingTableEntry {
        /// Table name
        table: String,
        /// Missing key
        key: String,
    },

    /// A table key is not part of its vocabulary
    #[error("Configuration error: table '{table}' has unknown key '{key}'")]
    UnknownTableKey {
        /// Table name
        table: String,
        /// Offending key
        key: String,
    },

    /// A table score is outside [0, 1]
    #[error("Configuration error: table '{table}' entry '{key}' = {value} must be in [0, 1]")]
    InvalidTableEntry {
        /// Table name
        table: String,
        /// Entry key
        key: String,
        /// Offending value
        value: f64,
    },

    /// A scalar parameter is out of range
    #[error("Configuration error: parameter '{name}' = {value} is out of range")]
    InvalidParameter {
        /// Parameter name
        name: String,
        /// Offending value
        value: f64,
    },
}

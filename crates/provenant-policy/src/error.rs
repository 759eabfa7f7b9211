//! Error types for the policy engine

use thiserror::Error;

/// Policy configuration errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PolicyError {
    /// A stricter license would allow an action a looser one denies
    #[error("Configuration error: '{stricter}' allows '{action}' but less restrictive '{looser}' does not")]
    NonMonotonic {
        /// The more restrictive license
        stricter: String,
        /// The less restrictive license
        looser: String,
        /// The offending action
        action: String,
    },

    /// An override names a license that does not exist
    #[error("Configuration error: unknown license '{0}' in overrides")]
    UnknownLicense(String),

    /// A restriction name is not recognized
    #[error("Configuration error: unknown restriction '{0}'")]
    UnknownRestriction(String),

    /// A document type name is not recognized
    #[error("Configuration error: unknown document type '{0}' in document_type_restrictions")]
    UnknownDocumentType(String),
}

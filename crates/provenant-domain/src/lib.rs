//! Provenant Domain Layer
//!
//! Data model shared by every stage of the provenance pipeline. This crate
//! holds value objects and vocabularies only; the algorithms live in the
//! extractor, resolver, trust and policy crates.
//!
//! ## Key Concepts
//!
//! - **RawDocument**: Immutable text plus identity fields handed over by ingestion
//! - **SignalBag**: Append-only, confidence-scored candidates per provenance field
//! - **ProvenanceRecord**: The single resolved record derived from a bag
//! - **TrustScore**: Five explained dimension scores and their weighted sum
//! - **PermissionSet**: What AI consumers may do with the document
//!
//! ## Pipeline
//!
//! ```text
//! RawDocument → Extractor → SignalBag → Resolver → ProvenanceRecord
//!            → Trust Scorer → TrustScore → Policy Engine → PermissionSet
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod document;
pub mod license;
pub mod permission;
pub mod provenance;
pub mod signal;
pub mod taxonomy;
pub mod trust;

// Re-exports for convenience
pub use document::{DocumentFormat, DocumentMetadata, EntityType, NerEntity, RawDocument};
pub use license::{LicenseType, Restriction};
pub use permission::{Action, PermissionSet};
pub use provenance::ProvenanceRecord;
pub use signal::{Candidate, SignalBag, SignalCategory, SignalOrigin};
pub use taxonomy::{DocumentType, ReviewStatus};
pub use trust::{Dimension, DimensionScore, TrustLevel, TrustScore};

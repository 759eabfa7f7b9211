//! Provenant Resolver
//!
//! Reduces a [`SignalBag`](provenant_domain::SignalBag) to a single
//! [`ProvenanceRecord`](provenant_domain::ProvenanceRecord) and the usage
//! signals (license, restrictions) the policy engine consumes.
//!
//! # Resolution rules
//!
//! - **Single-valued fields** (institution, date, title): top candidate by
//!   confidence, then rule order, then value, then insertion order
//! - **Document type, review status, license**: evidence origin precedence
//!   first (declared metadata outranks heuristics), then the same key
//! - **Authors**: every candidate at or above the confidence floor,
//!   deduplicated case-insensitively
//!
//! Conflicting high-confidence candidates produce an
//! [`AmbiguityWarning`], never an error. The resolver never looks at the
//! document again, so the same bag always resolves to the same record.

#![warn(missing_docs)]

mod config;
mod error;
mod resolver;

pub use config::{OriginPrecedence, ResolverConfig};
pub use error::ResolverError;
pub use resolver::{AmbiguityWarning, Resolution, Resolver, UsageSignals};

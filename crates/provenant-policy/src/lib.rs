//! Provenant AI Usage Policy
//!
//! Decides what automated AI consumers may do with a document: summarize,
//! quote, train on, or redistribute it.
//!
//! The decision is a pure table lookup in three steps:
//!
//! 1. The license row sets the baseline (built-in table, optionally
//!    overridden from configuration)
//! 2. Explicit restriction signals found in the text remove permissions
//! 3. Configured document type restrictions remove permissions
//!
//! Later steps only ever remove. An undetermined license takes the most
//! restrictive row, and [`PolicyConfig::validate`] rejects any table in
//! which a stricter license would allow more than a looser one.

#![warn(missing_docs)]

mod config;
mod engine;
mod error;

pub use config::{check_monotonic, PolicyConfig, PolicyRow};
pub use engine::{evaluate_permissions, restricted_action, PolicyEngine};
pub use error::PolicyError;

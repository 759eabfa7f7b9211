//! Provenant Trust Scoring
//!
//! Computes five independent dimension scores from a
//! [`ProvenanceRecord`](provenant_domain::ProvenanceRecord) and its signal
//! bag, then combines them with configured weights.
//!
//! | Dimension | Source |
//! |-----------|--------|
//! | authority | institution tier, corroborating candidates, author count |
//! | document_type | `document_type_scores`, default for unlisted types |
//! | review | `review_status_scores` |
//! | currency | half-life decay on age, fixed score when undated |
//! | completeness | the record's completeness |
//!
//! Every dimension carries explanation strings naming the table entry or
//! signal that produced it. A weight table that does not cover all five
//! dimensions or does not sum to one is a [`TrustError`] at construction
//! time; scores are never renormalized.
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use provenant_domain::{ProvenanceRecord, SignalBag, TrustLevel};
//! use provenant_trust::{TrustConfig, TrustScorer};
//!
//! let scorer = TrustScorer::new(TrustConfig::default()).unwrap();
//! let date = NaiveDate::from_ymd_opt(2025, 6, 30).unwrap();
//! let score = scorer.score(&ProvenanceRecord::empty(), &SignalBag::new(), date);
//! assert_eq!(score.level, TrustLevel::Low);
//! ```

#![warn(missing_docs)]

mod config;
pub mod dimensions;
mod error;
mod scorer;

pub use config::{
    AuthorityConfig, CurrencyConfig, InstitutionTier, Thresholds, TrustConfig, MAX_PRECISION,
    WEIGHT_SUM_TOLERANCE,
};
pub use error::TrustError;
pub use scorer::{compute_trust, TrustScorer};

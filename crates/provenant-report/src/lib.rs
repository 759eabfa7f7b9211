//! Provenant Report
//!
//! Wires the pipeline stages together and assembles their output into a
//! seven-block [`Report`]:
//!
//! ```text
//! RawDocument ─▶ Extractor ─▶ Resolver ─▶ TrustScorer ─▶ PolicyEngine ─▶ Report
//! ```
//!
//! | Block | Contents |
//! |-------|----------|
//! | `identity` | document id, filename, hash, size, format |
//! | `provenance` | resolved authors, institution, date, type, review status |
//! | `content` | text statistics and signal counts |
//! | `trust` | overall score, level, weights, explained dimensions |
//! | `ai_use` | permissions, attribution, conditions, decision trace |
//! | `explainability` | inference sources, rules fired, warnings |
//! | `technical` | schema, rule set and processor versions, timestamps |
//!
//! # Example
//!
//! ```
//! use provenant_domain::RawDocument;
//! use provenant_report::{Analyzer, EngineConfig};
//!
//! let analyzer = Analyzer::new(EngineConfig::default()).unwrap();
//! let doc = RawDocument::from_bytes(
//!     "reefs.txt",
//!     b"A Study of Coral Reefs\nBy Dr. Jane Smith, Stanford University, 2023\n",
//! );
//! let report = analyzer.analyze(&doc, None);
//! assert_eq!(report.provenance.authors, vec!["Jane Smith"]);
//! assert!(report.ai_use.permissions.summarize);
//! ```
//!
//! Batches run in parallel on rayon with [`Analyzer::analyze_batch`];
//! documents share nothing but the read-only configuration.

#![warn(missing_docs)]

mod analyzer;
mod config;
mod error;
mod report;
mod summary;

pub use analyzer::{Analyzer, BatchItem, BatchOutcome, LOW_TRUST_CONDITION};
pub use config::EngineConfig;
pub use error::{EngineError, Result};
pub use report::{
    AiUseBlock, ContentBlock, DimensionBlock, ExplainabilityBlock, IdentityBlock,
    PermissionsBlock, ProvenanceBlock, Report, TechnicalBlock, TrustBlock, TrustDimensions,
    PROCESSOR_VERSION, SCHEMA_VERSION,
};
pub use summary::{BatchFailure, BatchSummary};

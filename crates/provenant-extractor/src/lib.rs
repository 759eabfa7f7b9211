//! Provenant Extractor
//!
//! Applies a fixed table of heuristic rules, plus optional NER output, to a
//! raw document and collects every candidate value into a
//! [`SignalBag`](provenant_domain::SignalBag).
//!
//! # Architecture
//!
//! ```text
//! RawDocument (+ NER entities) → Extractor → SignalBag → Resolver
//! ```
//!
//! # Rule evaluation
//!
//! - **Metadata rules** read the declarations supplied by ingestion
//! - **Content rules** scan the text: bylines, institutions, dates, type,
//!   review, license and restriction cues
//! - **NER rules** turn PERSON/ORG/DATE entities into candidates scaled by
//!   the entity confidence
//!
//! Each rule runs exactly once per document in [`RuleId::ALL`] order and
//! nothing is ever suppressed; choosing between candidates is the resolver's
//! job. Empty text produces an empty bag, not an error.
//!
//! # Example Usage
//!
//! ```
//! use provenant_domain::{RawDocument, SignalCategory};
//! use provenant_extractor::{Extractor, ExtractorConfig};
//!
//! let extractor = Extractor::new(ExtractorConfig::default()).unwrap();
//! let doc = RawDocument::from_bytes(
//!     "reefs.txt",
//!     b"A Study of Coral Reefs\nBy Dr. Jane Smith, Stanford University, 2023\n",
//! );
//!
//! let bag = extractor.extract(&doc, None);
//! assert_eq!(bag.candidates(SignalCategory::Author)[0].value, "Jane Smith");
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod extractor;
mod patterns;
mod profile;
mod rules;


pub use config::ExtractorConfig;
pub use error::ExtractorError;
pub use extractor::{Extraction, Extractor};
pub use profile::ContentProfile;
pub use rules::{RuleId, RULE_SET_VERSION};

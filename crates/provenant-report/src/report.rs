//! The seven-block analysis report
//!
//! Field names are a compatibility surface for downstream JSON consumers.
//! Renaming or removing one requires bumping [`SCHEMA_VERSION`].

use chrono::{DateTime, NaiveDate, Utc};
use provenant_domain::{
    Action, Dimension, DimensionScore, DocumentType, LicenseType, PermissionSet, RawDocument,
    ReviewStatus, SignalBag, SignalCategory, TrustLevel, TrustScore,
};
use provenant_extractor::{ContentProfile, RULE_SET_VERSION};
use provenant_resolver::Resolution;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Version of the report field layout
pub const SCHEMA_VERSION: &str = "1.0.0";

/// Version of this processor
pub const PROCESSOR_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Analysis report of one document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// Document identity
    pub identity: IdentityBlock,
    /// Resolved provenance
    pub provenance: ProvenanceBlock,
    /// Content summary
    pub content: ContentBlock,
    /// Trust scores
    pub trust: TrustBlock,
    /// AI usage permissions
    pub ai_use: AiUseBlock,
    /// How the values above were inferred
    pub explainability: ExplainabilityBlock,
    /// Versions and timestamps
    pub technical: TechnicalBlock,
}

/// Identity of the analyzed document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdentityBlock {
    /// Report-unique document id (UUID v7)
    pub document_id: String,
    /// Declared filename
    pub filename: String,
    /// SHA-256 of the document bytes, hex encoded
    pub content_hash: String,
    /// Size of the document in bytes
    pub size_bytes: u64,
    /// Format tag
    pub format: String,
    /// MIME type of the format
    pub mime_type: String,
}

/// Resolved provenance fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProvenanceBlock {
    /// Title
    pub title: Option<String>,
    /// Authors in rank order
    pub authors: Vec<String>,
    /// Institution
    pub institution: Option<String>,
    /// Publication date
    pub publication_date: Option<NaiveDate>,
    /// Document type
    pub document_type: DocumentType,
    /// Review status
    pub review_status: ReviewStatus,
    /// Fraction of tracked fields populated
    pub completeness: f64,
    /// Generated citation
    pub citation: Option<String>,
}

/// Content features and signal statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentBlock {
    /// Whitespace-separated words
    pub word_count: usize,
    /// Lines of text
    pub line_count: usize,
    /// A references section was found
    pub has_references: bool,
    /// In-text citations were found
    pub has_citations: bool,
    /// Declared keywords
    pub keywords: Vec<String>,
    /// Candidates per signal category
    pub signal_counts: BTreeMap<String, usize>,
    /// Candidates in total
    pub total_signals: usize,
}

/// Score and explanations of one dimension
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionBlock {
    /// Rounded score
    pub score: f64,
    /// Explanation trace
    pub explanations: Vec<String>,
}

/// The five trust dimensions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrustDimensions {
    /// Authority
    pub authority: DimensionBlock,
    /// Document type
    pub document_type: DimensionBlock,
    /// Review
    pub review: DimensionBlock,
    /// Currency
    pub currency: DimensionBlock,
    /// Completeness
    pub completeness: DimensionBlock,
}

/// Trust scores
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrustBlock {
    /// Rounded overall score
    pub overall_score: f64,
    /// Trust classification
    pub trust_level: TrustLevel,
    /// Dimension weights
    pub weights: BTreeMap<String, f64>,
    /// Dimension scores
    pub dimensions: TrustDimensions,
}

/// Permission per action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionsBlock {
    /// Summaries permitted
    pub summarize: bool,
    /// Quotes permitted
    pub quote: bool,
    /// Training permitted
    pub train: bool,
    /// Redistribution permitted
    pub redistribute: bool,
}

/// AI usage permissions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiUseBlock {
    /// License the permissions derive from
    pub license: LicenseType,
    /// Permission per action
    pub permissions: PermissionsBlock,
    /// Attribution required
    pub requires_attribution: bool,
    /// Commercial use allowed
    pub commercial_use_allowed: bool,
    /// Conditions on use
    pub conditions: Vec<String>,
    /// Suggested attribution
    pub attribution_text: Option<String>,
    /// Decision trace
    pub explanations: Vec<String>,
}

/// Inference trail
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExplainabilityBlock {
    /// Which candidate each provenance field came from
    pub inference_sources: Vec<String>,
    /// Rules that emitted at least one candidate
    pub rules_fired: Vec<String>,
    /// Input notes and ambiguity warnings
    pub warnings: Vec<String>,
}

/// Versions and timestamps
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechnicalBlock {
    /// Report layout version
    pub schema_version: String,
    /// Extraction rule set version
    pub rule_set_version: String,
    /// Processor version
    pub processor_version: String,
    /// When the report was produced
    pub processing_timestamp: DateTime<Utc>,
    /// Reference date for currency decay
    pub analysis_date: NaiveDate,
}

/// Stage outputs a report is assembled from
pub(crate) struct Stages<'a> {
    pub document_id: String,
    pub doc: &'a RawDocument,
    pub bag: &'a SignalBag,
    pub extraction_warnings: &'a [String],
    pub resolution: &'a Resolution,
    pub trust: &'a TrustScore,
    pub permissions: &'a PermissionSet,
    pub precision: u32,
    pub timestamp: DateTime<Utc>,
}

impl Report {
    pub(crate) fn assemble(stages: Stages<'_>) -> Self {
        let Stages {
            document_id,
            doc,
            bag,
            extraction_warnings,
            resolution,
            trust,
            permissions,
            precision,
            timestamp,
        } = stages;
        let record = &resolution.record;
        let profile = ContentProfile::from_document(doc);

        let dimension = |d: Dimension| -> DimensionBlock {
            trust
                .dimension(d)
                .map(|s: &DimensionScore| DimensionBlock {
                    score: round(s.score, precision),
                    explanations: s.explanations.clone(),
                })
                .unwrap_or(DimensionBlock {
                    score: 0.0,
                    explanations: Vec::new(),
                })
        };

        let mut warnings = extraction_warnings.to_vec();
        warnings.extend(resolution.warnings.iter().map(|w| w.to_string()));

        Self {
            identity: IdentityBlock {
                document_id,
                filename: doc.filename.clone(),
                content_hash: doc.content_hash.clone(),
                size_bytes: doc.byte_size,
                format: doc.format.as_str().to_string(),
                mime_type: doc.format.mime_type().to_string(),
            },
            provenance: ProvenanceBlock {
                title: record.title.clone(),
                authors: record.authors.clone(),
                institution: record.institution.clone(),
                publication_date: record.publication_date,
                document_type: record.document_type,
                review_status: record.review_status,
                completeness: round(record.completeness(), precision),
                citation: record.citation.clone(),
            },
            content: ContentBlock {
                word_count: profile.word_count,
                line_count: profile.line_count,
                has_references: profile.has_references,
                has_citations: profile.has_citations,
                keywords: profile.keywords,
                signal_counts: SignalCategory::ALL
                    .iter()
                    .map(|c| (c.as_str().to_string(), bag.count(*c)))
                    .collect(),
                total_signals: bag.len(),
            },
            trust: TrustBlock {
                overall_score: trust.overall_rounded(precision),
                trust_level: trust.level,
                weights: trust
                    .weights
                    .iter()
                    .map(|(d, w)| (d.as_str().to_string(), *w))
                    .collect(),
                dimensions: TrustDimensions {
                    authority: dimension(Dimension::Authority),
                    document_type: dimension(Dimension::DocumentType),
                    review: dimension(Dimension::Review),
                    currency: dimension(Dimension::Currency),
                    completeness: dimension(Dimension::Completeness),
                },
            },
            ai_use: AiUseBlock {
                license: permissions.license,
                permissions: PermissionsBlock {
                    summarize: permissions.allows(Action::Summarize),
                    quote: permissions.allows(Action::Quote),
                    train: permissions.allows(Action::Train),
                    redistribute: permissions.allows(Action::Redistribute),
                },
                requires_attribution: permissions.requires_attribution,
                commercial_use_allowed: permissions.commercial_use_allowed,
                conditions: permissions.conditions.clone(),
                attribution_text: permissions.attribution_text.clone(),
                explanations: permissions.explanations.clone(),
            },
            explainability: ExplainabilityBlock {
                inference_sources: resolution.trace.clone(),
                rules_fired: bag.rules_fired(),
                warnings,
            },
            technical: TechnicalBlock {
                schema_version: SCHEMA_VERSION.to_string(),
                rule_set_version: RULE_SET_VERSION.to_string(),
                processor_version: PROCESSOR_VERSION.to_string(),
                processing_timestamp: timestamp,
                analysis_date: timestamp.date_naive(),
            },
        }
    }

    /// Compact JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Indented JSON
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Flat map of dotted keys such as `trust.overall_score` to JSON values
    ///
    /// Objects are flattened; arrays and scalars are kept as leaf values.
    pub fn flatten(&self) -> Result<BTreeMap<String, Value>, serde_json::Error> {
        let mut flat = BTreeMap::new();
        flatten_into(String::new(), serde_json::to_value(self)?, &mut flat);
        Ok(flat)
    }
}

fn flatten_into(prefix: String, value: Value, out: &mut BTreeMap<String, Value>) {
    match value {
        Value::Object(map) if !map.is_empty() => {
            for (key, child) in map {
                let path = if prefix.is_empty() {
                    key
                } else {
                    format!("{}.{}", prefix, key)
                };
                flatten_into(path, child, out);
            }
        }
        leaf => {
            out.insert(prefix, leaf);
        }
    }
}

fn round(value: f64, precision: u32) -> f64 {
    provenant_domain::trust::round_to(value, precision)
}

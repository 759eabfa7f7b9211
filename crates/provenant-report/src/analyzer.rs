//! End-to-end analysis pipeline

use crate::config::EngineConfig;
use crate::error::Result;
use crate::report::{Report, Stages};
use crate::summary::BatchSummary;
use chrono::{DateTime, Utc};
use provenant_domain::{NerEntity, RawDocument, TrustLevel};
use provenant_extractor::{Extractor, RULE_SET_VERSION};
use provenant_policy::PolicyEngine;
use provenant_resolver::Resolver;
use provenant_trust::TrustScorer;
use rayon::prelude::*;
use tracing::{debug, info};
use uuid::Uuid;

/// Condition added to the permissions of low-trust documents
pub const LOW_TRUST_CONDITION: &str = "Use with caution: low trust score";

/// A document queued for batch analysis
#[derive(Debug, Clone)]
pub struct BatchItem {
    /// The document
    pub document: RawDocument,
    /// Entities from an external NER pass, if any
    pub ner: Option<Vec<NerEntity>>,
}

impl BatchItem {
    /// Queue a document without NER output
    pub fn new(document: RawDocument) -> Self {
        Self {
            document,
            ner: None,
        }
    }

    /// Attach NER output
    pub fn with_ner(mut self, ner: Vec<NerEntity>) -> Self {
        self.ner = Some(ner);
        self
    }
}

/// Reports of a batch, in input order, with their summary
#[derive(Debug, Clone)]
pub struct BatchOutcome {
    /// One report per input document
    pub reports: Vec<Report>,
    /// Counters over the batch
    pub summary: BatchSummary,
}

/// Runs extraction, resolution, trust scoring and policy evaluation
///
/// All configuration is validated in [`Analyzer::new`]. After that,
/// analysis cannot fail: bad input degrades to sparse, low-trust reports.
/// The analyzer holds no mutable state and can be shared across threads.
#[derive(Debug, Clone)]
pub struct Analyzer {
    config: EngineConfig,
    extractor: Extractor,
    resolver: Resolver,
    scorer: TrustScorer,
    policy: PolicyEngine,
}

impl Analyzer {
    /// Build the pipeline, validating every stage's configuration
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        let analyzer = Self {
            extractor: Extractor::new(config.extractor.clone())?,
            resolver: Resolver::new(config.resolver.clone())?,
            scorer: TrustScorer::new(config.trust.clone())?,
            policy: PolicyEngine::new(config.policy.clone())?,
            config,
        };
        info!("Analyzer ready (rule set {})", RULE_SET_VERSION);
        Ok(analyzer)
    }

    /// The configuration in use
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Analyze a document as of now
    pub fn analyze(&self, doc: &RawDocument, ner: Option<&[NerEntity]>) -> Report {
        self.analyze_at(doc, ner, Utc::now())
    }

    /// Analyze a document as of `timestamp`
    ///
    /// The timestamp's date is the reference for currency decay, so a fixed
    /// timestamp gives reproducible scores.
    pub fn analyze_at(
        &self,
        doc: &RawDocument,
        ner: Option<&[NerEntity]>,
        timestamp: DateTime<Utc>,
    ) -> Report {
        debug!("Analyzing '{}' ({} bytes)", doc.filename, doc.byte_size);

        let extraction = self.extractor.extract_detailed(doc, ner);
        let resolution = self.resolver.resolve(&extraction.bag);
        let trust = self
            .scorer
            .score(&resolution.record, &extraction.bag, timestamp.date_naive());
        let mut permissions = self.policy.evaluate(&resolution.record, &resolution.usage);
        if trust.level == TrustLevel::Low {
            permissions.conditions.push(LOW_TRUST_CONDITION.to_string());
        }

        let report = Report::assemble(Stages {
            document_id: Uuid::now_v7().to_string(),
            doc,
            bag: &extraction.bag,
            extraction_warnings: &extraction.warnings,
            resolution: &resolution,
            trust: &trust,
            permissions: &permissions,
            precision: self.config.trust.precision,
            timestamp,
        });
        info!(
            "Analyzed '{}': trust {} ({}), license {}",
            doc.filename, report.trust.overall_score, report.trust.trust_level, report.ai_use.license
        );
        report
    }

    /// Analyze documents in parallel; reports keep the input order
    pub fn analyze_batch(&self, items: &[BatchItem]) -> BatchOutcome {
        self.analyze_batch_at(items, Utc::now())
    }

    /// Analyze documents in parallel as of `timestamp`
    pub fn analyze_batch_at(&self, items: &[BatchItem], timestamp: DateTime<Utc>) -> BatchOutcome {
        let reports: Vec<Report> = items
            .par_iter()
            .map(|item| self.analyze_at(&item.document, item.ner.as_deref(), timestamp))
            .collect();

        let mut summary = BatchSummary::new();
        for report in &reports {
            summary.record(report);
        }
        info!("{}", summary.summary());
        BatchOutcome { reports, summary }
    }
}

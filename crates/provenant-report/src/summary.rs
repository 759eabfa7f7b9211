//! Batch statistics

use crate::report::Report;
use provenant_domain::TrustLevel;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A document that could not be analyzed, with the reason
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchFailure {
    /// Declared filename or path
    pub document: String,
    /// Why it was not analyzed
    pub reason: String,
}

/// Counters collected over a batch
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchSummary {
    /// Documents analyzed
    pub documents: usize,
    /// Reports per trust level
    pub trust_levels: BTreeMap<TrustLevel, usize>,
    /// Warnings across all reports
    pub warnings: usize,
    /// Documents that never reached the pipeline
    pub failures: Vec<BatchFailure>,
}

impl BatchSummary {
    /// Create an empty summary
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an analyzed document
    pub fn record(&mut self, report: &Report) {
        self.documents += 1;
        *self.trust_levels.entry(report.trust.trust_level).or_insert(0) += 1;
        self.warnings += report.explainability.warnings.len();
    }

    /// Record a document that could not be analyzed
    pub fn record_failure(&mut self, document: impl Into<String>, reason: impl Into<String>) {
        self.failures.push(BatchFailure {
            document: document.into(),
            reason: reason.into(),
        });
    }

    /// Reports at a trust level
    pub fn at_level(&self, level: TrustLevel) -> usize {
        self.trust_levels.get(&level).copied().unwrap_or(0)
    }

    /// Whether any document failed
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    /// Get summary string
    pub fn summary(&self) -> String {
        let mut text = format!(
            "Analyzed {} document(s): {} high, {} medium, {} low trust; {} warning(s)",
            self.documents,
            self.at_level(TrustLevel::High),
            self.at_level(TrustLevel::Medium),
            self.at_level(TrustLevel::Low),
            self.warnings
        );
        if self.has_failures() {
            text.push_str(&format!("; {} failed", self.failures.len()));
        }
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_summary() {
        let summary = BatchSummary::new();
        assert_eq!(
            summary.summary(),
            "Analyzed 0 document(s): 0 high, 0 medium, 0 low trust; 0 warning(s)"
        );
        assert!(!summary.has_failures());
    }

    #[test]
    fn test_failures_are_listed() {
        let mut summary = BatchSummary::new();
        summary.record_failure("scan.pdf", "unsupported format 'pdf'");
        assert!(summary.has_failures());
        assert_eq!(summary.failures[0].document, "scan.pdf");
        assert!(summary.summary().ends_with("; 1 failed"));
    }
}

//! Resolved provenance record

use crate::{DocumentType, ReviewStatus};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Number of fields that count toward completeness
pub const TRACKED_FIELDS: usize = 5;

/// Best-effort provenance of a document
///
/// Derived once from a signal bag. Completeness is not stored: it is
/// recomputed from the tracked fields on every call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProvenanceRecord {
    /// Authors in rank order (possibly empty)
    pub authors: Vec<String>,
    /// Institution
    pub institution: Option<String>,
    /// Publication date
    pub publication_date: Option<NaiveDate>,
    /// Document type
    pub document_type: DocumentType,
    /// Review status
    pub review_status: ReviewStatus,
    /// Title (not tracked for completeness)
    pub title: Option<String>,
    /// Generated citation (not tracked for completeness)
    pub citation: Option<String>,
}

impl ProvenanceRecord {
    /// Create a record without title or citation
    pub fn new(
        authors: Vec<String>,
        institution: Option<String>,
        publication_date: Option<NaiveDate>,
        document_type: DocumentType,
        review_status: ReviewStatus,
    ) -> Self {
        Self {
            authors,
            institution,
            publication_date,
            document_type,
            review_status,
            title: None,
            citation: None,
        }
    }

    /// Record with every field absent
    pub fn empty() -> Self {
        Self::new(
            Vec::new(),
            None,
            None,
            DocumentType::Unknown,
            ReviewStatus::Unknown,
        )
    }

    /// Attach a title
    pub fn with_title(mut self, title: Option<String>) -> Self {
        self.title = title;
        self
    }

    /// Generate the citation from the resolved fields
    ///
    /// Format: `A; B; C (Year). Title. Institution`, at most three authors.
    /// No citation without at least one author and a title.
    pub fn with_generated_citation(mut self) -> Self {
        self.citation = match (&self.title, self.authors.is_empty()) {
            (Some(title), false) => {
                let authors = self
                    .authors
                    .iter()
                    .take(3)
                    .cloned()
                    .collect::<Vec<_>>()
                    .join("; ");
                let year = self
                    .publication_date
                    .map(|d| d.year().to_string())
                    .unwrap_or_else(|| "n.d.".to_string());
                let mut citation = format!("{} ({}). {}", authors, year, title);
                if let Some(institution) = &self.institution {
                    citation.push_str(". ");
                    citation.push_str(institution);
                }
                Some(citation)
            }
            _ => None,
        };
        self
    }

    /// Fraction of tracked fields that are populated, in [0, 1]
    pub fn completeness(&self) -> f64 {
        self.populated_fields() as f64 / TRACKED_FIELDS as f64
    }

    /// Number of tracked fields that are populated
    pub fn populated_fields(&self) -> usize {
        [
            !self.authors.is_empty(),
            self.institution.is_some(),
            self.publication_date.is_some(),
            self.document_type != DocumentType::Unknown,
            self.review_status != ReviewStatus::Unknown,
        ]
        .iter()
        .filter(|present| **present)
        .count()
    }

    /// Names of tracked fields that are missing
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.authors.is_empty() {
            missing.push("authors");
        }
        if self.institution.is_none() {
            missing.push("institution");
        }
        if self.publication_date.is_none() {
            missing.push("publication_date");
        }
        if self.document_type == DocumentType::Unknown {
            missing.push("document_type");
        }
        if self.review_status == ReviewStatus::Unknown {
            missing.push("review_status");
        }
        missing
    }
}

impl Default for ProvenanceRecord {
    fn default() -> Self {
        Self::empty()
    }
}

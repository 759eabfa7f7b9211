//! Document type and review status vocabularies

use serde::{Deserialize, Serialize};
use std::fmt;

/// Document types with provenance implications
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    /// Journal research paper
    ResearchPaper,
    /// Technical report
    TechnicalReport,
    /// Government publication
    GovernmentDocument,
    /// Newspaper or magazine article
    NewspaperArticle,
    /// Blog post
    BlogPost,
    /// Conference paper
    ConferencePaper,
    /// Preprint (e.g. arXiv)
    Preprint,
    /// Thesis or dissertation
    Thesis,
    /// Patent
    Patent,
    /// Court filing or other legal document
    LegalDocument,
    /// Encyclopedia entry
    WikipediaEntry,
    /// Published standard
    Standard,
    /// No usable cue
    #[default]
    Unknown,
}

impl DocumentType {
    /// Every document type
    pub const ALL: [DocumentType; 13] = [
        DocumentType::ResearchPaper,
        DocumentType::TechnicalReport,
        DocumentType::GovernmentDocument,
        DocumentType::NewspaperArticle,
        DocumentType::BlogPost,
        DocumentType::ConferencePaper,
        DocumentType::Preprint,
        DocumentType::Thesis,
        DocumentType::Patent,
        DocumentType::LegalDocument,
        DocumentType::WikipediaEntry,
        DocumentType::Standard,
        DocumentType::Unknown,
    ];

    /// Get the type name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentType::ResearchPaper => "research_paper",
            DocumentType::TechnicalReport => "technical_report",
            DocumentType::GovernmentDocument => "government_document",
            DocumentType::NewspaperArticle => "newspaper_article",
            DocumentType::BlogPost => "blog_post",
            DocumentType::ConferencePaper => "conference_paper",
            DocumentType::Preprint => "preprint",
            DocumentType::Thesis => "thesis",
            DocumentType::Patent => "patent",
            DocumentType::LegalDocument => "legal_document",
            DocumentType::WikipediaEntry => "wikipedia_entry",
            DocumentType::Standard => "standard",
            DocumentType::Unknown => "unknown",
        }
    }

    /// Parse a type name, accepting spaces and dashes as separators
    pub fn parse(s: &str) -> Option<Self> {
        let normalized = s.trim().to_lowercase().replace([' ', '-'], "_");
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == normalized)
            .or(match normalized.as_str() {
                "paper" | "article" | "journal_article" => Some(DocumentType::ResearchPaper),
                "report" => Some(DocumentType::TechnicalReport),
                "dissertation" => Some(DocumentType::Thesis),
                "blog" => Some(DocumentType::BlogPost),
                _ => None,
            })
    }
}

impl std::str::FromStr for DocumentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid document type: {}", s))
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Review status of a document
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewStatus {
    /// Independently peer reviewed
    PeerReviewed,
    /// Reviewed by an editor
    EditorReviewed,
    /// Published by the author without review
    SelfPublished,
    /// Known not to be reviewed (e.g. preprint)
    Unreviewed,
    /// No cue either way
    #[default]
    Unknown,
}

impl ReviewStatus {
    /// Every review status
    pub const ALL: [ReviewStatus; 5] = [
        ReviewStatus::PeerReviewed,
        ReviewStatus::EditorReviewed,
        ReviewStatus::SelfPublished,
        ReviewStatus::Unreviewed,
        ReviewStatus::Unknown,
    ];

    /// Get the status name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewStatus::PeerReviewed => "peer_reviewed",
            ReviewStatus::EditorReviewed => "editor_reviewed",
            ReviewStatus::SelfPublished => "self_published",
            ReviewStatus::Unreviewed => "unreviewed",
            ReviewStatus::Unknown => "unknown",
        }
    }

    /// Parse a status name
    pub fn parse(s: &str) -> Option<Self> {
        let normalized = s.trim().to_lowercase().replace([' ', '-'], "_");
        Self::ALL
            .iter()
            .copied()
            .find(|r| r.as_str() == normalized)
            .or(match normalized.as_str() {
                "refereed" | "peer_review" => Some(ReviewStatus::PeerReviewed),
                "not_reviewed" | "none" => Some(ReviewStatus::Unreviewed),
                _ => None,
            })
    }
}

impl std::str::FromStr for ReviewStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid review status: {}", s))
    }
}

impl fmt::Display for ReviewStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

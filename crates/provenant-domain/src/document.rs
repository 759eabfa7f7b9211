//! Raw documents handed over by ingestion
//!
//! A [`RawDocument`] is the immutable input of a pipeline run: extracted text
//! plus the shallow attributes the ingestion layer could read from the file.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// File format tag assigned by ingestion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentFormat {
    /// Portable Document Format
    Pdf,
    /// Office Open XML word processing document
    Docx,
    /// Plain text
    PlainText,
    /// Markdown
    Markdown,
    /// HTML page
    Html,
    /// Anything else
    Other,
}

impl DocumentFormat {
    /// Map a file extension (with or without the leading dot) to a format
    pub fn from_extension(ext: &str) -> Self {
        match ext.trim_start_matches('.').to_lowercase().as_str() {
            "pdf" => DocumentFormat::Pdf,
            "docx" => DocumentFormat::Docx,
            "txt" => DocumentFormat::PlainText,
            "md" | "markdown" => DocumentFormat::Markdown,
            "html" | "htm" => DocumentFormat::Html,
            _ => DocumentFormat::Other,
        }
    }

    /// Infer the format from a file name
    pub fn from_filename(filename: &str) -> Self {
        match filename.rsplit_once('.') {
            Some((_, ext)) => Self::from_extension(ext),
            None => DocumentFormat::Other,
        }
    }

    /// MIME type for the format
    pub fn mime_type(&self) -> &'static str {
        match self {
            DocumentFormat::Pdf => "application/pdf",
            DocumentFormat::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            DocumentFormat::PlainText => "text/plain",
            DocumentFormat::Markdown => "text/markdown",
            DocumentFormat::Html => "text/html",
            DocumentFormat::Other => "application/octet-stream",
        }
    }

    /// Whether the raw bytes of this format are already readable text
    pub fn is_textual(&self) -> bool {
        matches!(
            self,
            DocumentFormat::PlainText | DocumentFormat::Markdown | DocumentFormat::Html
        )
    }

    /// Get the format name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentFormat::Pdf => "pdf",
            DocumentFormat::Docx => "docx",
            DocumentFormat::PlainText => "plain_text",
            DocumentFormat::Markdown => "markdown",
            DocumentFormat::Html => "html",
            DocumentFormat::Other => "other",
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Metadata the ingestion layer read from the file itself
///
/// Every field is a declaration by the document (or its container), not an
/// inference. Declared values outrank heuristic cues during resolution.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentMetadata {
    /// Declared title
    pub title: Option<String>,
    /// Declared author names
    pub authors: Vec<String>,
    /// Declared creation date (ISO-8601 prefix or bare year)
    pub created: Option<String>,
    /// Declared keywords
    pub keywords: Vec<String>,
    /// Declared document type (e.g. "research_paper")
    pub document_type: Option<String>,
    /// Declared license (e.g. "CC-BY-4.0")
    pub license: Option<String>,
    /// Declared review status (e.g. "peer_reviewed")
    pub review_status: Option<String>,
}

/// A document as produced by ingestion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawDocument {
    /// SHA-256 of the original bytes (lowercase hex)
    pub content_hash: String,
    /// Extracted text
    pub text: String,
    /// Size of the original file in bytes
    pub byte_size: u64,
    /// File name as declared by the caller
    pub filename: String,
    /// Format tag
    pub format: DocumentFormat,
    /// Declared metadata
    pub metadata: DocumentMetadata,
}

impl RawDocument {
    /// Create a document from already-computed identity fields
    pub fn new(
        content_hash: impl Into<String>,
        text: impl Into<String>,
        byte_size: u64,
        filename: impl Into<String>,
        format: DocumentFormat,
    ) -> Self {
        Self {
            content_hash: content_hash.into(),
            text: text.into(),
            byte_size,
            filename: filename.into(),
            format,
            metadata: DocumentMetadata::default(),
        }
    }

    /// Build a document from the bytes of a text-based file
    ///
    /// The hash covers the raw bytes; the text is decoded lossily as UTF-8.
    ///
    /// # Examples
    ///
    /// ```
    /// use provenant_domain::{DocumentFormat, RawDocument};
    ///
    /// let doc = RawDocument::from_bytes("notes.md", b"# Notes");
    /// assert_eq!(doc.format, DocumentFormat::Markdown);
    /// assert_eq!(doc.byte_size, 7);
    /// assert_eq!(doc.content_hash.len(), 64);
    /// ```
    pub fn from_bytes(filename: impl Into<String>, bytes: &[u8]) -> Self {
        let filename = filename.into();
        let format = DocumentFormat::from_filename(&filename);
        Self {
            content_hash: sha256_hex(bytes),
            text: String::from_utf8_lossy(bytes).into_owned(),
            byte_size: bytes.len() as u64,
            filename,
            format,
            metadata: DocumentMetadata::default(),
        }
    }

    /// Attach declared metadata
    pub fn with_metadata(mut self, metadata: DocumentMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    /// True when there is no usable text
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Lowercase hex SHA-256 digest
pub fn sha256_hex(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    digest.iter().map(|b| format!("{:02x}", b)).collect()
}

/// Entity type reported by an external NER model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityType {
    /// A person
    Person,
    /// An organization
    #[serde(alias = "ORGANIZATION")]
    Org,
    /// A date expression
    Date,
    /// Any other entity type
    #[serde(other)]
    Other,
}

/// One entity produced by an external NER model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NerEntity {
    /// Surface text of the entity
    pub text: String,
    /// Entity type
    pub entity_type: EntityType,
    /// Start of the character span
    pub start: usize,
    /// End of the character span (exclusive)
    pub end: usize,
    /// Model-reported confidence
    pub confidence: f64,
}

impl NerEntity {
    /// Create a new entity
    pub fn new(
        text: impl Into<String>,
        entity_type: EntityType,
        start: usize,
        end: usize,
        confidence: f64,
    ) -> Self {
        Self {
            text: text.into(),
            entity_type,
            start,
            end,
            confidence,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(DocumentFormat::from_extension(".PDF"), DocumentFormat::Pdf);
        assert_eq!(DocumentFormat::from_extension("htm"), DocumentFormat::Html);
        assert_eq!(DocumentFormat::from_extension("txt"), DocumentFormat::PlainText);
        assert_eq!(DocumentFormat::from_extension("xyz"), DocumentFormat::Other);
    }

    #[test]
    fn test_format_from_filename_without_extension() {
        assert_eq!(DocumentFormat::from_filename("README"), DocumentFormat::Other);
        assert_eq!(DocumentFormat::from_filename("report.v2.docx"), DocumentFormat::Docx);
    }

    #[test]
    fn test_sha256_known_value() {
        assert_eq!(
            sha256_hex(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_empty_document() {
        let doc = RawDocument::from_bytes("blank.txt", b"  \n\t ");
        assert!(doc.is_empty());
        assert_eq!(doc.byte_size, 5);
    }

    #[test]
    fn test_entity_type_deserialization() {
        let entity: NerEntity = serde_json::from_str(
            r#"{"text":"MIT","entity_type":"ORG","start":0,"end":3,"confidence":0.9}"#,
        )
        .unwrap();
        assert_eq!(entity.entity_type, EntityType::Org);

        let other: EntityType = serde_json::from_str(r#""GPE""#).unwrap();
        assert_eq!(other, EntityType::Other);
    }
}

//! Content summary of a document

use crate::patterns::{CITATION, REFERENCES_HEADER};
use provenant_domain::RawDocument;
use serde::{Deserialize, Serialize};

/// Shallow content features reported next to the provenance
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentProfile {
    /// Whitespace-separated words
    pub word_count: usize,
    /// Lines of text
    pub line_count: usize,
    /// Characters of text
    pub char_count: usize,
    /// A references or bibliography section header is present
    pub has_references: bool,
    /// In-text citations such as `(Smith, 2014)` or `[1, 2]` are present
    pub has_citations: bool,
    /// Declared keywords
    pub keywords: Vec<String>,
}

impl ContentProfile {
    /// Profile the text and declared keywords of a document
    pub fn from_document(doc: &RawDocument) -> Self {
        let text = doc.text.as_str();
        Self {
            word_count: text.split_whitespace().count(),
            line_count: text.lines().count(),
            char_count: text.chars().count(),
            has_references: REFERENCES_HEADER.is_match(text),
            has_citations: CITATION.is_match(text),
            keywords: doc
                .metadata
                .keywords
                .iter()
                .map(|k| k.trim().to_string())
                .filter(|k| !k.is_empty())
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use provenant_domain::DocumentMetadata;

    #[test]
    fn test_profile_counts() {
        let doc = RawDocument::from_bytes("a.txt", b"one two three\nfour\n");
        let profile = ContentProfile::from_document(&doc);
        assert_eq!(profile.word_count, 4);
        assert_eq!(profile.line_count, 2);
        assert!(!profile.has_references);
        assert!(!profile.has_citations);
    }

    #[test]
    fn test_references_and_citations() {
        let text = "Reefs are declining (Hughes, 2017) and bleaching [1, 2].\n\nReferences\n1. Hughes";
        let doc = RawDocument::from_bytes("a.txt", text.as_bytes());
        let profile = ContentProfile::from_document(&doc);
        assert!(profile.has_references);
        assert!(profile.has_citations);
    }

    #[test]
    fn test_reference_word_inside_sentence_is_not_a_header() {
        let doc = RawDocument::from_bytes("a.txt", b"See the references below for details.");
        assert!(!ContentProfile::from_document(&doc).has_references);
    }

    #[test]
    fn test_keywords_are_trimmed() {
        let doc = RawDocument::from_bytes("a.txt", b"text").with_metadata(DocumentMetadata {
            keywords: vec![" coral ".to_string(), "".to_string()],
            ..Default::default()
        });
        assert_eq!(ContentProfile::from_document(&doc).keywords, vec!["coral"]);
    }

    #[test]
    fn test_empty_document() {
        let doc = RawDocument::from_bytes("a.txt", b"");
        let profile = ContentProfile::from_document(&doc);
        assert_eq!(profile.word_count, 0);
        assert_eq!(profile.line_count, 0);
    }
}

//! Candidate signals and the append-only signal bag

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Category of provenance field a signal supports
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalCategory {
    /// Author name
    Author,
    /// Institution name
    Institution,
    /// Publication date (normalized `YYYY-MM-DD`)
    Date,
    /// Document type cue
    DocType,
    /// Review status cue
    ReviewStatus,
    /// License cue
    License,
    /// Document title
    Title,
    /// Explicit usage restriction
    Restriction,
}

impl SignalCategory {
    /// All categories in reporting order
    pub const ALL: [SignalCategory; 8] = [
        SignalCategory::Author,
        SignalCategory::Institution,
        SignalCategory::Date,
        SignalCategory::DocType,
        SignalCategory::ReviewStatus,
        SignalCategory::License,
        SignalCategory::Title,
        SignalCategory::Restriction,
    ];

    /// Get the category name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            SignalCategory::Author => "author",
            SignalCategory::Institution => "institution",
            SignalCategory::Date => "date",
            SignalCategory::DocType => "doc_type",
            SignalCategory::ReviewStatus => "review_status",
            SignalCategory::License => "license",
            SignalCategory::Title => "title",
            SignalCategory::Restriction => "restriction",
        }
    }
}

impl fmt::Display for SignalCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a rule took its evidence from
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalOrigin {
    /// Declared metadata supplied by ingestion
    Metadata,
    /// Heuristics over the document text or file name
    Content,
    /// External named-entity recognition output
    Ner,
}

impl SignalOrigin {
    /// Get the origin name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            SignalOrigin::Metadata => "metadata",
            SignalOrigin::Content => "content",
            SignalOrigin::Ner => "ner",
        }
    }
}

/// A confidence-scored candidate value for one provenance field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    /// Candidate value
    pub value: String,
    /// Confidence in [0, 1]
    pub confidence: f64,
    /// Stable identifier of the rule that emitted it
    pub rule_id: String,
    /// Position of the emitting rule in the evaluation sequence
    pub rule_order: u32,
    /// Evidence origin
    pub origin: SignalOrigin,
}

impl Candidate {
    /// Create a candidate; confidence is clamped to [0, 1] and NaN becomes 0
    pub fn new(
        value: impl Into<String>,
        confidence: f64,
        rule_id: impl Into<String>,
        rule_order: u32,
        origin: SignalOrigin,
    ) -> Self {
        Self {
            value: value.into(),
            confidence: clamp_unit(confidence),
            rule_id: rule_id.into(),
            rule_order,
            origin,
        }
    }
}

/// Clamp a value into [0, 1], mapping NaN to 0
pub fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// Append-only collection of candidates grouped by category
///
/// Insertion order within a category is preserved; it is the order in which
/// the extractor evaluated its rules. Candidates are never removed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SignalBag {
    signals: BTreeMap<SignalCategory, Vec<Candidate>>,
}

impl SignalBag {
    /// Create an empty bag
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a candidate
    pub fn push(&mut self, category: SignalCategory, candidate: Candidate) {
        self.signals.entry(category).or_default().push(candidate);
    }

    /// Candidates of a category in insertion order
    pub fn candidates(&self, category: SignalCategory) -> &[Candidate] {
        self.signals
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Number of candidates in a category
    pub fn count(&self, category: SignalCategory) -> usize {
        self.candidates(category).len()
    }

    /// Total number of candidates
    pub fn len(&self) -> usize {
        self.signals.values().map(Vec::len).sum()
    }

    /// True when no candidate was collected
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate over every `(category, candidate)` pair
    pub fn iter(&self) -> impl Iterator<Item = (SignalCategory, &Candidate)> {
        self.signals
            .iter()
            .flat_map(|(category, list)| list.iter().map(move |c| (*category, c)))
    }

    /// Distinct rule ids that contributed, in rule order
    pub fn rules_fired(&self) -> Vec<String> {
        let mut fired: Vec<(u32, &str)> = self
            .iter()
            .map(|(_, c)| (c.rule_order, c.rule_id.as_str()))
            .collect();
        fired.sort();
        fired.dedup();
        fired.into_iter().map(|(_, id)| id.to_string()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_confidence_is_clamped() {
        let high = Candidate::new("x", 1.7, "r", 0, SignalOrigin::Content);
        let low = Candidate::new("x", -0.2, "r", 0, SignalOrigin::Content);
        let nan = Candidate::new("x", f64::NAN, "r", 0, SignalOrigin::Content);
        assert_eq!(high.confidence, 1.0);
        assert_eq!(low.confidence, 0.0);
        assert_eq!(nan.confidence, 0.0);
    }

    #[test]
    fn test_bag_preserves_insertion_order() {
        let mut bag = SignalBag::new();
        bag.push(
            SignalCategory::Author,
            Candidate::new("B", 0.5, "r1", 1, SignalOrigin::Content),
        );
        bag.push(
            SignalCategory::Author,
            Candidate::new("A", 0.9, "r2", 2, SignalOrigin::Content),
        );

        let authors = bag.candidates(SignalCategory::Author);
        assert_eq!(authors[0].value, "B");
        assert_eq!(authors[1].value, "A");
        assert_eq!(bag.len(), 2);
        assert_eq!(bag.count(SignalCategory::Date), 0);
    }

    #[test]
    fn test_rules_fired_sorted_by_rule_order() {
        let mut bag = SignalBag::new();
        bag.push(
            SignalCategory::Date,
            Candidate::new("2020-01-01", 0.5, "date.year", 9, SignalOrigin::Content),
        );
        bag.push(
            SignalCategory::Author,
            Candidate::new("A", 0.8, "content.byline", 4, SignalOrigin::Content),
        );
        bag.push(
            SignalCategory::Author,
            Candidate::new("B", 0.8, "content.byline", 4, SignalOrigin::Content),
        );

        assert_eq!(bag.rules_fired(), vec!["content.byline", "date.year"]);
    }

    #[test]
    fn test_empty_bag() {
        let bag = SignalBag::new();
        assert!(bag.is_empty());
        assert!(bag.candidates(SignalCategory::License).is_empty());
        assert!(bag.rules_fired().is_empty());
    }
}

//! Trust dimensions and scores

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// One of the five independent trust dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    /// Institution reputation and author identifiability
    Authority,
    /// Reliability of the document type
    DocumentType,
    /// Review status
    Review,
    /// Recency of publication
    Currency,
    /// Provenance completeness
    Completeness,
}

impl Dimension {
    /// Every dimension in reporting order
    pub const ALL: [Dimension; 5] = [
        Dimension::Authority,
        Dimension::DocumentType,
        Dimension::Review,
        Dimension::Currency,
        Dimension::Completeness,
    ];

    /// Get the dimension name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Dimension::Authority => "authority",
            Dimension::DocumentType => "document_type",
            Dimension::Review => "review",
            Dimension::Currency => "currency",
            Dimension::Completeness => "completeness",
        }
    }

    /// Parse a dimension name
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|d| d.as_str() == s.trim())
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Score for a single dimension with its explanation trace
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionScore {
    /// Dimension this score belongs to
    pub dimension: Dimension,
    /// Score in [0, 1]
    pub score: f64,
    /// Rules, table entries and signals that produced the score, in order
    pub explanations: Vec<String>,
}

impl DimensionScore {
    /// Create a dimension score; the value is clamped to [0, 1]
    pub fn new(dimension: Dimension, score: f64, explanations: Vec<String>) -> Self {
        Self {
            dimension,
            score: crate::signal::clamp_unit(score),
            explanations,
        }
    }
}

/// Coarse trust classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrustLevel {
    /// Below the low-trust boundary
    Low,
    /// Between the boundaries
    Medium,
    /// At or above the high-trust boundary
    High,
}

impl TrustLevel {
    /// Classify a score against the low and high boundaries
    pub fn classify(score: f64, low: f64, high: f64) -> Self {
        if score >= high {
            TrustLevel::High
        } else if score < low {
            TrustLevel::Low
        } else {
            TrustLevel::Medium
        }
    }

    /// Get the level name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            TrustLevel::Low => "low",
            TrustLevel::Medium => "medium",
            TrustLevel::High => "high",
        }
    }
}

impl fmt::Display for TrustLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Multi-dimensional trust score
///
/// `overall_score` is exactly the weighted sum of the dimension scores, in
/// [`Dimension::ALL`] order, with no further adjustment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrustScore {
    /// Dimension scores in [`Dimension::ALL`] order
    pub dimensions: Vec<DimensionScore>,
    /// Weights used for the overall score
    pub weights: BTreeMap<Dimension, f64>,
    /// Weighted sum of the dimension scores
    pub overall_score: f64,
    /// Classification of the overall score
    pub level: TrustLevel,
}

impl TrustScore {
    /// Combine dimension scores with the given weights
    ///
    /// Dimensions missing from `weights` contribute nothing; callers are
    /// expected to have validated the weight table.
    pub fn combine(
        mut dimensions: Vec<DimensionScore>,
        weights: BTreeMap<Dimension, f64>,
        low: f64,
        high: f64,
    ) -> Self {
        dimensions.sort_by_key(|d| d.dimension);
        let overall_score = dimensions
            .iter()
            .map(|d| weights.get(&d.dimension).copied().unwrap_or(0.0) * d.score)
            .sum::<f64>();
        Self {
            dimensions,
            level: TrustLevel::classify(overall_score, low, high),
            weights,
            overall_score,
        }
    }

    /// Score of one dimension
    pub fn dimension(&self, dimension: Dimension) -> Option<&DimensionScore> {
        self.dimensions.iter().find(|d| d.dimension == dimension)
    }

    /// Overall score rounded to `precision` decimal places
    pub fn overall_rounded(&self, precision: u32) -> f64 {
        round_to(self.overall_score, precision)
    }
}

/// Round a value to a number of decimal places
pub fn round_to(value: f64, precision: u32) -> f64 {
    let factor = 10f64.powi(precision as i32);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weights() -> BTreeMap<Dimension, f64> {
        [
            (Dimension::Authority, 0.3),
            (Dimension::DocumentType, 0.2),
            (Dimension::Review, 0.25),
            (Dimension::Currency, 0.15),
            (Dimension::Completeness, 0.1),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_combine_is_weighted_sum() {
        let dims = Dimension::ALL
            .iter()
            .map(|d| DimensionScore::new(*d, 0.5, vec![]))
            .collect();
        let score = TrustScore::combine(dims, weights(), 0.3, 0.7);
        assert!((score.overall_score - 0.5).abs() < 1e-12);
        assert_eq!(score.level, TrustLevel::Medium);
    }

    #[test]
    fn test_dimensions_sorted_into_reporting_order() {
        let dims = vec![
            DimensionScore::new(Dimension::Completeness, 1.0, vec![]),
            DimensionScore::new(Dimension::Authority, 1.0, vec![]),
        ];
        let score = TrustScore::combine(dims, weights(), 0.3, 0.7);
        assert_eq!(score.dimensions[0].dimension, Dimension::Authority);
        assert!((score.overall_score - 0.4).abs() < 1e-12);
    }

    #[test]
    fn test_classify_boundaries() {
        assert_eq!(TrustLevel::classify(0.7, 0.3, 0.7), TrustLevel::High);
        assert_eq!(TrustLevel::classify(0.3, 0.3, 0.7), TrustLevel::Medium);
        assert_eq!(TrustLevel::classify(0.29, 0.3, 0.7), TrustLevel::Low);
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(0.123456, 4), 0.1235);
        assert_eq!(round_to(0.5, 0), 1.0);
    }
}

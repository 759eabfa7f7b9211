//! Configuration for trust scoring
//!
//! Every table the dimensions consult lives here as plain data, so scoring
//! behaviour can be changed from a TOML file. [`TrustConfig::validate`] runs
//! once before anything is scored.

use crate::error::TrustError;
use provenant_domain::{Dimension, DocumentType, ReviewStatus};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Tolerance on the sum of the dimension weights
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// Highest supported reporting precision
pub const MAX_PRECISION: u32 = 12;

/// Institution reputation class
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InstitutionTier {
    /// Tier name used in explanations
    pub name: String,
    /// Lowercase name fragments; a leading `.` marks a domain suffix
    pub patterns: Vec<String>,
    /// Authority score of a matching institution
    pub score: f64,
}

impl InstitutionTier {
    fn new(name: &str, patterns: &[&str], score: f64) -> Self {
        Self {
            name: name.to_string(),
            patterns: patterns.iter().map(|p| p.to_string()).collect(),
            score,
        }
    }
}

/// Parameters of the authority dimension
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AuthorityConfig {
    /// Score of a resolved institution matching no tier
    pub unmatched_institution_score: f64,
    /// Score when no institution was resolved
    pub no_institution_score: f64,
    /// Discount applied to a tier corroborated only by rival candidates
    pub corroboration_discount: f64,
    /// Bonus per identified author
    pub per_author_bonus: f64,
    /// Cap on the total author bonus
    pub max_author_bonus: f64,
    /// Penalty when no author was identified
    pub anonymous_penalty: f64,
    /// Tiers checked in order; the first match wins
    pub tiers: Vec<InstitutionTier>,
}

impl Default for AuthorityConfig {
    fn default() -> Self {
        Self {
            tiers: vec![
                InstitutionTier::new(
                    "academic",
                    &["university", "college", "polytechnic", "school of", ".edu", ".ac."],
                    0.8,
                ),
                InstitutionTier::new(
                    "government",
                    &[
                        "ministry",
                        "department of",
                        "agency",
                        "bureau",
                        "government",
                        "national institutes",
                        ".gov",
                    ],
                    0.8,
                ),
                InstitutionTier::new(
                    "research",
                    &["institute", "laboratory", "laboratories", "research center", "research centre", "observatory"],
                    0.75,
                ),
                InstitutionTier::new(
                    "corporate",
                    &["inc", "corporation", "corp", "ltd", "llc", "gmbh", "company"],
                    0.6,
                ),
            ],
            unmatched_institution_score: 0.45,
            no_institution_score: 0.3,
            corroboration_discount: 0.1,
            per_author_bonus: 0.05,
            max_author_bonus: 0.1,
            anonymous_penalty: 0.1,
        }
    }
}

/// Parameters of the currency dimension
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CurrencyConfig {
    /// Age at which the score halves
    pub half_life_days: f64,
    /// Fixed score of an undated document
    pub undated_score: f64,
}

impl Default for CurrencyConfig {
    fn default() -> Self {
        Self {
            half_life_days: 1095.75,
            undated_score: 0.3,
        }
    }
}

/// Trust level boundaries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Thresholds {
    /// Overall score from which trust is high
    pub high: f64,
    /// Overall score below which trust is low
    pub low: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self { high: 0.7, low: 0.3 }
    }
}

/// Configuration for trust scoring
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TrustConfig {
    /// Decimal places of reported scores
    pub precision: u32,

    /// Score of a type missing from `document_type_scores`
    pub default_document_type_score: f64,

    /// Dimension name to weight; must cover all five and sum to one
    pub weights: BTreeMap<String, f64>,

    /// Document type name to score
    pub document_type_scores: BTreeMap<String, f64>,

    /// Review status name to score; must cover every status
    pub review_status_scores: BTreeMap<String, f64>,

    /// Authority dimension parameters
    pub authority: AuthorityConfig,

    /// Currency dimension parameters
    pub currency: CurrencyConfig,

    /// Trust level boundaries
    pub thresholds: Thresholds,
}

fn table(entries: &[(&str, f64)]) -> BTreeMap<String, f64> {
    entries.iter().map(|(k, v)| (k.to_string(), *v)).collect()
}

impl Default for TrustConfig {
    fn default() -> Self {
        Self {
            weights: table(&[
                ("authority", 0.30),
                ("document_type", 0.20),
                ("review", 0.25),
                ("currency", 0.15),
                ("completeness", 0.10),
            ]),
            document_type_scores: table(&[
                ("research_paper", 0.9),
                ("government_document", 0.85),
                ("technical_report", 0.8),
                ("thesis", 0.8),
                ("standard", 0.8),
                ("patent", 0.75),
                ("conference_paper", 0.7),
                ("legal_document", 0.7),
                ("newspaper_article", 0.6),
                ("wikipedia_entry", 0.5),
                ("preprint", 0.5),
                ("blog_post", 0.3),
            ]),
            default_document_type_score: 0.4,
            review_status_scores: table(&[
                ("peer_reviewed", 0.9),
                ("editor_reviewed", 0.7),
                ("self_published", 0.4),
                ("unreviewed", 0.3),
                ("unknown", 0.3),
            ]),
            authority: AuthorityConfig::default(),
            currency: CurrencyConfig::default(),
            thresholds: Thresholds::default(),
            precision: 4,
        }
    }
}

impl TrustConfig {
    /// Validate the configuration, naming the offending entry on failure
    pub fn validate(&self) -> Result<(), TrustError> {
        self.dimension_weights()?;

        for (key, value) in &self.document_type_scores {
            if DocumentType::parse(key).is_none() {
                return Err(TrustError::UnknownTableKey {
                    table: "document_type_scores".to_string(),
                    key: key.clone(),
                });
            }
            check_table_entry("document_type_scores", key, *value)?;
        }
        check_unit("default_document_type_score", self.default_document_type_score)?;

        for key in self.review_status_scores.keys() {
            if ReviewStatus::parse(key).is_none() {
                return Err(TrustError::UnknownTableKey {
                    table: "review_status_scores".to_string(),
                    key: key.clone(),
                });
            }
        }
        for status in ReviewStatus::ALL {
            match self.review_status_scores.get(status.as_str()) {
                Some(value) => check_table_entry("review_status_scores", status.as_str(), *value)?,
                None => {
                    return Err(TrustError::MissingTableEntry {
                        table: "review_status_scores".to_string(),
                        key: status.as_str().to_string(),
                    })
                }
            }
        }

        let authority = &self.authority;
        for tier in &authority.tiers {
            check_table_entry("authority.tiers", &tier.name, tier.score)?;
        }
        check_unit(
            "authority.unmatched_institution_score",
            authority.unmatched_institution_score,
        )?;
        check_unit("authority.no_institution_score", authority.no_institution_score)?;
        check_unit("authority.corroboration_discount", authority.corroboration_discount)?;
        check_unit("authority.per_author_bonus", authority.per_author_bonus)?;
        check_unit("authority.max_author_bonus", authority.max_author_bonus)?;
        check_unit("authority.anonymous_penalty", authority.anonymous_penalty)?;

        if !(self.currency.half_life_days.is_finite() && self.currency.half_life_days > 0.0) {
            return Err(TrustError::InvalidParameter {
                name: "currency.half_life_days".to_string(),
                value: self.currency.half_life_days,
            });
        }
        check_unit("currency.undated_score", self.currency.undated_score)?;

        check_unit("thresholds.low", self.thresholds.low)?;
        check_unit("thresholds.high", self.thresholds.high)?;
        if self.thresholds.low > self.thresholds.high {
            return Err(TrustError::InvalidParameter {
                name: "thresholds.low".to_string(),
                value: self.thresholds.low,
            });
        }

        if self.precision > MAX_PRECISION {
            return Err(TrustError::InvalidParameter {
                name: "precision".to_string(),
                value: f64::from(self.precision),
            });
        }
        Ok(())
    }

    /// Weights keyed by dimension, checked for coverage, range and sum
    pub fn dimension_weights(&self) -> Result<BTreeMap<Dimension, f64>, TrustError> {
        let mut weights = BTreeMap::new();
        for (name, value) in &self.weights {
            let dimension =
                Dimension::parse(name).ok_or_else(|| TrustError::UnknownDimension {
                    name: name.clone(),
                })?;
            if !(value.is_finite() && (0.0..=1.0).contains(value)) {
                return Err(TrustError::InvalidWeight {
                    dimension: dimension.as_str().to_string(),
                    value: *value,
                });
            }
            weights.insert(dimension, *value);
        }
        for dimension in Dimension::ALL {
            if !weights.contains_key(&dimension) {
                return Err(TrustError::MissingWeight {
                    dimension: dimension.as_str().to_string(),
                });
            }
        }
        let sum: f64 = weights.values().sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(TrustError::WeightSum { sum });
        }
        Ok(weights)
    }

    /// Preset favouring provenance: authority and review dominate
    pub fn strict() -> Self {
        Self {
            weights: table(&[
                ("authority", 0.35),
                ("document_type", 0.15),
                ("review", 0.30),
                ("currency", 0.10),
                ("completeness", 0.10),
            ]),
            currency: CurrencyConfig {
                half_life_days: 730.5,
                undated_score: 0.2,
            },
            thresholds: Thresholds { high: 0.8, low: 0.4 },
            ..Default::default()
        }
    }

    /// Preset for informal corpora: weaker penalties, slower decay
    pub fn lenient() -> Self {
        Self {
            currency: CurrencyConfig {
                half_life_days: 1826.25,
                undated_score: 0.4,
            },
            thresholds: Thresholds { high: 0.6, low: 0.25 },
            ..Default::default()
        }
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

fn check_unit(name: &str, value: f64) -> Result<(), TrustError> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(TrustError::InvalidParameter {
            name: name.to_string(),
            value,
        })
    }
}

fn check_table_entry(table: &str, key: &str, value: f64) -> Result<(), TrustError> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(TrustError::InvalidTableEntry {
            table: table.to_string(),
            key: key.to_string(),
            value,
        })
    }
}

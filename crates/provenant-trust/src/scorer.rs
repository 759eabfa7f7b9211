//! Trust scorer combining the five dimensions

use crate::config::TrustConfig;
use crate::dimensions;
use crate::error::TrustError;
use chrono::NaiveDate;
use provenant_domain::{Dimension, ProvenanceRecord, SignalBag, TrustScore};
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

/// Scores resolved provenance against a validated [`TrustConfig`]
///
/// Construction fails fast on a bad configuration; once built, scoring
/// cannot fail. The overall score is the plain weighted sum of the
/// dimension scores, never renormalized.
#[derive(Debug, Clone)]
pub struct TrustScorer {
    config: TrustConfig,
    weights: BTreeMap<Dimension, f64>,
}

impl TrustScorer {
    /// Create a scorer, validating the configuration
    pub fn new(config: TrustConfig) -> Result<Self, TrustError> {
        if let Err(e) = config.validate() {
            warn!("Rejected trust configuration: {}", e);
            return Err(e);
        }
        let weights = config.dimension_weights()?;
        Ok(Self { config, weights })
    }

    /// The configuration in use
    pub fn config(&self) -> &TrustConfig {
        &self.config
    }

    /// Score a record; `analysis_date` is the reference for currency decay
    pub fn score(
        &self,
        record: &ProvenanceRecord,
        bag: &SignalBag,
        analysis_date: NaiveDate,
    ) -> TrustScore {
        let dimensions = vec![
            dimensions::authority(record, bag, &self.config.authority),
            dimensions::document_type(record, &self.config),
            dimensions::review(record, &self.config),
            dimensions::currency(record, &self.config.currency, analysis_date),
            dimensions::completeness(record),
        ];
        for dimension in &dimensions {
            debug!("{} = {:.4}", dimension.dimension, dimension.score);
        }

        let score = TrustScore::combine(
            dimensions,
            self.weights.clone(),
            self.config.thresholds.low,
            self.config.thresholds.high,
        );
        info!(
            "Trust score {:.4} ({})",
            score.overall_score, score.level
        );
        score
    }
}

/// Validate `config` and score a single record with it
pub fn compute_trust(
    record: &ProvenanceRecord,
    bag: &SignalBag,
    config: &TrustConfig,
    analysis_date: NaiveDate,
) -> Result<TrustScore, TrustError> {
    Ok(TrustScorer::new(config.clone())?.score(record, bag, analysis_date))
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;
    use provenant_domain::{DocumentType, ReviewStatus};

    const INSTITUTIONS: [&str; 4] = [
        "Stanford University",
        "Acme Corporation",
        "Reef Collective",
        "National Institutes of Health",
    ];

    fn arb_record() -> impl Strategy<Value = ProvenanceRecord> {
        (
            prop::collection::vec("[A-Z][a-z]{2,8} [A-Z][a-z]{2,8}", 0..4),
            prop::option::of(0..INSTITUTIONS.len()),
            prop::option::of(0i64..20_000),
            0..DocumentType::ALL.len(),
            0..ReviewStatus::ALL.len(),
        )
            .prop_map(|(authors, institution, age, doc_type, review)| {
                ProvenanceRecord::new(
                    authors,
                    institution.map(|i| INSTITUTIONS[i].to_string()),
                    age.and_then(|days| {
                        NaiveDate::from_ymd_opt(2025, 6, 30)
                            .and_then(|d| d.checked_sub_signed(chrono::Duration::days(days)))
                    }),
                    DocumentType::ALL[doc_type],
                    ReviewStatus::ALL[review],
                )
            })
    }

    fn arb_weights() -> impl Strategy<Value = Vec<f64>> {
        prop::collection::vec(0.01f64..1.0, 5).prop_map(|raw| {
            let total: f64 = raw.iter().sum();
            raw.into_iter().map(|w| w / total).collect()
        })
    }

    fn with_weights(weights: &[f64]) -> TrustConfig {
        let mut config = TrustConfig::default();
        config.weights = Dimension::ALL
            .iter()
            .zip(weights)
            .map(|(d, w)| (d.as_str().to_string(), *w))
            .collect();
        config
    }

    proptest! {
        /// Property: the overall score is exactly the weighted sum of the dimensions
        #[test]
        fn test_overall_is_weighted_sum(record in arb_record(), weights in arb_weights()) {
            let scorer = TrustScorer::new(with_weights(&weights)).unwrap();
            let score = scorer.score(&record, &SignalBag::new(), NaiveDate::from_ymd_opt(2025, 6, 30).unwrap());

            let expected: f64 = score
                .dimensions
                .iter()
                .map(|d| score.weights[&d.dimension] * d.score)
                .sum();
            prop_assert!((score.overall_score - expected).abs() < 1e-9);
            prop_assert!(score.dimensions.iter().all(|d| (0.0..=1.0).contains(&d.score)));
        }

        /// Property: weights that do not sum to one are always rejected
        #[test]
        fn test_unnormalized_weights_rejected(weights in arb_weights(), factor in 1.01f64..3.0) {
            let scaled: Vec<f64> = weights.iter().map(|w| w * factor).collect();
            prop_assert!(TrustScorer::new(with_weights(&scaled)).is_err());
        }

        /// Property: undated records always get the configured undated score
        #[test]
        fn test_undated_currency_is_fixed(record in arb_record()) {
            let mut undated = record;
            undated.publication_date = None;
            let scorer = TrustScorer::new(TrustConfig::default()).unwrap();
            let score = scorer.score(&undated, &SignalBag::new(), NaiveDate::from_ymd_opt(2025, 6, 30).unwrap());
            prop_assert_eq!(
                score.dimension(Dimension::Currency).map(|d| d.score),
                Some(scorer.config().currency.undated_score)
            );
        }
    }
}

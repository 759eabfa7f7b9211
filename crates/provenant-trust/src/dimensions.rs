//! The five trust dimensions
//!
//! Each function is independent and builds its explanation trace while it
//! computes, naming the table entry or signal that drove the value.

use crate::config::{AuthorityConfig, CurrencyConfig, InstitutionTier, TrustConfig};
use chrono::NaiveDate;
use provenant_domain::provenance::TRACKED_FIELDS;
use provenant_domain::{Dimension, DimensionScore, ProvenanceRecord, SignalBag, SignalCategory};

/// Institution reputation and author identifiability
pub fn authority(
    record: &ProvenanceRecord,
    bag: &SignalBag,
    config: &AuthorityConfig,
) -> DimensionScore {
    let mut explanations = Vec::new();

    let mut score = match &record.institution {
        Some(institution) => match matching_tier(institution, &config.tiers) {
            Some(tier) => {
                explanations.push(format!(
                    "authority: institution '{}' matched tier '{}' ({:.2})",
                    institution, tier.name, tier.score
                ));
                tier.score
            }
            None => match corroborating_tier(institution, bag, &config.tiers) {
                Some((rival, tier)) => {
                    let discounted = (tier.score - config.corroboration_discount)
                        .max(config.unmatched_institution_score);
                    explanations.push(format!(
                        "authority: institution '{}' matched no tier; candidate '{}' corroborates tier '{}' ({:.2} after {:.2} discount)",
                        institution, rival, tier.name, discounted, config.corroboration_discount
                    ));
                    discounted
                }
                None => {
                    explanations.push(format!(
                        "authority: institution '{}' matched no tier, baseline {:.2} applied",
                        institution, config.unmatched_institution_score
                    ));
                    config.unmatched_institution_score
                }
            },
        },
        None => {
            explanations.push(format!(
                "authority: no institution resolved ({:.2})",
                config.no_institution_score
            ));
            config.no_institution_score
        }
    };

    if record.authors.is_empty() {
        explanations.push(format!(
            "authority: no identified author, penalty -{:.2}",
            config.anonymous_penalty
        ));
        score -= config.anonymous_penalty;
    } else {
        let bonus =
            (config.per_author_bonus * record.authors.len() as f64).min(config.max_author_bonus);
        explanations.push(format!(
            "authority: {} identified author(s), bonus +{:.2}",
            record.authors.len(),
            bonus
        ));
        score += bonus;
    }

    DimensionScore::new(Dimension::Authority, score, explanations)
}

/// Lookup in the document type table, falling back to the configured default
pub fn document_type(record: &ProvenanceRecord, config: &TrustConfig) -> DimensionScore {
    let name = record.document_type.as_str();
    let (score, explanation) = match config.document_type_scores.get(name) {
        Some(score) => (
            *score,
            format!(
                "document_type: '{}' scored {:.2} from document_type_scores",
                name, score
            ),
        ),
        None => (
            config.default_document_type_score,
            format!(
                "document_type: unrecognized type, default applied ('{}' scored {:.2})",
                name, config.default_document_type_score
            ),
        ),
    };
    DimensionScore::new(Dimension::DocumentType, score, vec![explanation])
}

/// Lookup in the review status table
pub fn review(record: &ProvenanceRecord, config: &TrustConfig) -> DimensionScore {
    let name = record.review_status.as_str();
    let (score, explanation) = match config.review_status_scores.get(name) {
        Some(score) => (
            *score,
            format!("review: '{}' scored {:.2} from review_status_scores", name, score),
        ),
        None => (
            0.0,
            format!("review: no review_status_scores entry for '{}'", name),
        ),
    };
    DimensionScore::new(Dimension::Review, score, vec![explanation])
}

/// Exponential decay on document age
///
/// Undated documents get the fixed `undated_score`; no date arithmetic is
/// attempted for them.
pub fn currency(
    record: &ProvenanceRecord,
    config: &CurrencyConfig,
    analysis_date: NaiveDate,
) -> DimensionScore {
    let Some(published) = record.publication_date else {
        return DimensionScore::new(
            Dimension::Currency,
            config.undated_score,
            vec![format!(
                "currency: missing publication date, fixed penalty {:.2} applied",
                config.undated_score
            )],
        );
    };

    let age_days = (analysis_date - published).num_days();
    if age_days < 0 {
        return DimensionScore::new(
            Dimension::Currency,
            1.0,
            vec![format!(
                "currency: published {} after analysis date {}, treated as current",
                published, analysis_date
            )],
        );
    }

    let score = 0.5f64.powf(age_days as f64 / config.half_life_days);
    DimensionScore::new(
        Dimension::Currency,
        score,
        vec![format!(
            "currency: published {}, {} days before {} with half-life {} days ({:.2})",
            published, age_days, analysis_date, config.half_life_days, score
        )],
    )
}

/// The record's completeness, unchanged
pub fn completeness(record: &ProvenanceRecord) -> DimensionScore {
    let mut explanations = vec![format!(
        "completeness: {} of {} tracked fields populated",
        record.populated_fields(),
        TRACKED_FIELDS
    )];
    let missing = record.missing_fields();
    if !missing.is_empty() {
        explanations.push(format!("completeness: missing {}", missing.join(", ")));
    }
    DimensionScore::new(Dimension::Completeness, record.completeness(), explanations)
}

/// First tier with a pattern matching the institution name
pub fn matching_tier<'a>(
    institution: &str,
    tiers: &'a [InstitutionTier],
) -> Option<&'a InstitutionTier> {
    tiers.iter().find(|tier| {
        tier.patterns
            .iter()
            .any(|pattern| pattern_matches(pattern, institution))
    })
}

/// First rival institution candidate, in bag order, that matches a tier
fn corroborating_tier<'a, 'b>(
    institution: &str,
    bag: &'b SignalBag,
    tiers: &'a [InstitutionTier],
) -> Option<(&'b str, &'a InstitutionTier)> {
    bag.candidates(SignalCategory::Institution)
        .iter()
        .filter(|c| !c.value.eq_ignore_ascii_case(institution))
        .find_map(|c| matching_tier(&c.value, tiers).map(|tier| (c.value.as_str(), tier)))
}

/// Whole-word phrase match, or domain fragment match for patterns starting with `.`
fn pattern_matches(pattern: &str, name: &str) -> bool {
    let pattern = pattern.trim().to_lowercase();
    let name = name.to_lowercase();
    if pattern.is_empty() {
        return false;
    }

    if pattern.starts_with('.') {
        let fragment = if pattern.ends_with('.') {
            pattern
        } else {
            format!("{}.", pattern)
        };
        return format!("{}.", name).contains(&fragment);
    }

    format!(" {} ", words(&name)).contains(&format!(" {} ", words(&pattern)))
}

fn words(s: &str) -> String {
    s.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use provenant_domain::{Candidate, DocumentType, ReviewStatus, SignalOrigin};

    fn record(authors: &[&str], institution: Option<&str>) -> ProvenanceRecord {
        ProvenanceRecord::new(
            authors.iter().map(|a| a.to_string()).collect(),
            institution.map(str::to_string),
            None,
            DocumentType::Unknown,
            ReviewStatus::Unknown,
        )
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_pattern_matching() {
        assert!(pattern_matches("university", "Stanford University"));
        assert!(pattern_matches("school of", "Harvard School of Public Health"));
        assert!(pattern_matches("inc", "Acme Inc."));
        assert!(!pattern_matches("inc", "Princeton"));
        assert!(pattern_matches(".edu", "cs.stanford.edu"));
        assert!(!pattern_matches(".edu", "www.education.com"));
        assert!(pattern_matches(".ac.", "ox.ac.uk"));
        assert!(!pattern_matches("", "anything"));
    }

    #[test]
    fn test_default_tiers() {
        let tiers = AuthorityConfig::default().tiers;
        let tier = |name: &str| matching_tier(name, &tiers).map(|t| t.name.as_str());
        assert_eq!(tier("Stanford University"), Some("academic"));
        assert_eq!(tier("Massachusetts Institute of Technology"), Some("research"));
        assert_eq!(tier("National Institutes of Health"), Some("government"));
        assert_eq!(tier("Max Planck Institute"), Some("research"));
        assert_eq!(tier("Acme Corporation"), Some("corporate"));
        assert_eq!(tier("The Reef Collective"), None);
    }

    #[test]
    fn test_authority_tier_plus_author_bonus() {
        let config = AuthorityConfig::default();
        let score = authority(
            &record(&["Jane Smith"], Some("Stanford University")),
            &SignalBag::new(),
            &config,
        );
        assert!((score.score - 0.85).abs() < 1e-12);
        assert_eq!(score.explanations.len(), 2);
        assert!(score.explanations[0].contains("tier 'academic'"));
    }

    #[test]
    fn test_author_bonus_is_capped() {
        let config = AuthorityConfig::default();
        let score = authority(
            &record(&["A", "B", "C", "D"], Some("Stanford University")),
            &SignalBag::new(),
            &config,
        );
        assert!((score.score - 0.9).abs() < 1e-12);
    }

    #[test]
    fn test_anonymous_without_institution() {
        let config = AuthorityConfig::default();
        let score = authority(&record(&[], None), &SignalBag::new(), &config);
        assert!((score.score - 0.2).abs() < 1e-12);
        assert!(score.explanations[0].contains("no institution"));
        assert!(score.explanations[1].contains("penalty"));
    }

    #[test]
    fn test_unmatched_institution_corroborated_by_rival() {
        let config = AuthorityConfig::default();
        let mut bag = SignalBag::new();
        bag.push(
            SignalCategory::Institution,
            Candidate::new("Reef Collective", 0.9, "ner.organization", 29, SignalOrigin::Ner),
        );
        bag.push(
            SignalCategory::Institution,
            Candidate::new("cs.stanford.edu", 0.5, "institution.email_domain", 12, SignalOrigin::Content),
        );

        let corroborated = authority(&record(&[], Some("Reef Collective")), &bag, &config);
        assert!((corroborated.score - 0.6).abs() < 1e-12);
        assert!(corroborated.explanations[0].contains("cs.stanford.edu"));

        let alone = authority(&record(&[], Some("Reef Collective")), &SignalBag::new(), &config);
        assert!((alone.score - 0.35).abs() < 1e-12);
    }

    #[test]
    fn test_unrecognized_document_type_uses_default() {
        let config = TrustConfig::default();
        let score = document_type(&record(&[], None), &config);
        assert_eq!(score.score, 0.4);
        assert!(score.explanations[0].contains("unrecognized type, default applied"));

        let mut paper = record(&[], None);
        paper.document_type = DocumentType::ResearchPaper;
        assert_eq!(document_type(&paper, &config).score, 0.9);
    }

    #[test]
    fn test_review_lookup() {
        let config = TrustConfig::default();
        let mut peer = record(&[], None);
        peer.review_status = ReviewStatus::PeerReviewed;
        let score = review(&peer, &config);
        assert_eq!(score.score, 0.9);
        assert!(score.explanations[0].contains("peer_reviewed"));
        assert_eq!(review(&record(&[], None), &config).score, 0.3);
    }

    #[test]
    fn test_undated_gets_fixed_penalty() {
        let config = CurrencyConfig::default();
        let score = currency(&record(&[], None), &config, date(2025, 6, 30));
        assert_eq!(score.score, config.undated_score);
        assert!(score.explanations[0].contains("missing publication date"));
    }

    #[test]
    fn test_currency_decays_with_age() {
        let config = CurrencyConfig::default();
        let mut dated = record(&[], None);
        let analysis = date(2025, 6, 30);

        dated.publication_date = Some(analysis);
        assert_eq!(currency(&dated, &config, analysis).score, 1.0);

        dated.publication_date = Some(date(2023, 1, 1));
        let older = currency(&dated, &config, analysis).score;
        assert!((older - 0.5f64.powf(911.0 / 1095.75)).abs() < 1e-12);

        dated.publication_date = Some(date(1990, 1, 1));
        assert!(currency(&dated, &config, analysis).score < older);
    }

    #[test]
    fn test_future_date_treated_as_current() {
        let mut dated = record(&[], None);
        dated.publication_date = Some(date(2030, 1, 1));
        let score = currency(&dated, &CurrencyConfig::default(), date(2025, 6, 30));
        assert_eq!(score.score, 1.0);
        assert!(score.explanations[0].contains("treated as current"));
    }

    #[test]
    fn test_completeness_passthrough() {
        let score = completeness(&record(&["Jane Smith"], Some("Stanford University")));
        assert!((score.score - 0.4).abs() < 1e-12);
        assert_eq!(score.explanations[0], "completeness: 2 of 5 tracked fields populated");
        assert_eq!(
            score.explanations[1],
            "completeness: missing publication_date, document_type, review_status"
        );
    }
}

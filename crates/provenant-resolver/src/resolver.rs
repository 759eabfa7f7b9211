//! Deterministic reduction of a signal bag to one provenance record

use crate::config::ResolverConfig;
use crate::error::ResolverError;
use chrono::NaiveDate;
use provenant_domain::{
    Candidate, DocumentType, LicenseType, ProvenanceRecord, Restriction, ReviewStatus, SignalBag,
    SignalCategory,
};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use tracing::{debug, info, warn};

/// License and restriction signals handed to the policy engine
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UsageSignals {
    /// Resolved license; unknown when nothing was detected
    pub license: LicenseType,
    /// Rule that produced the license, if any
    pub license_rule: Option<String>,
    /// Distinct explicit restrictions
    pub restrictions: Vec<Restriction>,
}

/// Several high-confidence candidates disagreed on a single-valued field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmbiguityWarning {
    /// Field the candidates compete for
    pub field: SignalCategory,
    /// Value that won
    pub chosen: String,
    /// Other distinct values at or above the ambiguity threshold, in rank order
    pub rivals: Vec<String>,
}

impl fmt::Display for AmbiguityWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ambiguity: {} resolved to '{}' over '{}'",
            self.field,
            self.chosen,
            self.rivals.join("', '")
        )
    }
}

/// Outcome of resolving one signal bag
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resolution {
    /// Resolved provenance
    pub record: ProvenanceRecord,
    /// License and restrictions for the policy engine
    pub usage: UsageSignals,
    /// Which candidate won each field, in field order
    pub trace: Vec<String>,
    /// Non-fatal conflicts between high-confidence candidates
    pub warnings: Vec<AmbiguityWarning>,
}

/// The Resolver picks one value per field from the candidates in a bag
///
/// It reads nothing but the bag. Single-valued fields take the top-ranked
/// candidate under `(confidence desc, rule order asc, value asc, insertion
/// asc)`; document type, review status and license rank by evidence origin
/// first. Authors keep every candidate at or above the confidence floor.
#[derive(Debug, Clone, Default)]
pub struct Resolver {
    config: ResolverConfig,
}

/// How candidates of a field are ordered
#[derive(Clone, Copy)]
enum Ranking {
    Confidence,
    Precedence,
}

/// Trace and warnings accumulated while resolving
#[derive(Default)]
struct Notes {
    trace: Vec<String>,
    warnings: Vec<AmbiguityWarning>,
}

impl Resolver {
    /// Create a new Resolver, validating the configuration
    pub fn new(config: ResolverConfig) -> Result<Self, ResolverError> {
        config.validate().map_err(ResolverError::Config)?;
        Ok(Self { config })
    }

    /// The configuration in use
    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Resolve a bag into a record plus usage signals
    pub fn resolve(&self, bag: &SignalBag) -> Resolution {
        let mut notes = Notes::default();

        let authors = self.resolve_authors(bag, &mut notes.trace);
        let institution = self.pick(bag, SignalCategory::Institution, Ranking::Confidence, &mut notes, |v| {
            Some(v.to_string())
        });
        let publication_date = self.pick(bag, SignalCategory::Date, Ranking::Confidence, &mut notes, |v| {
            NaiveDate::parse_from_str(v, "%Y-%m-%d").ok()
        });
        let document_type = self
            .pick(bag, SignalCategory::DocType, Ranking::Precedence, &mut notes, DocumentType::parse)
            .unwrap_or_default();
        let review_status = self
            .pick(bag, SignalCategory::ReviewStatus, Ranking::Precedence, &mut notes, ReviewStatus::parse)
            .unwrap_or_default();
        let title = self.pick(bag, SignalCategory::Title, Ranking::Confidence, &mut notes, |v| {
            Some(v.to_string())
        });
        let usage = self.resolve_usage(bag, &mut notes);

        let record = ProvenanceRecord::new(
            authors,
            institution,
            publication_date,
            document_type,
            review_status,
        )
        .with_title(title)
        .with_generated_citation();

        for warning in &notes.warnings {
            warn!("{}", warning);
        }
        info!(
            "Resolved provenance: {} author(s), completeness {:.2}, {} warning(s)",
            record.authors.len(),
            record.completeness(),
            notes.warnings.len()
        );

        Resolution {
            record,
            usage,
            trace: notes.trace,
            warnings: notes.warnings,
        }
    }

    /// License by precedence plus every distinct restriction
    fn resolve_usage(&self, bag: &SignalBag, notes: &mut Notes) -> UsageSignals {
        let license = self.top(bag, SignalCategory::License, Ranking::Precedence, LicenseType::parse);
        match license {
            Some((value, c)) => {
                notes.trace.push(format!(
                    "license: '{}' from {} ({:.2})",
                    value, c.rule_id, c.confidence
                ));
                if let Some(warning) = self.ambiguity(
                    bag,
                    SignalCategory::License,
                    Ranking::Precedence,
                    c,
                    LicenseType::parse,
                ) {
                    notes.warnings.push(warning);
                }
            }
            None => notes
                .trace
                .push("license: no candidates, defaulted to unknown".to_string()),
        }

        let mut restrictions: Vec<Restriction> = bag
            .candidates(SignalCategory::Restriction)
            .iter()
            .filter_map(|c| Restriction::parse(&c.value))
            .collect();
        restrictions.sort();
        restrictions.dedup();

        UsageSignals {
            license: license.map(|(l, _)| l).unwrap_or_default(),
            license_rule: license.map(|(_, c)| c.rule_id.clone()),
            restrictions,
        }
    }

    /// Authors at or above the floor, deduplicated case-insensitively, in rank order
    fn resolve_authors(&self, bag: &SignalBag, trace: &mut Vec<String>) -> Vec<String> {
        let floor = self.config.author_confidence_floor;
        let mut authors: Vec<String> = Vec::new();
        for candidate in self.ranked(bag, SignalCategory::Author, Ranking::Confidence) {
            if candidate.confidence < floor {
                debug!(
                    "Author '{}' from {} below floor ({:.2} < {:.2})",
                    candidate.value, candidate.rule_id, candidate.confidence, floor
                );
                continue;
            }
            if authors.iter().any(|a| a.to_lowercase() == candidate.value.to_lowercase()) {
                continue;
            }
            trace.push(format!(
                "authors: kept '{}' from {} ({:.2})",
                candidate.value, candidate.rule_id, candidate.confidence
            ));
            authors.push(candidate.value.clone());
        }
        if authors.is_empty() {
            trace.push("authors: no candidate at or above the confidence floor".to_string());
        }
        authors
    }

    /// Resolve a single-valued field, recording the decision and any ambiguity
    fn pick<T>(
        &self,
        bag: &SignalBag,
        field: SignalCategory,
        ranking: Ranking,
        notes: &mut Notes,
        parse: impl Fn(&str) -> Option<T> + Copy,
    ) -> Option<T> {
        for candidate in bag.candidates(field) {
            if parse(&candidate.value).is_none() {
                notes.trace.push(format!(
                    "{}: skipped unparseable '{}' from {}",
                    field, candidate.value, candidate.rule_id
                ));
            }
        }

        let top = self.top(bag, field, ranking, parse);
        match &top {
            Some((_, c)) => {
                notes.trace.push(format!(
                    "{}: '{}' from {} ({:.2})",
                    field, c.value, c.rule_id, c.confidence
                ));
                if let Some(warning) = self.ambiguity(bag, field, ranking, c, parse) {
                    notes.warnings.push(warning);
                }
            }
            None => notes.trace.push(format!("{}: no candidates", field)),
        }
        top.map(|(value, _)| value)
    }

    /// Top-ranked parseable candidate of a field
    fn top<'b, T>(
        &self,
        bag: &'b SignalBag,
        field: SignalCategory,
        ranking: Ranking,
        parse: impl Fn(&str) -> Option<T>,
    ) -> Option<(T, &'b Candidate)> {
        self.ranked(bag, field, ranking)
            .into_iter()
            .find_map(|c| parse(&c.value).map(|value| (value, c)))
    }

    /// Values at or above the ambiguity threshold that lost to `winner`
    fn ambiguity<T>(
        &self,
        bag: &SignalBag,
        field: SignalCategory,
        ranking: Ranking,
        winner: &Candidate,
        parse: impl Fn(&str) -> Option<T>,
    ) -> Option<AmbiguityWarning> {
        let mut rivals: Vec<&str> = Vec::new();
        for candidate in self.ranked(bag, field, ranking) {
            if candidate.confidence < self.config.ambiguity_threshold || parse(&candidate.value).is_none() {
                continue;
            }
            if candidate.value.eq_ignore_ascii_case(&winner.value)
                || rivals.iter().any(|r| r.eq_ignore_ascii_case(&candidate.value))
            {
                continue;
            }
            rivals.push(&candidate.value);
        }
        if rivals.is_empty() {
            return None;
        }
        Some(AmbiguityWarning {
            field,
            chosen: winner.value.clone(),
            rivals: rivals.into_iter().map(str::to_string).collect(),
        })
    }

    /// Candidates of a field in rank order
    fn ranked<'b>(&self, bag: &'b SignalBag, field: SignalCategory, ranking: Ranking) -> Vec<&'b Candidate> {
        let mut indexed: Vec<(usize, &Candidate)> = bag.candidates(field).iter().enumerate().collect();
        indexed.sort_by(|(ia, a), (ib, b)| {
            let origin = match ranking {
                Ranking::Precedence => self
                    .config
                    .precedence
                    .rank(a.origin)
                    .cmp(&self.config.precedence.rank(b.origin)),
                Ranking::Confidence => Ordering::Equal,
            };
            origin
                .then_with(|| b.confidence.total_cmp(&a.confidence))
                .then_with(|| a.rule_order.cmp(&b.rule_order))
                .then_with(|| a.value.cmp(&b.value))
                .then_with(|| ia.cmp(ib))
        });
        indexed.into_iter().map(|(_, c)| c).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use provenant_domain::SignalOrigin;

    fn push(bag: &mut SignalBag, category: SignalCategory, value: &str, confidence: f64, rule: &str, order: u32, origin: SignalOrigin) {
        bag.push(category, Candidate::new(value, confidence, rule, order, origin));
    }

    #[test]
    fn test_empty_bag_resolves_to_empty_record() {
        let resolution = Resolver::default().resolve(&SignalBag::new());
        assert_eq!(resolution.record, ProvenanceRecord::empty());
        assert_eq!(resolution.record.completeness(), 0.0);
        assert_eq!(resolution.usage, UsageSignals::default());
        assert_eq!(resolution.usage.license, LicenseType::Unknown);
        assert!(resolution.warnings.is_empty());
    }

    #[test]
    fn test_highest_confidence_wins() {
        let mut bag = SignalBag::new();
        push(&mut bag, SignalCategory::Institution, "Acme Corporation", 0.6, "institution.organization", 11, SignalOrigin::Content);
        push(&mut bag, SignalCategory::Institution, "Stanford University", 0.7, "institution.academic", 10, SignalOrigin::Content);

        let resolution = Resolver::default().resolve(&bag);
        assert_eq!(resolution.record.institution.as_deref(), Some("Stanford University"));
    }

    #[test]
    fn test_confidence_tie_breaks_by_rule_order_then_lexical() {
        let mut bag = SignalBag::new();
        push(&mut bag, SignalCategory::Title, "Zebra", 0.4, "b", 9, SignalOrigin::Content);
        push(&mut bag, SignalCategory::Title, "Beta", 0.4, "a", 8, SignalOrigin::Content);
        push(&mut bag, SignalCategory::Title, "Alpha", 0.4, "b", 9, SignalOrigin::Content);

        let resolution = Resolver::default().resolve(&bag);
        assert_eq!(resolution.record.title.as_deref(), Some("Beta"));

        let mut bag = SignalBag::new();
        push(&mut bag, SignalCategory::Title, "Zebra", 0.4, "b", 9, SignalOrigin::Content);
        push(&mut bag, SignalCategory::Title, "Alpha", 0.4, "b", 9, SignalOrigin::Content);
        let resolution = Resolver::default().resolve(&bag);
        assert_eq!(resolution.record.title.as_deref(), Some("Alpha"));
    }

    #[test]
    fn test_declared_type_outranks_confident_heuristics() {
        let mut bag = SignalBag::new();
        push(&mut bag, SignalCategory::DocType, "blog_post", 0.6, "meta.keywords", 6, SignalOrigin::Metadata);
        push(&mut bag, SignalCategory::DocType, "preprint", 0.9, "doctype.arxiv", 16, SignalOrigin::Content);

        let resolution = Resolver::default().resolve(&bag);
        assert_eq!(resolution.record.document_type, DocumentType::BlogPost);
    }

    #[test]
    fn test_ambiguity_names_the_precedence_winner() {
        let mut bag = SignalBag::new();
        push(&mut bag, SignalCategory::DocType, "patent", 0.6, "meta.keywords", 6, SignalOrigin::Metadata);
        push(&mut bag, SignalCategory::DocType, "preprint", 0.9, "doctype.arxiv", 16, SignalOrigin::Content);
        push(&mut bag, SignalCategory::DocType, "research_paper", 0.75, "doctype.doi", 18, SignalOrigin::Content);

        let resolution = Resolver::default().resolve(&bag);
        assert_eq!(resolution.record.document_type, DocumentType::Patent);
        assert_eq!(resolution.warnings.len(), 1);
        let warning = &resolution.warnings[0];
        assert_eq!(warning.field, SignalCategory::DocType);
        assert_eq!(DocumentType::parse(&warning.chosen), Some(DocumentType::Patent));
        assert_eq!(warning.rivals, vec!["preprint", "research_paper"]);
    }

    #[test]
    fn test_authors_floor_and_dedup() {
        let mut bag = SignalBag::new();
        push(&mut bag, SignalCategory::Author, "Jane Smith", 0.8, "content.byline", 9, SignalOrigin::Content);
        push(&mut bag, SignalCategory::Author, "JANE SMITH", 0.95, "meta.author", 0, SignalOrigin::Metadata);
        push(&mut bag, SignalCategory::Author, "John Doe", 0.8, "content.byline", 9, SignalOrigin::Content);
        push(&mut bag, SignalCategory::Author, "Maybe Person", 0.3, "ner.person", 27, SignalOrigin::Ner);

        let resolution = Resolver::default().resolve(&bag);
        assert_eq!(resolution.record.authors, vec!["JANE SMITH", "John Doe"]);
    }

    #[test]
    fn test_unparseable_dates_are_skipped() {
        let mut bag = SignalBag::new();
        push(&mut bag, SignalCategory::Date, "not-a-date", 0.9, "meta.created", 2, SignalOrigin::Metadata);
        push(&mut bag, SignalCategory::Date, "2023-01-01", 0.5, "date.year", 15, SignalOrigin::Content);

        let resolution = Resolver::default().resolve(&bag);
        assert_eq!(resolution.record.publication_date, NaiveDate::from_ymd_opt(2023, 1, 1));
        assert!(resolution.trace.iter().any(|t| t.contains("skipped unparseable 'not-a-date'")));
    }

    #[test]
    fn test_ambiguity_is_a_warning_not_an_error() {
        let mut bag = SignalBag::new();
        push(&mut bag, SignalCategory::Institution, "Stanford University", 0.7, "institution.academic", 10, SignalOrigin::Content);
        push(&mut bag, SignalCategory::Institution, "Acme Corporation", 0.7, "ner.organization", 28, SignalOrigin::Ner);
        push(&mut bag, SignalCategory::Institution, "stanford university", 0.7, "ner.organization", 28, SignalOrigin::Ner);

        let resolution = Resolver::default().resolve(&bag);
        assert_eq!(resolution.record.institution.as_deref(), Some("Stanford University"));
        assert_eq!(resolution.warnings.len(), 1);
        assert_eq!(resolution.warnings[0].field, SignalCategory::Institution);
        assert_eq!(resolution.warnings[0].rivals, vec!["Acme Corporation"]);
    }

    #[test]
    fn test_license_and_restrictions() {
        let mut bag = SignalBag::new();
        push(&mut bag, SignalCategory::License, "CC-BY-NC", 0.8, "license.text", 25, SignalOrigin::Content);
        push(&mut bag, SignalCategory::License, "CC-BY", 1.0, "meta.license", 5, SignalOrigin::Metadata);
        push(&mut bag, SignalCategory::Restriction, "no_redistribution", 0.9, "restriction.text", 26, SignalOrigin::Content);
        push(&mut bag, SignalCategory::Restriction, "no_training", 0.9, "restriction.text", 26, SignalOrigin::Content);
        push(&mut bag, SignalCategory::Restriction, "no_training", 0.9, "restriction.text", 26, SignalOrigin::Content);

        let resolution = Resolver::default().resolve(&bag);
        assert_eq!(resolution.usage.license, LicenseType::CcBy);
        assert_eq!(resolution.usage.license_rule.as_deref(), Some("meta.license"));
        assert_eq!(
            resolution.usage.restrictions,
            vec![Restriction::NoTraining, Restriction::NoRedistribution]
        );
    }

    #[test]
    fn test_citation_generated_when_possible() {
        let mut bag = SignalBag::new();
        push(&mut bag, SignalCategory::Author, "Jane Smith", 0.8, "content.byline", 9, SignalOrigin::Content);
        push(&mut bag, SignalCategory::Title, "Coral Reefs", 0.4, "content.title", 8, SignalOrigin::Content);
        push(&mut bag, SignalCategory::Date, "2023-01-01", 0.5, "date.year", 15, SignalOrigin::Content);

        let resolution = Resolver::default().resolve(&bag);
        assert_eq!(resolution.record.citation.as_deref(), Some("Jane Smith (2023). Coral Reefs"));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = ResolverConfig {
            author_confidence_floor: -0.1,
            ..Default::default()
        };
        assert!(matches!(Resolver::new(config), Err(ResolverError::Config(_))));
    }
}

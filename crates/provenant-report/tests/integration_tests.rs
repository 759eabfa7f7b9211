//! Integration tests for provenant-report
//!
//! These tests run whole documents through the pipeline and check the
//! assembled reports.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use provenant_domain::{
    DocumentMetadata, DocumentType, EntityType, LicenseType, NerEntity, RawDocument, ReviewStatus,
    TrustLevel,
};
use provenant_report::{Analyzer, BatchItem, EngineConfig, SCHEMA_VERSION};
use serde_json::json;

const CORAL: &str = "A Study of Coral Reefs\n\
    By Dr. Jane Smith, Stanford University, 2023\n\
    \n\
    In this paper we survey reef health across the Pacific.\n";

fn timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 30, 12, 0, 0).unwrap()
}

fn analyzer() -> Analyzer {
    Analyzer::new(EngineConfig::default()).unwrap()
}

fn coral() -> RawDocument {
    RawDocument::from_bytes("reefs.txt", CORAL.as_bytes())
}

fn licensed_coral() -> RawDocument {
    RawDocument::from_bytes("reefs.txt", CORAL.as_bytes()).with_metadata(DocumentMetadata {
        title: Some("A Study of Coral Reefs".to_string()),
        authors: vec!["Jane Smith".to_string()],
        created: Some("2024-03-01".to_string()),
        document_type: Some("research_paper".to_string()),
        license: Some("CC-BY-4.0".to_string()),
        review_status: Some("peer_reviewed".to_string()),
        ..Default::default()
    })
}

#[test]
fn test_byline_document_without_license() {
    let report = analyzer().analyze_at(&coral(), None, timestamp());

    let provenance = &report.provenance;
    assert_eq!(provenance.authors, vec!["Jane Smith"]);
    assert_eq!(provenance.institution.as_deref(), Some("Stanford University"));
    assert_eq!(provenance.publication_date, NaiveDate::from_ymd_opt(2023, 1, 1));
    assert_eq!(provenance.document_type, DocumentType::ResearchPaper);
    assert_eq!(provenance.review_status, ReviewStatus::Unknown);
    assert_eq!(provenance.completeness, 0.8);
    assert_eq!(
        provenance.citation.as_deref(),
        Some("Jane Smith (2023). A Study of Coral Reefs. Stanford University")
    );

    let expected = 0.30 * 0.85
        + 0.20 * 0.9
        + 0.25 * 0.3
        + 0.15 * 0.5f64.powf(911.0 / 1095.75)
        + 0.10 * 0.8;
    assert!((report.trust.overall_score - expected).abs() < 1e-4);
    assert_eq!(report.trust.trust_level, TrustLevel::Medium);
    assert!(report.trust.overall_score > 0.3 && report.trust.overall_score < 0.7);

    let ai_use = &report.ai_use;
    assert_eq!(ai_use.license, LicenseType::Unknown);
    assert!(ai_use.permissions.summarize);
    assert!(ai_use.permissions.quote);
    assert!(!ai_use.permissions.train);
    assert!(!ai_use.permissions.redistribute);
    assert!(ai_use.requires_attribution);
}

#[test]
fn test_empty_document_degrades_to_baselines() {
    let doc = RawDocument::from_bytes("blank.txt", b"");
    let report = analyzer().analyze_at(&doc, None, timestamp());

    assert_eq!(report.content.total_signals, 0);
    assert!(report.provenance.authors.is_empty());
    assert_eq!(report.provenance.institution, None);
    assert_eq!(report.provenance.publication_date, None);
    assert_eq!(report.provenance.document_type, DocumentType::Unknown);
    assert_eq!(report.provenance.completeness, 0.0);

    let expected = 0.30 * 0.2 + 0.20 * 0.4 + 0.25 * 0.3 + 0.15 * 0.3 + 0.10 * 0.0;
    assert!((report.trust.overall_score - expected).abs() < 1e-9);
    assert_eq!(report.trust.trust_level, TrustLevel::Low);
    assert!(report.trust.dimensions.currency.explanations[0].contains("missing publication date"));
    assert!(report.trust.dimensions.document_type.explanations[0]
        .contains("unrecognized type, default applied"));

    assert_eq!(report.explainability.warnings.len(), 1);
    assert!(report.explainability.rules_fired.is_empty());
}

#[test]
fn test_cc_by_document_with_complete_provenance() {
    let report = analyzer().analyze_at(&licensed_coral(), None, timestamp());

    assert_eq!(report.provenance.completeness, 1.0);
    assert_eq!(report.provenance.review_status, ReviewStatus::PeerReviewed);
    assert_eq!(report.ai_use.license, LicenseType::CcBy);

    let permissions = report.ai_use.permissions;
    assert!(permissions.summarize && permissions.quote && permissions.train && permissions.redistribute);
    assert!(report.ai_use.requires_attribution);
    assert!(report.ai_use.attribution_text.is_some());
    assert_eq!(report.trust.trust_level, TrustLevel::High);
}

#[test]
fn test_no_training_clause_overrides_license() {
    let text = format!(
        "{}\nThis document must not be used to train AI models.",
        CORAL
    );
    let doc = RawDocument::from_bytes("reefs.txt", text.as_bytes()).with_metadata(DocumentMetadata {
        license: Some("public domain".to_string()),
        ..Default::default()
    });
    let report = analyzer().analyze_at(&doc, None, timestamp());

    assert_eq!(report.ai_use.license, LicenseType::PublicDomain);
    assert!(!report.ai_use.permissions.train);
    assert!(report.ai_use.permissions.redistribute);
    assert!(!report.ai_use.requires_attribution);
}

#[test]
fn test_nc_sa_license_reports_share_alike() {
    let doc = RawDocument::from_bytes("reefs.txt", CORAL.as_bytes()).with_metadata(DocumentMetadata {
        license: Some("CC-BY-NC-SA-4.0".to_string()),
        ..Default::default()
    });
    let report = analyzer().analyze_at(&doc, None, timestamp());

    assert_eq!(report.ai_use.license, LicenseType::CcByNcSa);
    assert!(!report.ai_use.permissions.train);
    assert!(report
        .ai_use
        .conditions
        .iter()
        .any(|c| c == "Share adaptations under the same license"));
}

#[test]
fn test_ner_entities_feed_provenance() {
    let text = "Coral bleaching notes\n\nObservations from the northern reef survey.";
    let ner = vec![
        NerEntity::new("Maria Lopez", EntityType::Person, 0, 11, 0.9),
        NerEntity::new("University of Queensland", EntityType::Org, 20, 44, 0.9),
    ];
    let doc = RawDocument::from_bytes("notes.txt", text.as_bytes());

    let report = analyzer().analyze_at(&doc, Some(&ner), timestamp());
    assert_eq!(report.provenance.authors, vec!["Maria Lopez"]);
    assert_eq!(
        report.provenance.institution.as_deref(),
        Some("University of Queensland")
    );

    let without = analyzer().analyze_at(&doc, None, timestamp());
    assert!(without.provenance.authors.is_empty());
}

#[test]
fn test_reports_are_reproducible() {
    let analyzer = analyzer();
    let mut first = analyzer.analyze_at(&coral(), None, timestamp());
    let second = analyzer.analyze_at(&coral(), None, timestamp());

    assert_ne!(first.identity.document_id, second.identity.document_id);
    first.identity.document_id = second.identity.document_id.clone();
    assert_eq!(first, second);
}

#[test]
fn test_flat_keys_are_stable() {
    let report = analyzer().analyze_at(&coral(), None, timestamp());
    let flat = report.flatten().unwrap();

    assert_eq!(flat["technical.schema_version"], json!(SCHEMA_VERSION));
    assert_eq!(flat["identity.filename"], json!("reefs.txt"));
    assert_eq!(flat["identity.size_bytes"], json!(CORAL.len()));
    assert_eq!(flat["provenance.publication_date"], json!("2023-01-01"));
    assert_eq!(flat["provenance.authors"], json!(["Jane Smith"]));
    assert_eq!(flat["trust.trust_level"], json!("medium"));
    assert_eq!(flat["ai_use.license"], json!("unknown"));
    assert_eq!(flat["ai_use.permissions.train"], json!(false));
    assert_eq!(flat["content.signal_counts.author"], json!(1));
    for key in [
        "trust.overall_score",
        "trust.weights.authority",
        "trust.dimensions.authority.score",
        "trust.dimensions.completeness.explanations",
        "explainability.inference_sources",
        "technical.processing_timestamp",
        "technical.analysis_date",
    ] {
        assert!(flat.contains_key(key), "missing key {}", key);
    }
}

#[test]
fn test_json_round_trip() {
    let report = analyzer().analyze_at(&licensed_coral(), None, timestamp());
    let parsed: provenant_report::Report =
        serde_json::from_str(&report.to_json_pretty().unwrap()).unwrap();
    assert_eq!(parsed, report);
}

#[test]
fn test_batch_keeps_input_order() {
    let items = vec![
        BatchItem::new(coral()),
        BatchItem::new(RawDocument::from_bytes("blank.txt", b"")),
        BatchItem::new(licensed_coral()),
    ];
    let outcome = analyzer().analyze_batch_at(&items, timestamp());

    let names: Vec<_> = outcome
        .reports
        .iter()
        .map(|r| r.identity.filename.as_str())
        .collect();
    assert_eq!(names, vec!["reefs.txt", "blank.txt", "reefs.txt"]);

    let summary = &outcome.summary;
    assert_eq!(summary.documents, 3);
    assert_eq!(summary.at_level(TrustLevel::High), 1);
    assert_eq!(summary.at_level(TrustLevel::Medium), 1);
    assert_eq!(summary.at_level(TrustLevel::Low), 1);
    assert!(summary.warnings >= 1);

    let single = analyzer().analyze_at(&coral(), None, timestamp());
    assert_eq!(outcome.reports[0].trust, single.trust);
}

#[test]
fn test_strict_preset_restricts_legal_documents() {
    let analyzer = Analyzer::new(EngineConfig::strict()).unwrap();
    let doc = RawDocument::from_bytes("ruling.txt", CORAL.as_bytes()).with_metadata(DocumentMetadata {
        document_type: Some("legal_document".to_string()),
        license: Some("CC-BY".to_string()),
        ..Default::default()
    });
    let report = analyzer.analyze_at(&doc, None, timestamp());
    assert_eq!(report.provenance.document_type, DocumentType::LegalDocument);
    assert!(!report.ai_use.permissions.train);
    assert!(!report.ai_use.permissions.redistribute);
    assert!(report.ai_use.permissions.quote);
}

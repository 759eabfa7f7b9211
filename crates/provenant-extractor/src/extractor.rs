//! Core Extractor implementation

use crate::config::ExtractorConfig;
use crate::error::ExtractorError;
use crate::patterns::{self, ACADEMIC, ARXIV, BYLINE, DOI, ORGANIZATION};
use crate::rules::RuleId;
use provenant_domain::{
    Candidate, DocumentType, EntityType, LicenseType, NerEntity, RawDocument, ReviewStatus,
    SignalBag,
};
use tracing::{debug, info, warn};

/// Signal bag plus the input notes raised while building it
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Extraction {
    /// Collected candidates
    pub bag: SignalBag,
    /// Input problems that degraded extraction (empty text, truncation)
    pub warnings: Vec<String>,
}

/// The Extractor turns a raw document into a bag of candidate signals
///
/// Rules run once each, in [`RuleId::ALL`] order. A rule firing never
/// suppresses another; conflicts are left to the resolver.
#[derive(Debug, Clone, Default)]
pub struct Extractor {
    config: ExtractorConfig,
}

/// Views over the document text shared by the content rules
struct ScanContext<'a> {
    doc: &'a RawDocument,
    text: String,
    header: Vec<&'a str>,
    head: String,
    paragraphs: String,
    ner: &'a [NerEntity],
}

impl Extractor {
    /// Create a new Extractor, validating the configuration
    pub fn new(config: ExtractorConfig) -> Result<Self, ExtractorError> {
        config.validate().map_err(ExtractorError::Config)?;
        Ok(Self { config })
    }

    /// The configuration in use
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Extract the signal bag of a document
    pub fn extract(&self, doc: &RawDocument, ner: Option<&[NerEntity]>) -> SignalBag {
        self.extract_detailed(doc, ner).bag
    }

    /// Extract the signal bag and report input problems
    ///
    /// Empty text yields an empty bag and a warning, never an error.
    pub fn extract_detailed(&self, doc: &RawDocument, ner: Option<&[NerEntity]>) -> Extraction {
        let mut extraction = Extraction::default();

        if doc.is_empty() {
            warn!("Document '{}' has no text, skipping extraction", doc.filename);
            extraction
                .warnings
                .push("input: document text is empty; no signals extracted".to_string());
            return extraction;
        }

        let char_count = doc.text.chars().count();
        if char_count > self.config.max_scan_chars {
            warn!(
                "Document '{}' has {} chars, scanning the first {}",
                doc.filename, char_count, self.config.max_scan_chars
            );
            extraction.warnings.push(format!(
                "input: text truncated from {} to {} characters for extraction",
                char_count, self.config.max_scan_chars
            ));
        }

        let ctx = self.scan_context(doc, ner.unwrap_or(&[]));
        for rule in RuleId::ALL {
            let emitted = evaluate(rule, &ctx);
            if !emitted.is_empty() {
                debug!("Rule {} emitted {} candidate(s)", rule, emitted.len());
            }
            for (value, confidence) in emitted {
                extraction.bag.push(
                    rule.category(),
                    Candidate::new(value, confidence, rule.as_str(), rule.order(), rule.origin()),
                );
            }
        }

        info!(
            "Extracted {} candidates from '{}' ({} rules fired)",
            extraction.bag.len(),
            doc.filename,
            extraction.bag.rules_fired().len()
        );
        extraction
    }

    fn scan_context<'a>(&self, doc: &'a RawDocument, ner: &'a [NerEntity]) -> ScanContext<'a> {
        let scanned = truncate_chars(&doc.text, self.config.max_scan_chars);
        let text = scanned.replace("\r\n", "\n");
        let header = scanned
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .take(self.config.header_lines)
            .collect();
        let head = truncate_chars(&text, self.config.head_chars).to_string();
        let paragraphs = text
            .split("\n\n")
            .filter(|p| !p.trim().is_empty())
            .take(self.config.paragraphs)
            .collect::<Vec<_>>()
            .join("\n\n");
        ScanContext {
            doc,
            text,
            header,
            head,
            paragraphs,
            ner,
        }
    }
}

/// Longest prefix of at most `max` characters
fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Evaluate one rule, returning `(value, confidence)` pairs in emission order
fn evaluate(rule: RuleId, ctx: &ScanContext<'_>) -> Vec<(String, f64)> {
    let base = rule.base_confidence();
    let meta = &ctx.doc.metadata;
    let fixed = |values: Vec<String>| -> Vec<(String, f64)> {
        values.into_iter().map(|v| (v, base)).collect()
    };
    let single = |value: Option<String>| -> Vec<(String, f64)> {
        value.into_iter().map(|v| (v, base)).collect()
    };

    match rule {
        RuleId::MetaAuthor => fixed(
            meta.authors
                .iter()
                .map(|a| a.trim().to_string())
                .filter(|a| !a.is_empty())
                .collect(),
        ),
        RuleId::MetaTitle => single(non_empty(meta.title.as_deref())),
        RuleId::MetaCreated => single(meta.created.as_deref().and_then(patterns::normalize_date)),
        RuleId::MetaDocumentType => single(
            meta.document_type
                .as_deref()
                .and_then(DocumentType::parse)
                .filter(|t| *t != DocumentType::Unknown)
                .map(|t| t.as_str().to_string()),
        ),
        RuleId::MetaReviewStatus => single(
            meta.review_status
                .as_deref()
                .and_then(ReviewStatus::parse)
                .filter(|s| *s != ReviewStatus::Unknown)
                .map(|s| s.as_str().to_string()),
        ),
        RuleId::MetaLicense => single(non_empty(meta.license.as_deref()).map(|declared| {
            let license = LicenseType::parse(&declared).unwrap_or_else(|| {
                debug!("Declared license '{}' not recognized", declared);
                LicenseType::Unknown
            });
            license.as_str().to_string()
        })),
        RuleId::MetaKeywords => single(
            meta.keywords
                .iter()
                .any(|k| k.to_lowercase().contains("patent"))
                .then(|| DocumentType::Patent.as_str().to_string()),
        ),
        RuleId::FilenamePattern => {
            let name = ctx.doc.filename.to_lowercase();
            let doc_type = if name.contains("report") {
                Some(DocumentType::TechnicalReport)
            } else if name.contains("patent") {
                Some(DocumentType::Patent)
            } else if name.contains("thesis") || name.contains("dissertation") {
                Some(DocumentType::Thesis)
            } else {
                None
            };
            single(doc_type.map(|t| t.as_str().to_string()))
        }
        RuleId::ContentTitle => single(content_title(&ctx.header)),
        RuleId::ContentByline => fixed(
            ctx.header
                .iter()
                .find_map(|line| BYLINE.captures(line))
                .map(|caps| patterns::byline_names(&caps[1]))
                .unwrap_or_default(),
        ),
        RuleId::InstitutionAcademic => fixed(patterns::institutions(&ACADEMIC, &ctx.paragraphs)),
        RuleId::InstitutionOrganization => {
            fixed(patterns::institutions(&ORGANIZATION, &ctx.paragraphs))
        }
        RuleId::InstitutionEmailDomain => fixed(patterns::institutional_email_domains(&ctx.text)),
        RuleId::DateIso => single(patterns::first_iso_date(&ctx.head)),
        RuleId::DateUs => single(patterns::first_us_date(&ctx.head)),
        RuleId::DateYear => single(patterns::first_year(&ctx.head)),
        RuleId::DoctypeArxiv => single(
            ARXIV
                .is_match(&ctx.text)
                .then(|| DocumentType::Preprint.as_str().to_string()),
        ),
        RuleId::DoctypeDoiThesis => single(
            patterns::has_doi_with_thesis_words(&ctx.text)
                .then(|| DocumentType::Thesis.as_str().to_string()),
        ),
        RuleId::DoctypeDoi => single(
            DOI.is_match(&ctx.text)
                .then(|| DocumentType::ResearchPaper.as_str().to_string()),
        ),
        RuleId::DoctypeCue => single(patterns::doctype_cue(&ctx.text).map(|t| t.as_str().to_string())),
        RuleId::ReviewExplicit => {
            single(patterns::explicit_review(&ctx.text).map(|s| s.as_str().to_string()))
        }
        RuleId::ReviewPreprint => single(
            ARXIV
                .is_match(&ctx.text)
                .then(|| ReviewStatus::Unreviewed.as_str().to_string()),
        ),
        RuleId::ReviewJournal => single(
            patterns::has_journal_formatting(&ctx.text)
                .then(|| ReviewStatus::PeerReviewed.as_str().to_string()),
        ),
        RuleId::ReviewEditorial => single(
            patterns::has_editorial_cue(&ctx.text)
                .then(|| ReviewStatus::EditorReviewed.as_str().to_string()),
        ),
        RuleId::ReviewBlog => single(
            patterns::has_blog_cue(&ctx.text)
                .then(|| ReviewStatus::SelfPublished.as_str().to_string()),
        ),
        RuleId::LicenseText => {
            single(patterns::license_statement(&ctx.text).map(|l| l.as_str().to_string()))
        }
        RuleId::RestrictionText => fixed(
            patterns::restriction_clauses(&ctx.text)
                .into_iter()
                .map(|r| r.as_str().to_string())
                .collect(),
        ),
        RuleId::NerPerson => ner_candidates(ctx.ner, EntityType::Person, base, |t| {
            non_empty(Some(t))
        }),
        RuleId::NerOrganization => ner_candidates(ctx.ner, EntityType::Org, base, |t| {
            non_empty(Some(t))
        }),
        RuleId::NerDate => ner_candidates(ctx.ner, EntityType::Date, base, patterns::normalize_date),
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// First header line of plausible title length that is not a byline
fn content_title(header: &[&str]) -> Option<String> {
    let first = header.first()?;
    let title = first.trim_start_matches('#').trim();
    let len = title.chars().count();
    if len > 10 && len < 200 && !BYLINE.is_match(title) {
        Some(title.to_string())
    } else {
        None
    }
}

/// Candidates for every entity of a type; confidence is `base × entity confidence`
fn ner_candidates(
    entities: &[NerEntity],
    entity_type: EntityType,
    base: f64,
    normalize: impl Fn(&str) -> Option<String>,
) -> Vec<(String, f64)> {
    entities
        .iter()
        .filter(|e| e.entity_type == entity_type)
        .filter_map(|e| normalize(&e.text).map(|v| (v, base * e.confidence)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_chars_respects_boundaries() {
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(truncate_chars("abc", 10), "abc");
        assert_eq!(truncate_chars("", 3), "");
    }

    #[test]
    fn test_content_title_rules() {
        assert_eq!(
            content_title(&["# A Study of Coral Reefs"]).as_deref(),
            Some("A Study of Coral Reefs")
        );
        assert_eq!(content_title(&["Short"]), None);
        assert_eq!(content_title(&["By Dr. Jane Smith, Stanford"]), None);
        assert_eq!(content_title(&[]), None);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = ExtractorConfig {
            header_lines: 0,
            ..Default::default()
        };
        assert!(matches!(Extractor::new(config), Err(ExtractorError::Config(_))));
    }
}

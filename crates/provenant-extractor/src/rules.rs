//! The extraction rule table
//!
//! Every rule has a stable id, the category it feeds, the origin of its
//! evidence and a fixed base confidence. Rules are evaluated once per
//! document in [`RuleId::ALL`] order; a rule's position in that order is the
//! `rule_order` stamped on the candidates it emits.

use provenant_domain::{SignalCategory, SignalOrigin};
use std::fmt;

/// Identifier of an extraction rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RuleId {
    /// Declared author names
    MetaAuthor,
    /// Declared title
    MetaTitle,
    /// Declared creation date
    MetaCreated,
    /// Declared document type
    MetaDocumentType,
    /// Declared review status
    MetaReviewStatus,
    /// Declared license
    MetaLicense,
    /// "patent" among the declared keywords
    MetaKeywords,
    /// Document type hints in the file name
    FilenamePattern,
    /// First line of plausible title length
    ContentTitle,
    /// `By ...` / `Author(s): ...` line near the top
    ContentByline,
    /// University, college, institute or school names
    InstitutionAcademic,
    /// Laboratory, agency, ministry, corporation or department names
    InstitutionOrganization,
    /// Academic or government e-mail domains
    InstitutionEmailDomain,
    /// `YYYY-MM-DD` dates
    DateIso,
    /// `MM/DD/YYYY` dates
    DateUs,
    /// Bare 19xx/20xx years
    DateYear,
    /// arXiv identifiers
    DoctypeArxiv,
    /// DOI plus thesis vocabulary
    DoctypeDoiThesis,
    /// DOI
    DoctypeDoi,
    /// Keyword cue table
    DoctypeCue,
    /// Explicit peer review statements
    ReviewExplicit,
    /// arXiv identifiers imply no review
    ReviewPreprint,
    /// Journal formatting
    ReviewJournal,
    /// Editorial statements
    ReviewEditorial,
    /// Blog formatting
    ReviewBlog,
    /// License statements in the text
    LicenseText,
    /// Usage restriction clauses in the text
    RestrictionText,
    /// NER person entities
    NerPerson,
    /// NER organization entities
    NerOrganization,
    /// NER date entities
    NerDate,
}

impl RuleId {
    /// Every rule in evaluation order
    pub const ALL: [RuleId; 30] = [
        RuleId::MetaAuthor,
        RuleId::MetaTitle,
        RuleId::MetaCreated,
        RuleId::MetaDocumentType,
        RuleId::MetaReviewStatus,
        RuleId::MetaLicense,
        RuleId::MetaKeywords,
        RuleId::FilenamePattern,
        RuleId::ContentTitle,
        RuleId::ContentByline,
        RuleId::InstitutionAcademic,
        RuleId::InstitutionOrganization,
        RuleId::InstitutionEmailDomain,
        RuleId::DateIso,
        RuleId::DateUs,
        RuleId::DateYear,
        RuleId::DoctypeArxiv,
        RuleId::DoctypeDoiThesis,
        RuleId::DoctypeDoi,
        RuleId::DoctypeCue,
        RuleId::ReviewExplicit,
        RuleId::ReviewPreprint,
        RuleId::ReviewJournal,
        RuleId::ReviewEditorial,
        RuleId::ReviewBlog,
        RuleId::LicenseText,
        RuleId::RestrictionText,
        RuleId::NerPerson,
        RuleId::NerOrganization,
        RuleId::NerDate,
    ];

    /// Stable rule id used in explanation traces
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleId::MetaAuthor => "meta.author",
            RuleId::MetaTitle => "meta.title",
            RuleId::MetaCreated => "meta.created",
            RuleId::MetaDocumentType => "meta.document_type",
            RuleId::MetaReviewStatus => "meta.review_status",
            RuleId::MetaLicense => "meta.license",
            RuleId::MetaKeywords => "meta.keywords",
            RuleId::FilenamePattern => "filename.pattern",
            RuleId::ContentTitle => "content.title",
            RuleId::ContentByline => "content.byline",
            RuleId::InstitutionAcademic => "institution.academic",
            RuleId::InstitutionOrganization => "institution.organization",
            RuleId::InstitutionEmailDomain => "institution.email_domain",
            RuleId::DateIso => "date.iso",
            RuleId::DateUs => "date.us",
            RuleId::DateYear => "date.year",
            RuleId::DoctypeArxiv => "doctype.arxiv",
            RuleId::DoctypeDoiThesis => "doctype.doi_thesis",
            RuleId::DoctypeDoi => "doctype.doi",
            RuleId::DoctypeCue => "doctype.cue",
            RuleId::ReviewExplicit => "review.explicit",
            RuleId::ReviewPreprint => "review.preprint",
            RuleId::ReviewJournal => "review.journal",
            RuleId::ReviewEditorial => "review.editorial",
            RuleId::ReviewBlog => "review.blog",
            RuleId::LicenseText => "license.text",
            RuleId::RestrictionText => "restriction.text",
            RuleId::NerPerson => "ner.person",
            RuleId::NerOrganization => "ner.organization",
            RuleId::NerDate => "ner.date",
        }
    }

    /// Look a rule up by its id
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|r| r.as_str() == s)
    }

    /// Position in the evaluation order
    pub fn order(&self) -> u32 {
        *self as u32
    }

    /// Category of the candidates this rule emits
    pub fn category(&self) -> SignalCategory {
        match self {
            RuleId::MetaAuthor | RuleId::ContentByline | RuleId::NerPerson => SignalCategory::Author,
            RuleId::MetaTitle | RuleId::ContentTitle => SignalCategory::Title,
            RuleId::MetaCreated
            | RuleId::DateIso
            | RuleId::DateUs
            | RuleId::DateYear
            | RuleId::NerDate => SignalCategory::Date,
            RuleId::MetaDocumentType
            | RuleId::MetaKeywords
            | RuleId::FilenamePattern
            | RuleId::DoctypeArxiv
            | RuleId::DoctypeDoiThesis
            | RuleId::DoctypeDoi
            | RuleId::DoctypeCue => SignalCategory::DocType,
            RuleId::MetaReviewStatus
            | RuleId::ReviewExplicit
            | RuleId::ReviewPreprint
            | RuleId::ReviewJournal
            | RuleId::ReviewEditorial
            | RuleId::ReviewBlog => SignalCategory::ReviewStatus,
            RuleId::MetaLicense | RuleId::LicenseText => SignalCategory::License,
            RuleId::RestrictionText => SignalCategory::Restriction,
            RuleId::InstitutionAcademic
            | RuleId::InstitutionOrganization
            | RuleId::InstitutionEmailDomain
            | RuleId::NerOrganization => SignalCategory::Institution,
        }
    }

    /// Where the rule takes its evidence from
    pub fn origin(&self) -> SignalOrigin {
        match self {
            RuleId::MetaAuthor
            | RuleId::MetaTitle
            | RuleId::MetaCreated
            | RuleId::MetaDocumentType
            | RuleId::MetaReviewStatus
            | RuleId::MetaLicense
            | RuleId::MetaKeywords => SignalOrigin::Metadata,
            RuleId::NerPerson | RuleId::NerOrganization | RuleId::NerDate => SignalOrigin::Ner,
            _ => SignalOrigin::Content,
        }
    }

    /// Fixed confidence of the rule
    ///
    /// NER rules scale this by the entity confidence reported by the model.
    pub fn base_confidence(&self) -> f64 {
        match self {
            RuleId::MetaAuthor | RuleId::MetaTitle => 0.95,
            RuleId::MetaCreated => 0.9,
            RuleId::MetaDocumentType | RuleId::MetaReviewStatus | RuleId::MetaLicense => 1.0,
            RuleId::MetaKeywords => 0.6,
            RuleId::FilenamePattern => 0.5,
            RuleId::ContentTitle => 0.4,
            RuleId::ContentByline => 0.8,
            RuleId::InstitutionAcademic => 0.7,
            RuleId::InstitutionOrganization => 0.6,
            RuleId::InstitutionEmailDomain => 0.4,
            RuleId::DateIso => 0.7,
            RuleId::DateUs => 0.6,
            RuleId::DateYear => 0.5,
            RuleId::DoctypeArxiv => 0.9,
            RuleId::DoctypeDoiThesis => 0.8,
            RuleId::DoctypeDoi => 0.75,
            RuleId::DoctypeCue => 0.5,
            RuleId::ReviewExplicit => 0.8,
            RuleId::ReviewPreprint => 0.7,
            RuleId::ReviewJournal | RuleId::ReviewEditorial | RuleId::ReviewBlog => 0.6,
            RuleId::LicenseText => 0.8,
            RuleId::RestrictionText => 0.9,
            RuleId::NerPerson => 0.75,
            RuleId::NerOrganization => 0.7,
            RuleId::NerDate => 0.6,
        }
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Version of the rule table, reported alongside results
pub const RULE_SET_VERSION: &str = "2024.1";

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_order_matches_position() {
        for (i, rule) in RuleId::ALL.iter().enumerate() {
            assert_eq!(rule.order(), i as u32, "rule {} out of place", rule);
        }
    }

    #[test]
    fn test_ids_are_unique_and_parse_back() {
        let ids: HashSet<_> = RuleId::ALL.iter().map(|r| r.as_str()).collect();
        assert_eq!(ids.len(), RuleId::ALL.len());
        for rule in RuleId::ALL {
            assert_eq!(RuleId::parse(rule.as_str()), Some(rule));
        }
    }

    #[test]
    fn test_metadata_rules_come_first() {
        let origins: Vec<_> = RuleId::ALL.iter().map(|r| r.origin()).collect();
        let mut sorted = origins.clone();
        sorted.sort();
        assert_eq!(origins, sorted);
    }

    #[test]
    fn test_confidences_in_unit_range() {
        for rule in RuleId::ALL {
            let c = rule.base_confidence();
            assert!(c > 0.0 && c <= 1.0, "{} has confidence {}", rule, c);
        }
    }
}

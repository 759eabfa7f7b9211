//! Text patterns and normalizers shared by the extraction rules

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use provenant_domain::{DocumentType, LicenseType, Restriction, ReviewStatus};
use regex::Regex;

/// `By ...`, `Author: ...`, `Authors - ...`, `Written by ...`
pub static BYLINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\s*(?:written\s+by|authors?|by)\s*[:\-]?\s+(.+)$").expect("byline regex")
});

static BYLINE_SPLIT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*(?:,|;|&|\band\b)\s*").expect("byline split regex"));

static HONORIFIC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?i:dr|prof|mr|mrs|ms|mx)\.?\s+").expect("honorific regex"));

static DEGREE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:^|\s+)(?:ph\.?\s?d\.?|m\.?d\.?)$").expect("degree regex")
});

/// Capitalized phrase ending in an academic keyword, with an optional `of X` tail
pub static ACADEMIC: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\b((?:[A-Z][A-Za-z&'.\-]+[ \t]+){0,4}(?:University|College|Institute|Academy|Polytechnic|School)\b(?:[ \t]+of(?:[ \t]+(?:the[ \t]+)?[A-Z][A-Za-z&'.\-]+){1,4})?)",
    )
    .expect("academic institution regex")
});

/// Capitalized phrase ending in an organization keyword, with an optional `of X` tail
pub static ORGANIZATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\b((?:[A-Z][A-Za-z&'.\-]+[ \t]+){0,4}(?:Laboratory|Laboratories|Agency|Ministry|Corporation|Department|Center|Centre|Foundation|Council|Bureau|Inc|Ltd|GmbH)\b(?:[ \t]+(?:of|for)(?:[ \t]+(?:the[ \t]+)?[A-Z][A-Za-z&'.\-]+){1,4})?)",
    )
    .expect("organization regex")
});

static EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[A-Za-z0-9._%+\-]+@([A-Za-z0-9.\-]+\.[A-Za-z]{2,})").expect("email regex")
});

static DATE_ISO: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(\d{4})-(\d{2})-(\d{2})\b").expect("iso date regex"));

static DATE_US: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(\d{1,2})/(\d{1,2})/(\d{4})\b").expect("us date regex"));

static YEAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(19\d{2}|20\d{2})\b").expect("year regex"));

/// arXiv identifier
pub static ARXIV: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\barxiv:\s?\d{4}\.\d{4,5}(?:v\d+)?").expect("arxiv regex")
});

/// DOI
pub static DOI: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b10\.\d{4,9}/[-._;()/:A-Za-z0-9]+").expect("doi regex"));

static THESIS_WORDS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(?:thesis|dissertation|phd)\b").expect("thesis regex"));

/// Keyword cues for document types, most specific first
static DOCTYPE_CUES: Lazy<Vec<(Regex, DocumentType)>> = Lazy::new(|| {
    [
        (r"technical\s+report", DocumentType::TechnicalReport),
        (r"dissertation|thesis", DocumentType::Thesis),
        (r"proceedings|conference", DocumentType::ConferencePaper),
        (r"preprint", DocumentType::Preprint),
        (r"plaintiff|defendant|case\s+no|court\s+of", DocumentType::LegalDocument),
        (r"patent", DocumentType::Patent),
        (r"federal\s+register|ministry\s+of|government\s+publication", DocumentType::GovernmentDocument),
        (r"iso/iec|standard\s+specification", DocumentType::Standard),
        (r"wikipedia", DocumentType::WikipediaEntry),
        (r"blog|posted\s+on", DocumentType::BlogPost),
        (r"newspaper|staff\s+reporter|press\s+release", DocumentType::NewspaperArticle),
        (r"paper|journal|abstract", DocumentType::ResearchPaper),
    ]
    .into_iter()
    .map(|(pattern, doc_type)| {
        (
            Regex::new(&format!(r"(?i)\b(?:{})\b", pattern)).expect("doctype cue regex"),
            doc_type,
        )
    })
    .collect()
});

static NOT_PEER_REVIEWED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\bnot\s+(?:yet\s+)?(?:been\s+)?peer[\s\-]reviewed").expect("negated review regex")
});

static PEER_REVIEWED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\bpeer[\s\-]reviewed\b|\brefereed\b|this\s+paper\s+was\s+reviewed")
        .expect("peer review regex")
});

static JOURNAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\bjournal\s+of\b|\bvol\.\s*\d|\bpp\.\s*\d|doi\.org").expect("journal regex")
});

static EDITORIAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\bedited\s+by\b|\beditor'?s\s+note\b|\beditorial\s+board\b")
        .expect("editorial regex")
});

static BLOG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\bposted\s+on\b|\bblog\b|medium\.com").expect("blog regex")
});

/// License statements, most specific first
static LICENSE_TEXT: Lazy<Vec<(Regex, LicenseType)>> = Lazy::new(|| {
    [
        (
            r"\bcc[\s\-]by[\s\-]nc[\s\-]nd|attribution[\s\-]noncommercial[\s\-]noderivatives",
            LicenseType::CcByNcNd,
        ),
        (
            r"\bcc[\s\-]by[\s\-]nc[\s\-]sa|attribution[\s\-]noncommercial[\s\-]sharealike",
            LicenseType::CcByNcSa,
        ),
        (
            r"\bcc[\s\-]by[\s\-]nc|attribution[\s\-]noncommercial",
            LicenseType::CcByNc,
        ),
        (
            r"\bcc[\s\-]by[\s\-]nd|attribution[\s\-]noderivatives",
            LicenseType::CcByNd,
        ),
        (
            r"\bcc[\s\-]by[\s\-]sa|attribution[\s\-]sharealike",
            LicenseType::CcBySa,
        ),
        (
            r"\bcc[\s\-]by\b|creative\s+commons\s+attribution",
            LicenseType::CcBy,
        ),
        (r"\bcc0\b|public\s+domain", LicenseType::PublicDomain),
        (r"all\s+rights\s+reserved", LicenseType::AllRightsReserved),
    ]
    .into_iter()
    .map(|(pattern, license)| {
        (
            Regex::new(&format!("(?i){}", pattern)).expect("license regex"),
            license,
        )
    })
    .collect()
});

/// Usage restriction clauses
static RESTRICTIONS: Lazy<Vec<(Regex, Restriction)>> = Lazy::new(|| {
    [
        (
            r"\bno\s+(?:ai|machine[\s\-]learning|model)\s+training\b|\bnot\s+(?:be\s+)?used\s+(?:to|for)\s+(?:train|training)\b|\b(?:ai|machine[\s\-]learning)\s+training\s+(?:is\s+)?(?:prohibited|forbidden|not\s+permitted)",
            Restriction::NoTraining,
        ),
        (
            r"\bdo\s+not\s+redistribute\b|\bno\s+redistribution\b|\bmay\s+not\s+be\s+redistributed\b|\bredistribution\s+(?:is\s+)?(?:prohibited|not\s+permitted)",
            Restriction::NoRedistribution,
        ),
        (
            r"\bno\s+quoting\b|\bdo\s+not\s+quote\b|\bmay\s+not\s+be\s+quoted\b",
            Restriction::NoQuoting,
        ),
        (
            r"\bno\s+summari[sz]ation\b|\bdo\s+not\s+summari[sz]e\b|\bmay\s+not\s+be\s+summari[sz]ed\b",
            Restriction::NoSummarization,
        ),
    ]
    .into_iter()
    .map(|(pattern, restriction)| {
        (
            Regex::new(&format!("(?i){}", pattern)).expect("restriction regex"),
            restriction,
        )
    })
    .collect()
});

/// `References`, `Bibliography` or `Works cited` on a line of its own
pub static REFERENCES_HEADER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?im)^\s*(?:#+\s*)?(?:\d+\.?\s*)?(?:references|bibliography|works\s+cited)\s*:?\s*$")
        .expect("references regex")
});

/// `(Smith, 2014)`, `(Smith et al. 2014a)` or `[1, 2]` citation styles
pub static CITATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\([A-Z][A-Za-z\-]+(?:\s+et\s+al\.)?,?\s+\d{4}[a-z]?\)|\[\d+(?:\s*[,\-]\s*\d+)*\]")
        .expect("citation regex")
});

/// Normalize a date string to `YYYY-MM-DD`
///
/// Accepts an ISO date prefix (`2023-05-01T...`), `MM/DD/YYYY`, or a bare
/// four-digit year which maps to January 1st.
pub fn normalize_date(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if let Some(prefix) = raw.get(..10) {
        if let Ok(date) = NaiveDate::parse_from_str(prefix, "%Y-%m-%d") {
            return Some(date.format("%Y-%m-%d").to_string());
        }
    }
    if let Some(caps) = DATE_US.captures(raw) {
        if let Some(date) = us_date(&caps[1], &caps[2], &caps[3]) {
            return Some(date);
        }
    }
    let year = raw.get(..4)?;
    if year.chars().all(|c| c.is_ascii_digit()) && raw[4..].chars().all(|c| !c.is_ascii_digit()) {
        return year_date(year);
    }
    None
}

fn us_date(month: &str, day: &str, year: &str) -> Option<String> {
    let date = NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, day.parse().ok()?)?;
    Some(date.format("%Y-%m-%d").to_string())
}

fn year_date(year: &str) -> Option<String> {
    let date = NaiveDate::from_ymd_opt(year.parse().ok()?, 1, 1)?;
    Some(date.format("%Y-%m-%d").to_string())
}

/// First valid `YYYY-MM-DD` date
pub fn first_iso_date(text: &str) -> Option<String> {
    DATE_ISO.captures_iter(text).find_map(|caps| {
        let date = NaiveDate::from_ymd_opt(
            caps[1].parse().ok()?,
            caps[2].parse().ok()?,
            caps[3].parse().ok()?,
        )?;
        Some(date.format("%Y-%m-%d").to_string())
    })
}

/// First valid `MM/DD/YYYY` date
pub fn first_us_date(text: &str) -> Option<String> {
    DATE_US
        .captures_iter(text)
        .find_map(|caps| us_date(&caps[1], &caps[2], &caps[3]))
}

/// First plausible year, as January 1st of that year
pub fn first_year(text: &str) -> Option<String> {
    YEAR.captures_iter(text).find_map(|caps| year_date(&caps[1]))
}

/// Split the payload of a byline into person names
///
/// Honorifics and degree suffixes are stripped; segments that name an
/// institution or contain digits are skipped.
pub fn byline_names(payload: &str) -> Vec<String> {
    BYLINE_SPLIT
        .split(payload)
        .filter_map(clean_person_name)
        .collect()
}

fn clean_person_name(segment: &str) -> Option<String> {
    let mut name = segment.trim().trim_end_matches('.').trim();
    while let Some(m) = HONORIFIC.find(name) {
        name = name[m.end()..].trim();
    }
    let name = DEGREE.replace(name, "");
    let name = name.trim().trim_end_matches(',').trim();

    if name.is_empty() || name.chars().any(|c| c.is_ascii_digit()) || is_institution(name) {
        return None;
    }
    looks_like_person(name).then(|| name.to_string())
}

/// Every word is capitalized (allowing name particles) and there are at most five
fn looks_like_person(name: &str) -> bool {
    const PARTICLES: [&str; 8] = ["van", "von", "de", "der", "da", "di", "la", "le"];
    let words: Vec<&str> = name.split_whitespace().collect();
    !words.is_empty()
        && words.len() <= 5
        && words.iter().all(|w| {
            PARTICLES.contains(w) || w.chars().next().is_some_and(|c| c.is_uppercase())
        })
}

/// Whether a phrase reads as an institution name
pub fn is_institution(text: &str) -> bool {
    ACADEMIC.is_match(text) || ORGANIZATION.is_match(text)
}

/// Distinct matches of an institution pattern in order of appearance
pub fn institutions(pattern: &Regex, text: &str) -> Vec<String> {
    let mut found: Vec<String> = Vec::new();
    for caps in pattern.captures_iter(text) {
        let name = caps[1].trim().trim_end_matches(['.', ',']).to_string();
        if name.split_whitespace().count() < 2 {
            continue;
        }
        if !found.iter().any(|f| f.eq_ignore_ascii_case(&name)) {
            found.push(name);
        }
    }
    found
}

/// Academic or government e-mail domains, from the first five addresses
pub fn institutional_email_domains(text: &str) -> Vec<String> {
    let mut found: Vec<String> = Vec::new();
    for caps in EMAIL.captures_iter(text).take(5) {
        let domain = caps[1].to_lowercase();
        let institutional = domain.ends_with(".edu")
            || domain.contains(".edu.")
            || domain.contains(".ac.")
            || domain.ends_with(".gov")
            || domain.contains(".gov.");
        if institutional && !found.contains(&domain) {
            found.push(domain);
        }
    }
    found
}

/// Whether a DOI appears next to thesis vocabulary
pub fn has_doi_with_thesis_words(text: &str) -> bool {
    DOI.is_match(text) && THESIS_WORDS.is_match(text)
}

/// First document type whose keyword cue appears
pub fn doctype_cue(text: &str) -> Option<DocumentType> {
    DOCTYPE_CUES
        .iter()
        .find(|(pattern, _)| pattern.is_match(text))
        .map(|(_, doc_type)| *doc_type)
}

/// Explicit review statement, negations first
pub fn explicit_review(text: &str) -> Option<ReviewStatus> {
    if NOT_PEER_REVIEWED.is_match(text) {
        Some(ReviewStatus::Unreviewed)
    } else if PEER_REVIEWED.is_match(text) {
        Some(ReviewStatus::PeerReviewed)
    } else {
        None
    }
}

/// Journal formatting cues
pub fn has_journal_formatting(text: &str) -> bool {
    JOURNAL.is_match(text)
}

/// Editorial cues
pub fn has_editorial_cue(text: &str) -> bool {
    EDITORIAL.is_match(text)
}

/// Blog cues
pub fn has_blog_cue(text: &str) -> bool {
    BLOG.is_match(text)
}

/// First license statement in specificity order
pub fn license_statement(text: &str) -> Option<LicenseType> {
    LICENSE_TEXT
        .iter()
        .find(|(pattern, _)| pattern.is_match(text))
        .map(|(_, license)| *license)
}

/// Every restriction clause found, in table order
pub fn restriction_clauses(text: &str) -> Vec<Restriction> {
    RESTRICTIONS
        .iter()
        .filter(|(pattern, _)| pattern.is_match(text))
        .map(|(_, restriction)| *restriction)
        .collect()
}

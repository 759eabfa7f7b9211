//! Content licenses and explicit usage restrictions

use serde::{Deserialize, Serialize};
use std::fmt;

/// Content license detected for a document
///
/// Variants are ordered from least to most restrictive; see
/// [`LicenseType::strictness`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub enum LicenseType {
    /// Public domain or CC0 dedication
    #[serde(rename = "public_domain")]
    PublicDomain,
    /// Creative Commons Attribution
    #[serde(rename = "CC-BY")]
    CcBy,
    /// Creative Commons Attribution-ShareAlike
    #[serde(rename = "CC-BY-SA")]
    CcBySa,
    /// Creative Commons Attribution-NoDerivatives
    #[serde(rename = "CC-BY-ND")]
    CcByNd,
    /// Creative Commons Attribution-NonCommercial
    #[serde(rename = "CC-BY-NC")]
    CcByNc,
    /// Creative Commons Attribution-NonCommercial-ShareAlike
    #[serde(rename = "CC-BY-NC-SA")]
    CcByNcSa,
    /// Creative Commons Attribution-NonCommercial-NoDerivatives
    #[serde(rename = "CC-BY-NC-ND")]
    CcByNcNd,
    /// Copyrighted, all rights reserved
    #[serde(rename = "all_rights_reserved")]
    AllRightsReserved,
    /// No license could be determined
    #[default]
    #[serde(rename = "unknown")]
    Unknown,
}

impl LicenseType {
    /// Every license type, least restrictive first
    pub const ALL: [LicenseType; 9] = [
        LicenseType::PublicDomain,
        LicenseType::CcBy,
        LicenseType::CcBySa,
        LicenseType::CcByNd,
        LicenseType::CcByNc,
        LicenseType::CcByNcSa,
        LicenseType::CcByNcNd,
        LicenseType::AllRightsReserved,
        LicenseType::Unknown,
    ];

    /// Get the license name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            LicenseType::PublicDomain => "public_domain",
            LicenseType::CcBy => "CC-BY",
            LicenseType::CcBySa => "CC-BY-SA",
            LicenseType::CcByNd => "CC-BY-ND",
            LicenseType::CcByNc => "CC-BY-NC",
            LicenseType::CcByNcSa => "CC-BY-NC-SA",
            LicenseType::CcByNcNd => "CC-BY-NC-ND",
            LicenseType::AllRightsReserved => "all_rights_reserved",
            LicenseType::Unknown => "unknown",
        }
    }

    /// Strictness rank; higher means more restrictive
    ///
    /// `Unknown` shares the rank of `AllRightsReserved` so that an
    /// undeterminable license is treated as the most restrictive one.
    pub fn strictness(&self) -> u8 {
        match self {
            LicenseType::PublicDomain => 0,
            LicenseType::CcBy => 1,
            LicenseType::CcBySa => 2,
            LicenseType::CcByNd => 3,
            LicenseType::CcByNc => 4,
            LicenseType::CcByNcSa => 5,
            LicenseType::CcByNcNd => 6,
            LicenseType::AllRightsReserved | LicenseType::Unknown => 7,
        }
    }

    /// Parse a license name or SPDX-like identifier
    ///
    /// Version suffixes (`CC-BY-4.0`) and the `CC-` prefix are optional.
    /// Returns `None` for anything unrecognized; callers map that to
    /// [`LicenseType::Unknown`].
    pub fn parse(s: &str) -> Option<Self> {
        let mut normalized = s.trim().to_uppercase().replace([' ', '_'], "-");
        // Strip a trailing version such as "-4.0" or " 3.0"
        if let Some((head, tail)) = normalized.rsplit_once('-') {
            if !tail.is_empty() && tail.chars().all(|c| c.is_ascii_digit() || c == '.') {
                normalized = head.to_string();
            }
        }
        let normalized = normalized
            .strip_prefix("CREATIVE-COMMONS-")
            .map(|rest| format!("CC-{}", rest))
            .unwrap_or(normalized);

        match normalized.as_str() {
            "PUBLIC-DOMAIN" | "PD" | "CC0" | "CC-ZERO" | "UNLICENSE" => Some(LicenseType::PublicDomain),
            "CC-BY" | "BY" => Some(LicenseType::CcBy),
            "CC-BY-SA" | "BY-SA" => Some(LicenseType::CcBySa),
            "CC-BY-ND" | "BY-ND" => Some(LicenseType::CcByNd),
            "CC-BY-NC" | "BY-NC" => Some(LicenseType::CcByNc),
            "CC-BY-NC-SA" | "BY-NC-SA" => Some(LicenseType::CcByNcSa),
            "CC-BY-NC-ND" | "BY-NC-ND" => Some(LicenseType::CcByNcNd),
            "ALL-RIGHTS-RESERVED" | "COPYRIGHTED" | "PROPRIETARY" => {
                Some(LicenseType::AllRightsReserved)
            }
            "UNKNOWN" => Some(LicenseType::Unknown),
            _ => None,
        }
    }
}

impl std::str::FromStr for LicenseType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid license: {}", s))
    }
}

impl fmt::Display for LicenseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An explicit usage restriction stated by the document
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Restriction {
    /// Must not be used to train models
    NoTraining,
    /// Must not be redistributed
    NoRedistribution,
    /// Must not be quoted
    NoQuoting,
    /// Must not be summarized
    NoSummarization,
}

impl Restriction {
    /// Every restriction
    pub const ALL: [Restriction; 4] = [
        Restriction::NoTraining,
        Restriction::NoRedistribution,
        Restriction::NoQuoting,
        Restriction::NoSummarization,
    ];

    /// Get the restriction name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Restriction::NoTraining => "no_training",
            Restriction::NoRedistribution => "no_redistribution",
            Restriction::NoQuoting => "no_quoting",
            Restriction::NoSummarization => "no_summarization",
        }
    }

    /// Parse a restriction name
    pub fn parse(s: &str) -> Option<Self> {
        let normalized = s.trim().to_lowercase().replace([' ', '-'], "_");
        Self::ALL.iter().copied().find(|r| r.as_str() == normalized)
    }
}

impl fmt::Display for Restriction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

//! License decision table and its configuration

use crate::error::PolicyError;
use provenant_domain::{Action, DocumentType, LicenseType, Restriction};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One row of the license decision table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PolicyRow {
    /// Summaries permitted
    pub summarize: bool,
    /// Verbatim quotes permitted
    pub quote: bool,
    /// Training permitted
    pub train: bool,
    /// Redistribution permitted
    pub redistribute: bool,
    /// Attribution required
    pub requires_attribution: bool,
    /// Commercial use allowed
    pub commercial_use_allowed: bool,
    /// Conditions reported with the permissions
    #[serde(default)]
    pub conditions: Vec<String>,
}

impl PolicyRow {
    /// Whether the row permits an action
    pub fn allows(&self, action: Action) -> bool {
        match action {
            Action::Summarize => self.summarize,
            Action::Quote => self.quote,
            Action::Train => self.train,
            Action::Redistribute => self.redistribute,
        }
    }

    /// Built-in row for a license
    pub fn builtin(license: LicenseType) -> Self {
        let row = |actions: [bool; 4], attribution: bool, commercial: bool, conditions: &[&str]| {
            PolicyRow {
                summarize: actions[0],
                quote: actions[1],
                train: actions[2],
                redistribute: actions[3],
                requires_attribution: attribution,
                commercial_use_allowed: commercial,
                conditions: conditions.iter().map(|c| c.to_string()).collect(),
            }
        };
        const ALL: [bool; 4] = [true, true, true, true];
        const LIMITED: [bool; 4] = [true, true, false, false];

        match license {
            LicenseType::PublicDomain => row(ALL, false, true, &[]),
            LicenseType::CcBy => row(ALL, true, true, &["Must provide attribution"]),
            LicenseType::CcBySa => row(
                ALL,
                true,
                true,
                &["Must provide attribution", "Share adaptations under the same license"],
            ),
            LicenseType::CcByNd => row(
                [true, true, true, false],
                true,
                true,
                &["Must provide attribution", "No derivative works"],
            ),
            LicenseType::CcByNc => row(
                LIMITED,
                true,
                false,
                &["Non-commercial use only", "Must provide attribution"],
            ),
            LicenseType::CcByNcSa => row(
                LIMITED,
                true,
                false,
                &[
                    "Non-commercial use only",
                    "Must provide attribution",
                    "Share adaptations under the same license",
                ],
            ),
            LicenseType::CcByNcNd => row(
                LIMITED,
                true,
                false,
                &["Non-commercial use only", "Must provide attribution", "No derivative works"],
            ),
            LicenseType::AllRightsReserved => row(
                LIMITED,
                true,
                false,
                &["Copyrighted material - check specific license"],
            ),
            LicenseType::Unknown => row(
                LIMITED,
                true,
                false,
                &["License unknown - limited use only"],
            ),
        }
    }
}

/// Configuration for the policy engine
///
/// The built-in license table applies unless a row is overridden. Keys are
/// license and document type names as they appear in reports.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PolicyConfig {
    /// License name → replacement row
    pub overrides: BTreeMap<String, PolicyRow>,

    /// Document type name → restrictions always applied to that type
    pub document_type_restrictions: BTreeMap<String, Vec<String>>,
}

impl PolicyConfig {
    /// Strict preset: legal documents and patents are never trained on or redistributed
    pub fn strict() -> Self {
        let restrictions =
            |names: &[&str]| -> Vec<String> { names.iter().map(|n| n.to_string()).collect() };
        Self {
            overrides: BTreeMap::new(),
            document_type_restrictions: [
                (
                    "legal_document".to_string(),
                    restrictions(&["no_training", "no_redistribution"]),
                ),
                ("patent".to_string(), restrictions(&["no_training"])),
            ]
            .into_iter()
            .collect(),
        }
    }

    /// Validate the configuration, including monotonicity of the effective table
    pub fn validate(&self) -> Result<(), PolicyError> {
        let table = self.effective_table()?;
        self.document_type_table()?;
        check_monotonic(&table)
    }

    /// Built-in table with overrides applied
    pub fn effective_table(&self) -> Result<BTreeMap<LicenseType, PolicyRow>, PolicyError> {
        let mut table: BTreeMap<LicenseType, PolicyRow> = LicenseType::ALL
            .iter()
            .map(|l| (*l, PolicyRow::builtin(*l)))
            .collect();
        for (name, row) in &self.overrides {
            let license = LicenseType::parse(name)
                .ok_or_else(|| PolicyError::UnknownLicense(name.clone()))?;
            table.insert(license, row.clone());
        }
        Ok(table)
    }

    /// Document type restrictions with names parsed
    pub fn document_type_table(
        &self,
    ) -> Result<BTreeMap<DocumentType, Vec<Restriction>>, PolicyError> {
        let mut table = BTreeMap::new();
        for (name, restrictions) in &self.document_type_restrictions {
            let doc_type = DocumentType::parse(name)
                .ok_or_else(|| PolicyError::UnknownDocumentType(name.clone()))?;
            let parsed = restrictions
                .iter()
                .map(|r| {
                    Restriction::parse(r).ok_or_else(|| PolicyError::UnknownRestriction(r.clone()))
                })
                .collect::<Result<Vec<_>, _>>()?;
            table.insert(doc_type, parsed);
        }
        Ok(table)
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

/// A stricter license never permits an action a looser one denies, and
/// `unknown` permits nothing any other row denies
pub fn check_monotonic(table: &BTreeMap<LicenseType, PolicyRow>) -> Result<(), PolicyError> {
    for (stricter, strict_row) in table {
        for (looser, loose_row) in table {
            let ordered = stricter.strictness() > looser.strictness()
                || (*stricter == LicenseType::Unknown && *looser != LicenseType::Unknown);
            if !ordered {
                continue;
            }
            if let Some(action) = Action::ALL
                .iter()
                .find(|a| strict_row.allows(**a) && !loose_row.allows(**a))
            {
                return Err(PolicyError::NonMonotonic {
                    stricter: stricter.as_str().to_string(),
                    looser: looser.as_str().to_string(),
                    action: action.as_str().to_string(),
                });
            }
        }
    }
    Ok(())
}

//! Core PolicyEngine implementation

use crate::config::{PolicyConfig, PolicyRow};
use crate::error::PolicyError;
use provenant_domain::{
    Action, DocumentType, LicenseType, PermissionSet, ProvenanceRecord, Restriction,
};
use provenant_resolver::UsageSignals;
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

/// Action a restriction takes away
pub fn restricted_action(restriction: Restriction) -> Action {
    match restriction {
        Restriction::NoTraining => Action::Train,
        Restriction::NoRedistribution => Action::Redistribute,
        Restriction::NoQuoting => Action::Quote,
        Restriction::NoSummarization => Action::Summarize,
    }
}

/// Maps license and restriction signals to a [`PermissionSet`]
///
/// Evaluation order is fixed: the license row sets the baseline, explicit
/// restriction signals remove from it, then document type restrictions
/// remove from it. Nothing after the baseline can grant a permission.
#[derive(Debug, Clone)]
pub struct PolicyEngine {
    config: PolicyConfig,
    table: BTreeMap<LicenseType, PolicyRow>,
    document_type_restrictions: BTreeMap<DocumentType, Vec<Restriction>>,
}

impl PolicyEngine {
    /// Create an engine, validating the configuration
    pub fn new(config: PolicyConfig) -> Result<Self, PolicyError> {
        if let Err(e) = config.validate() {
            warn!("Rejected policy configuration: {}", e);
            return Err(e);
        }
        Ok(Self {
            table: config.effective_table()?,
            document_type_restrictions: config.document_type_table()?,
            config,
        })
    }

    /// The configuration in use
    pub fn config(&self) -> &PolicyConfig {
        &self.config
    }

    /// Effective row for a license
    pub fn row(&self, license: LicenseType) -> PolicyRow {
        self.table
            .get(&license)
            .cloned()
            .unwrap_or_else(|| PolicyRow::builtin(license))
    }

    /// Evaluate the permissions of a resolved document
    pub fn evaluate(&self, record: &ProvenanceRecord, usage: &UsageSignals) -> PermissionSet {
        let license = usage.license;
        let row = self.row(license);
        let overridden = self
            .config
            .overrides
            .keys()
            .any(|k| LicenseType::parse(k) == Some(license));
        let mut explanations = Vec::new();

        match &usage.license_rule {
            Some(rule) => explanations.push(format!(
                "license: '{}' detected by rule '{}'",
                license, rule
            )),
            None if license == LicenseType::Unknown => explanations
                .push("license: no license detected, most restrictive row applied".to_string()),
            None => explanations.push(format!("license: '{}' with no source rule", license)),
        }

        let mut permissions: BTreeMap<Action, bool> =
            Action::ALL.iter().map(|a| (*a, row.allows(*a))).collect();
        explanations.push(format!(
            "license: {} row allows [{}]{}",
            license,
            allowed_names(&permissions),
            if overridden { " (configured override)" } else { "" }
        ));

        for restriction in &usage.restrictions {
            apply_restriction(
                &mut permissions,
                *restriction,
                &format!("restriction: '{}'", restriction),
                &mut explanations,
            );
        }

        if let Some(restrictions) = self.document_type_restrictions.get(&record.document_type) {
            for restriction in restrictions {
                apply_restriction(
                    &mut permissions,
                    *restriction,
                    &format!(
                        "document_type: '{}' restriction '{}'",
                        record.document_type, restriction
                    ),
                    &mut explanations,
                );
            }
        }

        let mut conditions = row.conditions.clone();
        if record.document_type == DocumentType::Preprint {
            conditions.push("Preprint - not peer reviewed".to_string());
        }

        let attribution_text = if row.requires_attribution {
            if record.citation.is_none() {
                explanations.push(
                    "attribution: required, but provenance is too sparse for a citation".to_string(),
                );
            }
            record.citation.clone()
        } else {
            None
        };

        let set = PermissionSet {
            license,
            permissions,
            requires_attribution: row.requires_attribution,
            commercial_use_allowed: row.commercial_use_allowed,
            conditions,
            attribution_text,
            explanations,
        };
        info!(
            "Permissions under {}: allowed {:?}, denied {:?}",
            license,
            set.allowed_actions(),
            set.denied_actions()
        );
        set
    }
}

impl Default for PolicyEngine {
    fn default() -> Self {
        Self {
            config: PolicyConfig::default(),
            table: LicenseType::ALL
                .iter()
                .map(|l| (*l, PolicyRow::builtin(*l)))
                .collect(),
            document_type_restrictions: BTreeMap::new(),
        }
    }
}

/// Validate `config` and evaluate a single document with it
pub fn evaluate_permissions(
    record: &ProvenanceRecord,
    usage: &UsageSignals,
    config: &PolicyConfig,
) -> Result<PermissionSet, PolicyError> {
    Ok(PolicyEngine::new(config.clone())?.evaluate(record, usage))
}

fn apply_restriction(
    permissions: &mut BTreeMap<Action, bool>,
    restriction: Restriction,
    source: &str,
    explanations: &mut Vec<String>,
) {
    let action = restricted_action(restriction);
    match permissions.get_mut(&action) {
        Some(allowed) if *allowed => {
            *allowed = false;
            debug!("{} removed {}", source, action);
            explanations.push(format!("{} removed {}", source, action));
        }
        _ => explanations.push(format!("{} ({} already denied)", source, action)),
    }
}

fn allowed_names(permissions: &BTreeMap<Action, bool>) -> String {
    permissions
        .iter()
        .filter(|(_, allowed)| **allowed)
        .map(|(a, _)| a.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

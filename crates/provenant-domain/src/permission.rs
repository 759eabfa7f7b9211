//! AI usage permissions

use crate::LicenseType;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// An action an automated AI consumer may take with a document
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Produce summaries
    Summarize,
    /// Quote passages verbatim
    Quote,
    /// Use as model training data
    Train,
    /// Redistribute the document
    Redistribute,
}

impl Action {
    /// Every action
    pub const ALL: [Action; 4] = [
        Action::Summarize,
        Action::Quote,
        Action::Train,
        Action::Redistribute,
    ];

    /// Get the action name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Summarize => "summarize",
            Action::Quote => "quote",
            Action::Train => "train",
            Action::Redistribute => "redistribute",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Permissions granted to AI consumers for one document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PermissionSet {
    /// License the baseline was taken from
    pub license: LicenseType,
    /// Action → permitted
    pub permissions: BTreeMap<Action, bool>,
    /// Whether use requires attribution
    pub requires_attribution: bool,
    /// Whether commercial use is allowed
    pub commercial_use_allowed: bool,
    /// Conditions attached to permitted actions
    pub conditions: Vec<String>,
    /// Suggested attribution text
    pub attribution_text: Option<String>,
    /// Decision trace in evaluation order
    pub explanations: Vec<String>,
}

impl PermissionSet {
    /// Whether an action is permitted
    pub fn allows(&self, action: Action) -> bool {
        self.permissions.get(&action).copied().unwrap_or(false)
    }

    /// Permitted actions
    pub fn allowed_actions(&self) -> Vec<Action> {
        Action::ALL.iter().copied().filter(|a| self.allows(*a)).collect()
    }

    /// Denied actions
    pub fn denied_actions(&self) -> Vec<Action> {
        Action::ALL.iter().copied().filter(|a| !self.allows(*a)).collect()
    }

    /// True when every action allowed here is also allowed by `other`
    pub fn is_subset_of(&self, other: &PermissionSet) -> bool {
        Action::ALL
            .iter()
            .all(|a| !self.allows(*a) || other.allows(*a))
    }
}

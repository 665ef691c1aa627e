//! Named approval roles and the people who can fill them.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::FormError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignatoryRole {
    RequestedBy,
    CheckedBy,
    ReceivedBy,
    Management,
    ApprovedBy,
    Head,
}

impl SignatoryRole {
    /// Display order on the form.
    pub const ALL: [SignatoryRole; 6] = [
        SignatoryRole::RequestedBy,
        SignatoryRole::CheckedBy,
        SignatoryRole::ReceivedBy,
        SignatoryRole::Management,
        SignatoryRole::ApprovedBy,
        SignatoryRole::Head,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SignatoryRole::RequestedBy => "Requested By",
            SignatoryRole::CheckedBy => "Checked By",
            SignatoryRole::ReceivedBy => "Received By",
            SignatoryRole::Management => "Management",
            SignatoryRole::ApprovedBy => "Approved By",
            SignatoryRole::Head => "Head",
        }
    }

    pub fn placeholder(self) -> String {
        format!("Select {}", self.label())
    }
}

impl std::fmt::Display for SignatoryRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Current signatory selections.
#[derive(Debug, Clone, PartialEq)]
pub struct Signatories {
    people: Vec<String>,
    selected: BTreeMap<SignatoryRole, String>,
}

impl Signatories {
    pub fn new(people: Vec<String>) -> Self {
        Self {
            people,
            selected: BTreeMap::new(),
        }
    }

    /// People offered by every selector.
    pub fn people(&self) -> &[String] {
        &self.people
    }

    pub fn select(&mut self, role: SignatoryRole, person: &str) -> Result<(), FormError> {
        if !self.people.iter().any(|p| p == person) {
            return Err(FormError::UnknownSignatory {
                role,
                person: person.to_string(),
            });
        }
        self.selected.insert(role, person.to_string());
        Ok(())
    }

    pub fn clear(&mut self, role: SignatoryRole) {
        self.selected.remove(&role);
    }

    pub fn selected(&self, role: SignatoryRole) -> Option<&str> {
        self.selected.get(&role).map(String::as_str)
    }

    /// Roles still waiting for a selection, in display order.
    pub fn unassigned(&self) -> Vec<SignatoryRole> {
        SignatoryRole::ALL
            .into_iter()
            .filter(|role| !self.selected.contains_key(role))
            .collect()
    }
}

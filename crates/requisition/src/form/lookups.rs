//! Concurrent loading of the branch, department and MIS name selectors.

use tracing::warn;

use crate::client::RequestStoreClient;
use crate::model::{LookupEntry, LookupKind};

/// Shown in place of the whole form when no lookup list could be loaded.
pub const LOOKUPS_UNAVAILABLE_MESSAGE: &str = "Unable to load form data. Please try again.";

/// One selector's options, or the inline error replacing it.
#[derive(Debug, Clone, PartialEq)]
pub enum LookupField {
    Ready(Vec<LookupEntry>),
    Failed(String),
}

impl LookupField {
    pub fn entries(&self) -> Option<&[LookupEntry]> {
        match self {
            LookupField::Ready(entries) => Some(entries),
            LookupField::Failed(_) => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            LookupField::Ready(_) => None,
            LookupField::Failed(message) => Some(message),
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, LookupField::Failed(_))
    }

    pub fn find(&self, id: i64) -> Option<&LookupEntry> {
        self.entries()?.iter().find(|entry| entry.id == id)
    }
}

/// The three selectors after their fetches settled.
#[derive(Debug, Clone, PartialEq)]
pub struct LookupSet {
    pub branches: LookupField,
    pub departments: LookupField,
    pub mis_names: LookupField,
}

impl LookupSet {
    pub fn get(&self, kind: LookupKind) -> &LookupField {
        match kind {
            LookupKind::Branch => &self.branches,
            LookupKind::Department => &self.departments,
            LookupKind::MisName => &self.mis_names,
        }
    }

    pub fn failed_kinds(&self) -> Vec<LookupKind> {
        LookupKind::ALL
            .into_iter()
            .filter(|kind| self.get(*kind).is_failed())
            .collect()
    }

    pub fn all_failed(&self) -> bool {
        self.failed_kinds().len() == LookupKind::ALL.len()
    }
}

/// Where the form is in loading its selectors.
#[derive(Debug, Clone, PartialEq)]
pub enum LookupState {
    Loading,
    Ready(LookupSet),
    /// Every fetch failed; the form shows a page-level error with a retry.
    Unavailable { message: String },
}

/// Issues the three lookup fetches concurrently and waits for all of them.
///
/// A failed fetch becomes an inline error for that selector only.
pub async fn fetch_lookups(client: &dyn RequestStoreClient) -> LookupSet {
    let (branches, departments, mis_names) = tokio::join!(
        client.list_lookup(LookupKind::Branch),
        client.list_lookup(LookupKind::Department),
        client.list_lookup(LookupKind::MisName),
    );

    LookupSet {
        branches: settle(LookupKind::Branch, branches),
        departments: settle(LookupKind::Department, departments),
        mis_names: settle(LookupKind::MisName, mis_names),
    }
}

/// Fetches all lookups and collapses a total failure into
/// [`LookupState::Unavailable`].
pub async fn load_lookups(client: &dyn RequestStoreClient) -> LookupState {
    let set = fetch_lookups(client).await;
    if set.all_failed() {
        LookupState::Unavailable {
            message: LOOKUPS_UNAVAILABLE_MESSAGE.to_string(),
        }
    } else {
        LookupState::Ready(set)
    }
}

fn settle(
    kind: LookupKind,
    result: Result<Vec<LookupEntry>, crate::client::ClientError>,
) -> LookupField {
    match result {
        Ok(entries) => LookupField::Ready(entries),
        Err(e) => {
            warn!(lookup = %kind, error = %e, "Lookup fetch failed");
            LookupField::Failed(format!("Could not load {} options", kind.label()))
        }
    }
}

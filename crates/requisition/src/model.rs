//! Shared request-store types used by the database layer, the HTTP API,
//! the client, and the view models.

use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::debug;

/// The three read-only lookup lists backing the form's selectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LookupKind {
    Branch,
    Department,
    MisName,
}

impl LookupKind {
    pub const ALL: [LookupKind; 3] = [LookupKind::Branch, LookupKind::Department, LookupKind::MisName];

    /// Table holding this lookup list.
    pub fn table(self) -> &'static str {
        match self {
            LookupKind::Branch => "branch",
            LookupKind::Department => "department",
            LookupKind::MisName => "mis_name",
        }
    }

    /// Column (and wire key) carrying the numeric id.
    pub fn id_key(self) -> &'static str {
        match self {
            LookupKind::Branch => "branch_id",
            LookupKind::Department => "dept_id",
            LookupKind::MisName => "mis_id",
        }
    }

    /// Column (and wire key) carrying the display name.
    pub fn name_key(self) -> &'static str {
        match self {
            LookupKind::Branch => "branch_name",
            LookupKind::Department => "dept_name",
            LookupKind::MisName => "mis_name",
        }
    }

    /// HTTP path segment under `/api`.
    pub fn path(self) -> &'static str {
        match self {
            LookupKind::Branch => "branch",
            LookupKind::Department => "department",
            LookupKind::MisName => "misName",
        }
    }

    /// Message returned to clients when listing fails.
    pub fn failure_message(self) -> &'static str {
        match self {
            LookupKind::Branch => "Failed to fetch branches",
            LookupKind::Department => "Failed to fetch departments",
            LookupKind::MisName => "Failed to fetch mis name",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            LookupKind::Branch => "Branch",
            LookupKind::Department => "Department",
            LookupKind::MisName => "MIS Name",
        }
    }
}

impl std::fmt::Display for LookupKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One row of a lookup list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupEntry {
    pub id: i64,
    pub name: String,
}

impl LookupEntry {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    /// Wraps the entry so it serializes with the kind's column names,
    /// e.g. `{"branch_id": 1, "branch_name": "Gensan"}`.
    pub fn keyed(&self, kind: LookupKind) -> KeyedLookupEntry<'_> {
        KeyedLookupEntry { kind, entry: self }
    }

    /// Reads an entry serialized with the kind's column names.
    pub fn from_keyed(kind: LookupKind, value: &serde_json::Value) -> Option<Self> {
        let id = value.get(kind.id_key())?.as_i64()?;
        let name = value.get(kind.name_key())?.as_str()?;
        Some(Self::new(id, name))
    }
}

/// Serialization view of a [`LookupEntry`] using per-kind column names.
pub struct KeyedLookupEntry<'a> {
    kind: LookupKind,
    entry: &'a LookupEntry,
}

impl Serialize for KeyedLookupEntry<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry(self.kind.id_key(), &self.entry.id)?;
        map.serialize_entry(self.kind.name_key(), &self.entry.name)?;
        map.end()
    }
}

/// What a submission asks the store to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestAction {
    Save,
    Update,
    Print,
}

impl RequestAction {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "save" => Some(RequestAction::Save),
            "update" => Some(RequestAction::Update),
            "print" => Some(RequestAction::Print),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RequestAction::Save => "save",
            RequestAction::Update => "update",
            RequestAction::Print => "print",
        }
    }
}

impl std::fmt::Display for RequestAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// JSON body of `POST /api/request`.
///
/// Every field is optional on the wire so that missing values reach
/// validation instead of failing deserialization. An unrecognized action
/// reads as no action.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestPayload {
    #[serde(default)]
    pub details: Option<String>,
    #[serde(default, deserialize_with = "deserialize_action")]
    pub action: Option<RequestAction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default)]
    pub branch_id: Option<i64>,
    #[serde(default)]
    pub department_id: Option<i64>,
    #[serde(default)]
    pub mis_id: Option<i64>,
}

fn deserialize_action<'de, D>(deserializer: D) -> Result<Option<RequestAction>, D::Error>
where
    D: Deserializer<'de>,
{
    let name = Option::<String>::deserialize(deserializer)?;
    Ok(name.and_then(|name| {
        let action = RequestAction::from_name(&name);
        if action.is_none() {
            debug!(action = %name, "Unrecognized request action");
        }
        action
    }))
}

/// A persisted request row, serialized with its column names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestRow {
    pub id: i64,
    pub request_details: String,
    pub branch_id: Option<i64>,
    pub dept_id: Option<i64>,
    pub mis_id: Option<i64>,
    pub created_at: String,
    pub updated_at: String,
}

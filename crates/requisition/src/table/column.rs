//! Column definitions for the request list.

use std::cmp::Ordering;
use std::fmt;

use chrono::NaiveDate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ColumnId {
    Serial,
    Branch,
    Department,
    MisName,
    Date,
    RequestDetails,
    ItemDescription,
    Remarks,
    PreparedBy,
    RequestedBy,
    Status,
}

impl ColumnId {
    /// Display order.
    pub const ALL: [ColumnId; 11] = [
        ColumnId::Serial,
        ColumnId::Branch,
        ColumnId::Department,
        ColumnId::MisName,
        ColumnId::Date,
        ColumnId::RequestDetails,
        ColumnId::ItemDescription,
        ColumnId::Remarks,
        ColumnId::PreparedBy,
        ColumnId::RequestedBy,
        ColumnId::Status,
    ];

    pub fn key(self) -> &'static str {
        match self {
            ColumnId::Serial => "serial",
            ColumnId::Branch => "branch",
            ColumnId::Department => "department",
            ColumnId::MisName => "misName",
            ColumnId::Date => "date",
            ColumnId::RequestDetails => "requestDetails",
            ColumnId::ItemDescription => "itemDescription",
            ColumnId::Remarks => "remarks",
            ColumnId::PreparedBy => "preparedBy",
            ColumnId::RequestedBy => "requestedBy",
            ColumnId::Status => "status",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ColumnId::Serial => "Series No.",
            ColumnId::Branch => "Branch",
            ColumnId::Department => "Department",
            ColumnId::MisName => "MIS Name",
            ColumnId::Date => "Date",
            ColumnId::RequestDetails => "Request Details",
            ColumnId::ItemDescription => "Item Description",
            ColumnId::Remarks => "Remarks",
            ColumnId::PreparedBy => "Prepared By",
            ColumnId::RequestedBy => "Requested By",
            ColumnId::Status => "Status",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.key() == key)
    }

    /// The serial column is positional: it cannot be hidden, sorted or
    /// filtered, and takes no part in global search.
    pub fn is_data(self) -> bool {
        self != ColumnId::Serial
    }

    pub fn is_hideable(self) -> bool {
        self.is_data()
    }

    pub fn is_sortable(self) -> bool {
        self.is_data()
    }

    pub fn is_filterable(self) -> bool {
        self.is_data()
    }
}

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A typed cell value. Ordering is the natural ordering of the type:
/// numbers numerically, dates chronologically (missing dates first), text
/// lexicographically.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CellValue {
    Serial(usize),
    Date(Option<NaiveDate>),
    Text(String),
}

impl CellValue {
    fn rank(&self) -> u8 {
        match self {
            CellValue::Serial(_) => 0,
            CellValue::Date(_) => 1,
            CellValue::Text(_) => 2,
        }
    }
}

impl Ord for CellValue {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (CellValue::Serial(a), CellValue::Serial(b)) => a.cmp(b),
            (CellValue::Date(a), CellValue::Date(b)) => a.cmp(b),
            (CellValue::Text(a), CellValue::Text(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialOrd for CellValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Serial(n) => write!(f, "{n}"),
            CellValue::Date(Some(date)) => write!(f, "{}", date.format("%Y-%m-%d")),
            CellValue::Date(None) => Ok(()),
            CellValue::Text(text) => f.write_str(text),
        }
    }
}

//! Rows shown by the request list.

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::model::{LookupEntry, RequestRow};

use super::column::{CellValue, ColumnId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Pending,
    Processing,
    Success,
    Failed,
}

impl RequestStatus {
    pub const ALL: [RequestStatus; 4] = [
        RequestStatus::Pending,
        RequestStatus::Processing,
        RequestStatus::Success,
        RequestStatus::Failed,
    ];

    pub fn label(self) -> &'static str {
        match self {
            RequestStatus::Pending => "pending",
            RequestStatus::Processing => "processing",
            RequestStatus::Success => "success",
            RequestStatus::Failed => "failed",
        }
    }
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub id: String,
    pub branch: String,
    pub department: String,
    pub mis_name: String,
    pub date: Option<NaiveDate>,
    pub request_details: String,
    pub item_description: String,
    pub remarks: String,
    pub prepared_by: String,
    pub requested_by: String,
    pub status: RequestStatus,
}

impl Record {
    /// The value of `column` for this record. `position` is the record's
    /// zero-based index in the unfiltered dataset and feeds the serial column.
    pub fn cell(&self, column: ColumnId, position: usize) -> CellValue {
        let text = |s: &str| CellValue::Text(s.to_string());
        match column {
            ColumnId::Serial => CellValue::Serial(position + 1),
            ColumnId::Branch => text(&self.branch),
            ColumnId::Department => text(&self.department),
            ColumnId::MisName => text(&self.mis_name),
            ColumnId::Date => CellValue::Date(self.date),
            ColumnId::RequestDetails => text(&self.request_details),
            ColumnId::ItemDescription => text(&self.item_description),
            ColumnId::Remarks => text(&self.remarks),
            ColumnId::PreparedBy => text(&self.prepared_by),
            ColumnId::RequestedBy => text(&self.requested_by),
            ColumnId::Status => CellValue::Text(self.status.label().to_string()),
        }
    }
}

/// The 30-row reference dataset the list view ships with.
pub fn sample_records() -> Vec<Record> {
    (0..30usize)
        .map(|index| Record {
            id: (index + 1).to_string(),
            branch: ["Gensan", "Manila", "Cebu"][index % 3].to_string(),
            department: ["IT", "HR", "Finance", "Operations"][index % 4].to_string(),
            mis_name: format!("MIS-{:03}", index + 1),
            date: NaiveDate::from_ymd_opt(2025, 1, (index % 30) as u32 + 1),
            request_details: ["Purchase printer", "Laptop replacement", "Office supplies"][index % 3]
                .to_string(),
            item_description: "Printer, Laptop, Office Supplies".to_string(),
            remarks: "Urgent delivery needed".to_string(),
            prepared_by: "Juan Dela Cruz".to_string(),
            requested_by: "Maria Santos".to_string(),
            status: RequestStatus::ALL[index % 4],
        })
        .collect()
}

/// Builds list records from stored requests, resolving reference ids to
/// names. Unresolved or absent references render as empty text.
pub fn records_from_requests(
    rows: &[RequestRow],
    branches: &[LookupEntry],
    departments: &[LookupEntry],
    mis_names: &[LookupEntry],
) -> Vec<Record> {
    fn name_of(entries: &[LookupEntry], id: Option<i64>) -> String {
        id.and_then(|id| entries.iter().find(|e| e.id == id))
            .map(|e| e.name.clone())
            .unwrap_or_default()
    }

    rows.iter()
        .map(|row| Record {
            id: row.id.to_string(),
            branch: name_of(branches, row.branch_id),
            department: name_of(departments, row.dept_id),
            mis_name: name_of(mis_names, row.mis_id),
            date: DateTime::parse_from_rfc3339(&row.created_at)
                .ok()
                .map(|dt| dt.date_naive()),
            request_details: row.request_details.clone(),
            item_description: String::new(),
            remarks: String::new(),
            prepared_by: String::new(),
            requested_by: String::new(),
            status: RequestStatus::Pending,
        })
        .collect()
}

//! Sorting, filtering, visibility and paging over the record list.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use tracing::debug;

use crate::config::TableConfig;

use super::column::{CellValue, ColumnId};
use super::filter::ColumnFilterPopup;
use super::record::Record;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub column: ColumnId,
    pub direction: SortDirection,
}

/// A row on the current page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableRow<'a> {
    /// One-based position in the unfiltered dataset.
    pub serial: usize,
    pub record: &'a Record,
}

impl TableRow<'_> {
    pub fn cell(&self, column: ColumnId) -> CellValue {
        self.record.cell(column, self.serial - 1)
    }
}

/// The footer line, "Showing X of Y entries".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSummary {
    /// Rows on the current page.
    pub shown: usize,
    /// Rows in the unfiltered dataset.
    pub total: usize,
}

impl fmt::Display for PageSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Showing {} of {} entries", self.shown, self.total)
    }
}

/// View state of the request list. Every query works over the full
/// in-memory record set.
#[derive(Debug, Clone)]
pub struct TableState {
    records: Vec<Record>,
    sort: Option<SortSpec>,
    filters: BTreeMap<ColumnId, BTreeSet<String>>,
    hidden: BTreeSet<ColumnId>,
    search: String,
    page: usize,
    page_size: usize,
}

impl TableState {
    pub fn new(records: Vec<Record>, page_size: usize) -> Self {
        Self {
            records,
            sort: None,
            filters: BTreeMap::new(),
            hidden: BTreeSet::new(),
            search: String::new(),
            page: 0,
            page_size: page_size.max(1),
        }
    }

    pub fn from_config(records: Vec<Record>, config: &TableConfig) -> Self {
        Self::new(records, config.page_size)
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Replaces the dataset, keeping sort, filters and visibility.
    pub fn set_records(&mut self, records: Vec<Record>) {
        self.records = records;
        self.page = 0;
    }

    // Sorting

    pub fn sort(&self) -> Option<SortSpec> {
        self.sort
    }

    /// Cycles `column` through ascending, descending and unsorted. Sorting
    /// one column replaces any sort on another.
    pub fn toggle_sort(&mut self, column: ColumnId) -> Option<SortSpec> {
        if !column.is_sortable() {
            return self.sort;
        }
        let direction = match self.sort {
            Some(spec) if spec.column == column => match spec.direction {
                SortDirection::Ascending => Some(SortDirection::Descending),
                SortDirection::Descending => None,
            },
            _ => Some(SortDirection::Ascending),
        };
        self.sort = direction.map(|direction| SortSpec { column, direction });
        debug!(column = column.key(), sort = ?self.sort, "Sort toggled");
        self.sort
    }

    // Filtering

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn set_search(&mut self, query: impl Into<String>) {
        self.search = query.into();
        self.page = 0;
    }

    pub fn filter(&self, column: ColumnId) -> Option<&BTreeSet<String>> {
        self.filters.get(&column)
    }

    /// Number of accepted values shown as a badge on the column header.
    pub fn filter_badge(&self, column: ColumnId) -> usize {
        self.filter(column).map_or(0, BTreeSet::len)
    }

    pub fn active_filters(&self) -> impl Iterator<Item = (ColumnId, &BTreeSet<String>)> {
        self.filters.iter().map(|(c, v)| (*c, v))
    }

    /// Opens the filter popup for `column`; `None` for columns that cannot
    /// be filtered.
    pub fn open_filter(&self, column: ColumnId) -> Option<ColumnFilterPopup> {
        column
            .is_filterable()
            .then(|| ColumnFilterPopup::open(column, &self.records, self.filters.get(&column)))
    }

    /// Commits a popup's selection. An empty selection removes the filter.
    pub fn apply_filter(&mut self, popup: ColumnFilterPopup) {
        let (column, selection) = popup.apply();
        self.set_filter(column, selection);
    }

    pub fn set_filter(&mut self, column: ColumnId, accepted: BTreeSet<String>) {
        if !column.is_filterable() {
            return;
        }
        if accepted.is_empty() {
            self.filters.remove(&column);
        } else {
            self.filters.insert(column, accepted);
        }
        self.page = 0;
    }

    pub fn clear_filter(&mut self, column: ColumnId) {
        self.set_filter(column, BTreeSet::new());
    }

    // Visibility

    pub fn is_visible(&self, column: ColumnId) -> bool {
        !self.hidden.contains(&column)
    }

    /// Shows or hides `column`. Returns false for columns that are always
    /// shown. A change returns to the first page, since search only looks
    /// at visible columns.
    pub fn set_visible(&mut self, column: ColumnId, visible: bool) -> bool {
        if !column.is_hideable() {
            return false;
        }
        let changed = if visible {
            self.hidden.remove(&column)
        } else {
            self.hidden.insert(column)
        };
        if changed {
            self.page = 0;
        }
        true
    }

    pub fn visible_columns(&self) -> Vec<ColumnId> {
        ColumnId::ALL
            .into_iter()
            .filter(|c| self.is_visible(*c))
            .collect()
    }

    /// Entries of the column checklist.
    pub fn hideable_columns(&self) -> Vec<(ColumnId, bool)> {
        ColumnId::ALL
            .into_iter()
            .filter(|c| c.is_hideable())
            .map(|c| (c, self.is_visible(c)))
            .collect()
    }

    // Row model

    fn matches(&self, position: usize, record: &Record) -> bool {
        let passes_filters = self.filters.iter().all(|(column, accepted)| {
            accepted.contains(&record.cell(*column, position).to_string())
        });
        if !passes_filters {
            return false;
        }
        if self.search.is_empty() {
            return true;
        }
        let needle = self.search.to_lowercase();
        ColumnId::ALL
            .into_iter()
            .filter(|c| c.is_data() && self.is_visible(*c))
            .any(|c| {
                record
                    .cell(c, position)
                    .to_string()
                    .to_lowercase()
                    .contains(&needle)
            })
    }

    /// Positions of the rows passing every filter and the search, in sort
    /// order. Unsorted output keeps dataset order.
    pub fn filtered_positions(&self) -> Vec<usize> {
        let mut positions: Vec<usize> = self
            .records
            .iter()
            .enumerate()
            .filter(|(position, record)| self.matches(*position, record))
            .map(|(position, _)| position)
            .collect();

        if let Some(spec) = self.sort {
            positions.sort_by(|a, b| {
                let left = self.records[*a].cell(spec.column, *a);
                let right = self.records[*b].cell(spec.column, *b);
                match spec.direction {
                    SortDirection::Ascending => left.cmp(&right),
                    SortDirection::Descending => right.cmp(&left),
                }
            });
        }
        positions
    }

    pub fn filtered_rows(&self) -> Vec<TableRow<'_>> {
        self.filtered_positions()
            .into_iter()
            .map(|position| self.row(position))
            .collect()
    }

    fn row(&self, position: usize) -> TableRow<'_> {
        TableRow {
            serial: position + 1,
            record: &self.records[position],
        }
    }

    // Pagination

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn page_index(&self) -> usize {
        self.page
    }

    pub fn page_count(&self) -> usize {
        self.filtered_positions().len().div_ceil(self.page_size).max(1)
    }

    pub fn can_previous_page(&self) -> bool {
        self.page > 0
    }

    pub fn can_next_page(&self) -> bool {
        self.page + 1 < self.page_count()
    }

    pub fn next_page(&mut self) -> bool {
        if self.can_next_page() {
            self.page += 1;
            true
        } else {
            false
        }
    }

    pub fn previous_page(&mut self) -> bool {
        if self.can_previous_page() {
            self.page -= 1;
            true
        } else {
            false
        }
    }

    /// Rows on the current page.
    pub fn page_rows(&self) -> Vec<TableRow<'_>> {
        self.filtered_positions()
            .into_iter()
            .skip(self.page * self.page_size)
            .take(self.page_size)
            .map(|position| self.row(position))
            .collect()
    }

    pub fn summary(&self) -> PageSummary {
        PageSummary {
            shown: self.page_rows().len(),
            total: self.records.len(),
        }
    }
}

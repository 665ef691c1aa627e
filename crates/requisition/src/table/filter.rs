//! The per-column multi-select filter popup.

use std::collections::{BTreeSet, HashSet};

use super::column::ColumnId;
use super::popover::ResizablePopover;
use super::record::Record;

/// State of the popup's "(All)" checkbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectAll {
    Checked,
    Unchecked,
    Indeterminate,
}

/// Distinct rendered values of `column` across `records`, in order of
/// first appearance.
pub fn distinct_values(records: &[Record], column: ColumnId) -> Vec<String> {
    let mut seen = HashSet::new();
    records
        .iter()
        .enumerate()
        .map(|(position, record)| record.cell(column, position).to_string())
        .filter(|value| seen.insert(value.clone()))
        .collect()
}

/// An open filter popup. Edits stay local until [`apply`](Self::apply).
#[derive(Debug, Clone)]
pub struct ColumnFilterPopup {
    column: ColumnId,
    candidates: Vec<String>,
    selected: BTreeSet<String>,
    search: String,
    popover: ResizablePopover,
}

impl ColumnFilterPopup {
    /// Opens a popup over the whole unfiltered dataset, pre-selecting the
    /// column's active filter.
    pub fn open(column: ColumnId, records: &[Record], active: Option<&BTreeSet<String>>) -> Self {
        Self {
            column,
            candidates: distinct_values(records, column),
            selected: active.cloned().unwrap_or_default(),
            search: String::new(),
            popover: ResizablePopover::new(),
        }
    }

    pub fn column(&self) -> ColumnId {
        self.column
    }

    pub fn title(&self) -> String {
        format!("Filter {}", self.column.label())
    }

    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn set_search(&mut self, query: impl Into<String>) {
        self.search = query.into();
    }

    /// Candidates whose label contains the search text, ignoring case.
    pub fn visible_candidates(&self) -> Vec<&str> {
        let needle = self.search.to_lowercase();
        self.candidates
            .iter()
            .filter(|c| c.to_lowercase().contains(&needle))
            .map(String::as_str)
            .collect()
    }

    pub fn is_selected(&self, value: &str) -> bool {
        self.selected.contains(value)
    }

    pub fn selected(&self) -> &BTreeSet<String> {
        &self.selected
    }

    /// Reflects only the candidates the search currently shows.
    pub fn select_all_state(&self) -> SelectAll {
        let visible = self.visible_candidates();
        let count = visible.iter().filter(|c| self.selected.contains(**c)).count();
        match count {
            0 => SelectAll::Unchecked,
            n if n == visible.len() => SelectAll::Checked,
            _ => SelectAll::Indeterminate,
        }
    }

    /// Selects or deselects every visible candidate, leaving hidden
    /// selections alone.
    pub fn set_all(&mut self, checked: bool) {
        let visible: Vec<String> = self.visible_candidates().into_iter().map(String::from).collect();
        for value in visible {
            if checked {
                self.selected.insert(value);
            } else {
                self.selected.remove(&value);
            }
        }
    }

    pub fn toggle(&mut self, value: &str, checked: bool) {
        if checked {
            self.selected.insert(value.to_string());
        } else {
            self.selected.remove(value);
        }
    }

    /// Empties the selection and the search text.
    pub fn clear(&mut self) {
        self.selected.clear();
        self.search.clear();
    }

    pub fn popover(&self) -> &ResizablePopover {
        &self.popover
    }

    pub fn popover_mut(&mut self) -> &mut ResizablePopover {
        &mut self.popover
    }

    /// Closes the popup and hands back the selection to commit.
    pub fn apply(self) -> (ColumnId, BTreeSet<String>) {
        (self.column, self.selected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::record::sample_records;

    #[test]
    fn test_candidates_in_first_appearance_order() {
        let records = sample_records();
        assert_eq!(
            distinct_values(&records, ColumnId::Branch),
            vec!["Gensan", "Manila", "Cebu"]
        );
        assert_eq!(
            distinct_values(&records, ColumnId::Status),
            vec!["pending", "processing", "success", "failed"]
        );
        assert_eq!(distinct_values(&records, ColumnId::Date).len(), 30);
    }

    #[test]
    fn test_search_narrows_candidates() {
        let records = sample_records();
        let mut popup = ColumnFilterPopup::open(ColumnId::Department, &records, None);
        popup.set_search("o");
        assert_eq!(popup.visible_candidates(), vec!["Operations"]);
        popup.set_search("I");
        assert_eq!(popup.visible_candidates(), vec!["IT", "Finance", "Operations"]);
    }

    #[test]
    fn test_select_all_tracks_visible_candidates() {
        let records = sample_records();
        let mut popup = ColumnFilterPopup::open(ColumnId::Branch, &records, None);
        assert_eq!(popup.select_all_state(), SelectAll::Unchecked);

        popup.toggle("Manila", true);
        assert_eq!(popup.select_all_state(), SelectAll::Indeterminate);

        popup.set_search("man");
        assert_eq!(popup.select_all_state(), SelectAll::Checked);

        popup.set_search("");
        popup.set_all(true);
        assert_eq!(popup.select_all_state(), SelectAll::Checked);
        assert_eq!(popup.selected().len(), 3);

        popup.set_search("ce");
        popup.set_all(false);
        assert!(!popup.is_selected("Cebu"));
        assert!(popup.is_selected("Gensan"));
    }

    #[test]
    fn test_no_visible_candidates_is_unchecked() {
        let records = sample_records();
        let mut popup = ColumnFilterPopup::open(ColumnId::Branch, &records, None);
        popup.set_search("nowhere");
        assert!(popup.visible_candidates().is_empty());
        assert_eq!(popup.select_all_state(), SelectAll::Unchecked);
    }

    #[test]
    fn test_clear_empties_selection_and_search() {
        let records = sample_records();
        let active: BTreeSet<String> = ["Cebu".to_string()].into();
        let mut popup = ColumnFilterPopup::open(ColumnId::Branch, &records, Some(&active));
        assert!(popup.is_selected("Cebu"));

        popup.set_search("ce");
        popup.clear();

        assert!(popup.selected().is_empty());
        assert_eq!(popup.search(), "");
        let (column, selection) = popup.apply();
        assert_eq!(column, ColumnId::Branch);
        assert!(selection.is_empty());
    }

    #[test]
    fn test_title() {
        let popup = ColumnFilterPopup::open(ColumnId::MisName, &[], None);
        assert_eq!(popup.title(), "Filter MIS Name");
        assert!(popup.candidates().is_empty());
    }
}

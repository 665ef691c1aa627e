//! The requested-items grid.
//!
//! The grid always ends with exactly one blank row for the user to type
//! into. Row 0 is an anchor and survives even when blank; any other row
//! that becomes fully blank is dropped.

use serde::Serialize;

use super::FormError;

/// One row of the requested-items grid.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct LineItem {
    pub quantity: f64,
    pub unit: String,
    pub description: String,
    pub remarks: String,
}

impl LineItem {
    pub fn is_blank(&self) -> bool {
        self.quantity == 0.0
            && self.unit.is_empty()
            && self.description.is_empty()
            && self.remarks.is_empty()
    }

    fn apply(&mut self, value: LineItemValue) {
        match value {
            LineItemValue::Quantity(q) => self.quantity = q,
            LineItemValue::Unit(s) => self.unit = s,
            LineItemValue::Description(s) => self.description = s,
            LineItemValue::Remarks(s) => self.remarks = s,
        }
    }
}

/// Editable columns of a line item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineItemField {
    Quantity,
    Unit,
    Description,
    Remarks,
}

impl LineItemField {
    pub const ALL: [LineItemField; 4] = [
        LineItemField::Quantity,
        LineItemField::Unit,
        LineItemField::Description,
        LineItemField::Remarks,
    ];

    /// Converts raw input text into the typed value for this column.
    pub fn coerce(self, raw: &str) -> LineItemValue {
        match self {
            LineItemField::Quantity => LineItemValue::Quantity(coerce_quantity(raw)),
            LineItemField::Unit => LineItemValue::Unit(raw.to_string()),
            LineItemField::Description => LineItemValue::Description(raw.to_string()),
            LineItemField::Remarks => LineItemValue::Remarks(raw.to_string()),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            LineItemField::Quantity => "Qty",
            LineItemField::Unit => "Unit",
            LineItemField::Description => "Description",
            LineItemField::Remarks => "Remarks",
        }
    }
}

/// A typed value for one line-item column.
#[derive(Debug, Clone, PartialEq)]
pub enum LineItemValue {
    Quantity(f64),
    Unit(String),
    Description(String),
    Remarks(String),
}

impl LineItemValue {
    pub fn field(&self) -> LineItemField {
        match self {
            LineItemValue::Quantity(_) => LineItemField::Quantity,
            LineItemValue::Unit(_) => LineItemField::Unit,
            LineItemValue::Description(_) => LineItemField::Description,
            LineItemValue::Remarks(_) => LineItemField::Remarks,
        }
    }
}

/// Parses a quantity; anything unparseable, negative or non-finite is 0.
pub fn coerce_quantity(raw: &str) -> f64 {
    match raw.trim().parse::<f64>() {
        Ok(q) if q.is_finite() && q > 0.0 => q,
        _ => 0.0,
    }
}

/// The line-item grid. Never empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineItemGrid {
    rows: Vec<LineItem>,
}

impl Default for LineItemGrid {
    fn default() -> Self {
        Self {
            rows: vec![LineItem::default()],
        }
    }
}

impl LineItemGrid {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> &[LineItem] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows the user actually filled in.
    pub fn filled(&self) -> impl Iterator<Item = &LineItem> {
        self.rows.iter().filter(|row| !row.is_blank())
    }

    /// Writes `value` into row `index` and returns the normalized grid.
    pub fn edit(&self, index: usize, value: LineItemValue) -> Result<Self, FormError> {
        if index >= self.rows.len() {
            return Err(FormError::RowOutOfRange {
                index,
                len: self.rows.len(),
            });
        }

        let mut rows = self.rows.clone();
        rows[index].apply(value);
        Ok(Self {
            rows: normalize(rows),
        })
    }

    /// Coerces raw input for `field` and applies it to row `index`.
    pub fn edit_raw(&self, index: usize, field: LineItemField, raw: &str) -> Result<Self, FormError> {
        self.edit(index, field.coerce(raw))
    }
}

fn normalize(rows: Vec<LineItem>) -> Vec<LineItem> {
    let mut kept: Vec<LineItem> = rows
        .into_iter()
        .enumerate()
        .filter(|(i, row)| *i == 0 || !row.is_blank())
        .map(|(_, row)| row)
        .collect();

    if kept.last().map_or(true, |row| !row.is_blank()) {
        kept.push(LineItem::default());
    }
    kept
}

//! The filterable, sortable request list.

mod column;
mod filter;
mod popover;
mod record;
mod state;

pub use column::{CellValue, ColumnId};
pub use filter::{distinct_values, ColumnFilterPopup, SelectAll};
pub use popover::{
    ResizablePopover, ResizeGesture, Size, MAX_HEIGHT, MAX_WIDTH, MIN_HEIGHT, MIN_WIDTH,
};
pub use record::{records_from_requests, sample_records, Record, RequestStatus};
pub use state::{PageSummary, SortDirection, SortSpec, TableRow, TableState};

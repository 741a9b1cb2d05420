//! Manual editing of poles and zeros through row-based text input

pub mod reconciler;
pub mod table;

pub use reconciler::{apply_outcome, reconcile, EditFields, EditOutcome, PreviousValue};
pub use table::{EditRow, EditTable, RowId, DEFAULT_BLANK_SLOTS};

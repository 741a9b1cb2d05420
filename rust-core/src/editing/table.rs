//! Editable rows for one root set
//!
//! Each committed conjugate pair gets one row (its upper-half-plane member),
//! followed by a few blank slots for new roots. Rows keep the value they
//! were built from, so a batch of edits can be reconciled against it.

use super::reconciler::{reconcile, EditFields, EditOutcome, PreviousValue};
use crate::model::ComplexMultiset;

/// Blank rows appended after the committed ones
pub const DEFAULT_BLANK_SLOTS: usize = 3;

/// Row identifier, unique within one table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RowId(pub usize);

#[derive(Debug, Clone, PartialEq)]
pub struct EditRow {
    pub id: RowId,
    pub previous: PreviousValue,
    pub fields: EditFields,
}

impl EditRow {
    /// Text shown in the empty fields of the row
    pub fn placeholder(&self) -> EditFields {
        match self.previous {
            PreviousValue::Blank => EditFields::default(),
            PreviousValue::Committed { root, multiplicity } => {
                EditFields::new(root.re.to_string(), root.im.to_string(), multiplicity.to_string())
            }
        }
    }

    pub fn is_blank_slot(&self) -> bool {
        matches!(self.previous, PreviousValue::Blank)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EditTable {
    rows: Vec<EditRow>,
}

impl EditTable {
    /// Rows for every representative of `set`, then [`DEFAULT_BLANK_SLOTS`] blank rows
    pub fn from_multiset(set: &ComplexMultiset) -> Self {
        Self::with_blank_slots(set, DEFAULT_BLANK_SLOTS)
    }

    pub fn with_blank_slots(set: &ComplexMultiset, blank_slots: usize) -> Self {
        let committed = set
            .representatives()
            .map(|(root, multiplicity)| PreviousValue::Committed { root, multiplicity });
        let blanks = std::iter::repeat(PreviousValue::Blank).take(blank_slots);

        let rows = committed
            .chain(blanks)
            .enumerate()
            .map(|(i, previous)| EditRow {
                id: RowId(i),
                previous,
                fields: EditFields::default(),
            })
            .collect();
        Self { rows }
    }

    pub fn rows(&self) -> &[EditRow] {
        &self.rows
    }

    pub fn row(&self, id: RowId) -> Option<&EditRow> {
        self.rows.iter().find(|row| row.id == id)
    }

    /// Replace the typed text of a row; returns `false` for an unknown id
    pub fn set_fields(&mut self, id: RowId, fields: EditFields) -> bool {
        match self.rows.iter_mut().find(|row| row.id == id) {
            Some(row) => {
                row.fields = fields;
                true
            }
            None => false,
        }
    }

    /// Outcome for every row, in row order
    pub fn reconcile(&self) -> Vec<(RowId, EditOutcome)> {
        self.rows
            .iter()
            .map(|row| (row.id, reconcile(&row.previous, &row.fields)))
            .collect()
    }

    /// Drop all typed text, keeping the rows
    pub fn clear(&mut self) {
        for row in &mut self.rows {
            row.fields = EditFields::default();
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

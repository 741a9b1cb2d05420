//! Turn one edited row into an add/delete/modify action on a root set

use crate::model::multiset::{conjugate_batch, conjugate_keys, MAX_MULTIPLICITY};
use crate::model::ComplexMultiset;
use num_complex::Complex64;
use std::num::NonZeroU32;

/// Raw text of one edit row, as typed by the user
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditFields {
    pub real: String,
    pub imag: String,
    pub multiplicity: String,
}

impl EditFields {
    pub fn new(real: impl Into<String>, imag: impl Into<String>, multiplicity: impl Into<String>) -> Self {
        Self {
            real: real.into(),
            imag: imag.into(),
            multiplicity: multiplicity.into(),
        }
    }

    /// All three fields empty after trimming
    pub fn is_blank(&self) -> bool {
        self.real.trim().is_empty() && self.imag.trim().is_empty() && self.multiplicity.trim().is_empty()
    }
}

/// Value a row showed before editing
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PreviousValue {
    /// Empty slot for entering a new root
    Blank,
    Committed {
        root: Complex64,
        multiplicity: NonZeroU32,
    },
}

/// Action resulting from one edit row
#[derive(Debug, Clone, PartialEq)]
pub enum EditOutcome {
    Ignore,
    Addition(Vec<(Complex64, NonZeroU32)>),
    Deletion(Vec<Complex64>),
    Modification {
        deletion: Vec<Complex64>,
        addition: Vec<(Complex64, NonZeroU32)>,
    },
}

impl EditOutcome {
    pub fn is_ignore(&self) -> bool {
        matches!(self, EditOutcome::Ignore)
    }

    /// Keys removed before any addition
    pub fn deletion_keys(&self) -> &[Complex64] {
        match self {
            EditOutcome::Deletion(keys) | EditOutcome::Modification { deletion: keys, .. } => keys,
            _ => &[],
        }
    }

    pub fn addition_entries(&self) -> &[(Complex64, NonZeroU32)] {
        match self {
            EditOutcome::Addition(entries) | EditOutcome::Modification { addition: entries, .. } => {
                entries
            }
            _ => &[],
        }
    }
}

/// Remove the outcome's deletion keys, then add its entries
pub fn apply_outcome(set: &mut ComplexMultiset, outcome: &EditOutcome) {
    set.remove(outcome.deletion_keys().iter().copied());
    set.add(outcome.addition_entries().iter().copied());
}

/// Classified multiplicity field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MultiplicityInput {
    Blank,
    Count(u32),
    /// Negative or fractional number, read as 1
    Clamped,
    /// Integer above [`MAX_MULTIPLICITY`]
    TooLarge,
    Malformed,
}

fn parse_number(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

fn classify_multiplicity(text: &str) -> MultiplicityInput {
    let text = text.trim();
    if text.is_empty() {
        return MultiplicityInput::Blank;
    }
    match parse_number(text) {
        Some(v) if v > MAX_MULTIPLICITY as f64 && v.fract() == 0.0 => MultiplicityInput::TooLarge,
        Some(v) if v >= 0.0 && v.fract() == 0.0 => MultiplicityInput::Count(v as u32),
        Some(_) => MultiplicityInput::Clamped,
        None => MultiplicityInput::Malformed,
    }
}

/// Decide what one edit row does to the root set it belongs to
pub fn reconcile(previous: &PreviousValue, fields: &EditFields) -> EditOutcome {
    if fields.is_blank() {
        return EditOutcome::Ignore;
    }

    let real = parse_number(&fields.real);
    let imag = parse_number(&fields.imag);
    let multiplicity = classify_multiplicity(&fields.multiplicity);

    let outcome = match *previous {
        PreviousValue::Blank => reconcile_fresh(real, imag, multiplicity),
        PreviousValue::Committed { root, .. } => reconcile_committed(root, real, imag, multiplicity),
    };

    tracing::trace!(?previous, ?fields, ?outcome, "reconciled edit row");
    outcome
}

/// A new root needs both parts; a count of 0, an oversized count or
/// unreadable multiplicity text drops the row
fn reconcile_fresh(real: Option<f64>, imag: Option<f64>, multiplicity: MultiplicityInput) -> EditOutcome {
    let (Some(re), Some(im)) = (real, imag) else {
        return EditOutcome::Ignore;
    };
    let k = match multiplicity {
        MultiplicityInput::Blank | MultiplicityInput::Clamped => NonZeroU32::MIN,
        MultiplicityInput::Count(k) => match NonZeroU32::new(k) {
            Some(k) => k,
            None => return EditOutcome::Ignore,
        },
        MultiplicityInput::TooLarge | MultiplicityInput::Malformed => return EditOutcome::Ignore,
    };
    EditOutcome::Addition(conjugate_batch(Complex64::new(re, im), k))
}

/// Blank or unusable multiplicity text resets the modified root to 1
fn reconcile_committed(
    root: Complex64,
    real: Option<f64>,
    imag: Option<f64>,
    multiplicity: MultiplicityInput,
) -> EditOutcome {
    let k = match multiplicity {
        MultiplicityInput::Count(0) => return EditOutcome::Deletion(conjugate_keys(root)),
        MultiplicityInput::Count(k) => NonZeroU32::new(k),
        MultiplicityInput::Clamped | MultiplicityInput::TooLarge => Some(NonZeroU32::MIN),
        MultiplicityInput::Blank | MultiplicityInput::Malformed => None,
    };

    if real.is_none() && imag.is_none() && k.is_none() {
        return EditOutcome::Ignore;
    }

    let new_root = Complex64::new(real.unwrap_or(root.re), imag.unwrap_or(root.im));
    EditOutcome::Modification {
        deletion: conjugate_keys(root),
        addition: conjugate_batch(new_root, k.unwrap_or(NonZeroU32::MIN)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nz(k: u32) -> NonZeroU32 {
        NonZeroU32::new(k).unwrap()
    }

    fn committed(re: f64, im: f64, k: u32) -> PreviousValue {
        PreviousValue::Committed {
            root: Complex64::new(re, im),
            multiplicity: nz(k),
        }
    }

    #[test]
    fn test_multiplicity_only_edit_keeps_root() {
        let outcome = reconcile(&committed(2.0, 3.0, 1), &EditFields::new("", "", "5"));

        assert_eq!(
            outcome,
            EditOutcome::Modification {
                deletion: vec![Complex64::new(2.0, 3.0), Complex64::new(2.0, -3.0)],
                addition: vec![
                    (Complex64::new(2.0, 3.0), nz(5)),
                    (Complex64::new(2.0, -3.0), nz(5)),
                ],
            }
        );
    }

    #[test]
    fn test_zero_multiplicity_deletes_real_root() {
        let outcome = reconcile(&committed(1.0, 0.0, 2), &EditFields::new("", "", "0"));
        assert_eq!(outcome, EditOutcome::Deletion(vec![Complex64::new(1.0, 0.0)]));
    }

    #[test]
    fn test_zero_multiplicity_deletes_pair_even_with_new_values() {
        let outcome = reconcile(&committed(0.0, 0.9, 2), &EditFields::new("0.3", "0.1", "0.0"));
        assert_eq!(
            outcome,
            EditOutcome::Deletion(vec![Complex64::new(0.0, 0.9), Complex64::new(0.0, -0.9)])
        );
    }

    #[test]
    fn test_fresh_slot_needs_both_parts() {
        let outcome = reconcile(&PreviousValue::Blank, &EditFields::new("5", "", ""));
        assert!(outcome.is_ignore());
    }

    #[test]
    fn test_fresh_slot_addition() {
        let outcome = reconcile(&PreviousValue::Blank, &EditFields::new(" 0.5 ", "0.5", ""));
        assert_eq!(
            outcome,
            EditOutcome::Addition(vec![
                (Complex64::new(0.5, 0.5), nz(1)),
                (Complex64::new(0.5, -0.5), nz(1)),
            ])
        );

        let real = reconcile(&PreviousValue::Blank, &EditFields::new("-1", "0", "2.0"));
        assert_eq!(real, EditOutcome::Addition(vec![(Complex64::new(-1.0, 0.0), nz(2))]));
    }

    #[test]
    fn test_fresh_slot_rejects_bad_multiplicity() {
        for k in ["0", "two", "101", "4000000000"] {
            let outcome = reconcile(&PreviousValue::Blank, &EditFields::new("1", "0", k));
            assert!(outcome.is_ignore(), "multiplicity {:?}", k);
        }
    }

    #[test]
    fn test_fresh_slot_clamps_negative_or_fractional() {
        for k in ["-2", "2.5"] {
            let outcome = reconcile(&PreviousValue::Blank, &EditFields::new("1", "0", k));
            assert_eq!(
                outcome,
                EditOutcome::Addition(vec![(Complex64::new(1.0, 0.0), nz(1))]),
                "multiplicity {:?}",
                k
            );
        }
    }

    #[test]
    fn test_multiplicity_limit() {
        let limit = MAX_MULTIPLICITY.to_string();
        let outcome = reconcile(&PreviousValue::Blank, &EditFields::new("0.5", "0", limit.as_str()));
        assert_eq!(
            outcome,
            EditOutcome::Addition(vec![(Complex64::new(0.5, 0.0), nz(MAX_MULTIPLICITY))])
        );

        // Oversized count on a committed row reads as 1
        let outcome = reconcile(&committed(0.5, 0.0, 2), &EditFields::new("", "", "30000"));
        assert_eq!(
            outcome,
            EditOutcome::Modification {
                deletion: vec![Complex64::new(0.5, 0.0)],
                addition: vec![(Complex64::new(0.5, 0.0), nz(1))],
            }
        );
    }

    #[test]
    fn test_clamped_multiplicity_reads_as_one() {
        for k in ["-3", "2.5"] {
            let outcome = reconcile(&committed(0.5, 0.0, 4), &EditFields::new("", "", k));
            assert_eq!(
                outcome,
                EditOutcome::Modification {
                    deletion: vec![Complex64::new(0.5, 0.0)],
                    addition: vec![(Complex64::new(0.5, 0.0), nz(1))],
                },
                "multiplicity {:?}",
                k
            );
        }
    }

    #[test]
    fn test_malformed_fields_fall_back() {
        // Real part keeps the previous value, multiplicity resets to 1
        let outcome = reconcile(&committed(0.2, 0.4, 3), &EditFields::new("abc", "0.6", "x"));
        assert_eq!(
            outcome,
            EditOutcome::Modification {
                deletion: vec![Complex64::new(0.2, 0.4), Complex64::new(0.2, -0.4)],
                addition: vec![
                    (Complex64::new(0.2, 0.6), nz(1)),
                    (Complex64::new(0.2, -0.6), nz(1)),
                ],
            }
        );
    }

    #[test]
    fn test_committed_row_with_only_garbage_is_ignored() {
        let outcome = reconcile(&committed(0.2, 0.0, 1), &EditFields::new("x", "NaN", "y"));
        assert!(outcome.is_ignore());
        assert!(reconcile(&committed(0.2, 0.0, 1), &EditFields::new(" ", "", "\t")).is_ignore());
    }

    #[test]
    fn test_moving_root_off_axis_adds_conjugate() {
        let outcome = reconcile(&committed(0.5, 0.0, 1), &EditFields::new("", "0.25", ""));
        assert_eq!(
            outcome.addition_entries(),
            &[
                (Complex64::new(0.5, 0.25), nz(1)),
                (Complex64::new(0.5, -0.25), nz(1)),
            ]
        );
        assert_eq!(outcome.deletion_keys(), &[Complex64::new(0.5, 0.0)]);
    }

    #[test]
    fn test_apply_outcome_deletes_before_adding() {
        let mut set: ComplexMultiset = conjugate_batch(Complex64::new(2.0, 3.0), nz(1))
            .into_iter()
            .collect();
        let outcome = reconcile(&committed(2.0, 3.0, 1), &EditFields::new("", "", "5"));
        apply_outcome(&mut set, &outcome);

        assert_eq!(set.multiplicity(Complex64::new(2.0, 3.0)), 5);
        assert_eq!(set.multiplicity(Complex64::new(2.0, -3.0)), 5);
        assert!(set.is_conjugate_symmetric());
    }
}

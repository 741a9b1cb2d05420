//! Python bindings for the editing session behind the GUI

use numpy::{Complex64, PyArray1};
use pyo3::exceptions::PyKeyError;
use pyo3::prelude::*;
use std::collections::HashMap;

use super::model_bindings::{load_config, root_list, views, PyFilterModel};
use super::parse_target;
use crate::editing::{EditFields, RowId};
use crate::model::{FilterKind, FilterMode};
use crate::session::FilterSession;

/// Placeholder shown in blank edit slots
const BLANK_PLACEHOLDER: &str = "leer";

/// Filter model plus pole/zero edit tables
#[pyclass(name = "FilterSession")]
pub struct PyFilterSession {
    session: FilterSession,
}

#[pymethods]
impl PyFilterSession {
    #[new]
    #[pyo3(signature = (mode="Digital", kind="Manual", config_path=None))]
    fn new(mode: &str, kind: &str, config_path: Option<&str>) -> PyResult<Self> {
        let config = load_config(config_path)?;
        let session = FilterSession::new(
            config,
            FilterMode::from_label(mode)?,
            FilterKind::from_label(kind)?,
        )?;
        Ok(Self { session })
    }

    /// Switch to a configured default filter, discarding typed edits
    fn change_default_model(&mut self, mode: &str, kind: &str) -> PyResult<()> {
        self.session
            .change_default_model(FilterMode::from_label(mode)?, FilterKind::from_label(kind)?)?;
        Ok(())
    }

    /// Rows of one table
    ///
    /// Args:
    ///     target: "poles" or "zeros"
    ///
    /// Returns:
    ///     List of (row_id, real, imag, multiplicity) placeholder strings
    fn rows(&self, target: &str) -> PyResult<Vec<(usize, String, String, String)>> {
        let table = self.session.table(parse_target(target)?);
        Ok(table
            .rows()
            .iter()
            .map(|row| {
                if row.is_blank_slot() {
                    let blank = BLANK_PLACEHOLDER.to_string();
                    (row.id.0, blank.clone(), blank.clone(), blank)
                } else {
                    let p = row.placeholder();
                    (row.id.0, p.real, p.imag, p.multiplicity)
                }
            })
            .collect())
    }

    /// Store the text typed into one row
    fn set_row(
        &mut self,
        target: &str,
        row_id: usize,
        real: &str,
        imag: &str,
        multiplicity: &str,
    ) -> PyResult<()> {
        let table = self.session.table_mut(parse_target(target)?);
        if table.set_fields(RowId(row_id), EditFields::new(real, imag, multiplicity)) {
            Ok(())
        } else {
            Err(PyErr::new::<PyKeyError, _>(format!("No {} row {}", target, row_id)))
        }
    }

    /// Apply all typed rows and recompute
    ///
    /// Returns:
    ///     Dict with counts of additions, modifications, deletions, ignored
    fn commit(&mut self) -> PyResult<HashMap<&'static str, usize>> {
        let summary = self.session.commit_manual_edits()?;
        Ok(HashMap::from([
            ("additions", summary.additions),
            ("modifications", summary.modifications),
            ("deletions", summary.deletions),
            ("ignored", summary.ignored),
        ]))
    }

    fn clear_edits(&mut self) {
        self.session.clear_edits();
    }

    /// Snapshot of the current model
    fn model(&self) -> PyFilterModel {
        PyFilterModel::from_session(&self.session)
    }

    fn poles(&self) -> Vec<(Complex64, u32)> {
        root_list(self.session.model().poles())
    }

    fn zeros(&self) -> Vec<(Complex64, u32)> {
        root_list(self.session.model().zeros())
    }

    fn frequencies<'py>(&self, py: Python<'py>) -> &'py PyArray1<f64> {
        PyArray1::from_slice(py, self.session.model().frequencies())
    }

    fn magnitude<'py>(&self, py: Python<'py>) -> &'py PyArray1<f64> {
        PyArray1::from_vec(py, self.session.model().response().magnitude())
    }

    fn normalized_magnitude<'py>(&self, py: Python<'py>) -> &'py PyArray1<f64> {
        PyArray1::from_vec(py, self.session.model().response().normalized_magnitude())
    }

    fn phase<'py>(&self, py: Python<'py>) -> &'py PyArray1<f64> {
        PyArray1::from_vec(py, self.session.model().response().phase())
    }

    #[pyo3(signature = (kind="impulse"))]
    fn time_response<'py>(
        &self,
        py: Python<'py>,
        kind: &str,
    ) -> PyResult<(&'py PyArray1<f64>, &'py PyArray1<f64>)> {
        views::time_response(py, self.session.model(), kind)
    }

    fn pole_zero_map<'py>(
        &self,
        py: Python<'py>,
    ) -> (Vec<(&'static str, Complex64, u32)>, &'py PyArray1<Complex64>) {
        views::pole_zero_map(py, self.session.model())
    }

    #[getter]
    fn mode(&self) -> &'static str {
        self.session.model().mode().label()
    }

    #[getter]
    fn kind(&self) -> &'static str {
        self.session.model().kind().label()
    }
}

//! Python bindings for the pole-zero filter model

use numpy::{Complex64, PyArray1};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use std::num::NonZeroU32;

use super::parse_response_kind;
use crate::model::multiset::{conjugate_batch, conjugate_keys, MAX_MULTIPLICITY};
use crate::model::{ComplexMultiset, DefaultFilterConfig, FilterKind, FilterMode, FilterModel};
use crate::session::FilterSession;

pub(super) fn load_config(config_path: Option<&str>) -> PyResult<DefaultFilterConfig> {
    let config = match config_path {
        Some(path) => DefaultFilterConfig::load(path)?,
        None => DefaultFilterConfig::embedded()?,
    };
    config.settings.validate()?;
    Ok(config)
}

fn positive_multiplicity(multiplicity: u32) -> PyResult<NonZeroU32> {
    if multiplicity > MAX_MULTIPLICITY {
        return Err(PyErr::new::<PyValueError, _>(format!(
            "Multiplicity must not exceed {}",
            MAX_MULTIPLICITY
        )));
    }
    NonZeroU32::new(multiplicity)
        .ok_or_else(|| PyErr::new::<PyValueError, _>("Multiplicity must be positive"))
}

pub(super) fn root_list(set: &ComplexMultiset) -> Vec<(Complex64, u32)> {
    set.items().map(|(z, k)| (z, k.get())).collect()
}

/// Views shared by the model and session classes
pub(super) mod views {
    use super::*;

    pub fn time_response<'py>(
        py: Python<'py>,
        model: &FilterModel,
        kind: &str,
    ) -> PyResult<(&'py PyArray1<f64>, &'py PyArray1<f64>)> {
        let resp = model.time_response(parse_response_kind(kind)?)?;
        Ok((
            PyArray1::from_vec(py, resp.time),
            PyArray1::from_vec(py, resp.values),
        ))
    }

    /// `([(kind, position, multiplicity), ...], unit_circle)`
    pub fn pole_zero_map<'py>(
        py: Python<'py>,
        model: &FilterModel,
    ) -> (Vec<(&'static str, Complex64, u32)>, &'py PyArray1<Complex64>) {
        let map = model.pole_zero_map();
        let markers = map
            .markers
            .iter()
            .map(|m| {
                let kind = match m.kind {
                    crate::model::MarkerKind::Pole => "pole",
                    crate::model::MarkerKind::Zero => "zero",
                };
                (kind, m.position, m.multiplicity)
            })
            .collect();
        (markers, PyArray1::from_vec(py, map.unit_circle))
    }
}

/// Pole-zero filter model exposed to Python
#[pyclass(name = "FilterModel")]
pub struct PyFilterModel {
    config: DefaultFilterConfig,
    model: FilterModel,
}

impl PyFilterModel {
    pub(super) fn from_session(session: &FilterSession) -> Self {
        Self {
            config: session.config().clone(),
            model: session.model().clone(),
        }
    }
}

#[pymethods]
impl PyFilterModel {
    /// Create a model from a configured default filter
    ///
    /// Args:
    ///     mode: Mode label ("Digital" or "Analog")
    ///     kind: Filter label ("Manual", "Tief pass", ...)
    ///     config_path: Optional JSON file replacing the built-in defaults
    #[new]
    #[pyo3(signature = (mode="Digital", kind="Manual", config_path=None))]
    fn new(mode: &str, kind: &str, config_path: Option<&str>) -> PyResult<Self> {
        let config = load_config(config_path)?;
        let model = FilterModel::from_default(
            &config,
            FilterMode::from_label(mode)?,
            FilterKind::from_label(kind)?,
        )?;
        Ok(Self { config, model })
    }

    /// Load another default filter and recompute
    fn init_default(&mut self, mode: &str, kind: &str) -> PyResult<()> {
        let mode = FilterMode::from_label(mode)?;
        let kind = FilterKind::from_label(kind)?;
        self.model.init_default(&self.config, mode, kind)?;
        Ok(())
    }

    /// Add a pole and its conjugate (no recompute)
    #[pyo3(signature = (root, multiplicity=1))]
    fn add_pole(&mut self, root: Complex64, multiplicity: u32) -> PyResult<()> {
        self.model
            .add_poles(conjugate_batch(root, positive_multiplicity(multiplicity)?));
        Ok(())
    }

    /// Remove a pole and its conjugate (no recompute)
    fn remove_pole(&mut self, root: Complex64) {
        self.model.remove_poles(conjugate_keys(root));
    }

    #[pyo3(signature = (root, multiplicity=1))]
    fn add_zero(&mut self, root: Complex64, multiplicity: u32) -> PyResult<()> {
        self.model
            .add_zeros(conjugate_batch(root, positive_multiplicity(multiplicity)?));
        Ok(())
    }

    fn remove_zero(&mut self, root: Complex64) {
        self.model.remove_zeros(conjugate_keys(root));
    }

    fn recompute_coefficients(&mut self) -> PyResult<()> {
        Ok(self.model.recompute_coefficients()?)
    }

    fn recompute_response(&mut self) -> PyResult<()> {
        Ok(self.model.recompute_response()?)
    }

    /// Poles as `[(root, multiplicity), ...]`
    fn poles(&self) -> Vec<(Complex64, u32)> {
        root_list(self.model.poles())
    }

    fn zeros(&self) -> Vec<(Complex64, u32)> {
        root_list(self.model.zeros())
    }

    /// Numerator coefficients, highest power first
    fn numerator<'py>(&self, py: Python<'py>) -> &'py PyArray1<f64> {
        PyArray1::from_slice(py, self.model.numerator())
    }

    /// Denominator coefficients, highest power first
    fn denominator<'py>(&self, py: Python<'py>) -> &'py PyArray1<f64> {
        PyArray1::from_slice(py, self.model.denominator())
    }

    /// Frequency grid in rad/sample (digital) or rad/s (analog)
    fn frequencies<'py>(&self, py: Python<'py>) -> &'py PyArray1<f64> {
        PyArray1::from_slice(py, self.model.frequencies())
    }

    fn complex_response<'py>(&self, py: Python<'py>) -> &'py PyArray1<Complex64> {
        PyArray1::from_slice(py, self.model.complex_response())
    }

    fn magnitude<'py>(&self, py: Python<'py>) -> &'py PyArray1<f64> {
        PyArray1::from_vec(py, self.model.response().magnitude())
    }

    fn phase<'py>(&self, py: Python<'py>) -> &'py PyArray1<f64> {
        PyArray1::from_vec(py, self.model.response().phase())
    }

    fn magnitude_db<'py>(&self, py: Python<'py>) -> &'py PyArray1<f64> {
        PyArray1::from_vec(py, self.model.response().magnitude_db())
    }

    /// Magnitude divided by its peak (0-1 scale)
    fn normalized_magnitude<'py>(&self, py: Python<'py>) -> &'py PyArray1<f64> {
        PyArray1::from_vec(py, self.model.response().normalized_magnitude())
    }

    /// Impulse or step response
    ///
    /// Args:
    ///     kind: "impulse" or "step"
    ///
    /// Returns:
    ///     (time, values) as numpy arrays
    #[pyo3(signature = (kind="impulse"))]
    fn time_response<'py>(
        &self,
        py: Python<'py>,
        kind: &str,
    ) -> PyResult<(&'py PyArray1<f64>, &'py PyArray1<f64>)> {
        views::time_response(py, &self.model, kind)
    }

    /// Marker list and unit circle for the pole-zero plot
    fn pole_zero_map<'py>(
        &self,
        py: Python<'py>,
    ) -> (Vec<(&'static str, Complex64, u32)>, &'py PyArray1<Complex64>) {
        views::pole_zero_map(py, &self.model)
    }

    #[getter]
    fn mode(&self) -> &'static str {
        self.model.mode().label()
    }

    #[getter]
    fn kind(&self) -> &'static str {
        self.model.kind().label()
    }

    #[getter]
    fn sampling_time(&self) -> f64 {
        self.model.sampling_time()
    }

    #[setter]
    fn set_sampling_time(&mut self, sampling_time: f64) -> PyResult<()> {
        Ok(self.model.set_sampling_time(sampling_time)?)
    }

    #[getter]
    fn is_stale(&self) -> bool {
        self.model.is_stale()
    }
}

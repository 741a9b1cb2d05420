//! PyO3 bindings for the Python GUI

use pyo3::exceptions::{PyIOError, PyRuntimeError, PyValueError};
use pyo3::prelude::*;

use crate::error::FilterError;
use crate::logging::{init_logging, LogConfig, LogLevel};
use crate::model::{FilterKind, FilterMode, RootTarget};
use crate::spectrum::ResponseKind;

mod model_bindings;
mod session_bindings;

impl From<FilterError> for PyErr {
    fn from(err: FilterError) -> Self {
        match err {
            FilterError::ConfigIo(_) => PyErr::new::<PyIOError, _>(err.to_string()),
            FilterError::UnknownLabel(_)
            | FilterError::MissingDefault { .. }
            | FilterError::InvalidSamplingTime(_)
            | FilterError::InvalidGridLength(_) => PyErr::new::<PyValueError, _>(err.to_string()),
            _ => PyErr::new::<PyRuntimeError, _>(err.to_string()),
        }
    }
}

fn parse_target(name: &str) -> PyResult<RootTarget> {
    match name {
        "poles" => Ok(RootTarget::Poles),
        "zeros" => Ok(RootTarget::Zeros),
        other => Err(PyErr::new::<PyValueError, _>(format!(
            "Expected 'poles' or 'zeros', got '{}'",
            other
        ))),
    }
}

fn parse_response_kind(name: &str) -> PyResult<ResponseKind> {
    match name {
        "impulse" => Ok(ResponseKind::Impulse),
        "step" => Ok(ResponseKind::Step),
        other => Err(PyErr::new::<PyValueError, _>(format!(
            "Expected 'impulse' or 'step', got '{}'",
            other
        ))),
    }
}

/// Install the Rust-side log subscriber
///
/// Args:
///     level: One of trace, debug, info, warn, error
///     filter: Optional directive string, e.g. "pole_zero_workbench::editing=trace"
///
/// Returns:
///     False if logging was already initialized
#[pyfunction(name = "init_logging")]
#[pyo3(signature = (level="warn", filter=None))]
fn py_init_logging(level: &str, filter: Option<String>) -> PyResult<bool> {
    let level = LogLevel::from_name(level).ok_or_else(|| {
        PyErr::new::<PyValueError, _>(format!("Unknown log level '{}'", level))
    })?;
    Ok(init_logging(&LogConfig {
        level,
        filter,
        ..Default::default()
    }))
}

/// Python module definition
#[pymodule]
fn pole_zero_workbench(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_class::<model_bindings::PyFilterModel>()?;
    m.add_class::<session_bindings::PyFilterSession>()?;
    m.add_function(wrap_pyfunction!(py_init_logging, m)?)?;

    // Menu entries, in display order
    m.add("MODE_LABELS", FilterMode::ALL.map(|mode| mode.label()).to_vec())?;
    m.add("FILTER_LABELS", FilterKind::ALL.map(|kind| kind.label()).to_vec())?;

    Ok(())
}

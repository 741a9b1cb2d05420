//! Frequency and time responses of a transfer function

pub mod fft;
pub mod response;
pub mod state_space;
pub mod time_response;
mod views;

pub use fft::FftEngine;
pub use response::{evaluate, FrequencyResponse};
pub use state_space::StateSpace;
pub use time_response::{time_response, ResponseKind, TimeResponse};

//! Transfer-function synthesis from poles and zeros

pub mod polynomial;
pub mod transfer;

pub use transfer::{synthesize, TransferFunction};

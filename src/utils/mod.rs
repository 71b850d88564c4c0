//! Utility modules for authgate

pub mod error;

pub use error::{GateError, Result};

//! Soft/hard quality gates over aggregate run metrics.
//!
//! Message formats are consumed by CI tooling and treated as stable:
//!
//! - `"<name>: missing metric for soft gate validation"`
//! - `"<name>: missing metric required for hard gate validation"`
//! - `"<name>: <value> below soft threshold <threshold>"`
//! - `"<name>: <value> below hard threshold <threshold>"`

pub mod error;
pub mod validator;

#[cfg(test)]
mod tests;

pub use error::GateFileError;
pub use validator::{GateConfig, GateReport, Metrics, load_metrics, validate};

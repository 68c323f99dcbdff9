//! Report module - charts, run summary and exported artifacts

pub mod charts;
pub mod metrics_export;
pub mod summary;

pub use charts::*;
pub use metrics_export::*;
pub use summary::*;

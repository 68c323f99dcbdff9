//! Shotscope: shooting-incident EDA and classification library
//!
//! A single-pass pipeline over a shooting-incident CSV: load, clean,
//! visualize, fit a fatal-outcome logistic regression and evaluate it.

pub mod cli;
pub mod pipeline;
pub mod report;
pub mod utils;

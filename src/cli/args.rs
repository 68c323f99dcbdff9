//! Command-line argument definitions using clap

use clap::Parser;
use std::path::PathBuf;

/// Shotscope - EDA and fatal-outcome classification over a shooting-incident CSV
#[derive(Parser, Debug)]
#[command(name = "shotscope")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Input CSV file path (the raw incident extract)
    #[arg(short, long)]
    pub input: PathBuf,

    /// Seed for the stratified train/test split.
    /// Re-running with the same seed and input reproduces the same partition.
    #[arg(long, default_value = "42")]
    pub seed: u64,

    /// Fraction of cleaned rows assigned to the training set
    #[arg(long, default_value = "0.8", value_parser = validate_train_fraction)]
    pub train_fraction: f64,

    /// Skip the descriptive charts and go straight to modeling
    #[arg(long, default_value = "false")]
    pub no_charts: bool,

    /// Write the evaluation results to a JSON file
    #[arg(long)]
    pub export_metrics: Option<PathBuf>,

    /// Number of rows to use for CSV schema inference.
    /// Use 0 for a full table scan (slow for large files).
    #[arg(long, default_value = "10000")]
    pub infer_schema_length: usize,
}

/// Validator for the train_fraction parameter
fn validate_train_fraction(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;

    if !(value > 0.0 && value < 1.0) {
        Err(format!(
            "train_fraction must be strictly between 0.0 and 1.0, got {}",
            value
        ))
    } else {
        Ok(value)
    }
}

//! Incident dataset loader for CSV files

use anyhow::{Context, Result};
use polars::prelude::*;
use std::path::Path;

use super::schema::REQUIRED_COLUMNS;

/// Load the raw incident CSV into an in-memory frame.
///
/// The whole file is collected eagerly; every later stage works on full
/// frames. A missing file, malformed CSV or missing required column is a
/// fatal load error.
pub fn load_incidents(path: &Path, infer_schema_length: usize) -> Result<DataFrame> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    if extension != "csv" {
        anyhow::bail!(
            "Unsupported file format: '{}'. The incident extract is CSV only.",
            extension
        );
    }

    let infer = if infer_schema_length == 0 {
        None
    } else {
        Some(infer_schema_length)
    };

    let df = LazyCsvReader::new(path)
        .with_infer_schema_length(infer)
        .finish()
        .with_context(|| format!("Failed to load CSV file: {}", path.display()))?
        .collect()
        .with_context(|| format!("Failed to read CSV file: {}", path.display()))?;

    validate_schema(&df)?;

    Ok(df)
}

/// Check that every required column is present. There is no schema
/// negotiation; a mismatch aborts the pipeline before any cleaning runs.
pub fn validate_schema(df: &DataFrame) -> Result<()> {
    let present: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|s| s.to_string())
        .collect();

    let missing: Vec<&str> = REQUIRED_COLUMNS
        .iter()
        .filter(|name| !present.iter().any(|c| c == *name))
        .copied()
        .collect();

    if !missing.is_empty() {
        anyhow::bail!(
            "Input does not match the incident schema. Missing column(s): {}",
            missing.join(", ")
        );
    }

    Ok(())
}

/// Shape and memory statistics for the loaded frame.
pub fn dataset_stats(df: &DataFrame) -> (usize, usize, f64) {
    let (rows, cols) = df.shape();
    let memory_mb = df.estimated_size() as f64 / (1024.0 * 1024.0);
    (rows, cols, memory_mb)
}

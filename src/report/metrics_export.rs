//! JSON export of the evaluation results

use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;

use crate::pipeline::cleaner::CleanReport;
use crate::pipeline::metrics::EvalMetrics;

/// Metadata about the pipeline run.
#[derive(Serialize)]
pub struct RunMetadata {
    /// Timestamp of the run (ISO 8601 format)
    pub timestamp: String,
    /// Shotscope version
    pub version: String,
    /// Input file path
    pub input_file: String,
    /// Split seed
    pub seed: u64,
    /// Train fraction
    pub train_fraction: f64,
}

/// Complete metrics export: metadata, cleaning accounting, partition sizes
/// and evaluation results. Undefined metrics serialize as JSON null.
#[derive(Serialize)]
pub struct MetricsExport {
    pub metadata: RunMetadata,
    pub cleaning: CleanReport,
    pub train_rows: usize,
    pub test_rows: usize,
    pub metrics: EvalMetrics,
}

/// Parameters for building the export metadata.
pub struct ExportParams<'a> {
    pub input_file: &'a str,
    pub seed: u64,
    pub train_fraction: f64,
}

/// Write the evaluation artifact to a JSON file.
pub fn export_metrics(
    metrics: &EvalMetrics,
    cleaning: &CleanReport,
    train_rows: usize,
    test_rows: usize,
    output_path: &Path,
    params: &ExportParams,
) -> Result<()> {
    let export = MetricsExport {
        metadata: RunMetadata {
            timestamp: Utc::now().to_rfc3339(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            input_file: params.input_file.to_string(),
            seed: params.seed,
            train_fraction: params.train_fraction,
        },
        cleaning: *cleaning,
        train_rows,
        test_rows,
        metrics: metrics.clone(),
    };

    let json = serde_json::to_string_pretty(&export)
        .context("Failed to serialize evaluation results to JSON")?;

    std::fs::write(output_path, json)
        .with_context(|| format!("Failed to write metrics to {}", output_path.display()))?;

    Ok(())
}

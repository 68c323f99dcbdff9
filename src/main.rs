//! Shotscope: shooting-incident EDA and classification CLI
//!
//! A single deterministic pass: load the raw CSV, clean it, render the
//! descriptive charts, fit the fatal-outcome logistic regression and report
//! the evaluation metrics.

use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use console::style;

use shotscope::cli::Cli;
use shotscope::pipeline::{
    clean_incidents, dataset_stats, evaluate, load_incidents, stratified_split,
    train_outcome_model, FeatureEncoder, OUTCOME,
};
use shotscope::report::{
    display_metrics, export_metrics, render_outcome_charts, ExportParams, RunSummary,
};
use shotscope::utils::{
    create_spinner, finish_with_success, print_banner, print_completion, print_config,
    print_info, print_step_header, print_step_time, print_success, print_warning,
};

fn main() -> Result<()> {
    let cli = Cli::parse();

    print_banner(env!("CARGO_PKG_VERSION"));
    print_config(&cli.input, cli.seed, cli.train_fraction);

    // Step 1: Load dataset
    print_step_header(1, "Load Dataset");

    let step_start = Instant::now();
    let spinner = create_spinner("Reading incident CSV...");
    let raw = load_incidents(&cli.input, cli.infer_schema_length)?;
    finish_with_success(&spinner, "Dataset loaded");

    let (rows, cols, memory_mb) = dataset_stats(&raw);
    println!("\n    {} Dataset Statistics:", style("✧").cyan());
    println!("      Rows: {}", rows);
    println!("      Columns: {}", cols);
    println!("      Estimated memory: {:.2} MB", memory_mb);

    let load_elapsed = step_start.elapsed();
    print_step_time(load_elapsed);

    // Step 2: Clean
    print_step_header(2, "Clean & Derive");

    let step_start = Instant::now();
    let spinner = create_spinner("Cleaning incident rows...");
    let (cleaned, report) = clean_incidents(&raw)?;
    finish_with_success(&spinner, "Cleaning complete");

    println!(
        "      Kept {} of {} rows",
        style(report.kept_rows).green().bold(),
        report.raw_rows
    );
    if report.dropped_total() > 0 {
        println!(
            "      Dropped: {} missing field, {} bad date/time, {} bad age bucket, {} bad flag",
            style(report.dropped_missing).yellow(),
            style(report.dropped_bad_date).yellow(),
            style(report.dropped_bad_age).yellow(),
            style(report.dropped_bad_flag).yellow()
        );
    }
    if report.kept_rows == 0 {
        anyhow::bail!("No rows survived cleaning; nothing to analyze");
    }

    let mut summary = RunSummary::new(report);
    summary.load_time = Some(load_elapsed);
    let clean_elapsed = step_start.elapsed();
    summary.clean_time = Some(clean_elapsed);
    print_step_time(clean_elapsed);

    // Step 3: Descriptive charts
    if cli.no_charts {
        print_info("Charts skipped (--no-charts)");
    } else {
        print_step_header(3, "Descriptive Charts");

        let step_start = Instant::now();
        render_outcome_charts(&cleaned)?;
        let chart_elapsed = step_start.elapsed();
        summary.chart_time = Some(chart_elapsed);
        print_step_time(chart_elapsed);
    }

    // Step 4: Split & train
    print_step_header(4, "Train Classifier");

    let step_start = Instant::now();
    let split = stratified_split(&cleaned, OUTCOME, cli.train_fraction, cli.seed)?;
    summary.set_partitions(split.train.height(), split.test.height());
    println!(
        "      Split: {} train / {} test (seed {})",
        style(split.train.height()).yellow().bold(),
        style(split.test.height()).yellow().bold(),
        cli.seed
    );
    if split.test.height() == 0 {
        anyhow::bail!("Test partition is empty; lower --train-fraction or supply more data");
    }

    let spinner = create_spinner("Fitting logistic regression...");
    let encoder = FeatureEncoder::fit(&cleaned)?;
    let train_set = encoder.encode(&split.train)?;
    let model = train_outcome_model(&train_set, &encoder)?;
    finish_with_success(&spinner, "Model fitted");

    summary.feature_count = model.n_features();
    println!(
        "      {} encoded features over {} training rows",
        style(model.n_features()).yellow().bold(),
        model.n_train
    );
    let model_elapsed = step_start.elapsed();
    summary.model_time = Some(model_elapsed);
    print_step_time(model_elapsed);

    // Step 5: Evaluate
    print_step_header(5, "Evaluate");

    let step_start = Instant::now();
    let test_set = encoder.encode(&split.test)?;
    let predicted = model.predict(&test_set.rows);
    let metrics = evaluate(&test_set.labels, &predicted)?;
    display_metrics(&metrics);

    if let Some(path) = &cli.export_metrics {
        export_metrics(
            &metrics,
            &summary.clean,
            split.train.height(),
            split.test.height(),
            path,
            &ExportParams {
                input_file: &cli.input.display().to_string(),
                seed: cli.seed,
                train_fraction: cli.train_fraction,
            },
        )?;
        print_success(&format!("Metrics exported to {}", path.display()));
    }

    let eval_elapsed = step_start.elapsed();
    summary.eval_time = Some(eval_elapsed);
    print_step_time(eval_elapsed);

    if summary.clean.kept_rows < 50 {
        print_warning("Small cleaned sample; evaluation results may be unstable");
    }

    summary.display();
    print_completion();

    Ok(())
}

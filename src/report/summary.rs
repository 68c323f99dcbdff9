//! Run summary and metrics tables

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, Color, Table};
use console::style;
use std::time::Duration;

use crate::pipeline::cleaner::CleanReport;
use crate::pipeline::metrics::EvalMetrics;

/// Summary of a full pipeline run, displayed after evaluation.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub clean: CleanReport,
    pub train_rows: usize,
    pub test_rows: usize,
    pub feature_count: usize,
    pub load_time: Option<Duration>,
    pub clean_time: Option<Duration>,
    pub chart_time: Option<Duration>,
    pub model_time: Option<Duration>,
    pub eval_time: Option<Duration>,
}

impl RunSummary {
    pub fn new(clean: CleanReport) -> Self {
        Self {
            clean,
            ..Default::default()
        }
    }

    pub fn set_partitions(&mut self, train_rows: usize, test_rows: usize) {
        self.train_rows = train_rows;
        self.test_rows = test_rows;
    }

    pub fn display(&self) {
        println!();
        println!(
            "    {} {}",
            style("📋").cyan(),
            style("RUN SUMMARY").white().bold()
        );
        println!("    {}", style("─".repeat(50)).dim());
        println!();

        let mut table = Table::new();
        table.load_preset(UTF8_FULL_CONDENSED);
        table.set_header(vec![
            Cell::new("Metric").add_attribute(Attribute::Bold),
            Cell::new("Value").add_attribute(Attribute::Bold),
        ]);

        table.add_row(vec![Cell::new("Raw rows"), Cell::new(self.clean.raw_rows)]);
        table.add_row(vec![
            Cell::new("Dropped (missing field)"),
            drop_cell(self.clean.dropped_missing),
        ]);
        table.add_row(vec![
            Cell::new("Dropped (bad date/time)"),
            drop_cell(self.clean.dropped_bad_date),
        ]);
        table.add_row(vec![
            Cell::new("Dropped (bad age bucket)"),
            drop_cell(self.clean.dropped_bad_age),
        ]);
        table.add_row(vec![
            Cell::new("Dropped (bad murder flag)"),
            drop_cell(self.clean.dropped_bad_flag),
        ]);
        table.add_row(vec![
            Cell::new("Cleaned rows"),
            Cell::new(self.clean.kept_rows)
                .fg(Color::Green)
                .add_attribute(Attribute::Bold),
        ]);
        table.add_row(vec![Cell::new("Train rows"), Cell::new(self.train_rows)]);
        table.add_row(vec![Cell::new("Test rows"), Cell::new(self.test_rows)]);
        table.add_row(vec![
            Cell::new("Encoded features"),
            Cell::new(self.feature_count),
        ]);

        for (label, time) in [
            ("Load time", self.load_time),
            ("Clean time", self.clean_time),
            ("Chart time", self.chart_time),
            ("Model time", self.model_time),
            ("Eval time", self.eval_time),
        ] {
            if let Some(elapsed) = time {
                table.add_row(vec![
                    Cell::new(label),
                    Cell::new(format!("{:.2}s", elapsed.as_secs_f64())),
                ]);
            }
        }

        for line in table.to_string().lines() {
            println!("    {}", line);
        }
    }
}

/// Render the evaluation metrics: confusion matrix plus the four scalars.
/// Undefined metrics print as "undefined". Perfect held-out accuracy is a
/// red flag for target leakage or a degenerate split, so it gets a warning
/// rather than applause.
pub fn display_metrics(metrics: &EvalMetrics) {
    println!();
    println!(
        "    {} {}",
        style("🎯").cyan(),
        style("EVALUATION").white().bold()
    );
    println!("    {}", style("─".repeat(50)).dim());
    println!();

    let confusion = &metrics.confusion;
    let mut matrix = Table::new();
    matrix.load_preset(UTF8_FULL_CONDENSED);
    matrix.set_header(vec![
        Cell::new(""),
        Cell::new("Actual Fatal").add_attribute(Attribute::Bold),
        Cell::new("Actual NonFatal").add_attribute(Attribute::Bold),
    ]);
    matrix.add_row(vec![
        Cell::new("Predicted Fatal").add_attribute(Attribute::Bold),
        Cell::new(confusion.true_positive),
        Cell::new(confusion.false_positive),
    ]);
    matrix.add_row(vec![
        Cell::new("Predicted NonFatal").add_attribute(Attribute::Bold),
        Cell::new(confusion.false_negative),
        Cell::new(confusion.true_negative),
    ]);

    for line in matrix.to_string().lines() {
        println!("    {}", line);
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec![
        Cell::new("Metric").add_attribute(Attribute::Bold),
        Cell::new("Value").add_attribute(Attribute::Bold),
    ]);
    table.add_row(vec![
        Cell::new("Accuracy"),
        Cell::new(format!("{:.4}", metrics.accuracy)),
    ]);
    table.add_row(vec![
        Cell::new("Precision"),
        Cell::new(fmt_metric(metrics.precision)),
    ]);
    table.add_row(vec![
        Cell::new("Recall"),
        Cell::new(fmt_metric(metrics.recall)),
    ]);
    table.add_row(vec![Cell::new("F1"), Cell::new(fmt_metric(metrics.f1))]);

    println!();
    for line in table.to_string().lines() {
        println!("    {}", line);
    }

    if metrics.accuracy >= 1.0 {
        println!();
        println!(
            "    {} {}",
            style("⚠").yellow().bold(),
            style("Perfect held-out accuracy: check for target leakage or a degenerate test split")
                .yellow()
        );
    }
}

fn fmt_metric(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.4}", v),
        None => "undefined".to_string(),
    }
}

fn drop_cell(count: usize) -> Cell {
    Cell::new(count).fg(if count == 0 { Color::White } else { Color::Red })
}

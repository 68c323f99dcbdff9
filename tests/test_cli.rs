//! Tests for CLI argument parsing

use clap::Parser;
use shotscope::cli::Cli;
use std::path::PathBuf;

#[test]
fn test_cli_default_values() {
    let cli = Cli::parse_from(["shotscope", "-i", "incidents.csv"]);

    assert_eq!(cli.input, PathBuf::from("incidents.csv"));
    assert_eq!(cli.seed, 42, "Default seed should be 42");
    assert_eq!(
        cli.train_fraction, 0.8,
        "Default train fraction should be 0.8"
    );
    assert!(!cli.no_charts, "Charts should render by default");
    assert!(cli.export_metrics.is_none());
    assert_eq!(
        cli.infer_schema_length, 10000,
        "Default schema inference should be 10000"
    );
}

#[test]
fn test_cli_custom_values() {
    let cli = Cli::parse_from([
        "shotscope",
        "--input",
        "data.csv",
        "--seed",
        "7",
        "--train-fraction",
        "0.7",
        "--no-charts",
        "--export-metrics",
        "out.json",
    ]);

    assert_eq!(cli.seed, 7);
    assert_eq!(cli.train_fraction, 0.7);
    assert!(cli.no_charts);
    assert_eq!(cli.export_metrics, Some(PathBuf::from("out.json")));
}

#[test]
fn test_cli_rejects_degenerate_train_fraction() {
    for fraction in ["0.0", "1.0", "1.5", "-0.2", "abc"] {
        let result = Cli::try_parse_from([
            "shotscope",
            "-i",
            "data.csv",
            "--train-fraction",
            fraction,
        ]);
        assert!(result.is_err(), "fraction '{}' should be rejected", fraction);
    }
}

#[test]
fn test_cli_requires_input() {
    assert!(Cli::try_parse_from(["shotscope"]).is_err());
}

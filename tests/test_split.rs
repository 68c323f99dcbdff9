//! Integration tests for the stratified train/test split

use std::collections::HashSet;

use shotscope::pipeline::cleaner::column_as_strings;
use shotscope::pipeline::stratified_split;

#[path = "common/mod.rs"]
mod common;

fn row_keys(df: &polars::prelude::DataFrame) -> HashSet<String> {
    let dates = column_as_strings(df.column("OCCUR_DATE").unwrap()).unwrap();
    let times = column_as_strings(df.column("OCCUR_TIME").unwrap()).unwrap();
    let boros = column_as_strings(df.column("BORO").unwrap()).unwrap();
    dates
        .iter()
        .zip(times.iter())
        .zip(boros.iter())
        .map(|((d, t), b)| {
            format!(
                "{}|{}|{}",
                d.as_deref().unwrap(),
                t.as_deref().unwrap(),
                b.as_deref().unwrap()
            )
        })
        .collect()
}

#[test]
fn test_partition_sizes_and_disjointness() {
    // 60 fatal / 140 non-fatal; the fixture makes every row unique on
    // (date, time, borough) so set membership identifies rows.
    let df = common::cleaned_frame(60, 140);
    let split = stratified_split(&df, "OUTCOME", 0.8, 42).unwrap();

    assert_eq!(split.train.height() + split.test.height(), df.height());

    let train_keys = row_keys(&split.train);
    let test_keys = row_keys(&split.test);
    assert_eq!(train_keys.len(), split.train.height(), "fixture rows must be unique");
    assert!(
        train_keys.is_disjoint(&test_keys),
        "partitions must not share rows"
    );
}

#[test]
fn test_split_is_stratified_on_outcome() {
    let df = common::cleaned_frame(60, 140);
    let split = stratified_split(&df, "OUTCOME", 0.8, 42).unwrap();

    let train_outcomes = column_as_strings(split.train.column("OUTCOME").unwrap()).unwrap();
    let fatal_in_train = train_outcomes
        .iter()
        .filter(|v| v.as_deref() == Some("Fatal"))
        .count();

    // round(60 * 0.8) fatal rows go to train; class balance is preserved.
    assert_eq!(fatal_in_train, 48);
    assert_eq!(train_outcomes.len() - fatal_in_train, 112);
}

#[test]
fn test_same_seed_reproduces_membership() {
    let df = common::cleaned_frame(60, 140);
    let first = stratified_split(&df, "OUTCOME", 0.8, 1234).unwrap();
    let second = stratified_split(&df, "OUTCOME", 0.8, 1234).unwrap();

    assert!(first.train.equals(&second.train));
    assert!(first.test.equals(&second.test));
}

#[test]
fn test_different_seeds_move_rows() {
    let df = common::cleaned_frame(60, 140);
    let first = stratified_split(&df, "OUTCOME", 0.8, 1).unwrap();
    let second = stratified_split(&df, "OUTCOME", 0.8, 2).unwrap();

    // Sizes are identical either way; membership is not.
    assert_eq!(first.train.height(), second.train.height());
    assert_ne!(row_keys(&first.train), row_keys(&second.train));
}

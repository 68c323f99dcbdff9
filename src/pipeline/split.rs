//! Seeded stratified train/test partitioning
//!
//! The split is the single source of nondeterminism in the pipeline, so the
//! seed is an explicit parameter threaded down from the CLI. No global
//! generator state is touched: the same seed and the same cleaned frame
//! reproduce the same partition membership bit for bit.

use anyhow::{Context, Result};
use polars::prelude::*;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::collections::BTreeMap;

use super::cleaner::column_as_strings;

/// Disjoint train/test partitions of a cleaned frame.
#[derive(Debug)]
pub struct SplitFrames {
    pub train: DataFrame,
    pub test: DataFrame,
}

/// Partition `df` into train/test subsets, stratified on `label_column`.
///
/// Each label class contributes `round(class_size * train_fraction)` rows to
/// the training set. Rows keep their input order inside each partition;
/// the two partitions are disjoint and their union is the input frame.
pub fn stratified_split(
    df: &DataFrame,
    label_column: &str,
    train_fraction: f64,
    seed: u64,
) -> Result<SplitFrames> {
    if df.height() == 0 {
        anyhow::bail!("Cannot split an empty frame");
    }
    if !(train_fraction > 0.0 && train_fraction < 1.0) {
        anyhow::bail!(
            "Train fraction must be strictly between 0 and 1, got {}",
            train_fraction
        );
    }

    let labels = column_as_strings(
        df.column(label_column)
            .with_context(|| format!("Label column '{}' not found", label_column))?,
    )?;

    // BTreeMap keeps class iteration order independent of hash state.
    let mut classes: BTreeMap<String, Vec<IdxSize>> = BTreeMap::new();
    for (row, label) in labels.iter().enumerate() {
        let label = label
            .clone()
            .ok_or_else(|| anyhow::anyhow!("Null label at row {} in '{}'", row, label_column))?;
        classes.entry(label).or_default().push(row as IdxSize);
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut train_idx: Vec<IdxSize> = Vec::new();
    let mut test_idx: Vec<IdxSize> = Vec::new();

    for indices in classes.values() {
        let mut pool = indices.clone();
        pool.shuffle(&mut rng);
        let take = ((pool.len() as f64) * train_fraction).round() as usize;
        let take = take.min(pool.len());
        train_idx.extend_from_slice(&pool[..take]);
        test_idx.extend_from_slice(&pool[take..]);
    }

    // Restore input order inside each partition; the shuffle only decides
    // membership.
    train_idx.sort_unstable();
    test_idx.sort_unstable();

    let train = df
        .take(&IdxCa::from_vec("idx".into(), train_idx))
        .context("Failed to materialize training partition")?;
    let test = df
        .take(&IdxCa::from_vec("idx".into(), test_idx))
        .context("Failed to materialize test partition")?;

    Ok(SplitFrames { train, test })
}

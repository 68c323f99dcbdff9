//! Feature encoding and the fatal-outcome logistic regression
//!
//! The model is fit against the six declared predictor features only:
//! borough, occurrence date, occurrence time and the victim demographics.
//! Categoricals are one-hot encoded; the two numeric features are z-scored
//! so the solver works on comparable magnitudes. The encoder vocabulary is
//! built once from the full cleaned frame so train and test encode
//! identically.

use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveTime, Timelike};
use polars::prelude::*;
use smartcore::linalg::basic::arrays::Array;
use smartcore::linalg::basic::matrix::DenseMatrix;
use smartcore::linear::logistic_regression::{LogisticRegression, LogisticRegressionParameters};
use std::str::FromStr;
use thiserror::Error;

use super::cleaner::column_as_strings;
use super::schema::{Outcome, AGE_BUCKETS, BORO, OCCUR_DATE, OCCUR_TIME, OUTCOME, VIC_AGE_GROUP,
    VIC_RACE, VIC_SEX};

const EPOCH: &str = "1970-01-01";

/// Modeling failures the caller must be able to distinguish from generic
/// frame errors. None of these are silent: each aborts with a diagnostic.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("Training set is empty after cleaning and splitting")]
    EmptyTrainingSet,
    #[error("Training labels contain a single class; a binary fit needs both outcomes")]
    SingleClass,
    #[error("Logistic regression solver failed: {0}")]
    Solver(String),
}

/// One-hot vocabulary and numeric standardization stats for the six
/// predictor features.
#[derive(Debug, Clone)]
pub struct FeatureEncoder {
    /// (column, category values) pairs; one output column per category.
    categories: Vec<(String, Vec<String>)>,
    date_mean: f64,
    date_std: f64,
    time_mean: f64,
    time_std: f64,
}

/// A frame encoded into model space.
#[derive(Debug, Clone)]
pub struct EncodedSet {
    /// Row-major feature matrix, one inner vec per incident.
    pub rows: Vec<Vec<f64>>,
    /// Outcome labels, Fatal = 1.
    pub labels: Vec<i32>,
}

impl EncodedSet {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn to_matrix(&self, n_features: usize) -> DenseMatrix<f64> {
        let flat: Vec<f64> = self.rows.iter().flatten().copied().collect();
        DenseMatrix::new(self.rows.len(), n_features, flat, false)
    }
}

impl FeatureEncoder {
    /// Build the encoder from the full cleaned frame.
    ///
    /// Victim age groups use the fixed bucket order; the other categoricals
    /// use their sorted observed values.
    pub fn fit(df: &DataFrame) -> Result<Self> {
        let mut categories = Vec::with_capacity(4);
        categories.push((BORO.to_string(), observed_categories(df, BORO)?));
        categories.push((
            VIC_AGE_GROUP.to_string(),
            AGE_BUCKETS.iter().map(|s| s.to_string()).collect(),
        ));
        categories.push((VIC_SEX.to_string(), observed_categories(df, VIC_SEX)?));
        categories.push((VIC_RACE.to_string(), observed_categories(df, VIC_RACE)?));

        let dates = numeric_dates(df)?;
        let times = numeric_times(df)?;
        let (date_mean, date_std) = mean_std(&dates);
        let (time_mean, time_std) = mean_std(&times);

        Ok(Self {
            categories,
            date_mean,
            date_std,
            time_mean,
            time_std,
        })
    }

    /// Names of the encoded feature columns, in matrix order.
    pub fn feature_names(&self) -> Vec<String> {
        let mut names = vec![OCCUR_DATE.to_string(), OCCUR_TIME.to_string()];
        for (column, values) in &self.categories {
            for value in values {
                names.push(format!("{}={}", column, value));
            }
        }
        names
    }

    pub fn n_features(&self) -> usize {
        2 + self
            .categories
            .iter()
            .map(|(_, values)| values.len())
            .sum::<usize>()
    }

    /// Encode a cleaned frame (or a partition of one) into model space.
    /// A category outside the vocabulary encodes to the zero vector.
    pub fn encode(&self, df: &DataFrame) -> Result<EncodedSet> {
        let height = df.height();
        let dates = numeric_dates(df)?;
        let times = numeric_times(df)?;

        let mut categorical: Vec<Vec<Option<String>>> = Vec::with_capacity(self.categories.len());
        for (column, _) in &self.categories {
            categorical.push(column_as_strings(
                df.column(column)
                    .with_context(|| format!("Column '{}' not found", column))?,
            )?);
        }

        let outcomes = column_as_strings(
            df.column(OUTCOME)
                .with_context(|| format!("Column '{}' not found", OUTCOME))?,
        )?;

        let mut rows = Vec::with_capacity(height);
        let mut labels = Vec::with_capacity(height);
        for row in 0..height {
            let mut features = Vec::with_capacity(self.n_features());
            features.push(standardize(dates[row], self.date_mean, self.date_std));
            features.push(standardize(times[row], self.time_mean, self.time_std));
            for ((_, values), column) in self.categories.iter().zip(&categorical) {
                let observed = column[row].as_deref();
                for value in values {
                    let hit = observed == Some(value.as_str());
                    features.push(if hit { 1.0 } else { 0.0 });
                }
            }
            rows.push(features);

            let outcome = outcomes[row]
                .as_deref()
                .ok_or_else(|| anyhow::anyhow!("Null outcome at row {}", row))?;
            let outcome = Outcome::from_str(outcome).map_err(anyhow::Error::msg)?;
            labels.push(outcome.label());
        }

        Ok(EncodedSet { rows, labels })
    }
}

/// A fitted binary logistic regression over the encoded feature space.
///
/// The coefficients are extracted from the smartcore fit so prediction can
/// report a probability, not just a hard label.
#[derive(Debug, Clone)]
pub struct OutcomeModel {
    weights: Vec<f64>,
    intercept: f64,
    pub feature_names: Vec<String>,
    pub n_train: usize,
}

/// Fit the logistic regression on an encoded training set.
pub fn train_outcome_model(train: &EncodedSet, encoder: &FeatureEncoder) -> Result<OutcomeModel> {
    if train.is_empty() {
        return Err(ModelError::EmptyTrainingSet.into());
    }
    let has_fatal = train.labels.iter().any(|&y| y == 1);
    let has_non_fatal = train.labels.iter().any(|&y| y == 0);
    if !(has_fatal && has_non_fatal) {
        return Err(ModelError::SingleClass.into());
    }

    let n_features = encoder.n_features();
    let x = train.to_matrix(n_features);
    let y = train.labels.clone();

    let params = LogisticRegressionParameters::default();
    let model = LogisticRegression::fit(&x, &y, params)
        .map_err(|e| ModelError::Solver(e.to_string()))?;

    let coefficients = model.coefficients();
    let weights: Vec<f64> = (0..n_features).map(|j| *coefficients.get((0, j))).collect();
    let intercept = *model.intercept().get((0, 0));

    Ok(OutcomeModel {
        weights,
        intercept,
        feature_names: encoder.feature_names(),
        n_train: train.len(),
    })
}

impl OutcomeModel {
    /// P(outcome = Fatal) for each encoded row.
    pub fn predict_proba(&self, rows: &[Vec<f64>]) -> Vec<f64> {
        rows.iter()
            .map(|row| {
                let z: f64 = row
                    .iter()
                    .zip(&self.weights)
                    .map(|(x, w)| x * w)
                    .sum::<f64>()
                    + self.intercept;
                sigmoid(z)
            })
            .collect()
    }

    /// Hard labels from thresholding the probability at 0.5.
    pub fn predict(&self, rows: &[Vec<f64>]) -> Vec<i32> {
        self.predict_proba(rows)
            .into_iter()
            .map(|p| if p >= 0.5 { 1 } else { 0 })
            .collect()
    }

    pub fn n_features(&self) -> usize {
        self.weights.len()
    }
}

/// Numerically stable sigmoid.
fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        let e = (-z).exp();
        1.0 / (1.0 + e)
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

fn standardize(value: f64, mean: f64, std: f64) -> f64 {
    if std > 0.0 {
        (value - mean) / std
    } else {
        0.0
    }
}

fn mean_std(values: &[f64]) -> (f64, f64) {
    if values.is_empty() {
        return (0.0, 0.0);
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    (mean, variance.sqrt())
}

fn observed_categories(df: &DataFrame, column: &str) -> Result<Vec<String>> {
    let values = column_as_strings(
        df.column(column)
            .with_context(|| format!("Column '{}' not found", column))?,
    )?;
    let mut unique: Vec<String> = values.into_iter().flatten().collect();
    unique.sort();
    unique.dedup();
    Ok(unique)
}

/// Cleaned ISO dates as days since the Unix epoch.
fn numeric_dates(df: &DataFrame) -> Result<Vec<f64>> {
    let epoch = NaiveDate::parse_from_str(EPOCH, "%Y-%m-%d").expect("epoch literal is valid");
    let values = column_as_strings(
        df.column(OCCUR_DATE)
            .with_context(|| format!("Column '{}' not found", OCCUR_DATE))?,
    )?;
    values
        .into_iter()
        .enumerate()
        .map(|(row, value)| {
            let value =
                value.ok_or_else(|| anyhow::anyhow!("Null occurrence date at row {}", row))?;
            let date = NaiveDate::parse_from_str(&value, "%Y-%m-%d")
                .with_context(|| format!("Invalid cleaned date '{}' at row {}", value, row))?;
            Ok((date - epoch).num_days() as f64)
        })
        .collect()
}

/// Cleaned times as seconds since midnight.
fn numeric_times(df: &DataFrame) -> Result<Vec<f64>> {
    let values = column_as_strings(
        df.column(OCCUR_TIME)
            .with_context(|| format!("Column '{}' not found", OCCUR_TIME))?,
    )?;
    values
        .into_iter()
        .enumerate()
        .map(|(row, value)| {
            let value =
                value.ok_or_else(|| anyhow::anyhow!("Null occurrence time at row {}", row))?;
            let time = NaiveTime::parse_from_str(&value, "%H:%M:%S")
                .with_context(|| format!("Invalid cleaned time '{}' at row {}", value, row))?;
            Ok(time.num_seconds_from_midnight() as f64)
        })
        .collect()
}

//! Evaluation metrics for the binary outcome classifier
//!
//! Precision, recall and F1 are undefined when their denominator is zero;
//! they are reported as `None` rather than a crash or a fabricated 0.0.

use anyhow::Result;
use serde::Serialize;

/// 2x2 table of predicted vs. actual labels (positive = Fatal = 1).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ConfusionMatrix {
    pub true_positive: usize,
    pub false_positive: usize,
    pub false_negative: usize,
    pub true_negative: usize,
}

impl ConfusionMatrix {
    pub fn from_labels(actual: &[i32], predicted: &[i32]) -> Self {
        let mut matrix = ConfusionMatrix::default();
        for (&truth, &guess) in actual.iter().zip(predicted.iter()) {
            match (guess, truth) {
                (1, 1) => matrix.true_positive += 1,
                (1, 0) => matrix.false_positive += 1,
                (0, 1) => matrix.false_negative += 1,
                _ => matrix.true_negative += 1,
            }
        }
        matrix
    }

    /// Cell sum; equals the number of scored rows.
    pub fn total(&self) -> usize {
        self.true_positive + self.false_positive + self.false_negative + self.true_negative
    }
}

/// Scalar evaluation results for a single train/test pass.
#[derive(Debug, Clone, Serialize)]
pub struct EvalMetrics {
    pub confusion: ConfusionMatrix,
    pub accuracy: f64,
    /// TP / (TP + FP); `None` when nothing was predicted positive.
    pub precision: Option<f64>,
    /// TP / (TP + FN); `None` when no actual positives exist.
    pub recall: Option<f64>,
    /// Harmonic mean of precision and recall; `None` when either is
    /// undefined or both are zero.
    pub f1: Option<f64>,
}

/// Score predictions against actual labels.
///
/// Errors only on malformed input (length mismatch, empty test set); an
/// undefined metric is a `None` value, never a failure.
pub fn evaluate(actual: &[i32], predicted: &[i32]) -> Result<EvalMetrics> {
    if actual.len() != predicted.len() {
        anyhow::bail!(
            "Label length mismatch: {} actual vs {} predicted",
            actual.len(),
            predicted.len()
        );
    }
    if actual.is_empty() {
        anyhow::bail!("Cannot evaluate an empty test set");
    }

    let confusion = ConfusionMatrix::from_labels(actual, predicted);
    let total = confusion.total() as f64;

    let correct = (confusion.true_positive + confusion.true_negative) as f64;
    let accuracy = correct / total;

    let precision = ratio(
        confusion.true_positive,
        confusion.true_positive + confusion.false_positive,
    );
    let recall = ratio(
        confusion.true_positive,
        confusion.true_positive + confusion.false_negative,
    );
    let f1 = match (precision, recall) {
        (Some(p), Some(r)) if p + r > 0.0 => Some(2.0 * p * r / (p + r)),
        _ => None,
    };

    Ok(EvalMetrics {
        confusion,
        accuracy,
        precision,
        recall,
        f1,
    })
}

fn ratio(numerator: usize, denominator: usize) -> Option<f64> {
    if denominator == 0 {
        None
    } else {
        Some(numerator as f64 / denominator as f64)
    }
}

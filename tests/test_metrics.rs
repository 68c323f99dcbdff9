//! Integration tests for evaluation metrics and their JSON form

use shotscope::pipeline::{evaluate, ConfusionMatrix};

#[test]
fn test_perfect_predictions() {
    // TP=5, everything else zero.
    let actual = vec![1, 1, 1, 1, 1];
    let predicted = vec![1, 1, 1, 1, 1];
    let metrics = evaluate(&actual, &predicted).unwrap();

    assert_eq!(
        metrics.confusion,
        ConfusionMatrix {
            true_positive: 5,
            false_positive: 0,
            false_negative: 0,
            true_negative: 0,
        }
    );
    assert_eq!(metrics.accuracy, 1.0);
    assert_eq!(metrics.precision, Some(1.0));
    assert_eq!(metrics.recall, Some(1.0));
    assert_eq!(metrics.f1, Some(1.0));
}

#[test]
fn test_undefined_metrics_do_not_panic() {
    // No predicted positives: precision and F1 are undefined.
    let metrics = evaluate(&[1, 1, 0, 0], &[0, 0, 0, 0]).unwrap();
    assert_eq!(metrics.precision, None);
    assert_eq!(metrics.f1, None);

    // No actual positives: recall is undefined.
    let metrics = evaluate(&[0, 0, 0, 0], &[0, 1, 0, 0]).unwrap();
    assert_eq!(metrics.recall, None);
}

#[test]
fn test_confusion_cells_sum_to_test_size() {
    let actual = vec![1, 0, 1, 0, 1, 1, 0, 0];
    let predicted = vec![1, 1, 0, 0, 1, 0, 0, 1];
    let metrics = evaluate(&actual, &predicted).unwrap();
    assert_eq!(metrics.confusion.total(), actual.len());
}

#[test]
fn test_undefined_metrics_serialize_as_null() {
    let metrics = evaluate(&[1, 1, 0, 0], &[0, 0, 0, 0]).unwrap();
    let json = serde_json::to_value(&metrics).unwrap();

    assert!(json["precision"].is_null());
    assert!(json["f1"].is_null());
    assert_eq!(json["recall"], serde_json::json!(0.0));
    assert_eq!(json["confusion"]["false_negative"], serde_json::json!(2));
}

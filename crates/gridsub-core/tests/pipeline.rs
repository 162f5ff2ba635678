//! End-to-end aggregation and padding through the JSON interchange form.

use gridsub_core::{Submission, SubmissionBuilder, normalize};
use serde_json::json;

fn aggregate(records: &[(&str, &str)]) -> Submission {
    let mut builder = SubmissionBuilder::new();
    for (identifier, raw_attempts) in records {
        builder.ingest(identifier, raw_attempts).unwrap();
    }
    builder.finalize().unwrap()
}

#[test]
fn test_aggregate_then_pad() {
    let submission = aggregate(&[("p1_0", "|12|34|"), ("p1_1", "|56|78| |91|23|")]);
    assert_eq!(
        serde_json::to_value(&submission).unwrap(),
        json!({
            "p1": [
                {"attempt_1": [[1, 2], [3, 4]]},
                {"attempt_1": [[5, 6], [7, 8]], "attempt_2": [[9, 1], [2, 3]]},
            ]
        })
    );

    let padded = normalize(&submission).unwrap();
    assert_eq!(
        serde_json::to_value(&padded).unwrap(),
        json!({
            "p1": [
                {
                    "attempt_1": [[1, 2], [3, 4]],
                    "attempt_2": [[1, 2], [3, 4]],
                    "attempt_3": [[1, 2], [3, 4]],
                    "attempt_4": [[1, 2], [3, 4]],
                },
                {
                    "attempt_1": [[5, 6], [7, 8]],
                    "attempt_2": [[9, 1], [2, 3]],
                    "attempt_3": [[5, 6], [7, 8]],
                    "attempt_4": [[5, 6], [7, 8]],
                },
            ]
        })
    );
}

#[test]
fn test_output_is_reproducible() {
    let records = [
        ("b_1", "|2|"),
        ("a", "|0| |1|"),
        ("b_0", "|1|"),
        ("c_0", "|33|33|"),
    ];
    let first = serde_json::to_string(&aggregate(&records)).unwrap();
    let second = serde_json::to_string(&aggregate(&records)).unwrap();
    assert_eq!(first, second);
    assert_eq!(
        first,
        r#"{"a":[{"attempt_1":[[0]],"attempt_2":[[1]]}],"b":[{"attempt_1":[[1]]},{"attempt_1":[[2]]}],"c":[{"attempt_1":[[3,3],[3,3]]}]}"#
    );
}

#[test]
fn test_pad_loaded_submission() {
    // Attempt keys out of order in storage are accepted and re-keyed.
    let stored = r#"{"z": [{"attempt_2": [[2]], "attempt_1": [[1]]}], "y": [{"attempt_1": [[7, 7]]}]}"#;
    let submission: Submission = serde_json::from_str(stored).unwrap();
    let padded = normalize(&submission).unwrap();
    assert_eq!(
        serde_json::to_string(&padded).unwrap(),
        concat!(
            r#"{"y":[{"attempt_1":[[7,7]],"attempt_2":[[7,7]],"attempt_3":[[7,7]],"attempt_4":[[7,7]]}],"#,
            r#""z":[{"attempt_1":[[1]],"attempt_2":[[2]],"attempt_3":[[1]],"attempt_4":[[1]]}]}"#,
        )
    );

    let again: Submission = serde_json::from_str(&serde_json::to_string(&padded).unwrap()).unwrap();
    assert_eq!(normalize(&again).unwrap(), padded);
}

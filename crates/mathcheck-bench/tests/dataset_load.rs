use std::fs;
use std::path::PathBuf;

use mathcheck_bench::load_dataset;
use mathcheck_core::MathcheckError;

fn fixture_path(relative: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join(relative)
}

#[test]
fn aliases_and_numeric_answers_are_accepted() -> Result<(), MathcheckError> {
    let records = load_dataset(&fixture_path("fixtures/smoke.jsonl"), None)?;
    assert_eq!(records.len(), 5);
    assert_eq!(records[0].problem, "Solve 2x = 10.");
    assert_eq!(records[0].ground_truth, "5");
    assert!(records[0].steps.is_none());
    assert_eq!(records[2].ground_truth, "7");
    assert_eq!(records[2].steps.as_ref().map(Vec::len), Some(3));
    Ok(())
}

#[test]
fn limit_caps_the_record_count() -> Result<(), MathcheckError> {
    let records = load_dataset(&fixture_path("fixtures/smoke.jsonl"), Some(2))?;
    assert_eq!(records.len(), 2);
    assert_eq!(records[1].ground_truth, "x = 3");
    Ok(())
}

#[test]
fn malformed_lines_report_their_position() {
    let temp = tempfile::tempdir().expect("tmp dir");
    let path = temp.path().join("broken.jsonl");
    fs::write(&path, "{\"question\": \"q\", \"answer\": \"1\"}\n{not json}\n").expect("write");
    let err = load_dataset(&path, None).unwrap_err();
    match err {
        MathcheckError::Serde(info) => {
            assert_eq!(info.code, "dataset_record");
            assert_eq!(info.context.get("line").map(String::as_str), Some("2"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn missing_dataset_is_an_io_error() {
    let temp = tempfile::tempdir().expect("tmp dir");
    let err = load_dataset(&temp.path().join("absent.jsonl"), None).unwrap_err();
    assert!(matches!(err, MathcheckError::Io(_)));
}

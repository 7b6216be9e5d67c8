mod common;

use common::{Workspace, TWO_PATH_TEXT};
use pathflow::api::load_problem;
use pathflow::error::PathflowError;
use pathflow::problem::loader::{parse_path_record, parse_text};

#[test]
fn loads_text_problem() {
    let ws = Workspace::new();
    let file = ws.write("problem.txt", TWO_PATH_TEXT);
    let problem = load_problem(&file, 16).unwrap();

    assert_eq!(problem.path_count(), 2);
    assert_eq!(problem.budget(), 100);
    assert_eq!(problem.percentile(), 95);
    assert_eq!(problem.paths()[1].throughput, 25.0);
    assert_eq!(problem.paths()[1].loss, 0.02);
}

#[test]
fn loads_json_problem() {
    let ws = Workspace::new();
    let file = ws.write(
        "problem.json",
        r#"{"budget": 100, "success_probability": 0.95, "paths": [
            {"throughput": 50, "latency": 0.1, "loss": 0.01, "queue_depth": 0},
            {"throughput": 25, "latency": 0.2, "loss": 0.02}
        ]}"#,
    );
    let problem = load_problem(&file, 16).unwrap();

    assert_eq!(problem.path_count(), 2);
    assert_eq!(problem.paths()[1].queue_depth, 0);
}

#[test]
fn json_rejects_unphysical_paths() {
    let ws = Workspace::new();
    let file = ws.write(
        "bad.json",
        r#"{"budget": 100, "success_probability": 0.95, "paths": [
            {"throughput": 50, "loss": 1.5}
        ]}"#,
    );
    let err = load_problem(&file, 16).unwrap_err();
    assert!(matches!(err, PathflowError::InvalidPath { index: 0, .. }));
}

#[test]
fn missing_file_is_io_error() {
    let ws = Workspace::new();
    let err = load_problem(ws.missing("nope.txt"), 16).unwrap_err();
    assert!(matches!(err, PathflowError::Io(_)));
}

#[test]
fn headers_are_clamped() {
    let text = "N: 40\nK: 5\nPs: 1.7\n".to_string() + &"10 0 0 0\n".repeat(20);
    let problem = parse_text(&text, 16).unwrap();

    assert_eq!(problem.path_count(), 16);
    assert_eq!(problem.budget(), 10);
    assert_eq!(problem.success_probability(), 0.99);

    let low = parse_text("N: -3\nK: 5000\nPs: 0\n", 16).unwrap();
    assert_eq!(low.path_count(), 0);
    assert_eq!(low.budget(), 1000);
    assert_eq!(low.success_probability(), 0.01);
}

#[test]
fn too_few_records() {
    let err = parse_text("N: 3\nK: 100\nPs: 0.9\n10 0 0 0\n", 16).unwrap_err();
    assert!(matches!(
        err,
        PathflowError::MissingPaths {
            expected: 3,
            found: 1
        }
    ));
}

#[test]
fn malformed_record_ends_reading() {
    let text = "N: 2\nK: 100\nPs: 0.9\n10 0 0 0\n10 zero 0 0\n20 0 0 0\n";
    let err = parse_text(text, 16).unwrap_err();
    assert!(matches!(err, PathflowError::MissingPaths { found: 1, .. }));
}

#[test]
fn blank_lines_and_trailing_records_are_ignored() {
    let text = "\nN: 1\n\nK: 100\nPs: 0.5\n\n10 0 0 0\n99 9 9 9 9\n";
    let problem = parse_text(text, 16).unwrap();
    assert_eq!(problem.path_count(), 1);
    assert_eq!(problem.percentile(), 50);
}

#[test]
fn missing_header_is_parse_error() {
    let err = parse_text("K: 100\nPs: 0.9\n", 16).unwrap_err();
    assert!(matches!(err, PathflowError::Parse { .. }));
}

#[test]
fn unphysical_records_are_rejected() {
    assert!(parse_path_record("50 0.1 0.01 3").is_ok());
    assert!(parse_path_record("0 0.1 0.01 0").is_err());
    assert!(parse_path_record("50 -1 0.01 0").is_err());
    assert!(parse_path_record("50 0.1 1.0 0").is_err());
}

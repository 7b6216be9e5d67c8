mod common;

use common::{Workspace, TWO_PATH_TEXT};
use regex::Regex;
use std::process::{Command, Output};

fn pathflow(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_pathflow"))
        .args(args)
        .output()
        .expect("Failed to execute binary")
}

/// Pulls `(allocation, time)` pairs out of the table rows.
fn scrape_rows(stdout: &str) -> Vec<(u64, f64)> {
    let row = Regex::new(r"\|\s*m\[\d+\]\s*\|\s*(\d+)\s*\|.*\|\s*([\d.]+)\s*\|\s*$").unwrap();
    stdout
        .lines()
        .filter_map(|line| row.captures(line))
        .map(|c| (c[1].parse().unwrap(), c[2].parse().unwrap()))
        .collect()
}

#[test]
fn plan_prints_report() {
    let ws = Workspace::new();
    let problem = ws.write("problem.txt", TWO_PATH_TEXT);
    let out = pathflow(&[
        "plan",
        "--problem",
        problem.to_str().unwrap(),
        "--seed",
        "42",
        "--max-iterations",
        "100000",
    ]);

    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("N: 2, K: 100, Ps: 0.95"), "{}", stdout);
    assert!(stdout.contains("Estimated transfer time:"));

    let rows = scrape_rows(&stdout);
    assert_eq!(rows.len(), 2, "{}", stdout);
    assert_eq!(rows[0].0 + rows[1].0, 100);
    assert!(rows[0].0 > rows[1].0);
}

#[test]
fn exact_emits_json() {
    let ws = Workspace::new();
    let problem = ws.write("problem.txt", TWO_PATH_TEXT);
    let out = pathflow(&["exact", "-p", problem.to_str().unwrap(), "--format", "json"]);

    assert!(out.status.success());
    let plan: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(plan["total_allocation"], 100);
    assert_eq!(plan["source"]["kind"], "linear");
    assert_eq!(plan["paths"].as_array().map(Vec::len), Some(2));
}

#[test]
fn evaluate_emits_csv() {
    let ws = Workspace::new();
    let problem = ws.write("problem.txt", TWO_PATH_TEXT);
    let out = pathflow(&[
        "evaluate",
        "-p",
        problem.to_str().unwrap(),
        "--allocation",
        "69,31",
        "--format",
        "csv",
    ]);

    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[1].contains(",69,72,3,"), "{}", lines[1]);
}

#[test]
fn config_file_is_overridden_by_flags() {
    let ws = Workspace::new();
    let problem = ws.write("problem.txt", TWO_PATH_TEXT);
    // An invalid crossover rate in the file is fixed on the command line.
    let config = ws.write("config.json", r#"{"search": {"crossover_rate": 7.0}}"#);

    let failing = pathflow(&[
        "plan",
        "-p",
        problem.to_str().unwrap(),
        "-c",
        config.to_str().unwrap(),
    ]);
    assert!(!failing.status.success());

    let fixed = pathflow(&[
        "plan",
        "-p",
        problem.to_str().unwrap(),
        "-c",
        config.to_str().unwrap(),
        "--crossover-rate",
        "0.9",
        "--max-iterations",
        "20000",
        "--seed",
        "1",
    ]);
    assert!(fixed.status.success());
}

#[test]
fn missing_problem_file_fails() {
    let ws = Workspace::new();
    let out = pathflow(&["plan", "-p", ws.missing("absent.txt").to_str().unwrap()]);
    assert!(!out.status.success());
    assert!(out.stdout.is_empty());
}

#[test]
fn too_few_records_fail() {
    let ws = Workspace::new();
    let problem = ws.write("short.txt", "N: 3\nK: 100\nPs: 0.95\n50 0.1 0.01 0\n");
    let out = pathflow(&["exact", "-p", problem.to_str().unwrap()]);
    assert!(!out.status.success());
    assert!(out.stdout.is_empty());
}

#[test]
fn zero_paths_print_an_empty_report() {
    let ws = Workspace::new();
    let problem = ws.write("empty.txt", "N: 0\nK: 100\nPs: 0.95\n");

    for command in ["plan", "exact"] {
        let out = pathflow(&[command, "-p", problem.to_str().unwrap()]);
        assert!(out.status.success(), "{}", command);
        let stdout = String::from_utf8_lossy(&out.stdout);
        assert!(stdout.contains("N: 0, K: 100, Ps: 0.95"), "{}", stdout);
        assert!(stdout.contains("Estimated transfer time: 0.0000"), "{}", stdout);
        assert!(scrape_rows(&stdout).is_empty());
    }
}

#[test]
fn evaluate_rejects_oversized_entries() {
    let ws = Workspace::new();
    let problem = ws.write("problem.txt", TWO_PATH_TEXT);
    let out = pathflow(&[
        "evaluate",
        "-p",
        problem.to_str().unwrap(),
        "--allocation",
        "9007199254740993,0",
    ]);
    assert!(!out.status.success());
    assert!(out.stdout.is_empty());
}

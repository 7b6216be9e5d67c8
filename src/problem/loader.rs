use super::{clamp_path_count, Path, Problem};
use crate::error::{PathflowError, PfResult};
use serde::Deserialize;
use std::fmt::Display;
use std::fs;
use std::str::FromStr;
use tracing::{debug, info, warn};

/// On-disk shape of a JSON problem description.
#[derive(Debug, Deserialize)]
struct ProblemFile {
    budget: i64,
    success_probability: f64,
    paths: Vec<Path>,
}

/// Loads a problem description, picking the format from the file extension.
pub fn load_problem<P: AsRef<std::path::Path>>(path: P, max_paths: usize) -> PfResult<Problem> {
    let path = path.as_ref();
    info!("📂 Loading problem from: {}", path.display());

    let content = fs::read_to_string(path)?;
    let is_json = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let problem = if is_json {
        parse_json(&content, max_paths)?
    } else {
        parse_text(&content, max_paths)?
    };

    debug!(
        "   -> {} paths, budget {}, success {:.2}",
        problem.path_count(),
        problem.budget(),
        problem.success_probability()
    );
    Ok(problem)
}

/// Parses the line-oriented format:
///
/// ```text
/// N: 2
/// K: 100
/// Ps: 0.95
/// 50 0.1 0.01 0
/// 25 0.2 0.02 0
/// ```
pub fn parse_text(content: &str, max_paths: usize) -> PfResult<Problem> {
    let mut lines = content
        .lines()
        .enumerate()
        .map(|(i, l)| (i + 1, l.trim()))
        .filter(|(_, l)| !l.is_empty());

    let n_raw: i64 = parse_header(lines.next(), "N")?;
    let k_raw: i64 = parse_header(lines.next(), "K")?;
    let ps_raw: f64 = parse_header(lines.next(), "Ps")?;

    let expected = clamp_path_count(n_raw, max_paths);
    let mut paths = Vec::with_capacity(expected);

    for (line_no, line) in lines {
        if paths.len() == expected {
            break;
        }
        match parse_path_record(line) {
            Ok(path) => paths.push(path),
            Err(reason) => {
                warn!("Line {}: malformed path record ({})", line_no, reason);
                break;
            }
        }
    }

    if paths.len() < expected {
        return Err(PathflowError::MissingPaths {
            expected,
            found: paths.len(),
        });
    }

    Ok(Problem::clamped(paths, k_raw, ps_raw, max_paths))
}

pub fn parse_json(content: &str, max_paths: usize) -> PfResult<Problem> {
    let file: ProblemFile = serde_json::from_str(content)?;

    for (index, path) in file.paths.iter().enumerate() {
        path.validate()
            .map_err(|reason| PathflowError::InvalidPath { index, reason })?;
    }

    Ok(Problem::clamped(
        file.paths,
        file.budget,
        file.success_probability,
        max_paths,
    ))
}

/// `<throughput> <latency> <loss> <queue_depth>`
pub fn parse_path_record(line: &str) -> Result<Path, String> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() != 4 {
        return Err(format!("expected 4 fields, found {}", fields.len()));
    }

    let path = Path {
        throughput: parse_field(fields[0], "throughput")?,
        latency: parse_field(fields[1], "latency")?,
        loss: parse_field(fields[2], "loss")?,
        queue_depth: parse_field(fields[3], "queue_depth")?,
    };
    path.validate()?;
    Ok(path)
}

fn parse_field<T: FromStr>(raw: &str, name: &str) -> Result<T, String> {
    raw.parse()
        .map_err(|_| format!("invalid {} '{}'", name, raw))
}

fn parse_header<T>(entry: Option<(usize, &str)>, key: &str) -> PfResult<T>
where
    T: FromStr,
    T::Err: Display,
{
    let (line, text) = entry.ok_or_else(|| PathflowError::Parse {
        line: 0,
        message: format!("missing '{}:' header", key),
    })?;

    let value = text
        .strip_prefix(key)
        .and_then(|rest| rest.trim_start().strip_prefix(':'))
        .ok_or_else(|| PathflowError::Parse {
            line,
            message: format!("expected '{}: <value>', found '{}'", key, text),
        })?;

    value.trim().parse().map_err(|e: T::Err| PathflowError::Parse {
        line,
        message: format!("invalid {} value '{}': {}", key, value.trim(), e),
    })
}

#![allow(dead_code)] // Not every test binary uses every helper

use pathflow::config::Config;
use pathflow::problem::{Path, Problem};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Shorthand for a path with no queue.
pub fn path(throughput: f64, latency: f64, loss: f64) -> Path {
    Path::builder()
        .throughput(throughput)
        .latency(latency)
        .loss(loss)
        .build()
}

/// Two-path reference problem: a fast clean link and a slower lossier one.
pub fn two_path_problem() -> Problem {
    Problem::clamped(
        vec![path(50.0, 0.1, 0.01), path(25.0, 0.2, 0.02)],
        100,
        0.95,
        16,
    )
}

pub const TWO_PATH_TEXT: &str = "N: 2\nK: 100\nPs: 0.95\n50 0.1 0.01 0\n25 0.2 0.02 0\n";

/// Search settings small enough for a test run.
pub fn quick_config() -> Config {
    let mut config = Config::default();
    config.search.max_iterations = 200_000;
    config.search.plateau_fraction = 0.1;
    config.search.report_every = 10_000;
    config
}

/// Scratch directory holding problem files.
pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("Failed to create temp dir"),
        }
    }

    pub fn write(&self, name: &str, content: &str) -> PathBuf {
        let file = self.dir.path().join(name);
        fs::write(&file, content).expect("Failed to write fixture");
        file
    }

    pub fn missing(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }
}

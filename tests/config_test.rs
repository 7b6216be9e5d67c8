mod common;

use common::Workspace;
use pathflow::config::{Config, EngineKind};
use pathflow::error::PathflowError;

#[test]
fn defaults_are_valid() {
    let config = Config::default();
    assert!(config.validate().is_ok());
    assert_eq!(config.search.engine, EngineKind::Differential);
    assert_eq!(config.search.max_iterations, 1_000_000);
    assert_eq!(config.search.penalty, 1000.0);
    assert_eq!(config.limits.max_paths, 16);
    assert_eq!(config.patience(), 100_000);
}

#[test]
fn partial_json_keeps_defaults() {
    let ws = Workspace::new();
    let file = ws.write(
        "config.json",
        r#"{"search": {"engine": "anneal", "max_iterations": 5000}}"#,
    );
    let config = Config::load_from_file(&file).unwrap();

    assert_eq!(config.search.engine, EngineKind::Anneal);
    assert_eq!(config.search.max_iterations, 5000);
    assert_eq!(config.search.mutation_factor, 0.5);
    assert_eq!(config.limits.max_paths, 16);
}

#[test]
fn rejects_nonsense() {
    let mut config = Config::default();
    config.search.crossover_rate = 1.5;
    assert!(matches!(config.validate(), Err(PathflowError::Config(_))));

    let mut config = Config::default();
    config.search.plateau_fraction = 0.0;
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.search.cooling = 1.0;
    assert!(config.validate().is_err());
}

#[test]
fn engine_names_round_trip_through_strum() {
    assert_eq!(EngineKind::Anneal.to_string(), "anneal");
    assert_eq!("differential".parse::<EngineKind>().unwrap(), EngineKind::Differential);
}

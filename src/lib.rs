pub mod api;
pub mod config;
pub mod consts;
pub mod error;
pub mod model;
pub mod optimizer;
pub mod plan;
pub mod problem;
// cmd and reports belong to the binary (main.rs).

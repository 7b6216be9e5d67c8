use clap::{CommandFactory, FromArgMatches, Parser, Subcommand};
use pathflow::api;
use pathflow::config::Config;
use pathflow::consts::DEFAULT_PROBLEM_FILE;
use std::process;
use tracing::{error, info, Level};

mod cmd;
mod reports;

use reports::OutputFormat;

#[derive(Parser, Debug)]
#[command(author, version, about = "Multipath FEC packet allocation planner", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(global = true, short, long, default_value = DEFAULT_PROBLEM_FILE)]
    problem: String,

    /// JSON file with search parameters; explicit flags override it.
    #[arg(global = true, short = 'c', long = "config")]
    config_file: Option<String>,

    #[arg(global = true, short, long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Stochastic search over FEC-aware path times.
    Plan(cmd::plan::PlanArgs),
    /// Exact plan for the redundancy-free linear model.
    Exact(cmd::exact::ExactArgs),
    /// Score a fixed allocation.
    Evaluate(cmd::evaluate::EvaluateArgs),
}

fn main() {
    // Raw matches tell user input apart from defaults when merging a config file.
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(if cli.debug { Level::DEBUG } else { Level::INFO })
        .with_target(false)
        .init();

    let cli_config = match &cli.command {
        Commands::Plan(args) => &args.config,
        Commands::Exact(args) => &args.config,
        Commands::Evaluate(args) => &args.config,
    };

    let config = match &cli.config_file {
        Some(path) => {
            info!("⚙️  Loading config from: {}", path);
            let mut file_config = Config::load_from_file(path).unwrap_or_else(|e| {
                error!("❌ Failed to load config '{}': {}", path, e);
                process::exit(1);
            });
            if let Some((_, sub_matches)) = matches.subcommand() {
                file_config.merge_from_cli(cli_config, sub_matches);
            }
            file_config
        }
        None => cli_config.clone(),
    };

    if let Err(e) = config.validate() {
        error!("❌ {}", e);
        process::exit(1);
    }

    info!("📂 Loading problem: {}", cli.problem);
    let problem = api::load_problem(&cli.problem, config.limits.max_paths).unwrap_or_else(|e| {
        error!("❌ Cannot load problem '{}': {}", cli.problem, e);
        process::exit(1);
    });

    let outcome = match &cli.command {
        Commands::Plan(args) => cmd::plan::run(args, &config, &problem),
        Commands::Exact(_) => cmd::exact::run(&problem),
        Commands::Evaluate(args) => cmd::evaluate::run(args, &problem),
    };

    let plan = outcome.unwrap_or_else(|e| {
        error!("❌ Planning failed: {}", e);
        process::exit(1);
    });

    if let Err(e) = reports::print_plan(&plan, cli.format) {
        error!("❌ Failed to write report: {}", e);
        process::exit(1);
    }
}

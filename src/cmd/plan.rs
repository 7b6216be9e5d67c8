use clap::Args;
use pathflow::api;
use pathflow::config::Config;
use pathflow::error::PfResult;
use pathflow::optimizer::ProgressCallback;
use pathflow::plan::Plan;
use pathflow::problem::Problem;
use std::time::Instant;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct PlanArgs {
    #[command(flatten)]
    pub config: Config,

    /// Independent restarts; the best plan wins.
    #[arg(short = 'a', long, default_value_t = 1)]
    pub attempts: usize,

    #[arg(short = 'S', long)]
    pub seed: Option<u64>,
}

struct CliLogger {
    start: Instant,
}

impl ProgressCallback for CliLogger {
    fn on_progress(&self, iteration: usize, best: f64) -> bool {
        info!(
            "   [{:>8}] best {:.6} ({:.1}s)",
            iteration,
            best,
            self.start.elapsed().as_secs_f32()
        );
        true
    }
}

pub fn run(args: &PlanArgs, config: &Config, problem: &Problem) -> PfResult<Plan> {
    info!(
        "🔥 Searching with {} engine ({} attempt(s), seed {})",
        config.search.engine,
        args.attempts,
        args.seed
            .map_or_else(|| "random".to_string(), |s| s.to_string())
    );

    let logger = CliLogger {
        start: Instant::now(),
    };
    let plan = api::plan_transfer(problem, config, args.seed, args.attempts, &logger)?;

    info!(
        "✅ Search finished in {:.2}s",
        logger.start.elapsed().as_secs_f32()
    );
    Ok(plan)
}

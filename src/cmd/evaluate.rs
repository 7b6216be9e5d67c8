use clap::Args;
use pathflow::api;
use pathflow::config::Config;
use pathflow::error::PfResult;
use pathflow::plan::Plan;
use pathflow::problem::Problem;
use tracing::debug;

#[derive(Args, Debug, Clone)]
pub struct EvaluateArgs {
    #[command(flatten)]
    pub config: Config,

    /// Comma-separated packets per path, e.g. "60,40".
    #[arg(short = 'A', long)]
    pub allocation: String,
}

pub fn run(args: &EvaluateArgs, problem: &Problem) -> PfResult<Plan> {
    let allocation = api::parse_allocation(&args.allocation)?;
    debug!("Evaluating allocation {:?}", allocation);
    api::evaluate_allocation(problem, &allocation)
}

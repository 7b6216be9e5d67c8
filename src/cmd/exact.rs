use clap::Args;
use pathflow::api;
use pathflow::config::Config;
use pathflow::error::PfResult;
use pathflow::plan::Plan;
use pathflow::problem::Problem;

#[derive(Args, Debug, Clone)]
pub struct ExactArgs {
    #[command(flatten)]
    pub config: Config,
}

pub fn run(problem: &Problem) -> PfResult<Plan> {
    api::plan_linear(problem)
}

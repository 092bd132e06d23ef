use std::error::Error;

use clap::Args;
use scan_sample::SamplerPlan;

use super::{build_campaign, CampaignArgs};

#[derive(Args, Debug)]
pub struct LhsArgs {
    #[command(flatten)]
    pub campaign: CampaignArgs,
    #[arg(long)]
    pub samples: usize,
    /// Master seed; the same seed reproduces the same cases.
    #[arg(long)]
    pub seed: u64,
}

pub fn run(args: &LhsArgs) -> Result<(), Box<dyn Error>> {
    let plan = SamplerPlan::Lhs {
        n_samples: args.samples,
        seed: args.seed,
    };
    build_campaign(&args.campaign, &plan)
}

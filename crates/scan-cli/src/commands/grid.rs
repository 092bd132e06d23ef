use std::error::Error;

use clap::Args;
use scan_sample::SamplerPlan;

use super::{build_campaign, CampaignArgs};

#[derive(Args, Debug)]
pub struct GridArgs {
    #[command(flatten)]
    pub campaign: CampaignArgs,
    /// Total number of cases, or points per dimension with `--full`.
    #[arg(long)]
    pub samples: usize,
    /// Emit the whole Cartesian product instead of truncating to `--samples`.
    #[arg(long)]
    pub full: bool,
}

pub fn run(args: &GridArgs) -> Result<(), Box<dyn Error>> {
    let plan = if args.full {
        SamplerPlan::Full {
            per_dimension: args.samples,
        }
    } else {
        SamplerPlan::Grid {
            n_samples: args.samples,
        }
    };
    build_campaign(&args.campaign, &plan)
}

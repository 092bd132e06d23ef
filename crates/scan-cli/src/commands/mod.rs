pub mod grid;
pub mod lhs;
pub mod status;

use std::error::Error;
use std::path::PathBuf;

use clap::{Args, ValueEnum};
use scan_campaign::{Campaign, CaseLayout, Template, DEFAULT_DECK_NAME, MANIFEST_FILE};
use scan_core::stable_hash_string;
use scan_sample::{load_space, Sampler, SamplerPlan};
use tracing::info;

/// Inputs shared by every campaign-building subcommand.
#[derive(Args, Debug)]
pub struct CampaignArgs {
    /// YAML or JSON mapping of `block:name` to ranges.
    #[arg(long)]
    pub params: PathBuf,
    /// Template deck merged into every case.
    #[arg(long)]
    pub template: PathBuf,
    /// Campaign root directory.
    #[arg(long)]
    pub root: PathBuf,
    /// File name of the deck written into each case.
    #[arg(long, default_value = DEFAULT_DECK_NAME)]
    pub deck_name: String,
    /// Directory arrangement of the cases.
    #[arg(long, value_enum, default_value_t = LayoutArg::Nested)]
    pub layout: LayoutArg,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LayoutArg {
    Nested,
    Hierarchy,
}

impl From<LayoutArg> for CaseLayout {
    fn from(arg: LayoutArg) -> Self {
        match arg {
            LayoutArg::Nested => CaseLayout::Nested,
            LayoutArg::Hierarchy => CaseLayout::Hierarchy,
        }
    }
}

/// Samples the space with `plan`, writes every case and the manifest.
pub fn build_campaign(args: &CampaignArgs, plan: &SamplerPlan) -> Result<(), Box<dyn Error>> {
    let space = load_space(&args.params)?;
    let space_hash = stable_hash_string(&space)?;
    let template = Template::load(&args.template)?;
    let sampler = plan.build(space)?;
    info!(
        cases = sampler.len(),
        dimensions = sampler.space().len(),
        root = %args.root.display(),
        "building campaign"
    );

    let mut campaign = Campaign::for_sampler(template, &args.root, sampler.as_ref())?
        .with_deck_name(args.deck_name.as_str())
        .with_layout(args.layout.into());
    for assignment in sampler.samples() {
        let path = campaign.setup_case(&assignment)?;
        println!("{}", path.display());
    }

    let manifest_path = args.root.join(MANIFEST_FILE);
    campaign.manifest(Some(space_hash)).write(&manifest_path)?;
    info!(
        cases = campaign.cases_written(),
        manifest = %manifest_path.display(),
        "campaign written"
    );
    Ok(())
}

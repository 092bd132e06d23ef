use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use scan_campaign::{discover_cases, CampaignManifest, DEFAULT_DECK_NAME, MANIFEST_FILE};
use tracing::warn;

#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Campaign root directory.
    #[arg(long)]
    pub root: PathBuf,
    #[arg(long, default_value = DEFAULT_DECK_NAME)]
    pub deck_name: String,
}

pub fn run(args: &StatusArgs) -> Result<(), Box<dyn Error>> {
    let cases = discover_cases(&args.root, &args.deck_name)?;
    for case in &cases {
        println!("{}", case.display());
    }
    let manifest_path = args.root.join(MANIFEST_FILE);
    if manifest_path.exists() {
        let manifest = CampaignManifest::load(&manifest_path)?;
        println!(
            "{} of {} recorded cases present",
            cases.len(),
            manifest.cases.len()
        );
        if cases.len() < manifest.cases.len() {
            warn!(
                missing = manifest.cases.len() - cases.len(),
                "campaign is incomplete"
            );
        }
    } else {
        println!("{} cases present (no manifest)", cases.len());
    }
    Ok(())
}

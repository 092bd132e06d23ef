use std::path::PathBuf;

use scan_campaign::{deck, discover_cases, Campaign, Template};
use scan_core::Value;
use scan_sample::{load_space, GridScan, Sampler};

fn fixture_path(relative: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join(relative)
}

#[test]
fn demo_scan_materialises() {
    let space = load_space(&fixture_path("demos/laser_scan/params.yaml")).expect("space");
    let template = Template::load(&fixture_path("demos/laser_scan/template.deck")).expect("template");
    // ppc is fixed at two values, so 18 samples need a free resolution of 3.
    let scan = GridScan::new(space, 18).expect("grid");
    assert_eq!(scan.resolution(), 3);

    let temp = tempfile::tempdir().expect("tmp dir");
    let mut campaign = Campaign::for_sampler(template, temp.path(), &scan).expect("campaign");
    let paths: Vec<_> = scan
        .samples()
        .map(|sample| campaign.setup_case(&sample).expect("case"))
        .collect();
    assert_eq!(paths.len(), 18);
    assert_eq!(discover_cases(temp.path(), "input.deck").expect("discover"), {
        let mut sorted = paths.clone();
        sorted.sort();
        sorted
    });

    let last = deck::load_file(&paths[17].join("input.deck")).expect("deck");
    assert_eq!(last.get("constant", "lambda_0"), Some(&Value::Float(1.2e-6)));
    assert_eq!(last.get("constant", "n_crit_frac"), Some(&Value::Float(10.0)));
    assert_eq!(last.get("species", "ppc"), Some(&Value::Int(32)));
    assert_eq!(last.get("species", "name"), Some(&Value::Str("electron".into())));
    assert_eq!(last.get("control", "nx"), Some(&Value::Int(1024)));
}

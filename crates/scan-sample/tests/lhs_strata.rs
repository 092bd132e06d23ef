use scan_core::Value;
use scan_sample::{LatinHypercube, ParameterSpace, ParameterSpec, Sampler, SamplerPlan};

fn space() -> ParameterSpace {
    ParameterSpace::new(vec![
        ParameterSpec::new("block", "var1", 1.0e1, 1.0e4).log_scaled(),
        ParameterSpec::new("block", "var2", 2.0, 5.0),
    ])
    .expect("space")
}

fn stratum(value: f64, spec: &ParameterSpec, n: usize) -> usize {
    let unit = if spec.log {
        (value.ln() - spec.min.ln()) / (spec.max.ln() - spec.min.ln())
    } else {
        (value - spec.min) / (spec.max - spec.min)
    };
    ((unit * n as f64).floor() as usize).min(n - 1)
}

#[test]
fn each_stratum_holds_one_sample() {
    let n = 5;
    let lhs = LatinHypercube::new(space(), n, 2024).expect("lhs");
    let samples = lhs.sample(n);
    assert_eq!(samples.len(), n);
    for spec in lhs.space() {
        let mut counts = vec![0usize; n];
        for sample in &samples {
            let value = sample.get(&spec.key()).and_then(Value::as_f64).expect("value");
            assert!(value >= spec.min && value <= spec.max);
            counts[stratum(value, spec, n)] += 1;
        }
        assert!(counts.iter().all(|&c| c == 1), "{}: {counts:?}", spec.key());
    }
}

#[test]
fn seeded_passes_repeat() {
    let lhs = LatinHypercube::new(space(), 16, 7).expect("lhs");
    let first: Vec<_> = lhs.samples().collect();
    let second: Vec<_> = lhs.samples().collect();
    assert_eq!(first, second);

    let other = LatinHypercube::new(space(), 16, 8).expect("lhs");
    assert_ne!(first, other.samples().collect::<Vec<_>>());
}

#[test]
fn listed_dimensions_pick_from_values() {
    let space = ParameterSpace::new(vec![ParameterSpec::listed(
        "species",
        "name",
        vec![Value::from("electron"), Value::from("proton")],
    )])
    .expect("space");
    let lhs = LatinHypercube::new(space, 4, 3).expect("lhs");
    let picks: Vec<Value> = lhs
        .samples()
        .map(|s| s.get("species:name").cloned().expect("value"))
        .collect();
    let electrons = picks.iter().filter(|v| **v == Value::from("electron")).count();
    assert_eq!(electrons, 2);
    assert_eq!(picks.len(), 4);
}

#[test]
fn plans_are_interchangeable() {
    let plans = [
        SamplerPlan::Grid { n_samples: 6 },
        SamplerPlan::Lhs {
            n_samples: 6,
            seed: 11,
        },
    ];
    for plan in plans {
        let sampler = plan.build(space()).expect("build");
        assert_eq!(sampler.len(), 6);
        assert_eq!(sampler.samples().count(), 6);
        let axes = sampler.axes();
        assert_eq!(axes.len(), 2);
        assert!(axes.iter().all(|axis| !axis.values.is_empty()));
    }
    let plan: SamplerPlan =
        serde_json::from_str(r#"{"type": "full", "per_dimension": 3}"#).expect("plan");
    assert_eq!(plan.build(space()).expect("build").len(), 9);
}

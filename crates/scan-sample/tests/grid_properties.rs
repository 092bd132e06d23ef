use std::collections::BTreeSet;

use proptest::prelude::*;
use scan_core::Value;
use scan_sample::{GridScan, ParameterSpace, ParameterSpec, Sampler};

proptest! {
    #[test]
    fn linear_axis_is_ascending_and_inclusive(
        min in -1.0e6f64..1.0e6,
        width in 1.0e-3f64..1.0e6,
        n in 2usize..64,
    ) {
        let max = min + width;
        let space = ParameterSpace::new(vec![ParameterSpec::new("b", "x", min, max)]).unwrap();
        let scan = GridScan::new(space, n).unwrap();
        let values: Vec<f64> = scan
            .iter()
            .map(|s| s.get("b:x").and_then(Value::as_f64).unwrap())
            .collect();
        prop_assert_eq!(values.len(), n);
        prop_assert_eq!(values[0], min);
        prop_assert_eq!(values[n - 1], max);
        for pair in values.windows(2) {
            prop_assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn truncated_grid_is_prefix_of_full_grid(k in 1usize..4, n in 1usize..80) {
        let specs = (0..k)
            .map(|d| ParameterSpec::new("b", format!("p{d}"), 0.0, 1.0 + d as f64))
            .collect();
        let space = ParameterSpace::new(specs).unwrap();
        let scan = GridScan::new(space.clone(), n).unwrap();
        prop_assert_eq!(scan.len(), n);
        prop_assert!(scan.resolution().pow(k as u32) >= n);
        if scan.resolution() > 1 {
            prop_assert!((scan.resolution() - 1).pow(k as u32) < n);
        }

        let full = GridScan::full(space, scan.resolution()).unwrap();
        let truncated: Vec<_> = scan.iter().collect();
        let prefix: Vec<_> = full.iter().take(n).collect();
        prop_assert_eq!(&truncated, &prefix);

        let distinct: BTreeSet<String> = truncated
            .iter()
            .map(|s| serde_json::to_string(s).unwrap())
            .collect();
        prop_assert_eq!(distinct.len(), n);
    }
}

//! Axis spacing shared by grid and hypercube sampling.

/// Generalises `linspace`/`logspace` over `[min, max]`.
///
/// Returns `num` ascending points. The first point is always exactly `min`
/// and, when `endpoint` is set, the last point is exactly `max`. Without
/// `endpoint` the interval is split into `num` equal steps and `max` itself
/// is excluded. Logarithmic spacing interpolates `ln(min)..ln(max)` and
/// requires strictly positive bounds (checked by the caller).
///
/// `num == 1` collapses to `[min]`; `num == 0` yields nothing.
pub fn gridspace(min: f64, max: f64, num: usize, log: bool, endpoint: bool) -> Vec<f64> {
    if num == 0 {
        return Vec::new();
    }
    if num == 1 {
        return vec![min];
    }
    let steps = (if endpoint { num - 1 } else { num }) as f64;
    let (lo, hi) = if log { (min.ln(), max.ln()) } else { (min, max) };
    (0..num)
        .map(|idx| {
            if idx == 0 {
                return min;
            }
            if endpoint && idx == num - 1 {
                return max;
            }
            let t = lo + (hi - lo) * idx as f64 / steps;
            if log {
                t.exp()
            } else {
                t
            }
        })
        .collect()
}

/// Maps a unit-interval coordinate onto `[min, max]`, linearly or in log
/// space.
pub fn scale_unit(unit: f64, min: f64, max: f64, log: bool) -> f64 {
    if log {
        let (lo, hi) = (min.ln(), max.ln());
        (lo + (hi - lo) * unit).exp()
    } else {
        min + (max - min) * unit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_includes_both_ends() {
        assert_eq!(gridspace(0.0, 1.0, 5, false, true), vec![0.0, 0.25, 0.5, 0.75, 1.0]);
    }

    #[test]
    fn open_interval_drops_max() {
        assert_eq!(gridspace(2.0, 6.0, 4, false, false), vec![2.0, 3.0, 4.0, 5.0]);
    }

    #[test]
    fn single_point_is_min() {
        assert_eq!(gridspace(3.0, 9.0, 1, true, true), vec![3.0]);
        assert!(gridspace(3.0, 9.0, 0, false, true).is_empty());
    }

    #[test]
    fn degenerate_range_stays_finite() {
        let points = gridspace(4.0, 4.0, 3, true, true);
        assert!(points.iter().all(|p| (p - 4.0).abs() < 1e-12));
    }

    #[test]
    fn log_midpoint() {
        let points = gridspace(1.0, 100.0, 3, true, true);
        assert_eq!(points[0], 1.0);
        assert!((points[1] - 10.0).abs() < 1e-9);
        assert_eq!(points[2], 100.0);
        assert!((scale_unit(0.5, 1.0, 100.0, true) - 10.0).abs() < 1e-9);
    }
}

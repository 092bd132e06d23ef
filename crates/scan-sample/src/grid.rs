use scan_core::errors::{ErrorInfo, ScanError};
use scan_core::Assignment;
use tracing::debug;

use crate::sampler::{Axis, Sampler, Samples};
use crate::space::ParameterSpace;

/// Uniform sampling of the Cartesian product of the parameter axes.
///
/// Points are enumerated row-major over dimensions in space order, so the
/// last dimension varies fastest. Each dimension's axis is either its
/// explicit `values`, its own `n_samples` resolution, or the shared free
/// resolution chosen by the constructor.
///
/// # Truncation policy
///
/// [`GridScan::new`] targets an exact total. With `k` free dimensions and
/// `F` the product of the fixed resolutions, the free resolution `m` is the
/// smallest integer such that `F * m^k >= n_samples` (plain
/// `ceil(n_samples^(1/k))` when nothing is fixed). The full grid is then
/// enumerated in the order above and cut after the first `n_samples`
/// points, so the dropped points are always the tail of that enumeration:
/// the highest values of the leading dimensions go first.
///
/// `n_samples == 1` therefore yields the minimum corner.
#[derive(Debug, Clone)]
pub struct GridScan {
    space: ParameterSpace,
    axes: Vec<Axis>,
    resolution: usize,
    len: usize,
}

impl GridScan {
    /// Grid of exactly `n_samples` points (see the truncation policy).
    pub fn new(space: ParameterSpace, n_samples: usize) -> Result<Self, ScanError> {
        if n_samples == 0 {
            return Err(zero_samples());
        }
        let (fixed, free) = fixed_product(&space)?;
        let resolution = if free == 0 {
            if fixed < n_samples {
                return Err(ScanError::InvalidSampleCount(
                    ErrorInfo::new(
                        "grid-too-small",
                        "every dimension has a fixed resolution and the grid is smaller than the requested count",
                    )
                    .with_context("grid_points", fixed.to_string())
                    .with_context("n_samples", n_samples.to_string()),
                ));
            }
            1
        } else {
            free_resolution(n_samples, fixed, free)
        };
        let scan = Self::build(space, resolution, Some(n_samples))?;
        debug!(
            dimensions = scan.space.len(),
            resolution, n_samples, "grid scan sized"
        );
        Ok(scan)
    }

    /// Full Cartesian product with `per_dimension` points on every free
    /// dimension. Nothing is truncated.
    pub fn full(space: ParameterSpace, per_dimension: usize) -> Result<Self, ScanError> {
        if per_dimension == 0 {
            return Err(zero_samples());
        }
        let scan = Self::build(space, per_dimension, None)?;
        debug!(
            dimensions = scan.space.len(),
            resolution = per_dimension,
            points = scan.len,
            "full grid scan sized"
        );
        Ok(scan)
    }

    fn build(
        space: ParameterSpace,
        resolution: usize,
        limit: Option<usize>,
    ) -> Result<Self, ScanError> {
        let axes: Vec<Axis> = space
            .iter()
            .map(|spec| Axis {
                key: spec.key(),
                values: spec.axis(resolution),
            })
            .collect();
        let total = axes
            .iter()
            .try_fold(1usize, |acc, axis| acc.checked_mul(axis.values.len()))
            .ok_or_else(|| {
                ScanError::InvalidSampleCount(
                    ErrorInfo::new("grid-overflow", "grid size overflows the platform word")
                        .with_context("resolution", resolution.to_string()),
                )
            })?;
        let len = limit.map_or(total, |limit| limit.min(total));
        Ok(Self {
            space,
            axes,
            resolution,
            len,
        })
    }

    /// Free per-dimension resolution in use.
    pub fn resolution(&self) -> usize {
        self.resolution
    }

    /// Assignment at flat grid position `index`, if within [`Sampler::len`].
    pub fn point(&self, index: usize) -> Option<Assignment> {
        (index < self.len).then(|| point_at(&self.axes, index))
    }

    /// Iterates the grid without boxing.
    pub fn iter(&self) -> GridIter<'_> {
        GridIter {
            axes: &self.axes,
            next: 0,
            end: self.len,
        }
    }
}

impl Sampler for GridScan {
    fn space(&self) -> &ParameterSpace {
        &self.space
    }

    fn len(&self) -> usize {
        self.len
    }

    fn samples(&self) -> Samples<'_> {
        Box::new(self.iter())
    }

    fn axes(&self) -> Vec<Axis> {
        self.axes.clone()
    }
}

impl<'a> IntoIterator for &'a GridScan {
    type Item = Assignment;
    type IntoIter = GridIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Row-major cursor over a [`GridScan`].
#[derive(Debug, Clone)]
pub struct GridIter<'a> {
    axes: &'a [Axis],
    next: usize,
    end: usize,
}

impl Iterator for GridIter<'_> {
    type Item = Assignment;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.end {
            return None;
        }
        let point = point_at(self.axes, self.next);
        self.next += 1;
        Some(point)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.end - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for GridIter<'_> {}

fn point_at(axes: &[Axis], index: usize) -> Assignment {
    let mut picks = vec![0usize; axes.len()];
    let mut rem = index;
    for (dim, axis) in axes.iter().enumerate().rev() {
        let size = axis.values.len();
        picks[dim] = rem % size;
        rem /= size;
    }
    axes.iter()
        .zip(picks)
        .map(|(axis, pick)| (axis.key.clone(), axis.values[pick].clone()))
        .collect()
}

fn zero_samples() -> ScanError {
    ScanError::InvalidSampleCount(
        ErrorInfo::new("grid-zero-samples", "sample count must be at least 1")
            .with_context("n_samples", "0"),
    )
}

fn fixed_product(space: &ParameterSpace) -> Result<(usize, u32), ScanError> {
    let mut fixed = 1usize;
    let mut free = 0u32;
    for spec in space {
        match spec.fixed_resolution() {
            Some(size) => {
                fixed = fixed.checked_mul(size).ok_or_else(|| {
                    ScanError::InvalidSampleCount(ErrorInfo::new(
                        "grid-overflow",
                        "fixed resolutions overflow the platform word",
                    ))
                })?;
            }
            None => free += 1,
        }
    }
    Ok((fixed, free))
}

/// Smallest `m >= 1` with `fixed * m^free >= n_samples`.
fn free_resolution(n_samples: usize, fixed: usize, free: u32) -> usize {
    let covers = |m: usize| match m.checked_pow(free).and_then(|p| p.checked_mul(fixed)) {
        Some(total) => total >= n_samples,
        None => true,
    };
    let estimate = (n_samples as f64 / fixed as f64).powf(1.0 / free as f64).ceil();
    let mut m = if estimate.is_finite() && estimate >= 1.0 {
        estimate as usize
    } else {
        1
    };
    while m > 1 && covers(m - 1) {
        m -= 1;
    }
    while !covers(m) {
        m += 1;
    }
    m
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn free_resolution_is_exact_for_perfect_powers() {
        assert_eq!(free_resolution(8, 1, 3), 2);
        assert_eq!(free_resolution(9, 1, 2), 3);
        assert_eq!(free_resolution(10, 1, 2), 4);
        assert_eq!(free_resolution(1, 1, 4), 1);
        assert_eq!(free_resolution(1000, 1, 3), 10);
    }

    #[test]
    fn fixed_dimensions_shrink_free_resolution() {
        assert_eq!(free_resolution(16, 2, 1), 8);
        assert_eq!(free_resolution(17, 2, 1), 9);
        assert_eq!(free_resolution(3, 4, 2), 1);
    }
}

use scan_core::errors::{ErrorInfo, ScanError};
use scan_core::rng::RngStream;
use scan_core::{Assignment, Value};
use tracing::debug;

use crate::sampler::{Sampler, Samples};
use crate::space::{ParameterSpace, ParameterSpec};
use crate::spacing::scale_unit;

/// Latin hypercube sampling over the parameter ranges.
///
/// Every dimension is cut into `n_samples` equal strata (in log space for
/// log-scaled dimensions) and each stratum holds exactly one sample, placed
/// uniformly at random inside it. Dimension `d` draws its stratum
/// permutation and jitter from the substream `(seed, d)`, so a pass is fully
/// determined by the space, the count and the seed.
///
/// Dimensions with explicit `values` map the unit coordinate onto the list
/// (`values[floor(u * len)]`). `endpoint` and per-dimension `n_samples`
/// only affect grids and are ignored here.
#[derive(Debug, Clone)]
pub struct LatinHypercube {
    space: ParameterSpace,
    n_samples: usize,
    seed: u64,
}

impl LatinHypercube {
    /// Hypercube of `n_samples` points; fails when `n_samples` is zero.
    pub fn new(space: ParameterSpace, n_samples: usize, seed: u64) -> Result<Self, ScanError> {
        if n_samples == 0 {
            return Err(ScanError::InvalidSampleCount(
                ErrorInfo::new("lhs-zero-samples", "lhs sampling requires at least one sample")
                    .with_context("n_samples", "0"),
            ));
        }
        debug!(dimensions = space.len(), n_samples, seed, "latin hypercube sized");
        Ok(Self {
            space,
            n_samples,
            seed,
        })
    }

    /// Master seed the substreams derive from.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Unit-cube coordinates of every sample, one column per dimension.
    fn unit_columns(&self) -> Vec<Vec<f64>> {
        let n = self.n_samples;
        (0..self.space.len())
            .map(|dim| {
                let mut stream = RngStream::for_dimension(self.seed, dim);
                stream
                    .permutation(n)
                    .into_iter()
                    .map(|stratum| (stratum as f64 + stream.unit()) / n as f64)
                    .collect()
            })
            .collect()
    }
}

impl Sampler for LatinHypercube {
    fn space(&self) -> &ParameterSpace {
        &self.space
    }

    fn len(&self) -> usize {
        self.n_samples
    }

    fn samples(&self) -> Samples<'_> {
        Box::new(LhsIter {
            space: &self.space,
            columns: self.unit_columns(),
            next: 0,
            end: self.n_samples,
        })
    }
}

struct LhsIter<'a> {
    space: &'a ParameterSpace,
    columns: Vec<Vec<f64>>,
    next: usize,
    end: usize,
}

impl Iterator for LhsIter<'_> {
    type Item = Assignment;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.end {
            return None;
        }
        let row = self.next;
        self.next += 1;
        Some(
            self.space
                .iter()
                .zip(&self.columns)
                .map(|(spec, column)| (spec.key(), place(spec, column[row])))
                .collect(),
        )
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.end - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for LhsIter<'_> {}

fn place(spec: &ParameterSpec, unit: f64) -> Value {
    if let Some(values) = &spec.values {
        let slot = ((unit * values.len() as f64) as usize).min(values.len() - 1);
        return values[slot].clone();
    }
    Value::Float(scale_unit(unit, spec.min, spec.max, spec.log))
}

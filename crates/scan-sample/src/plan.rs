use scan_core::errors::ScanError;
use serde::{Deserialize, Serialize};

use crate::grid::GridScan;
use crate::lhs::LatinHypercube;
use crate::sampler::Sampler;
use crate::space::ParameterSpace;

/// Serializable choice of sampling strategy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SamplerPlan {
    /// Regular grid truncated to exactly `n_samples` points.
    Grid {
        /// Total number of points.
        n_samples: usize,
    },
    /// Untruncated grid with `per_dimension` points on each free dimension.
    Full {
        /// Points on each free dimension.
        per_dimension: usize,
    },
    /// Seeded Latin hypercube.
    Lhs {
        /// Number of strata, and of samples.
        n_samples: usize,
        /// Master seed.
        seed: u64,
    },
}

impl SamplerPlan {
    /// Builds the sampler this plan describes over `space`.
    pub fn build(&self, space: ParameterSpace) -> Result<Box<dyn Sampler>, ScanError> {
        Ok(match *self {
            SamplerPlan::Grid { n_samples } => Box::new(GridScan::new(space, n_samples)?),
            SamplerPlan::Full { per_dimension } => Box::new(GridScan::full(space, per_dimension)?),
            SamplerPlan::Lhs { n_samples, seed } => {
                Box::new(LatinHypercube::new(space, n_samples, seed)?)
            }
        })
    }
}

use std::collections::HashSet;

use scan_core::{Assignment, Value};
use serde::{Deserialize, Serialize};

use crate::space::ParameterSpace;

/// Lazy, exact-size stream of assignments produced by a [`Sampler`].
pub type Samples<'a> = Box<dyn ExactSizeIterator<Item = Assignment> + 'a>;

/// Distinct values taken by one dimension, in axis order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Axis {
    /// Composite `block:name` key of the dimension.
    pub key: String,
    /// Values in axis order, without repeats.
    pub values: Vec<Value>,
}

/// Capability shared by every sampling strategy: turn a parameter space and
/// a sample count into a finite, restartable sequence of assignments.
///
/// Implementations are pure functions of their construction inputs.
/// Calling [`Sampler::samples`] twice yields the same sequence.
pub trait Sampler: Send + Sync {
    /// Space every produced assignment conforms to.
    fn space(&self) -> &ParameterSpace;

    /// Number of assignments [`Sampler::samples`] yields.
    fn len(&self) -> usize;

    /// True when the sampler yields nothing.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Starts a fresh pass over the assignments.
    fn samples(&self) -> Samples<'_>;

    /// First `num` assignments of a fresh pass.
    fn sample(&self, num: usize) -> Vec<Assignment> {
        self.samples().take(num).collect()
    }

    /// Per-dimension axes, used to number directory segments.
    ///
    /// The default walks one pass and records each dimension's distinct
    /// values in first-appearance order.
    fn axes(&self) -> Vec<Axis> {
        let keys = self.space().keys();
        let mut seen: Vec<HashSet<_>> = vec![HashSet::new(); keys.len()];
        let mut axes: Vec<Axis> = keys
            .into_iter()
            .map(|key| Axis {
                key,
                values: Vec::new(),
            })
            .collect();
        for assignment in self.samples() {
            for (dim, axis) in axes.iter_mut().enumerate() {
                if let Some(value) = assignment.get(&axis.key) {
                    if seen[dim].insert(value.identity()) {
                        axis.values.push(value.clone());
                    }
                }
            }
        }
        axes
    }
}

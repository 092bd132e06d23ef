//! Samplers turning a parameter space description into concrete
//! assignments.
//!
//! Every strategy implements [`Sampler`]; callers pick one at construction
//! time and consume the resulting stream without knowing which it is.

#![deny(missing_docs)]

mod grid;
mod lhs;
mod plan;
mod sampler;
mod space;
pub mod spacing;

pub use grid::{GridIter, GridScan};
pub use lhs::LatinHypercube;
pub use plan::SamplerPlan;
pub use sampler::{Axis, Sampler, Samples};
pub use space::{load_space, ParameterSpace, ParameterSpec, RangeSpec};

//! Per-dimension random streams for randomised sampling.

use std::hash::Hasher;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use siphasher::sip::SipHasher13;

/// Random stream owned by one scanned dimension.
///
/// A campaign seed fans out into one stream per dimension through
/// [`derive_substream_seed`], so what dimension `d` draws is fixed by
/// `(seed, d)` alone. Adding a dimension or consuming streams in another
/// order leaves the other dimensions' draws unchanged.
#[derive(Debug, Clone)]
pub struct RngStream {
    rng: StdRng,
}

impl RngStream {
    /// Stream seeded directly with `seed`.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Stream of dimension `dimension` under campaign seed `seed`.
    pub fn for_dimension(seed: u64, dimension: usize) -> Self {
        Self::from_seed(derive_substream_seed(seed, dimension as u64))
    }

    /// Uniform draw from `[0, 1)`.
    pub fn unit(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }

    /// Uniformly shuffled `0..n`, used to deal strata to samples.
    pub fn permutation(&mut self, n: usize) -> Vec<usize> {
        let mut order: Vec<usize> = (0..n).collect();
        order.shuffle(&mut self.rng);
        order
    }
}

/// Seed of substream `substream` under `master_seed`: SipHash-1-3 of the
/// pair with zero keys, stable across platforms.
pub fn derive_substream_seed(master_seed: u64, substream: u64) -> u64 {
    let mut hasher = SipHasher13::new_with_keys(0, 0);
    hasher.write_u64(master_seed);
    hasher.write_u64(substream);
    hasher.finish()
}

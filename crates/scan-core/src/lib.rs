#![deny(missing_docs)]
#![doc = "Core types shared by the scan sampler and campaign builder: scalar values, composite parameter keys, assignments, structured errors and determinism helpers."]

pub mod errors;
mod hash;
pub mod rng;
pub mod value;

pub use errors::{ErrorInfo, ScanError};
pub use hash::{from_json_slice, stable_hash_string, to_canonical_json_bytes};
pub use rng::{derive_substream_seed, RngStream};
pub use value::{Assignment, ParamKey, Value, ValueKey, KEY_SEPARATOR};

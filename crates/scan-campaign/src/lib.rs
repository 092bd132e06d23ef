//! Campaign builder: turns sampled assignments into case directories, each
//! holding a deck rendered from a shared template.

#![deny(missing_docs)]

mod campaign;
pub mod deck;
mod discover;
mod layout;
mod manifest;
mod template;

pub use campaign::{Campaign, DEFAULT_DECK_NAME};
pub use deck::{Block, Deck};
pub use discover::discover_cases;
pub use layout::{rundir_hierarchy, AxisRegistry, CaseLayout};
pub use manifest::{CampaignManifest, CaseRecord, MANIFEST_FILE};
pub use template::{expand_assignment, Template};

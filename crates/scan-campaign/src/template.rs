use std::path::Path;

use scan_core::errors::{ErrorInfo, ScanError};
use scan_core::{Assignment, ParamKey};

use crate::deck::{self, Deck};

/// Base configuration shared by every case of a campaign.
///
/// The template is read-only once built: [`Template::merge`] returns a new
/// deck for each case.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Template {
    deck: Deck,
}

impl Template {
    /// Wraps a parsed deck.
    pub fn new(deck: Deck) -> Self {
        Self { deck }
    }

    /// Parses template text in deck format.
    pub fn parse(text: &str) -> Result<Self, ScanError> {
        deck::load(text).map(Self::new)
    }

    /// Reads a template deck from disk.
    pub fn load(path: &Path) -> Result<Self, ScanError> {
        deck::load_file(path).map(Self::new)
    }

    /// Underlying deck.
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    /// Resolved configuration for one case: the template first, then the
    /// assignment on top.
    pub fn merge(&self, assignment: &Assignment) -> Result<Deck, ScanError> {
        let overlay = expand_assignment(assignment)?;
        let mut merged = self.deck.clone();
        merged.overlay(&overlay);
        Ok(merged)
    }
}

impl From<Deck> for Template {
    fn from(deck: Deck) -> Self {
        Self::new(deck)
    }
}

/// Regroups flat `block:name` keys into a deck.
pub fn expand_assignment(assignment: &Assignment) -> Result<Deck, ScanError> {
    let mut expanded = Deck::new();
    for (raw, value) in assignment.iter() {
        let key = ParamKey::parse(raw).map_err(ScanError::TemplateMerge)?;
        deck::check_entry(&key.block, &key.name, value).map_err(|info| {
            ScanError::TemplateMerge(ErrorInfo {
                code: "merge-unrepresentable".to_string(),
                ..info
            })
        })?;
        expanded.set(key.block, key.name, value.clone());
    }
    Ok(expanded)
}

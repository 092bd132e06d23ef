use std::fs;
use std::path::Path;

use scan_core::errors::{ErrorInfo, ScanError};
use scan_core::{from_json_slice, to_canonical_json_bytes, Assignment};
use serde::{Deserialize, Serialize};

use crate::layout::CaseLayout;

/// File name of the manifest written at a campaign root.
pub const MANIFEST_FILE: &str = "campaign.json";

/// One materialised case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseRecord {
    /// Case directory relative to the campaign root, `/`-separated.
    pub path: String,
    /// Parameter values written into the case deck.
    pub params: Assignment,
}

/// Record of a campaign, persisted next to its cases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignManifest {
    /// Stable hash of the parameter space the cases came from.
    #[serde(default)]
    pub space_hash: Option<String>,
    /// Deck file name inside each case directory.
    pub deck_name: String,
    /// Layout the case paths follow.
    pub layout: CaseLayout,
    /// Cases in the order they were first written.
    #[serde(default)]
    pub cases: Vec<CaseRecord>,
}

impl CampaignManifest {
    /// Writes the manifest as canonical JSON.
    pub fn write(&self, path: &Path) -> Result<(), ScanError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|err| {
                ScanError::DirectoryCreation(
                    ErrorInfo::new("manifest-mkdir", err.to_string())
                        .with_context("path", parent.display().to_string()),
                )
            })?;
        }
        let bytes = to_canonical_json_bytes(self)?;
        fs::write(path, bytes).map_err(|err| {
            ScanError::Io(
                ErrorInfo::new("manifest-write", err.to_string())
                    .with_context("path", path.display().to_string()),
            )
        })
    }

    /// Loads a manifest from disk.
    pub fn load(path: &Path) -> Result<Self, ScanError> {
        let bytes = fs::read(path).map_err(|err| {
            ScanError::Io(
                ErrorInfo::new("manifest-read", err.to_string())
                    .with_context("path", path.display().to_string()),
            )
        })?;
        from_json_slice(&bytes)
    }
}

use std::path::{Path, PathBuf};

use scan_core::errors::{ErrorInfo, ScanError};
use walkdir::WalkDir;

/// Directories under `root` holding a `deck_name` file, sorted by path.
///
/// Used to inspect an existing campaign, for instance before resuming one
/// that was interrupted part way.
pub fn discover_cases(root: &Path, deck_name: &str) -> Result<Vec<PathBuf>, ScanError> {
    let mut cases = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(|err| {
            ScanError::Io(
                ErrorInfo::new("discover-walk", err.to_string())
                    .with_context("root", root.display().to_string()),
            )
        })?;
        if entry.file_type().is_file() && entry.file_name() == deck_name {
            if let Some(parent) = entry.path().parent() {
                cases.push(parent.to_path_buf());
            }
        }
    }
    cases.sort();
    Ok(cases)
}

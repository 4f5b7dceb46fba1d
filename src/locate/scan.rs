//! Search-path tiers: direct lookups and recursive scans

use super::{Resolver, SearchPath};
use crate::artifact::{ArtifactName, ResolvedArtifact};
use crate::error::{SetupError, SetupResult};
use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;
use walkdir::WalkDir;

/// Checks `dir/name` in each search directory, in priority order
pub struct DirectHit {
    search_path: Arc<SearchPath>,
}

impl DirectHit {
    pub fn new(search_path: Arc<SearchPath>) -> Self {
        Self { search_path }
    }
}

#[async_trait]
impl Resolver for DirectHit {
    fn label(&self) -> &'static str {
        "direct lookup"
    }

    async fn resolve(&self, name: &ArtifactName) -> SetupResult<Option<ResolvedArtifact>> {
        for dir in self.search_path.existing() {
            let candidate = dir.join(name);
            debug!("Checking {}", candidate.display());
            if let Some(found) = ResolvedArtifact::verify(candidate) {
                return Ok(Some(found));
            }
        }
        Ok(None)
    }
}

/// Walks every existing search directory, in priority order
pub struct RecursiveScan {
    search_path: Arc<SearchPath>,
}

impl RecursiveScan {
    pub fn new(search_path: Arc<SearchPath>) -> Self {
        Self { search_path }
    }
}

#[async_trait]
impl Resolver for RecursiveScan {
    fn label(&self) -> &'static str {
        "recursive scan"
    }

    async fn resolve(&self, name: &ArtifactName) -> SetupResult<Option<ResolvedArtifact>> {
        let search_path = Arc::clone(&self.search_path);
        let name = name.clone();

        tokio::task::spawn_blocking(move || scan_all(&search_path, &name))
            .await
            .map_err(|e| SetupError::io("joining directory scan", std::io::Error::other(e)))
    }
}

/// First match across the existing search directories, in priority order
fn scan_all(search_path: &SearchPath, name: &ArtifactName) -> Option<ResolvedArtifact> {
    search_path.existing().find_map(|dir| scan_dir(dir, name))
}

/// Depth-first walk of `dir` for a file whose base name is `name`.
///
/// Unreadable entries are skipped. Symlinks are not followed while
/// descending, but a symlink named `name` that points at a file counts.
fn scan_dir(dir: &Path, name: &ArtifactName) -> Option<ResolvedArtifact> {
    debug!("Scanning {}", dir.display());
    WalkDir::new(dir)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| !entry.file_type().is_dir())
        .filter(|entry| entry.file_name() == name.as_str())
        .find_map(|entry| ResolvedArtifact::verify(entry.into_path()))
}

//! Tiered artifact search
//!
//! A [`Locator`] is an ordered chain of [`Resolver`]s. Each resolver is asked
//! in turn and the first one to produce a file wins; later (more expensive)
//! tiers are never consulted once an earlier one succeeds.
//!
//! | Tier | Resolver | Cost |
//! |------|----------|------|
//! | 1 | [`DirectHit`] | one `stat` per search directory |
//! | 2 | [`RecursiveScan`] | full walk of every search directory |
//! | 3 | [`SystemSearch`] | time-limited `find` over the whole filesystem |

pub mod scan;
pub mod system;

pub use scan::{DirectHit, RecursiveScan};
pub use system::SystemSearch;

use crate::artifact::{ArtifactName, ResolvedArtifact};
use crate::config::SearchConfig;
use crate::error::SetupResult;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// One search strategy in the locator chain
#[async_trait]
pub trait Resolver: Send + Sync {
    /// Short label used in logs
    fn label(&self) -> &'static str;

    /// Look for `name`. `Ok(None)` means this tier has no match.
    async fn resolve(&self, name: &ArtifactName) -> SetupResult<Option<ResolvedArtifact>>;
}

/// Ordered list of directories to search, highest priority first
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchPath {
    dirs: Vec<PathBuf>,
}

impl SearchPath {
    /// Build a search path from explicit directories, dropping duplicates
    pub fn new(dirs: impl IntoIterator<Item = PathBuf>) -> Self {
        let mut path = Self::default();
        for dir in dirs {
            path.push(dir);
        }
        path
    }

    /// The standard locations for an install root.
    ///
    /// `root/models/upscalers`, `parent(root)/models/upscalers`,
    /// `root/models`, then each mount point in order.
    pub fn standard(root: &Path, mount_points: &[PathBuf]) -> Self {
        let mut path = Self::default();
        path.push(root.join("models").join("upscalers"));
        if let Some(parent) = root.parent() {
            path.push(parent.join("models").join("upscalers"));
        }
        path.push(root.join("models"));
        for mount in mount_points {
            path.push(mount.clone());
        }
        path
    }

    /// Search path described by a config section
    pub fn from_config(root: &Path, config: &SearchConfig) -> Self {
        let mut path = if config.include_defaults {
            Self::standard(root, &config.mount_points)
        } else {
            Self::default()
        };
        for extra in &config.extra_paths {
            path.push(extra.clone());
        }
        path
    }

    /// Append a directory unless it is already present
    pub fn push(&mut self, dir: PathBuf) {
        if !self.dirs.contains(&dir) {
            self.dirs.push(dir);
        }
    }

    pub fn dirs(&self) -> &[PathBuf] {
        &self.dirs
    }

    /// Directories that currently exist, in priority order
    pub fn existing(&self) -> impl Iterator<Item = &PathBuf> {
        self.dirs.iter().filter(|d| d.is_dir())
    }
}

/// Chain of resolvers evaluated in order
#[derive(Default)]
pub struct Locator {
    resolvers: Vec<Box<dyn Resolver>>,
}

impl Locator {
    /// Create an empty locator
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a resolver to the end of the chain
    pub fn with(mut self, resolver: impl Resolver + 'static) -> Self {
        self.resolvers.push(Box::new(resolver));
        self
    }

    /// Standard three-tier chain over `search_path`.
    ///
    /// `system` is the optional filesystem-wide fallback.
    pub fn tiered(search_path: SearchPath, system: Option<SystemSearch>) -> Self {
        let search_path = Arc::new(search_path);
        let locator = Self::new()
            .with(DirectHit::new(Arc::clone(&search_path)))
            .with(RecursiveScan::new(search_path));

        match system {
            Some(system) => locator.with(system),
            None => locator,
        }
    }

    /// Labels of the configured tiers, in evaluation order
    pub fn tiers(&self) -> Vec<&'static str> {
        self.resolvers.iter().map(|r| r.label()).collect()
    }

    /// Find `name`, returning the first match from the earliest tier.
    ///
    /// Absence is an expected outcome; errors from individual tiers are
    /// logged and treated as "not found in this tier".
    pub async fn find(&self, name: &ArtifactName) -> Option<ResolvedArtifact> {
        for resolver in &self.resolvers {
            debug!("Trying {} for {}", resolver.label(), name);
            match resolver.resolve(name).await {
                Ok(Some(found)) => {
                    // Re-check; the file may have vanished since the tier saw it
                    if found.exists() {
                        info!("Found {} via {}: {}", name, resolver.label(), found);
                        return Some(found);
                    }
                    debug!("{} reported {} but it no longer exists", resolver.label(), found);
                }
                Ok(None) => debug!("{} has no match for {}", resolver.label(), name),
                Err(e) => warn!("{} failed for {}: {}", resolver.label(), name, e),
            }
        }
        None
    }
}

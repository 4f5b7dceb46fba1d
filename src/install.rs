//! Canonical cache directory for located artifacts
//!
//! Artifacts are keyed by file name only. Once a file with a given name is in
//! the cache it is never replaced or checked for freshness.

use crate::artifact::{ArtifactName, ResolvedArtifact};
use crate::config::InstallConfig;
use crate::error::{SetupError, SetupResult};
use std::fs::{self, File, FileTimes};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Copies located artifacts into the cache directory
#[derive(Debug, Clone)]
pub struct Installer {
    cache_dir: PathBuf,
}

impl Installer {
    pub fn new(cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            cache_dir: cache_dir.into(),
        }
    }

    /// Cache directory under an install root
    pub fn from_config(root: &Path, config: &InstallConfig) -> Self {
        Self::new(root.join(&config.cache_subdir))
    }

    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Create the cache directory and its parents if needed.
    ///
    /// Failure here is fatal: there is nowhere else to put the artifact.
    pub async fn ensure_dir(&self) -> SetupResult<&Path> {
        tokio::fs::create_dir_all(&self.cache_dir)
            .await
            .map_err(|e| SetupError::CacheDirCreate {
                path: self.cache_dir.clone(),
                source: e,
            })?;
        Ok(&self.cache_dir)
    }

    /// Copy `src` into the cache as `name` (default: the base name of `src`).
    ///
    /// - destination already present: kept as is, `src` is returned
    /// - fresh copy: the destination is returned
    /// - copy failed: `src` is returned
    ///
    /// In every case `None` means `src` no longer exists. Only cache
    /// directory creation is reported as an error.
    pub async fn materialize(
        &self,
        src: &ResolvedArtifact,
        name: Option<&ArtifactName>,
    ) -> SetupResult<Option<ResolvedArtifact>> {
        let cache_dir = self.ensure_dir().await?;

        let name = match name.cloned().or_else(|| ArtifactName::from_path(src.path())) {
            Some(name) => name,
            None => {
                warn!("Cannot derive an artifact name from {}", src);
                return Ok(ResolvedArtifact::verify(src.path()));
            }
        };
        let dst = cache_dir.join(&name);

        if !src.exists() {
            debug!("Source {} vanished before copying", src);
            return Ok(None);
        }

        if dst.exists() {
            debug!("{} already cached at {}", name, dst.display());
            return Ok(ResolvedArtifact::verify(src.path()));
        }

        match copy_preserving(src.path(), &dst).await {
            Ok(()) => {
                info!("Copied upscaler from {} to {}", src, dst.display());
                Ok(ResolvedArtifact::verify(dst))
            }
            Err(e) => {
                warn!("Error copying upscaler: {}", e);
                // Don't leave a truncated file behind to shadow future copies
                if dst.exists() {
                    if let Err(e) = tokio::fs::remove_file(&dst).await {
                        debug!("Could not remove partial copy {}: {}", dst.display(), e);
                    }
                }
                Ok(ResolvedArtifact::verify(src.path()))
            }
        }
    }
}

/// Copy contents and permissions, then carry over access and modification times
async fn copy_preserving(src: &Path, dst: &Path) -> SetupResult<()> {
    let copy_err = |e| SetupError::CopyFailed {
        src: src.to_path_buf(),
        dst: dst.to_path_buf(),
        source: e,
    };

    tokio::fs::copy(src, dst).await.map_err(copy_err)?;

    let (src, dst) = (src.to_path_buf(), dst.to_path_buf());
    let times = tokio::task::spawn_blocking(move || -> std::io::Result<()> {
        let meta = fs::metadata(&src)?;
        let mut times = FileTimes::new().set_modified(meta.modified()?);
        if let Ok(accessed) = meta.accessed() {
            times = times.set_accessed(accessed);
        }
        File::options().write(true).open(&dst)?.set_times(times)
    })
    .await;

    // Timestamps are a nicety; the copy itself already succeeded
    match times {
        Ok(Ok(())) => {}
        Ok(Err(e)) => debug!("Could not preserve timestamps: {}", e),
        Err(e) => debug!("Timestamp task failed: {}", e),
    }
    Ok(())
}

//! End-to-end upscaler setup: dependencies, search, cache

use crate::artifact::{ArtifactName, ResolvedArtifact};
use crate::config::Config;
use crate::deps::DependencyBootstrapper;
use crate::error::SetupResult;
use crate::install::Installer;
use crate::locate::{Locator, SearchPath, SystemSearch};
use crate::ui::UiContext;
use std::path::Path;
use tracing::{info, warn};

/// The three setup components, run in a fixed order
pub struct UpscalerSetup {
    bootstrapper: Option<DependencyBootstrapper>,
    locator: Locator,
    installer: Installer,
}

impl UpscalerSetup {
    pub fn new(bootstrapper: DependencyBootstrapper, locator: Locator, installer: Installer) -> Self {
        Self {
            bootstrapper: Some(bootstrapper),
            locator,
            installer,
        }
    }

    /// Build every component from configuration, rooted at `root`
    pub fn from_config(root: &Path, config: &Config, ui: &UiContext) -> Self {
        let search = &config.search;
        let system = search
            .system_search
            .then(|| SystemSearch::from_config(search).with_progress(ui.clone()));

        Self::new(
            DependencyBootstrapper::from_config(&config.dependencies).with_progress(ui.clone()),
            Locator::tiered(SearchPath::from_config(root, search), system),
            Installer::from_config(root, &config.install),
        )
    }

    /// Skip the dependency gate entirely
    pub fn without_dependencies(mut self) -> Self {
        self.bootstrapper = None;
        self
    }

    pub fn installer(&self) -> &Installer {
        &self.installer
    }

    /// Ensure dependencies, find `name`, and cache it.
    ///
    /// `Ok(None)` covers every expected failure (dependencies unavailable,
    /// artifact not found, source vanished); the log says which. `Err` is
    /// reserved for an unusable cache directory.
    pub async fn setup(&self, name: &ArtifactName) -> SetupResult<Option<ResolvedArtifact>> {
        if let Some(bootstrapper) = &self.bootstrapper {
            if !bootstrapper.ensure().await {
                warn!("Failed to install upscaler dependencies");
                return Ok(None);
            }
        }

        let Some(found) = self.locator.find(name).await else {
            warn!("Could not find upscaler file: {}", name);
            return Ok(None);
        };

        let result = self.installer.materialize(&found, Some(name)).await?;
        if let Some(ref path) = result {
            info!("Upscaler {} ready at {}", name, path);
        }
        Ok(result)
    }
}

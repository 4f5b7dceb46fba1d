//! Runtime dependency bootstrap
//!
//! The upscaler weights are only useful if the libraries that load them are
//! importable. [`DependencyBootstrapper`] checks for them and installs them
//! through the package manager when missing.

pub mod python;

pub use python::PythonEnv;

use crate::config::DependencyConfig;
use crate::error::SetupResult;
use crate::ui::{TaskSpinner, UiContext};
use async_trait::async_trait;
use tracing::{error, info};

/// Libraries required to use an artifact
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencySet {
    /// Names that must be importable
    pub modules: Vec<String>,
    /// Package names that provide them
    pub packages: Vec<String>,
}

impl DependencySet {
    pub fn new(modules: Vec<String>, packages: Vec<String>) -> Self {
        Self { modules, packages }
    }

    pub fn from_config(config: &DependencyConfig) -> Self {
        Self::new(config.modules.clone(), config.packages.clone())
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty() && self.packages.is_empty()
    }
}

/// Checks whether a dependency set is usable
#[async_trait]
pub trait CapabilityCheck: Send + Sync {
    /// True if every module in `deps` can be loaded
    async fn is_present(&self, deps: &DependencySet) -> bool;
}

/// Installs packages into the runtime environment
#[async_trait]
pub trait PackageInstaller: Send + Sync {
    /// Install `packages`, waiting for completion
    async fn install(&self, packages: &[String]) -> SetupResult<()>;
}

/// What `try_ensure` had to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DependencyStatus {
    /// Everything was importable already
    AlreadyPresent,
    /// The package manager installed the set
    Installed,
}

/// Makes sure a dependency set is installed
pub struct DependencyBootstrapper {
    deps: DependencySet,
    check: Box<dyn CapabilityCheck>,
    installer: Box<dyn PackageInstaller>,
    ui: Option<UiContext>,
}

impl DependencyBootstrapper {
    pub fn new(
        deps: DependencySet,
        check: impl CapabilityCheck + 'static,
        installer: impl PackageInstaller + 'static,
    ) -> Self {
        Self {
            deps,
            check: Box::new(check),
            installer: Box::new(installer),
            ui: None,
        }
    }

    /// Bootstrapper backed by the configured Python interpreter
    pub fn from_config(config: &DependencyConfig) -> Self {
        let python = PythonEnv::new(config.python.clone());
        Self::new(DependencySet::from_config(config), python.clone(), python)
    }

    /// Show a spinner while packages install, in interactive terminals only
    pub fn with_progress(mut self, ctx: UiContext) -> Self {
        self.ui = Some(ctx);
        self
    }

    /// Check, then install if needed, reporting exactly what happened
    pub async fn try_ensure(&self) -> SetupResult<DependencyStatus> {
        if self.deps.is_empty() || self.check.is_present(&self.deps).await {
            info!("Upscaler dependencies already installed");
            return Ok(DependencyStatus::AlreadyPresent);
        }

        info!("Installing upscaler dependencies: {}", self.deps.packages.join(", "));

        // Plain-text progress lines would interleave with pip's own output
        let mut spinner = self
            .ui
            .as_ref()
            .filter(|ui| ui.use_fancy_output())
            .map(TaskSpinner::new);
        if let Some(spinner) = spinner.as_mut() {
            spinner.start("Installing upscaler dependencies...");
        }

        let result = self.installer.install(&self.deps.packages).await;

        if let Some(spinner) = spinner.as_mut() {
            match &result {
                Ok(()) => spinner.stop("Upscaler dependencies installed"),
                Err(e) => spinner.stop_error(&format!("Dependency install failed: {}", e)),
            }
        }

        result?;
        info!("Upscaler dependencies installed successfully");
        Ok(DependencyStatus::Installed)
    }

    /// Best-effort gate: true if the dependencies are available afterwards.
    ///
    /// Never fails; install errors are logged and reported as `false`.
    pub async fn ensure(&self) -> bool {
        match self.try_ensure().await {
            Ok(_) => true,
            Err(e) => {
                error!("Error installing upscaler dependencies: {}", e);
                false
            }
        }
    }
}

//! Configuration schema for upscaler-setup
//!
//! Configuration is stored at `~/.config/upscaler-setup/config.toml`

use serde::{Deserialize, Serialize};
use std::path::{Component, PathBuf};

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General settings
    pub general: GeneralConfig,

    /// Install root and cache layout
    pub install: InstallConfig,

    /// Artifact search settings
    pub search: SearchConfig,

    /// Runtime library dependencies
    pub dependencies: DependencyConfig,
}

/// General application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log format: "text" or "json"
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_format: "text".to_string(),
        }
    }
}

/// Install root and cache directory layout
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InstallConfig {
    /// Install root; the current directory when unset
    pub root: Option<PathBuf>,

    /// Cache directory, relative to the install root
    pub cache_subdir: PathBuf,
}

impl Default for InstallConfig {
    fn default() -> Self {
        Self {
            root: None,
            cache_subdir: PathBuf::from("models/upscalers"),
        }
    }
}

impl InstallConfig {
    /// Resolve the effective install root as an absolute path.
    ///
    /// Relative roots are taken against the current directory with `.`
    /// components dropped, so `parent()` names the real parent directory.
    pub fn resolve_root(&self) -> PathBuf {
        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        let root = match self.root {
            Some(ref root) => cwd.join(root),
            None => cwd,
        };
        root.components()
            .filter(|c| !matches!(c, Component::CurDir))
            .collect()
    }
}

/// Artifact search settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Search the standard locations under the install root
    pub include_defaults: bool,

    /// Extra directories, searched after the standard ones
    pub extra_paths: Vec<PathBuf>,

    /// Absolute mount points searched after the install-root locations
    pub mount_points: Vec<PathBuf>,

    /// Fall back to a filesystem-wide search
    pub system_search: bool,

    /// Where the filesystem-wide search starts
    pub system_root: PathBuf,

    /// Time limit for the filesystem-wide search
    pub timeout_secs: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            include_defaults: true,
            extra_paths: Vec::new(),
            mount_points: vec![
                PathBuf::from("/workspace/models/upscalers"),
                PathBuf::from("/workspace"),
            ],
            system_search: true,
            system_root: PathBuf::from("/"),
            timeout_secs: 30,
        }
    }
}

/// Runtime library dependencies
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DependencyConfig {
    /// Python interpreter used for the import check and pip
    pub python: String,

    /// Modules that must be importable
    pub modules: Vec<String>,

    /// Packages to install when any module is missing
    pub packages: Vec<String>,
}

impl Default for DependencyConfig {
    fn default() -> Self {
        Self {
            python: "python3".to_string(),
            modules: vec!["basicsr".to_string(), "realesrgan".to_string()],
            packages: vec!["basicsr".to_string(), "realesrgan".to_string()],
        }
    }
}

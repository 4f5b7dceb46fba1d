//! upscaler-setup - locate and cache upscaler model weights
//!
//! Makes sure the libraries an upscaler needs are installed, finds the
//! weights file by name with a tiered search, and copies it into the
//! install root's canonical model directory.

pub mod artifact;
pub mod cli;
pub mod config;
pub mod deps;
pub mod error;
pub mod install;
pub mod locate;
pub mod process;
pub mod setup;
pub mod ui;

pub use artifact::{ArtifactName, ResolvedArtifact};
pub use error::{SetupError, SetupResult};
pub use setup::UpscalerSetup;

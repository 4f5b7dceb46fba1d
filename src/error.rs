//! Error types for upscaler-setup
//!
//! All modules use `SetupResult<T>` as their return type. Component
//! boundaries convert most of these into sentinel values (`None`, `false`);
//! only cache directory creation is allowed to surface to the CLI.

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Result type alias for upscaler-setup operations
pub type SetupResult<T> = Result<T, SetupError>;

/// All errors that can occur while setting up an upscaler
#[derive(Error, Debug)]
pub enum SetupError {
    // Input errors
    #[error("Invalid artifact name '{name}': {reason}")]
    InvalidName { name: String, reason: String },

    // Configuration errors
    #[error("Invalid configuration at {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    // Install errors
    #[error("Failed to create cache directory {path}: {source}")]
    CacheDirCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to copy {src} to {dst}: {source}")]
    CopyFailed {
        src: PathBuf,
        dst: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Dependency errors
    #[error("Dependency install failed: {command}, exit code: {code}")]
    DependencyInstall { command: String, code: i32 },

    #[error("Interpreter not found: {0}")]
    InterpreterNotFound(String),

    // IO errors
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    // Process errors
    #[error("Command failed: {command}")]
    CommandFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Command timed out after {after:?}: {command}")]
    CommandTimeout { command: String, after: Duration },

    #[error("Process terminated by signal")]
    ProcessSignaled,

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SetupError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Create a command failed error
    pub fn command_failed(command: impl Into<String>, source: std::io::Error) -> Self {
        Self::CommandFailed {
            command: command.into(),
            source,
        }
    }

    /// Get actionable hint for the error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::CacheDirCreate { .. } => {
                Some("Check write permissions on the install root, or pass --root")
            }
            Self::InterpreterNotFound(_) => {
                Some("Install Python 3 or set dependencies.python in the config")
            }
            Self::InvalidName { .. } => Some("Pass a bare file name such as RealESRGAN_x4plus.pth"),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = SetupError::DependencyInstall {
            command: "python3 -m pip install basicsr".to_string(),
            code: 1,
        };
        assert!(err.to_string().contains("exit code: 1"));
    }

    #[test]
    fn timeout_display() {
        let err = SetupError::CommandTimeout {
            command: "find /".to_string(),
            after: Duration::from_secs(30),
        };
        assert_eq!(err.to_string(), "Command timed out after 30s: find /");
    }

    #[test]
    fn error_hint() {
        let err = SetupError::CacheDirCreate {
            path: PathBuf::from("/root/models"),
            source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        };
        assert!(err.hint().unwrap().contains("--root"));
        assert_eq!(SetupError::ProcessSignaled.hint(), None);
    }
}

//! Artifact names and resolved artifact paths

use crate::error::{SetupError, SetupResult};
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

/// A bare file name identifying an artifact
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ArtifactName(String);

impl ArtifactName {
    /// Validate and wrap an artifact name.
    ///
    /// The name is compared against file base names, so it may not be empty,
    /// `.` or `..`, or contain a path separator.
    pub fn new(name: impl Into<String>) -> SetupResult<Self> {
        let name = name.into();
        let reason = if name.is_empty() {
            Some("name is empty")
        } else if name == "." || name == ".." {
            Some("name refers to a directory")
        } else if name.contains('/') || name.contains(std::path::MAIN_SEPARATOR) {
            Some("name contains a path separator")
        } else if name.contains('\0') {
            Some("name contains a NUL byte")
        } else {
            None
        };

        match reason {
            Some(reason) => Err(SetupError::InvalidName {
                name,
                reason: reason.to_string(),
            }),
            None => Ok(Self(name)),
        }
    }

    /// Take the base name of a path as an artifact name
    pub fn from_path(path: &Path) -> Option<Self> {
        let file_name = path.file_name()?.to_str()?;
        Self::new(file_name).ok()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ArtifactName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<Path> for ArtifactName {
    fn as_ref(&self) -> &Path {
        Path::new(&self.0)
    }
}

/// A path to an artifact file that existed when it was resolved
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ResolvedArtifact(PathBuf);

impl ResolvedArtifact {
    /// Wrap `path` if it currently names a regular file
    pub fn verify(path: impl Into<PathBuf>) -> Option<Self> {
        let path = path.into();
        path.is_file().then_some(Self(path))
    }

    pub fn path(&self) -> &Path {
        &self.0
    }

    /// Whether the file is still present
    pub fn exists(&self) -> bool {
        self.0.is_file()
    }
}

impl fmt::Display for ResolvedArtifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

impl AsRef<Path> for ResolvedArtifact {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn accepts_bare_file_names() {
        let name = ArtifactName::new("RealESRGAN_x4plus.pth").unwrap();
        assert_eq!(name.as_str(), "RealESRGAN_x4plus.pth");
        assert_eq!(name.to_string(), "RealESRGAN_x4plus.pth");
    }

    #[test]
    fn rejects_unusable_names() {
        for bad in ["", ".", "..", "models/x4.pth", "nul\0.pth"] {
            assert!(
                matches!(ArtifactName::new(bad), Err(SetupError::InvalidName { .. })),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn name_from_path_uses_base_name() {
        let name = ArtifactName::from_path(Path::new("/workspace/models/x4.pth")).unwrap();
        assert_eq!(name.as_str(), "x4.pth");
        assert!(ArtifactName::from_path(Path::new("/")).is_none());
    }

    #[test]
    fn verify_requires_a_file() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("x4.pth");
        std::fs::write(&file, b"weights").unwrap();

        assert!(ResolvedArtifact::verify(&file).is_some());
        assert!(ResolvedArtifact::verify(temp.path()).is_none());
        assert!(ResolvedArtifact::verify(temp.path().join("missing.pth")).is_none());
    }
}

//! Filesystem-wide fallback search
//!
//! Shells out to `find`, bounded by a time limit. This tier is best-effort:
//! a timeout, spawn failure or empty result all mean "not found".

use super::Resolver;
use crate::artifact::{ArtifactName, ResolvedArtifact};
use crate::config::SearchConfig;
use crate::error::{SetupError, SetupResult};
use crate::process;
use crate::ui::{TaskSpinner, UiContext};
use async_trait::async_trait;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, info};

/// Default ceiling for the filesystem-wide search
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Time-limited `find` from a root directory, skipping hidden paths
pub struct SystemSearch {
    root: PathBuf,
    timeout: Duration,
    ui: Option<UiContext>,
}

impl SystemSearch {
    /// Search everything under `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            timeout: DEFAULT_TIMEOUT,
            ui: None,
        }
    }

    /// Build from a config section
    pub fn from_config(config: &SearchConfig) -> Self {
        Self::new(config.system_root.clone()).with_timeout(Duration::from_secs(config.timeout_secs))
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Show a spinner while the search runs
    pub fn with_progress(mut self, ctx: UiContext) -> Self {
        self.ui = Some(ctx);
        self
    }

    fn command(&self, name: &ArtifactName) -> Command {
        let pattern = escape_glob(name.as_str());
        let mut cmd = Command::new("find");
        cmd.arg(&self.root)
            .args(["-name", pattern.as_str(), "-type", "f", "-not", "-path", "*/.*"]);
        cmd
    }

    async fn search(&self, name: &ArtifactName) -> SetupResult<Option<ResolvedArtifact>> {
        let Some(line) = process::first_line_within(self.command(name), self.timeout).await? else {
            return Ok(None);
        };

        let path = Path::new(&line);
        if path.file_name() != Some(OsStr::new(name.as_str())) {
            debug!("find reported {} which is not named {}", line, name);
            return Ok(None);
        }

        let found = ResolvedArtifact::verify(path);
        if found.is_none() {
            debug!("find reported {} but it is not a file", line);
        }
        Ok(found)
    }
}

/// Escape `find -name` pattern characters so the name matches literally
fn escape_glob(name: &str) -> String {
    let mut escaped = String::with_capacity(name.len());
    for c in name.chars() {
        if matches!(c, '*' | '?' | '[' | ']' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[async_trait]
impl Resolver for SystemSearch {
    fn label(&self) -> &'static str {
        "system search"
    }

    async fn resolve(&self, name: &ArtifactName) -> SetupResult<Option<ResolvedArtifact>> {
        let notice = format!("Searching for {} in the file system...", name);
        info!("{}", notice);

        let mut spinner = self.ui.as_ref().map(TaskSpinner::new);
        if let Some(spinner) = spinner.as_mut() {
            spinner.start(&notice);
        }

        let result = self.search(name).await;

        if let Some(spinner) = spinner.as_mut() {
            match &result {
                Ok(Some(found)) => spinner.stop(&format!("Found {}", found)),
                Ok(None) => spinner.stop_warn(&format!("{} not found on this system", name)),
                Err(SetupError::CommandTimeout { after, .. }) => spinner.stop_warn(&format!(
                    "Gave up searching after {}s",
                    after.as_secs()
                )),
                Err(e) => spinner.stop_error(&format!("Search failed: {}", e)),
            }
        }

        result
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    /// Temp dir whose full path has no hidden component.
    ///
    /// `-not -path '*/.*'` applies to the whole path, so a TMPDIR such as
    /// `~/.cache/tmp` would hide every file. Falls back to the crate
    /// directory, and returns `None` if that is hidden too.
    fn visible_tempdir() -> Option<TempDir> {
        let candidates = [std::env::temp_dir(), PathBuf::from(env!("CARGO_MANIFEST_DIR"))];
        let base = candidates.into_iter().find(|dir| {
            dir.components()
                .all(|c| !c.as_os_str().to_string_lossy().starts_with('.'))
        })?;
        tempfile::Builder::new().prefix("sysfind").tempdir_in(base).ok()
    }

    fn name(s: &str) -> ArtifactName {
        ArtifactName::new(s).unwrap()
    }

    #[test]
    fn command_excludes_hidden_paths() {
        let search = SystemSearch::new("/");
        let rendered = process::describe(&search.command(&name("x4.pth")));
        assert_eq!(rendered, "find / -name x4.pth -type f -not -path */.*");
    }

    #[test]
    fn pattern_characters_are_escaped() {
        assert_eq!(escape_glob("x4.pth"), "x4.pth");
        assert_eq!(escape_glob("x4*.pth"), "x4\\*.pth");
        assert_eq!(escape_glob("[a]?.pth"), "\\[a\\]\\?.pth");
    }

    #[tokio::test]
    async fn wildcard_name_matches_literally() {
        let Some(temp) = visible_tempdir() else {
            return;
        };
        let other = temp.path().join("deep").join("x4plus.pth");
        fs::create_dir_all(other.parent().unwrap()).unwrap();
        fs::write(&other, b"weights").unwrap();

        let search = SystemSearch::new(temp.path());
        assert!(search.resolve(&name("x4*.pth")).await.unwrap().is_none());

        let literal = temp.path().join("x4*.pth");
        fs::write(&literal, b"weights").unwrap();
        let found = search.resolve(&name("x4*.pth")).await.unwrap();
        assert_eq!(found.unwrap().path(), literal);
    }

    #[tokio::test]
    async fn finds_nested_file() {
        let Some(temp) = visible_tempdir() else {
            return;
        };
        let target = temp.path().join("deep").join("x4.pth");
        fs::create_dir_all(target.parent().unwrap()).unwrap();
        fs::write(&target, b"weights").unwrap();

        let found = SystemSearch::new(temp.path())
            .resolve(&name("x4.pth"))
            .await
            .unwrap();
        assert_eq!(found.unwrap().path(), target);
    }

    #[tokio::test]
    async fn skips_hidden_directories() {
        let Some(temp) = visible_tempdir() else {
            return;
        };
        let hidden = temp.path().join(".cache").join("x4.pth");
        fs::create_dir_all(hidden.parent().unwrap()).unwrap();
        fs::write(&hidden, b"weights").unwrap();

        let found = SystemSearch::new(temp.path())
            .resolve(&name("x4.pth"))
            .await
            .unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn absent_file_is_none() {
        let Some(temp) = visible_tempdir() else {
            return;
        };
        let found = SystemSearch::new(temp.path())
            .with_timeout(Duration::from_secs(5))
            .resolve(&name("ghost.pth"))
            .await
            .unwrap();
        assert!(found.is_none());
    }
}

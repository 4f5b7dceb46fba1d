//! Python interpreter as import check and pip as installer

use super::{CapabilityCheck, DependencySet, PackageInstaller};
use crate::error::{SetupError, SetupResult};
use crate::process;
use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, warn};

/// A Python interpreter, used both to test imports and to run pip
#[derive(Debug, Clone)]
pub struct PythonEnv {
    interpreter: String,
}

impl PythonEnv {
    pub fn new(interpreter: impl Into<String>) -> Self {
        Self {
            interpreter: interpreter.into(),
        }
    }

    /// `python -c` script importing each module on its own line
    fn import_script(modules: &[String]) -> Option<String> {
        if let Some(bad) = modules.iter().find(|m| !is_module_path(m)) {
            warn!("Refusing to import invalid module name '{}'", bad);
            return None;
        }
        Some(
            modules
                .iter()
                .map(|m| format!("import {}", m))
                .collect::<Vec<_>>()
                .join("\n"),
        )
    }

    fn install_command(&self, packages: &[String]) -> Command {
        let mut cmd = Command::new(&self.interpreter);
        cmd.args(["-m", "pip", "install"]).args(packages);
        cmd
    }
}

/// Dotted Python identifier, e.g. `basicsr.archs`
fn is_module_path(name: &str) -> bool {
    !name.is_empty()
        && name.split('.').all(|part| {
            let mut chars = part.chars();
            matches!(chars.next(), Some(c) if c == '_' || c.is_ascii_alphabetic())
                && chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
        })
}

#[async_trait]
impl CapabilityCheck for PythonEnv {
    async fn is_present(&self, deps: &DependencySet) -> bool {
        let Some(script) = Self::import_script(&deps.modules) else {
            return false;
        };

        let mut cmd = Command::new(&self.interpreter);
        cmd.arg("-c").arg(&script);

        match process::run_quiet(cmd).await {
            Ok(present) => present,
            Err(e) => {
                debug!("Import check failed: {}", e);
                false
            }
        }
    }
}

#[async_trait]
impl PackageInstaller for PythonEnv {
    async fn install(&self, packages: &[String]) -> SetupResult<()> {
        let cmd = self.install_command(packages);
        let command = process::describe(&cmd);

        let status = process::run_visible(cmd).await.map_err(|e| match e {
            SetupError::CommandFailed { source, .. }
                if source.kind() == std::io::ErrorKind::NotFound =>
            {
                SetupError::InterpreterNotFound(self.interpreter.clone())
            }
            other => other,
        })?;

        if status.success() {
            Ok(())
        } else {
            match status.code() {
                Some(code) => Err(SetupError::DependencyInstall { command, code }),
                None => Err(SetupError::ProcessSignaled),
            }
        }
    }
}

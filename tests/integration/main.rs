//! Integration tests for upscaler-setup

mod cli_tests {
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;
    use std::fs;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    fn upscaler_setup() -> Command {
        cargo_bin_cmd!("upscaler-setup")
    }

    /// Config that searches only `dirs`, with no filesystem-wide fallback
    fn write_config(temp: &TempDir, dirs: &[&Path], python: &str) -> PathBuf {
        let extra = dirs
            .iter()
            .map(|d| format!("{:?}", d.display().to_string()))
            .collect::<Vec<_>>()
            .join(", ");
        let path = temp.path().join("config.toml");
        fs::write(
            &path,
            format!(
                "[search]\ninclude_defaults = false\nextra_paths = [{extra}]\nsystem_search = false\n\n\
                 [dependencies]\npython = \"{python}\"\n"
            ),
        )
        .unwrap();
        path
    }

    fn dirs(temp: &TempDir) -> (PathBuf, PathBuf, PathBuf) {
        let a = temp.path().join("A");
        let b = temp.path().join("B");
        let root = temp.path().join("root");
        for dir in [&a, &b, &root] {
            fs::create_dir_all(dir).unwrap();
        }
        (a, b, root)
    }

    #[test]
    fn help_displays() {
        upscaler_setup()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains(
                "Locate, cache, and prepare upscaler model weights",
            ));
    }

    #[test]
    fn version_displays() {
        upscaler_setup()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("upscaler-setup"));
    }

    #[test]
    fn name_is_required() {
        upscaler_setup().assert().code(2);
    }

    #[test]
    fn rejects_path_like_names() {
        let temp = TempDir::new().unwrap();
        let config = write_config(&temp, &[], "python3");
        upscaler_setup()
            .arg("--config")
            .arg(&config)
            .args(["--skip-deps", "models/x4.pth"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid artifact name"));
    }

    #[test]
    fn invalid_config_is_reported() {
        let temp = TempDir::new().unwrap();
        let config = temp.path().join("config.toml");
        fs::write(&config, "[search]\ntimeout_secs = \"soon\"\n").unwrap();
        upscaler_setup()
            .arg("--config")
            .arg(&config)
            .arg("x4.pth")
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid configuration"));
    }

    #[test]
    fn copies_into_cache() {
        let temp = TempDir::new().unwrap();
        let (a, b, root) = dirs(&temp);
        fs::write(b.join("model.pth"), b"weights").unwrap();
        let config = write_config(&temp, &[&a, &b], "python3");

        upscaler_setup()
            .arg("--config")
            .arg(&config)
            .arg("--root")
            .arg(&root)
            .args(["--skip-deps", "model.pth"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Upscaler set up successfully"));

        let cached = root.join("models").join("upscalers").join("model.pth");
        assert_eq!(fs::read(cached).unwrap(), b"weights");
    }

    #[test]
    fn json_output() {
        let temp = TempDir::new().unwrap();
        let (a, _, root) = dirs(&temp);
        fs::write(a.join("model.pth"), b"weights").unwrap();
        let config = write_config(&temp, &[&a], "python3");

        let output = upscaler_setup()
            .arg("--config")
            .arg(&config)
            .arg("--root")
            .arg(&root)
            .args(["--skip-deps", "--format", "json", "model.pth"])
            .output()
            .unwrap();

        assert!(output.status.success());
        let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(json["name"], "model.pth");
        assert_eq!(json["status"], "ready");
        let expected = root.join("models").join("upscalers").join("model.pth");
        assert_eq!(json["path"], expected.display().to_string());
    }

    #[test]
    fn missing_artifact_fails() {
        let temp = TempDir::new().unwrap();
        let (a, b, root) = dirs(&temp);
        let config = write_config(&temp, &[&a, &b], "python3");

        upscaler_setup()
            .arg("--config")
            .arg(&config)
            .arg("--root")
            .arg(&root)
            .args(["--skip-deps", "ghost.pth"])
            .assert()
            .code(1)
            .stdout(predicate::str::contains("Failed to set up upscaler: ghost.pth"));

        assert!(!root.join("models").join("upscalers").join("ghost.pth").exists());
    }

    #[test]
    fn dependency_failure_stops_setup() {
        let temp = TempDir::new().unwrap();
        let (a, _, root) = dirs(&temp);
        fs::write(a.join("model.pth"), b"weights").unwrap();
        let config = write_config(&temp, &[&a], "no-such-python-7c1e");

        upscaler_setup()
            .arg("--config")
            .arg(&config)
            .arg("--root")
            .arg(&root)
            .arg("model.pth")
            .assert()
            .code(1)
            .stdout(predicate::str::contains("Failed to set up upscaler: model.pth"));

        assert!(!root.join("models").exists());
    }
}

//! Building the workspace's contract WASM artifacts

use std::fs;

use glob::glob;
use tracing::info;

use crate::{
    config::Config,
    errors::ScriptError,
    runner::{run_checked, ProcessRunner},
};

/// Build all contracts, removing outdated `.wasm` files first so stale
/// artifacts don't accidentally get deployed, bound, and imported later
pub fn build_contracts(config: &Config, runner: &dyn ProcessRunner) -> Result<(), ScriptError> {
    let release_dir = config.release_dir();
    remove_files(&release_dir.join("*.wasm").to_string_lossy())?;
    remove_files(&release_dir.join("*.d").to_string_lossy())?;

    run_checked(runner, &config.tool, &["contract", "build"])
}

/// Remove every file matching `pattern`
fn remove_files(pattern: &str) -> Result<(), ScriptError> {
    info!("remove {}", pattern);
    let entries =
        glob(pattern).map_err(|e| ScriptError::ContractCompilation(e.to_string()))?;
    for entry in entries {
        let path = entry.map_err(|e| ScriptError::ContractCompilation(e.to_string()))?;
        fs::remove_file(&path)
            .map_err(|e| ScriptError::ContractCompilation(e.to_string()))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::fs;

    use tempfile::TempDir;

    use super::*;
    use crate::config::Overrides;
    use crate::runner::fake::FakeRunner;

    /// A config rooted at a fresh temporary project dir
    fn test_config(project: &TempDir) -> Config {
        let vars = HashMap::from([
            ("STELLAR_ACCOUNT".to_string(), "alice".to_string()),
            (
                "STELLAR_NETWORK_PASSPHRASE".to_string(),
                "Test SDF Network ; September 2015".to_string(),
            ),
            ("STELLAR_NETWORK".to_string(), "testnet".to_string()),
        ]);
        Config::from_vars(
            vars,
            Overrides {
                project_dir: Some(project.path().to_path_buf()),
                ..Overrides::default()
            },
        )
        .unwrap()
    }

    #[test]
    fn purges_stale_artifacts_before_building() {
        let project = TempDir::new().unwrap();
        let config = test_config(&project);
        let release_dir = config.release_dir();
        fs::create_dir_all(&release_dir).unwrap();
        fs::write(release_dir.join("stale.wasm"), b"\0asm").unwrap();
        fs::write(release_dir.join("stale.d"), b"deps").unwrap();
        fs::write(release_dir.join("keep.txt"), b"notes").unwrap();

        let runner = FakeRunner::new();
        build_contracts(&config, &runner).unwrap();

        assert!(!release_dir.join("stale.wasm").exists());
        assert!(!release_dir.join("stale.d").exists());
        assert!(release_dir.join("keep.txt").exists());
        assert_eq!(runner.calls(), vec!["stellar contract build".to_string()]);
    }

    #[test]
    fn build_tool_failure_is_fatal() {
        let project = TempDir::new().unwrap();
        let config = test_config(&project);

        let runner = FakeRunner::new().fail_on("contract build");
        let err = build_contracts(&config, &runner).unwrap_err();
        assert!(matches!(err, ScriptError::CommandFailed { .. }));
    }
}

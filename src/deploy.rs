//! Deploying compiled contract artifacts to the configured network

use std::{fs, path::Path};

use glob::glob;
use tracing::info;

use crate::{
    config::{filename_no_extension, Config, PersistenceStrategy},
    errors::ScriptError,
    runner::{run_captured, run_checked, ProcessRunner},
};

/// Deploy every `.wasm` artifact in the release directory. These need to be
/// built first, so this should run after [`crate::build::build_contracts`].
/// A single deploy failure aborts the remaining pipeline.
pub fn deploy_contracts(config: &Config, runner: &dyn ProcessRunner) -> Result<(), ScriptError> {
    let pattern = config.release_dir().join("*.wasm");
    let entries = glob(&pattern.to_string_lossy())
        .map_err(|e| ScriptError::ContractDeployment(e.to_string()))?;

    for entry in entries {
        let wasm = entry.map_err(|e| ScriptError::ContractDeployment(e.to_string()))?;
        deploy_contract(config, runner, &wasm)?;
    }
    Ok(())
}

/// Deploy one contract, given its `.wasm` file, recording its identifier
/// under an alias based on the filename
fn deploy_contract(
    config: &Config,
    runner: &dyn ProcessRunner,
    wasm: &Path,
) -> Result<(), ScriptError> {
    let alias = filename_no_extension(wasm).ok_or_else(|| {
        ScriptError::ContractDeployment(format!("no filename in {}", wasm.display()))
    })?;
    let wasm_arg = wasm.to_string_lossy();

    match config.strategy {
        // The deploy tool writes the record itself, into the contract-ids
        // directory read back by the resolve stage.
        PersistenceStrategy::Structured => run_checked(
            runner,
            &config.tool,
            &[
                "contract",
                "deploy",
                "--wasm",
                &wasm_arg,
                "--ignore-checks",
                "--alias",
                &alias,
            ],
        ),
        PersistenceStrategy::Captured => {
            let stdout = run_captured(
                runner,
                &config.tool,
                &["contract", "deploy", "--wasm", &wasm_arg, "--ignore-checks"],
            )?;
            write_record(config, &alias, stdout.trim())
        }
    }
}

/// Persist a captured contract identifier under the alias
fn write_record(config: &Config, alias: &str, id: &str) -> Result<(), ScriptError> {
    let records_dir = config.records_dir();
    fs::create_dir_all(&records_dir)
        .map_err(|e| ScriptError::ContractDeployment(e.to_string()))?;
    let path = records_dir.join(format!("{}.txt", alias));
    fs::write(&path, id).map_err(|e| ScriptError::ContractDeployment(e.to_string()))?;
    info!("recorded {} as {}", id, alias);
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
    fn test_config(project: &TempDir, strategy: PersistenceStrategy) -> Config {
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
                strategy: Some(strategy),
                ..Overrides::default()
            },
        )
        .unwrap()
    }

    /// Put an empty artifact named `name` into the release dir
    fn touch_wasm(config: &Config, name: &str) {
        let release_dir = config.release_dir();
        fs::create_dir_all(&release_dir).unwrap();
        fs::write(release_dir.join(name), b"\0asm").unwrap();
    }

    #[test]
    fn structured_deploys_pass_the_alias_flag() {
        let project = TempDir::new().unwrap();
        let config = test_config(&project, PersistenceStrategy::Structured);
        touch_wasm(&config, "token.wasm");
        touch_wasm(&config, "token.release.wasm");

        let runner = FakeRunner::new();
        deploy_contracts(&config, &runner).unwrap();

        let calls = runner.calls();
        assert_eq!(calls.len(), 2);
        assert!(calls.iter().any(|c| c.ends_with("--alias token")));
        assert!(calls.iter().any(|c| c.ends_with("--alias token.release")));
        assert!(calls.iter().all(|c| c.contains("--ignore-checks")));
    }

    #[test]
    fn captured_deploys_write_trimmed_stdout_records() {
        let project = TempDir::new().unwrap();
        let config = test_config(&project, PersistenceStrategy::Captured);
        touch_wasm(&config, "token.wasm");

        let runner = FakeRunner::new().output_for("contract deploy", "CABC123\n");
        deploy_contracts(&config, &runner).unwrap();

        let record = config.records_dir().join("token.txt");
        assert_eq!(fs::read_to_string(record).unwrap(), "CABC123");
    }

    #[test]
    fn deploy_failure_aborts_the_remaining_artifacts() {
        let project = TempDir::new().unwrap();
        let config = test_config(&project, PersistenceStrategy::Structured);
        touch_wasm(&config, "alpha.wasm");
        touch_wasm(&config, "beta.wasm");

        let runner = FakeRunner::new().fail_on("alpha.wasm");
        let err = deploy_contracts(&config, &runner).unwrap_err();
        assert!(matches!(err, ScriptError::CommandFailed { .. }));
        assert_eq!(runner.calls().len(), 1);
    }
}

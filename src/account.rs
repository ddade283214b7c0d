//! Provisioning of the deployer account via the external key tool

use tracing::{info, warn};

use crate::{
    config::Config,
    errors::ScriptError,
    runner::{run_checked, ProcessRunner},
};

/// Generate a keypair for the configured deployer account and, unless
/// disabled, request network funding for it. Funding an already-funded
/// account makes the tool exit nonzero; that failure is swallowed so reruns
/// stay idempotent.
pub fn provision_account(
    config: &Config,
    runner: &dyn ProcessRunner,
) -> Result<(), ScriptError> {
    run_checked(runner, &config.tool, &["keys", "generate", &config.account])?;

    if config.fund {
        let args = [
            "keys",
            "fund",
            config.account.as_str(),
            "--network",
            config.network.as_str(),
        ];
        info!("Running command: {} {}", config.tool, args.join(" "));
        let output = runner.execute(&config.tool, &args, false)?;
        if !output.success() {
            warn!(
                "funding {} failed (already funded?), continuing",
                config.account
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::path::PathBuf;

    use super::*;
    use crate::config::Overrides;
    use crate::runner::fake::FakeRunner;

    /// A config pointing at a throwaway project dir
    fn test_config() -> Config {
        let vars = HashMap::from([
            ("STELLAR_ACCOUNT".to_string(), "alice".to_string()),
            (
                "STELLAR_NETWORK_PASSPHRASE".to_string(),
                "Standalone Network ; February 2017".to_string(),
            ),
            ("STELLAR_NETWORK".to_string(), "standalone".to_string()),
        ]);
        Config::from_vars(
            vars,
            Overrides {
                project_dir: Some(PathBuf::from("/tmp/project")),
                ..Overrides::default()
            },
        )
        .unwrap()
    }

    #[test]
    fn generates_then_funds_the_account() {
        let runner = FakeRunner::new();
        provision_account(&test_config(), &runner).unwrap();
        assert_eq!(
            runner.calls(),
            vec![
                "stellar keys generate alice".to_string(),
                "stellar keys fund alice --network standalone".to_string(),
            ]
        );
    }

    #[test]
    fn funding_failure_is_tolerated() {
        let runner = FakeRunner::new().fail_on("keys fund");
        provision_account(&test_config(), &runner).unwrap();
    }

    #[test]
    fn generation_failure_is_fatal() {
        let runner = FakeRunner::new().fail_on("keys generate");
        let err = provision_account(&test_config(), &runner).unwrap_err();
        assert!(matches!(err, ScriptError::CommandFailed { .. }));
    }
}

//! Pipeline stage entry points shared by the CLI commands

use tracing::info;

use crate::{
    account::provision_account,
    bindings::{bind_contracts, import_contracts},
    build::build_contracts,
    config::Config,
    contracts::resolve_contracts,
    deploy::deploy_contracts,
    errors::ScriptError,
    runner::ProcessRunner,
};

/// Run the whole pipeline: provision the deployer account, rebuild the
/// contracts, deploy them, then generate bindings packages and import
/// wrappers for everything deployed to the active network
pub fn initialize(config: &Config, runner: &dyn ProcessRunner) -> Result<(), ScriptError> {
    info!("###################### Initializing ########################");

    info!("Provisioning deployer account...");
    provision_account(config, runner)?;

    info!("Building contracts...");
    build_contracts(config, runner)?;

    info!("Deploying contracts...");
    deploy_contracts(config, runner)?;

    let contracts = resolve_contracts(config)?;

    info!("Generating bindings...");
    bind_contracts(config, runner, &contracts)?;

    info!("Generating imports...");
    import_contracts(config, &contracts)?;

    Ok(())
}

/// Generate bindings packages for every contract deployed to the active
/// network
pub fn bind_all(config: &Config, runner: &dyn ProcessRunner) -> Result<(), ScriptError> {
    let contracts = resolve_contracts(config)?;
    bind_contracts(config, runner, &contracts)
}

/// Generate import wrappers for every contract deployed to the active
/// network
pub fn import_all(config: &Config) -> Result<(), ScriptError> {
    let contracts = resolve_contracts(config)?;
    import_contracts(config, &contracts)
}

//! Generating typed client packages and the import wrappers that instantiate
//! them for the rest of the project

use std::fs;

use tracing::info;

use crate::{
    config::Config,
    constants::LOCAL_NETWORKS,
    contracts::ResolvedContract,
    errors::ScriptError,
    runner::{run_checked, ProcessRunner},
};

/// Generate a typed client package for every resolved contract. Each package
/// lands in `packages/<alias>`, replacing whatever was there before, and is
/// then installed and built in place unless disabled.
pub fn bind_contracts(
    config: &Config,
    runner: &dyn ProcessRunner,
    contracts: &[ResolvedContract],
) -> Result<(), ScriptError> {
    for contract in contracts {
        bind_contract(config, runner, contract)?;
    }
    Ok(())
}

/// Generate, and optionally build, the bindings package for one contract
fn bind_contract(
    config: &Config,
    runner: &dyn ProcessRunner,
    contract: &ResolvedContract,
) -> Result<(), ScriptError> {
    let package_dir = config.package_dir(&contract.alias);
    let package_arg = package_dir.to_string_lossy();

    run_checked(
        runner,
        &config.tool,
        &[
            "contract",
            "bindings",
            "typescript",
            "--contract-id",
            &contract.id,
            "--output-dir",
            &package_arg,
            "--overwrite",
        ],
    )?;

    if config.install_bindings {
        run_checked(runner, "npm", &["--prefix", &package_arg, "install"])?;
        run_checked(runner, "npm", &["--prefix", &package_arg, "run", "build"])?;
    }

    Ok(())
}

/// Create a file in `src/contracts` for every resolved contract, importing
/// the generated client package and instantiating it with the network
/// settings. The rest of the project imports its contract clients from
/// these files.
pub fn import_contracts(
    config: &Config,
    contracts: &[ResolvedContract],
) -> Result<(), ScriptError> {
    let imports_dir = config.imports_dir();
    fs::create_dir_all(&imports_dir)
        .map_err(|e| ScriptError::ImportGeneration(e.to_string()))?;

    for contract in contracts {
        let path = imports_dir.join(format!("{}.ts", contract.alias));
        fs::write(&path, import_source(config, contract))
            .map_err(|e| ScriptError::ImportGeneration(e.to_string()))?;
        info!("Created import for {}", contract.alias);
    }
    Ok(())
}

/// Render the import wrapper for one contract. Plain-HTTP transport is only
/// allowed when the configured network is a local development network.
fn import_source(config: &Config, contract: &ResolvedContract) -> String {
    let allow_http = if is_local_network(&config.network) {
        "  allowHttp: true,\n"
    } else {
        ""
    };
    format!(
        "import * as Client from '{alias}';\n\
         import {{ rpcUrl }} from './util';\n\
         \n\
         export default new Client.Client({{\n\
         \x20 contractId: '{id}',\n\
         \x20 networkPassphrase: '{passphrase}',\n\
         \x20 rpcUrl,\n\
         {allow_http}\
         }});\n",
        alias = contract.alias,
        id = contract.id,
        passphrase = config.network_passphrase,
        allow_http = allow_http,
    )
}

/// Whether `network` names a local development network
fn is_local_network(network: &str) -> bool {
    LOCAL_NETWORKS.contains(&network)
}

//! Pipeline configuration, assembled once at startup from the environment
//! (after `.env` loading) plus command-line overrides. The resulting
//! [`Config`] is immutable and passed to every stage; the scripts never
//! mutate the process environment.

use std::{
    collections::HashMap,
    env,
    path::{Path, PathBuf},
};

use clap::ValueEnum;

use crate::{
    constants::{CONTRACT_IDS_DIR, DEFAULT_TOOL, PUBLIC_ENV_PREFIX, WASM_TARGET_TRIPLE},
    errors::ScriptError,
};

/// How deployed contract identifiers are persisted between the deploy and
/// resolve stages
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum PersistenceStrategy {
    /// The deploy tool writes a per-alias JSON record mapping network
    /// passphrases to contract ids (`--alias` flag)
    Structured,
    /// The scripts capture the deploy tool's standard output and write it to
    /// a per-alias text file
    Captured,
}

impl PersistenceStrategy {
    /// File extension of deployment records under this strategy
    pub fn record_extension(&self) -> &'static str {
        match self {
            PersistenceStrategy::Structured => "json",
            PersistenceStrategy::Captured => "txt",
        }
    }
}

/// Command-line overrides applied on top of the environment
#[derive(Default)]
pub struct Overrides {
    /// Replacement for the default external tool name
    pub tool: Option<String>,
    /// Replacement for the default persistence strategy
    pub strategy: Option<PersistenceStrategy>,
    /// Project root; defaults to the current directory
    pub project_dir: Option<PathBuf>,
    /// Skip funding the deployer account
    pub no_fund: bool,
    /// Skip installing and building generated bindings packages
    pub no_install: bool,
}

/// Immutable configuration shared by every pipeline stage
#[derive(Debug)]
pub struct Config {
    /// Name of the deployer account passed to the key tool
    pub account: String,
    /// Passphrase of the active network, used to resolve deployment records
    pub network_passphrase: String,
    /// Named network alias, used for funding and the import templates
    pub network: String,
    /// External CLI tool performing builds, deploys and bindings generation
    pub tool: String,
    /// Deployment record persistence strategy
    pub strategy: PersistenceStrategy,
    /// Whether to fund the deployer account after generating it
    pub fund: bool,
    /// Whether to install and build generated bindings packages
    pub install_bindings: bool,
    /// Project root all paths are relative to
    pub project_dir: PathBuf,
}

impl Config {
    /// Build the configuration from the current process environment
    pub fn from_env(overrides: Overrides) -> Result<Self, ScriptError> {
        Self::from_vars(env::vars().collect(), overrides)
    }

    /// Build the configuration from an explicit variable snapshot. Variables
    /// prefixed `PUBLIC_` are also visible under their unprefixed name, so
    /// public and private configuration need not be duplicated.
    pub fn from_vars(
        vars: HashMap<String, String>,
        overrides: Overrides,
    ) -> Result<Self, ScriptError> {
        let vars = merge_public_vars(vars);

        let project_dir = match overrides.project_dir {
            Some(dir) => dir,
            None => env::current_dir()
                .map_err(|e| ScriptError::Configuration(e.to_string()))?,
        };

        Ok(Self {
            account: required_var(&vars, "ACCOUNT")?,
            network_passphrase: required_var(&vars, "NETWORK_PASSPHRASE")?,
            network: required_var(&vars, "NETWORK")?,
            tool: overrides.tool.unwrap_or_else(|| DEFAULT_TOOL.to_string()),
            strategy: overrides
                .strategy
                .unwrap_or(PersistenceStrategy::Structured),
            fund: !overrides.no_fund,
            install_bindings: !overrides.no_install,
            project_dir,
        })
    }

    /// Directory the build tool writes compiled artifacts into
    pub fn release_dir(&self) -> PathBuf {
        self.project_dir
            .join("target")
            .join(WASM_TARGET_TRIPLE)
            .join("release")
    }

    /// Directory holding the per-alias deployment records
    pub fn records_dir(&self) -> PathBuf {
        self.project_dir
            .join(format!(".{}", self.tool))
            .join(CONTRACT_IDS_DIR)
    }

    /// Directory the bindings package for `alias` is generated into
    pub fn package_dir(&self, alias: &str) -> PathBuf {
        self.project_dir.join("packages").join(alias)
    }

    /// Directory the contract import wrappers are written into
    pub fn imports_dir(&self) -> PathBuf {
        self.project_dir.join("src").join("contracts")
    }
}

/// Expose every `PUBLIC_`-prefixed variable under its unprefixed name as
/// well. The prefixed value wins over a separately set unprefixed one,
/// matching the historical scripts.
fn merge_public_vars(mut vars: HashMap<String, String>) -> HashMap<String, String> {
    let public: Vec<(String, String)> = vars
        .iter()
        .filter_map(|(key, value)| {
            key.strip_prefix(PUBLIC_ENV_PREFIX)
                .map(|stripped| (stripped.to_string(), value.clone()))
        })
        .collect();
    vars.extend(public);
    vars
}

/// Look up a required variable under its `STELLAR_` name, falling back to
/// the legacy `SOROBAN_` name
fn required_var(vars: &HashMap<String, String>, suffix: &str) -> Result<String, ScriptError> {
    let stellar = format!("STELLAR_{}", suffix);
    let soroban = format!("SOROBAN_{}", suffix);
    vars.get(&stellar)
        .or_else(|| vars.get(&soroban))
        .cloned()
        .ok_or_else(|| {
            ScriptError::Configuration(format!("{} (or {}) is not set", stellar, soroban))
        })
}

/// Get the filename without the final extension, used as the contract alias
pub fn filename_no_extension(path: &Path) -> Option<String> {
    path.file_stem().map(|stem| stem.to_string_lossy().into_owned())
}

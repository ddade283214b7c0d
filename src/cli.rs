//! Definitions of CLI arguments and commands for the deploy scripts

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::{
    account::provision_account,
    build::build_contracts,
    commands::{bind_all, import_all, initialize},
    config::{Config, Overrides, PersistenceStrategy},
    deploy::deploy_contracts,
    errors::ScriptError,
    runner::ProcessRunner,
};

/// Scripts for building, deploying and importing the project's Soroban contracts
#[derive(Parser)]
pub struct Cli {
    /// External CLI tool to invoke (`soroban` for legacy setups)
    #[arg(long)]
    pub tool: Option<String>,

    /// How deployed contract ids are persisted
    #[arg(long, value_enum)]
    pub strategy: Option<PersistenceStrategy>,

    /// Project root; defaults to the current directory
    #[arg(long)]
    pub project_dir: Option<PathBuf>,

    /// Skip funding the deployer account
    #[arg(long)]
    pub no_fund: bool,

    /// Skip installing and building generated bindings packages
    #[arg(long)]
    pub no_install: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Turn the global flags into configuration overrides
    pub fn overrides(&self) -> Overrides {
        Overrides {
            tool: self.tool.clone(),
            strategy: self.strategy,
            project_dir: self.project_dir.clone(),
            no_fund: self.no_fund,
            no_install: self.no_install,
        }
    }
}

/// The possible CLI commands
#[derive(Subcommand)]
pub enum Command {
    /// Run the whole pipeline: account, build, deploy, bindings, imports
    Initialize,
    /// Provision (and fund) the deployer account
    GenerateAccount,
    /// Rebuild all contract artifacts, purging stale ones first
    Build,
    /// Deploy every built artifact to the configured network
    Deploy,
    /// Generate typed client packages for deployed contracts
    Bindings,
    /// Generate import wrappers for deployed contracts
    Import,
}

impl Command {
    /// Run the command
    pub fn run(
        self,
        config: &Config,
        runner: &dyn ProcessRunner,
    ) -> Result<(), ScriptError> {
        match self {
            Command::Initialize => initialize(config, runner),
            Command::GenerateAccount => provision_account(config, runner),
            Command::Build => build_contracts(config, runner),
            Command::Deploy => deploy_contracts(config, runner),
            Command::Bindings => bind_all(config, runner),
            Command::Import => import_all(config),
        }
    }
}

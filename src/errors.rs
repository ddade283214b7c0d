//! Definitions of errors that can occur during the execution of the contract management scripts

use std::{
    error::Error,
    fmt::{self, Display, Formatter},
};

/// Errors that can occur during the execution of the contract management scripts
#[derive(Debug)]
pub enum ScriptError {
    /// Error assembling the configuration from the environment
    Configuration(String),
    /// Error launching an external tool
    CommandSpawn(String),
    /// An external tool exited with a nonzero status
    CommandFailed {
        /// The command line that failed
        command: String,
        /// The exit code, if the process exited normally
        code: Option<i32>,
    },
    /// Error provisioning the deployer account
    AccountProvisioning(String),
    /// Error compiling a contract
    ContractCompilation(String),
    /// Error deploying a contract
    ContractDeployment(String),
    /// Error reading or parsing a deployment record
    RecordParsing(String),
    /// Error generating contract bindings
    BindingsGeneration(String),
    /// Error writing a contract import file
    ImportGeneration(String),
}

impl ScriptError {
    /// Exit code the process should terminate with for this error. Failed
    /// external tools propagate their own exit status.
    pub fn exit_code(&self) -> i32 {
        match self {
            ScriptError::CommandFailed { code, .. } => code.unwrap_or(1),
            _ => 1,
        }
    }
}

impl Display for ScriptError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ScriptError::Configuration(s) => write!(f, "error building configuration: {}", s),
            ScriptError::CommandSpawn(s) => write!(f, "error launching command: {}", s),
            ScriptError::CommandFailed { command, code } => match code {
                Some(code) => write!(f, "command `{}` exited with status {}", command, code),
                None => write!(f, "command `{}` terminated by signal", command),
            },
            ScriptError::AccountProvisioning(s) => {
                write!(f, "error provisioning deployer account: {}", s)
            }
            ScriptError::ContractCompilation(s) => write!(f, "error compiling contract: {}", s),
            ScriptError::ContractDeployment(s) => write!(f, "error deploying contract: {}", s),
            ScriptError::RecordParsing(s) => {
                write!(f, "error parsing deployment record: {}", s)
            }
            ScriptError::BindingsGeneration(s) => {
                write!(f, "error generating contract bindings: {}", s)
            }
            ScriptError::ImportGeneration(s) => {
                write!(f, "error writing contract import: {}", s)
            }
        }
    }
}

impl Error for ScriptError {}

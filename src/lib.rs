//! Scripts for provisioning, building, deploying and importing the project's
//! Soroban smart contracts.

#![deny(clippy::missing_docs_in_private_items)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod constants;
pub mod errors;

/// Account provisioning utils
pub mod account;

/// Contract build utils
pub mod build;

/// Contract deploy utils
pub mod deploy;

/// Deployment record resolution
pub mod contracts;

/// Bindings and import generation
pub mod bindings;

/// External tool invocation
pub mod runner;

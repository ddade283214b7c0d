//! Resolving deployed contract identifiers from the persisted records

use std::{fs, path::Path};

use glob::glob;
use tracing::info;

use crate::{
    config::{filename_no_extension, Config, PersistenceStrategy},
    errors::ScriptError,
};

/// A contract deployed to the active network, ready for bindings and import
/// generation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedContract {
    /// Alias derived from the artifact filename
    pub alias: String,
    /// Deployed contract identifier on the active network
    pub id: String,
}

/// Get contract aliases and ids from the contract-ids directory, using the
/// record filename as the alias. Records without an id for the configured
/// network passphrase are skipped; the same records directory may hold
/// deployments for several networks.
pub fn resolve_contracts(config: &Config) -> Result<Vec<ResolvedContract>, ScriptError> {
    let pattern = config
        .records_dir()
        .join(format!("*.{}", config.strategy.record_extension()));
    let entries = glob(&pattern.to_string_lossy())
        .map_err(|e| ScriptError::RecordParsing(e.to_string()))?;

    let mut resolved = Vec::new();
    for entry in entries {
        let record = entry.map_err(|e| ScriptError::RecordParsing(e.to_string()))?;
        let alias = filename_no_extension(&record).ok_or_else(|| {
            ScriptError::RecordParsing(format!("no filename in {}", record.display()))
        })?;

        match contract_id(config, &record)? {
            Some(id) => resolved.push(ResolvedContract { alias, id }),
            None => info!(
                "skipping {}: no deployment recorded for the configured network",
                alias
            ),
        }
    }
    Ok(resolved)
}

/// Extract the identifier for the active network from one record, `None`
/// when the record has no entry for it
fn contract_id(config: &Config, record: &Path) -> Result<Option<String>, ScriptError> {
    let contents =
        fs::read_to_string(record).map_err(|e| ScriptError::RecordParsing(e.to_string()))?;

    match config.strategy {
        PersistenceStrategy::Structured => {
            let parsed = json::parse(&contents)
                .map_err(|e| ScriptError::RecordParsing(e.to_string()))?;
            Ok(parsed["ids"][config.network_passphrase.as_str()]
                .as_str()
                .map(str::to_string))
        }
        // Captured records predate per-network keying and hold a bare id.
        PersistenceStrategy::Captured => {
            let id = contents.trim();
            Ok((!id.is_empty()).then(|| id.to_string()))
        }
    }
}

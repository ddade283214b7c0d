//! Constants used in the deploy scripts

/// The target triple for the WASM build target
pub const WASM_TARGET_TRIPLE: &str = "wasm32-unknown-unknown";

/// Default CLI tool performing the builds, deployments and bindings generation
pub const DEFAULT_TOOL: &str = "stellar";

/// Legacy CLI tool name, used by older setups
pub const LEGACY_TOOL: &str = "soroban";

/// Directory (under `.stellar` or `.soroban`) where the deploy tool persists
/// per-alias deployment records
pub const CONTRACT_IDS_DIR: &str = "contract-ids";

/// Network names considered local development networks, for which the
/// generated imports allow plain-HTTP transport
pub const LOCAL_NETWORKS: [&str; 2] = ["standalone", "local"];

/// Prefix of environment variables that are also exposed under their
/// unprefixed name
pub const PUBLIC_ENV_PREFIX: &str = "PUBLIC_";

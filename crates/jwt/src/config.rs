//! Loading domains and keys from the environment.

use crate::{parse_chain_id, LocalSignerKey, SignerKey, TypedDataDomain};
use alloy::primitives::{Address, B256};
use std::env;

/// Default prefix of the domain environment variables.
pub const DEFAULT_DOMAIN_ENV_PREFIX: &str = "EIP712_DOMAIN";

/// Error loading configuration from the environment.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Error loading from environment variable
    #[error("missing or non-unicode environment variable: {0}")]
    Var(String),
    /// Error parsing environment variable
    #[error("failed to parse environment variable: {0}")]
    Parse(#[from] std::num::ParseIntError),
    /// Error parsing hex from environment variable
    #[error("failed to parse hex: {0}")]
    Hex(#[from] hex::FromHexError),
}

impl ConfigError {
    /// Missing or non-unicode env var.
    pub fn missing(s: &str) -> Self {
        ConfigError::Var(s.to_string())
    }
}

/// Load a variable from the environment
pub fn load_string(key: &str) -> Result<String, ConfigError> {
    env::var(key).map_err(|_| ConfigError::missing(key))
}

/// Load a variable from the environment
pub fn load_string_opt(key: &str) -> Option<String> {
    env::var(key).ok()
}

impl TypedDataDomain {
    /// Load a domain from the `EIP712_DOMAIN_*` variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_with_prefix(DEFAULT_DOMAIN_ENV_PREFIX)
    }

    /// Load a domain from `<prefix>_NAME`, `<prefix>_VERSION`,
    /// `<prefix>_CHAIN_ID`, `<prefix>_VERIFYING_CONTRACT` and `<prefix>_SALT`.
    /// Unset variables leave the field empty.
    pub fn from_env_with_prefix(prefix: &str) -> Result<Self, ConfigError> {
        let var = |name: &str| load_string_opt(&format!("{prefix}_{name}"));

        Ok(Self {
            name: var("NAME"),
            version: var("VERSION"),
            chain_id: var("CHAIN_ID").map(|id| parse_chain_id(&id)).transpose()?,
            verifying_contract: var("VERIFYING_CONTRACT")
                .map(|a| a.parse::<Address>())
                .transpose()?,
            salt: var("SALT").map(|s| s.parse::<B256>()).transpose()?,
        })
    }
}

impl LocalSignerKey {
    /// Load a hex private key from the environment.
    pub fn from_env(key: &str) -> Result<Self, ConfigError> {
        load_string(key).map(SignerKey::Hex)
    }
}

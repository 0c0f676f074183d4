use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("No network profile configured for chain id {0}")]
    UnknownChain(u64),
    #[error("Unknown network: {0}")]
    UnknownNetwork(String),
    #[error("Network {network} is missing required parameter {field}")]
    MissingField {
        network: String,
        field: &'static str,
    },
    #[error("Network {network} has an invalid value for {field}: {reason}")]
    InvalidValue {
        network: String,
        field: &'static str,
        reason: String,
    },
    #[error("Duplicate network profile: {0}")]
    DuplicateProfile(String),
    #[error("No RPC URL configured for network {network}. Set {env_var}")]
    MissingRpcUrl {
        network: String,
        env_var: String,
    },
    #[error("No private key configured for account {0}")]
    MissingAccount(String),
    #[error("Network {network} expects chain id {expected} but the RPC endpoint reports {actual}")]
    ChainIdMismatch {
        network: String,
        expected: u64,
        actual: u64,
    },
    #[error("Invalid network configuration file: {0}")]
    InvalidFile(String),
}

impl From<toml::de::Error> for ConfigurationError {
    fn from(err: toml::de::Error) -> Self {
        ConfigurationError::InvalidFile(err.to_string())
    }
}

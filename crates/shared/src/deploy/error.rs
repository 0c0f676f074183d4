use thiserror::Error;

use crate::funding::FundingError;
use crate::network::ConfigurationError;
use crate::web3::contracts::core::error::ContractError;

#[derive(Debug, Error)]
pub enum DeployError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    #[error("Invalid artifact {path}: {reason}")]
    Artifact { path: String, reason: String },
    #[error("Deployment failed: {0}")]
    Deployment(#[source] ContractError),
    #[error(transparent)]
    Funding(#[from] FundingError),
    #[error("LINK transfer to the deployed contract failed: {0}")]
    FundingTransfer(#[source] ContractError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Malformed JSON in {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

use alloy::primitives::Address;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ContractError {
    // Initialization errors
    #[error("Failed to parse ABI: {0}")]
    AbiParseError(String),
    #[error("Failed to read artifact: {0}")]
    ArtifactReadError(String),

    // Contract interaction errors
    #[error("Contract call failed: {0}")]
    CallError(String),
    #[error("Transaction failed: {0}")]
    TransactionError(String),

    // Data parsing errors
    #[error("Failed to decode data: {0}")]
    DecodingError(String),

    #[error("Deployment transaction produced no contract address (tx receipt for {0:?})")]
    MissingContractAddress(alloy::primitives::TxHash),
    #[error("No code deployed at {0:?}")]
    NoCode(Address),

    #[error("Web3 error: {0}")]
    Web3Error(String),
}

impl From<std::io::Error> for ContractError {
    fn from(err: std::io::Error) -> Self {
        ContractError::ArtifactReadError(err.to_string())
    }
}

impl From<serde_json::Error> for ContractError {
    fn from(err: serde_json::Error) -> Self {
        ContractError::AbiParseError(err.to_string())
    }
}

impl From<alloy::contract::Error> for ContractError {
    fn from(err: alloy::contract::Error) -> Self {
        ContractError::CallError(err.to_string())
    }
}

impl From<alloy::providers::PendingTransactionError> for ContractError {
    fn from(err: alloy::providers::PendingTransactionError) -> Self {
        ContractError::TransactionError(err.to_string())
    }
}

impl From<alloy::transports::TransportError> for ContractError {
    fn from(err: alloy::transports::TransportError) -> Self {
        ContractError::Web3Error(err.to_string())
    }
}

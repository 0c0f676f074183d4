use alloy::primitives::Address;
use thiserror::Error;

use crate::network::ConfigurationError;
use crate::web3::contracts::core::error::ContractError;

#[derive(Debug, Error)]
pub enum FundingError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    #[error("Failed to read LINK balance of {account:?}: {source}")]
    BalanceQuery {
        account: Address,
        #[source]
        source: ContractError,
    },
}

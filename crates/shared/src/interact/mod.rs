use alloy::primitives::{TxHash, U256};
use async_trait::async_trait;
use log::info;
use thiserror::Error;

use crate::web3::contracts::core::error::ContractError;

/// Option the `enter` script bets on.
pub const DEFAULT_BET_OPTION: u64 = 1;

#[derive(Debug, Error)]
pub enum InteractionError {
    #[error("No {contract} deployment found for network {network}")]
    NotDeployed { contract: String, network: String },
    #[error("Failed to read {what}: {source}")]
    Read {
        what: &'static str,
        #[source]
        source: ContractError,
    },
    #[error("Call to {function} failed: {source}")]
    Call {
        function: &'static str,
        #[source]
        source: ContractError,
    },
}

/// Calls the betting scripts make against a deployed contract.
#[async_trait]
pub trait BettingOps: Send + Sync {
    async fn entrance_fee(&self) -> Result<U256, ContractError>;

    async fn place_bet(&self, option: U256, payment: U256) -> Result<TxHash, ContractError>;
}

/// Reads the entrance fee and enters the bet on `option`, paying exactly that fee.
pub async fn enter_betting<B>(betting: &B, option: U256) -> Result<TxHash, InteractionError>
where
    B: BettingOps + ?Sized,
{
    let entrance_fee = betting
        .entrance_fee()
        .await
        .map_err(|source| InteractionError::Read {
            what: "entrance fee",
            source,
        })?;
    info!("Entering with option {option} and entrance fee {entrance_fee}");

    let tx = betting
        .place_bet(option, entrance_fee)
        .await
        .map_err(|source| InteractionError::Call {
            function: "betting",
            source,
        })?;
    info!("Entered!");
    Ok(tx)
}

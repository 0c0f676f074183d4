use crate::interact::BettingOps;
use crate::web3::contracts::core::contract::{Contract, BETTING_ABI};
use crate::web3::contracts::core::error::ContractError;
use crate::web3::contracts::helpers::utils::{first_uint, send_and_confirm};
use alloy::primitives::{Address, TxHash, U256};
use async_trait::async_trait;

pub const BETTING_CONTRACT_NAME: &str = "Betting";

/// A bet is reported once its transaction is mined.
const BET_CONFIRMATIONS: u64 = 1;

#[derive(Clone)]
pub struct BettingContract<P: alloy_provider::Provider> {
    pub instance: Contract<P>,
}

impl<P: alloy_provider::Provider> BettingContract<P> {
    pub fn new(address: Address, provider: P) -> Result<Self, ContractError> {
        let instance = Contract::new(address, provider, BETTING_ABI)?;
        Ok(Self { instance })
    }

    pub fn address(&self) -> Address {
        self.instance.address()
    }
}

#[async_trait]
impl<P: alloy_provider::Provider> BettingOps for BettingContract<P> {
    async fn entrance_fee(&self) -> Result<U256, ContractError> {
        let response = self
            .instance
            .instance()
            .function("getEntranceFee", &[])?
            .call()
            .await?;
        first_uint("getEntranceFee", &response)
    }

    async fn place_bet(&self, option: U256, payment: U256) -> Result<TxHash, ContractError> {
        let call = self
            .instance
            .instance()
            .function("betting", &[option.into()])?
            .value(payment);
        send_and_confirm("betting", call, BET_CONFIRMATIONS).await
    }
}

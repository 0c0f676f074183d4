use crate::funding::{FundingToken, TokenBalance};
use crate::web3::contracts::core::contract::{Contract, LINK_TOKEN_ABI};
use crate::web3::contracts::core::error::ContractError;
use crate::web3::contracts::helpers::utils::{first_uint, send_and_confirm};
use alloy::primitives::{Address, TxHash, U256};
use async_trait::async_trait;

/// ERC-677 LINK token used to pay the oracle.
#[derive(Clone)]
pub struct LinkToken<P: alloy_provider::Provider> {
    pub instance: Contract<P>,
    confirmations: u64,
}

impl<P: alloy_provider::Provider> LinkToken<P> {
    pub fn new(address: Address, provider: P) -> Result<Self, ContractError> {
        let instance = Contract::new(address, provider, LINK_TOKEN_ABI)?;
        Ok(Self {
            instance,
            confirmations: 1,
        })
    }

    /// Blocks to wait for after a transfer before reporting it.
    pub fn with_confirmations(mut self, confirmations: u64) -> Self {
        self.confirmations = confirmations;
        self
    }

    pub fn address(&self) -> Address {
        self.instance.address()
    }
}

#[async_trait]
impl<P: alloy_provider::Provider> TokenBalance for LinkToken<P> {
    async fn balance_of(&self, account: Address) -> Result<U256, ContractError> {
        let response = self
            .instance
            .instance()
            .function("balanceOf", &[account.into()])?
            .call()
            .await?;
        first_uint("balanceOf", &response)
    }
}

#[async_trait]
impl<P: alloy_provider::Provider> FundingToken for LinkToken<P> {
    async fn transfer(&self, to: Address, amount: U256) -> Result<TxHash, ContractError> {
        let call = self
            .instance
            .instance()
            .function("transfer", &[to.into(), amount.into()])?;
        send_and_confirm("transfer", call, self.confirmations).await
    }
}

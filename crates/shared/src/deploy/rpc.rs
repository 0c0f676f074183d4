use alloy::network::{ReceiptResponse, TransactionBuilder};
use alloy::primitives::Address;
use alloy::rpc::types::TransactionRequest;
use async_trait::async_trait;
use log::{debug, info};

use super::{ContractDeployer, DeployRequest, DeployedContract};
use crate::web3::contracts::core::error::ContractError;
use crate::web3::contracts::helpers::utils::ensure_success;

/// Deploys through a signing provider.
pub struct RpcDeployer<P> {
    provider: P,
    from: Address,
}

impl<P: alloy_provider::Provider> RpcDeployer<P> {
    pub fn new(provider: P, from: Address) -> Self {
        Self { provider, from }
    }
}

#[async_trait]
impl<P: alloy_provider::Provider> ContractDeployer for RpcDeployer<P> {
    async fn deploy(&self, request: &DeployRequest) -> Result<DeployedContract, ContractError> {
        let mut code = request.bytecode.to_vec();
        code.extend_from_slice(&request.constructor_args);

        let tx = TransactionRequest::default()
            .with_from(self.from)
            .with_deploy_code(code);

        let pending = self.provider.send_transaction(tx).await?;
        info!(
            "deploying \"{}\" (tx: {})...",
            request.contract_name,
            pending.tx_hash()
        );
        debug!("Waiting for {} confirmation(s)", request.confirmations);

        let receipt = pending
            .with_required_confirmations(request.confirmations)
            .get_receipt()
            .await?;
        let transaction_hash = ensure_success(
            &format!("deployment of {}", request.contract_name),
            receipt.transaction_hash(),
            receipt.status(),
        )?;
        let address = receipt
            .contract_address()
            .ok_or(ContractError::MissingContractAddress(transaction_hash))?;

        let code = self.provider.get_code_at(address).await?;
        if code.is_empty() {
            return Err(ContractError::NoCode(address));
        }

        info!("deployed at {} with {} gas", address, receipt.gas_used());
        Ok(DeployedContract {
            address,
            transaction_hash,
            block_number: receipt.block_number(),
        })
    }
}

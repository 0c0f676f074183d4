pub mod artifact;
pub mod error;
pub mod front_end;
pub mod orchestrator;
pub mod rpc;
pub mod store;

pub use artifact::{BuildInfo, ContractArtifact};
pub use error::{DeployError, StoreError};
pub use orchestrator::{DeployOrchestrator, DeploySettings, DeploymentOutcome};
pub use rpc::RpcDeployer;
pub use store::DeploymentStore;

use alloy::primitives::{Address, Bytes, TxHash};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::network::BettingArgs;
use crate::web3::contracts::core::error::ContractError;

/// What was deployed where, and with which constructor arguments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentRecord {
    pub contract_name: String,
    pub address: Address,
    pub args: BettingArgs,
    /// ABI-encoded constructor arguments, as submitted for verification.
    pub constructor_args: Bytes,
    pub transaction_hash: TxHash,
    pub block_number: Option<u64>,
    pub chain_id: u64,
    pub network: String,
}

#[derive(Debug, Clone)]
pub struct DeployRequest {
    pub contract_name: String,
    pub bytecode: Bytes,
    pub constructor_args: Bytes,
    pub confirmations: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeployedContract {
    pub address: Address,
    pub transaction_hash: TxHash,
    pub block_number: Option<u64>,
}

/// Sends a contract creation and waits for the requested confirmations.
#[async_trait]
pub trait ContractDeployer: Send + Sync {
    async fn deploy(&self, request: &DeployRequest) -> Result<DeployedContract, ContractError>;
}

use alloy::primitives::Address;
use eyre::Result;
use log::debug;
use shared::deploy::store::StoredDeployment;
use shared::deploy::DeploymentStore;
use shared::interact::InteractionError;
use shared::network::{ActiveNetwork, ConfigurationError, NetworkEndpoint, NetworkTable};
use shared::web3::contracts::implementations::betting_contract::BETTING_CONTRACT_NAME;
use shared::web3::wallet::Wallet;
use std::str::FromStr;
use url::Url;

use crate::config::Config;
use crate::secure_key::KeySource;

/// Global selections shared by every subcommand.
#[derive(Debug, Clone)]
pub(crate) struct Context {
    pub(crate) config: Config,
    pub(crate) network: String,
    pub(crate) account: String,
    pub(crate) key: Option<String>,
}

/// A signer connected to the active network.
pub(crate) struct Session {
    pub(crate) wallet: Wallet,
    pub(crate) network: ActiveNetwork,
    pub(crate) table: NetworkTable,
}

impl Context {
    /// `--key` wins over the named account; with neither, the key is prompted for.
    pub(crate) fn private_key(&self) -> Result<String> {
        if self.key.is_some() {
            return KeySource::from_arg(self.key.as_deref()).resolve();
        }
        if let Some(key) = self.config.account_key(&self.account) {
            return Ok(key.clone());
        }
        log::warn!("{}", ConfigurationError::MissingAccount(self.account.clone()));
        KeySource::Interactive.resolve()
    }

    pub(crate) fn store(&self) -> DeploymentStore {
        DeploymentStore::new(&self.config.paths.deployments)
    }

    pub(crate) async fn connect(&self) -> Result<Session> {
        let table = self.config.network_table()?;
        let endpoint = NetworkEndpoint::resolve(&self.network, &table)?;
        let rpc_url = self.config.rpc_url(&endpoint)?;
        let private_key = self.private_key()?;

        let wallet = Wallet::new(
            &private_key,
            Url::parse(&rpc_url).map_err(|e| eyre::eyre!("URL parse error: {}", e))?,
        )
        .map_err(|e| eyre::eyre!("Wallet creation error: {}", e))?;

        let reported = wallet
            .chain_id()
            .await
            .map_err(|e| eyre::eyre!("Failed to query chain id from {}: {}", endpoint.name, e))?;
        let network = ActiveNetwork::connect(&endpoint, reported)?;
        debug!(
            "Connected to {} (chain id {}) as {}",
            network.name,
            network.chain_id,
            wallet.address()
        );

        Ok(Session {
            wallet,
            network,
            table,
        })
    }

    /// The Betting deployment recorded for the active network.
    pub(crate) fn deployed_betting(&self) -> Result<StoredDeployment> {
        self.store()
            .load(&self.network, BETTING_CONTRACT_NAME)?
            .ok_or_else(|| {
                InteractionError::NotDeployed {
                    contract: BETTING_CONTRACT_NAME.to_string(),
                    network: self.network.clone(),
                }
                .into()
            })
    }

    /// An explicit `--contract` address, or the recorded Betting deployment.
    pub(crate) fn contract_address(&self, contract: Option<&str>) -> Result<Address> {
        match contract {
            Some(address) => Ok(Address::from_str(address)?),
            None => Ok(self.deployed_betting()?.record.address),
        }
    }
}

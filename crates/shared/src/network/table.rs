use alloy::primitives::utils::Unit;
use alloy::primitives::{hex, Address, B256, U256};
use log::debug;
use std::collections::{BTreeMap, HashSet};

use super::error::ConfigurationError;
use super::profile::{GameParameters, NetworkProfile};

pub const HARDHAT_CHAIN_ID: u64 = 31337;
pub const GOERLI_CHAIN_ID: u64 = 5;
pub const SEPOLIA_CHAIN_ID: u64 = 11155111;
pub const MAINNET_CHAIN_ID: u64 = 1;

/// Read-only mapping from chain id to its [`NetworkProfile`].
#[derive(Debug, Clone)]
pub struct NetworkTable {
    profiles: BTreeMap<u64, NetworkProfile>,
}

fn ether_fraction(numerator: u64, denominator: u64) -> U256 {
    U256::from(numerator) * Unit::ETHER.wei() / U256::from(denominator)
}

impl NetworkTable {
    pub fn builtin() -> Self {
        let entrance_fee = Some(ether_fraction(1, 100));

        let hardhat = NetworkProfile {
            chain_id: HARDHAT_CHAIN_ID,
            name: "hardhat".to_string(),
            link_token: None,
            vrf_coordinator: None,
            key_hash: B256::new(hex!(
                "d89b2bf150e3b9e13446986e571fb9cab24b13cea0a43ea20a6049a85cc807cc"
            )),
            fee: ether_fraction(1, 10),
            fund_amount: ether_fraction(10, 1),
            subscription_id: Some(588),
            callback_gas_limit: Some(500_000),
            keepers_update_interval: Some(30),
            explorer_api_url: None,
            game: Some(GameParameters {
                description: Some("Argentina vs France".to_string()),
                option1_name: Some("Argentina".to_string()),
                option2_name: Some("France".to_string()),
                due_date_timestamp: Some(1_893_456_000),
                entrance_fee,
            }),
        };

        let goerli = NetworkProfile {
            chain_id: GOERLI_CHAIN_ID,
            name: "goerli".to_string(),
            link_token: Some(Address::new(hex!(
                "326C977E6efc84E512bB9C30f76E30c160eD06FB"
            ))),
            vrf_coordinator: Some(Address::new(hex!(
                "2ca8e0c643bde4c2e08ab1fa0da3401adad7734d"
            ))),
            key_hash: B256::new(hex!(
                "79d3d8832d904592c0bf9818b621522c988bb8b0c05cdc3b15aea1b6e8db0c15"
            )),
            fee: ether_fraction(1, 10),
            fund_amount: ether_fraction(2, 1),
            subscription_id: Some(9237),
            callback_gas_limit: Some(500_000),
            keepers_update_interval: Some(30),
            explorer_api_url: Some("https://api-goerli.etherscan.io/api".to_string()),
            game: Some(GameParameters {
                entrance_fee,
                ..GameParameters::default()
            }),
        };

        let sepolia = NetworkProfile {
            chain_id: SEPOLIA_CHAIN_ID,
            name: "sepolia".to_string(),
            link_token: Some(Address::new(hex!(
                "779877A7B0D9E8603169DdbD7836e478b4624789"
            ))),
            vrf_coordinator: Some(Address::new(hex!(
                "8103B0A8A00be2DDC778e6e7eaa21791Cd364625"
            ))),
            key_hash: B256::new(hex!(
                "474e34a077df58807dbe9c96d3c009b23b3c6d0cce433e59bbf5b34f823bc56c"
            )),
            fee: ether_fraction(1, 10),
            fund_amount: ether_fraction(2, 1),
            subscription_id: Some(719),
            callback_gas_limit: Some(500_000),
            keepers_update_interval: Some(30),
            explorer_api_url: Some("https://api-sepolia.etherscan.io/api".to_string()),
            game: Some(GameParameters {
                entrance_fee,
                ..GameParameters::default()
            }),
        };

        // No fund amount: auto-funding is never done on mainnet.
        let mainnet = NetworkProfile {
            chain_id: MAINNET_CHAIN_ID,
            name: "mainnet".to_string(),
            link_token: Some(Address::new(hex!(
                "514910771AF9Ca656af840dff83E8264EcF986CA"
            ))),
            vrf_coordinator: Some(Address::new(hex!(
                "f0d54349aDdcf704F77AE15b96510dEA15cb7952"
            ))),
            key_hash: B256::new(hex!(
                "AA77729D3466CA35AE8D28B3BBAC7CC36A5031EFDC430821C02BC31A238AF445"
            )),
            fee: ether_fraction(2, 1),
            fund_amount: U256::ZERO,
            subscription_id: None,
            callback_gas_limit: None,
            keepers_update_interval: Some(30),
            explorer_api_url: Some("https://api.etherscan.io/api".to_string()),
            game: None,
        };

        let profiles = [hardhat, goerli, sepolia, mainnet]
            .into_iter()
            .map(|profile| (profile.chain_id, profile))
            .collect();
        Self { profiles }
    }

    pub fn from_profiles(
        profiles: impl IntoIterator<Item = NetworkProfile>,
    ) -> Result<Self, ConfigurationError> {
        let mut map = BTreeMap::new();
        for profile in profiles {
            let chain_id = profile.chain_id;
            if map.insert(chain_id, profile).is_some() {
                return Err(ConfigurationError::DuplicateProfile(format!(
                    "chain id {chain_id}"
                )));
            }
        }
        let table = Self { profiles: map };
        table.validate()?;
        Ok(table)
    }

    /// Replaces builtin entries with `overrides` of the same chain id, adding new ones.
    pub fn with_overrides(
        mut self,
        overrides: impl IntoIterator<Item = NetworkProfile>,
    ) -> Result<Self, ConfigurationError> {
        let mut seen = HashSet::new();
        for profile in overrides {
            if !seen.insert(profile.chain_id) {
                return Err(ConfigurationError::DuplicateProfile(format!(
                    "chain id {}",
                    profile.chain_id
                )));
            }
            debug!(
                "Overriding network profile for chain id {}",
                profile.chain_id
            );
            self.profiles.insert(profile.chain_id, profile);
        }
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        let mut names = HashSet::new();
        for profile in self.profiles.values() {
            profile.validate()?;
            if !names.insert(profile.name.as_str()) {
                return Err(ConfigurationError::DuplicateProfile(format!(
                    "name {}",
                    profile.name
                )));
            }
        }
        Ok(())
    }

    pub fn profile_for(&self, chain_id: u64) -> Result<&NetworkProfile, ConfigurationError> {
        self.profiles
            .get(&chain_id)
            .ok_or(ConfigurationError::UnknownChain(chain_id))
    }

    pub fn by_name(&self, name: &str) -> Option<&NetworkProfile> {
        self.profiles.values().find(|profile| profile.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &NetworkProfile> {
        self.profiles.values()
    }
}

impl Default for NetworkTable {
    fn default() -> Self {
        Self::builtin()
    }
}

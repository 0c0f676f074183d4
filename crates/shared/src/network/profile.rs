use alloy::primitives::{Address, B256, U256};
use alloy::sol_types::SolValue;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::amounts;
use super::error::ConfigurationError;

/// Deployment and funding parameters for one chain.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NetworkProfile {
    pub chain_id: u64,
    pub name: String,
    /// LINK token used to pay the oracle. Absent where no such token exists.
    #[serde(default)]
    pub link_token: Option<Address>,
    #[serde(default)]
    pub vrf_coordinator: Option<Address>,
    #[serde(default)]
    pub key_hash: B256,
    #[serde(deserialize_with = "amounts::ether")]
    pub fee: U256,
    /// LINK sent to a freshly deployed contract, in base units. Zero disables auto-funding.
    #[serde(default, deserialize_with = "amounts::base_units")]
    pub fund_amount: U256,
    #[serde(default)]
    pub subscription_id: Option<u64>,
    #[serde(default)]
    pub callback_gas_limit: Option<u64>,
    #[serde(default)]
    pub keepers_update_interval: Option<u64>,
    #[serde(default)]
    pub explorer_api_url: Option<String>,
    #[serde(default)]
    pub game: Option<GameParameters>,
}

/// Constructor parameters of the betting contract. Every field is optional here
/// so that a missing one can be reported by name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct GameParameters {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub option1_name: Option<String>,
    #[serde(default)]
    pub option2_name: Option<String>,
    #[serde(default)]
    pub due_date_timestamp: Option<u64>,
    #[serde(default, deserialize_with = "amounts::optional_ether")]
    pub entrance_fee: Option<U256>,
}

/// Fully resolved constructor arguments, in constructor order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BettingArgs {
    pub game_description: String,
    pub option1_name: String,
    pub option2_name: String,
    pub due_date_timestamp: U256,
    pub entrance_fee: U256,
}

impl BettingArgs {
    pub fn abi_encode(&self) -> Vec<u8> {
        (
            self.game_description.clone(),
            self.option1_name.clone(),
            self.option2_name.clone(),
            self.due_date_timestamp,
            self.entrance_fee,
        )
            .abi_encode_params()
    }
}

impl NetworkProfile {
    pub fn betting_args(&self) -> Result<BettingArgs, ConfigurationError> {
        let missing = |field: &'static str| ConfigurationError::MissingField {
            network: self.name.clone(),
            field,
        };
        let game = self.game.as_ref().ok_or_else(|| missing("gameDescription"))?;

        Ok(BettingArgs {
            game_description: game
                .description
                .clone()
                .ok_or_else(|| missing("gameDescription"))?,
            option1_name: game
                .option1_name
                .clone()
                .ok_or_else(|| missing("option1Name"))?,
            option2_name: game
                .option2_name
                .clone()
                .ok_or_else(|| missing("option2Name"))?,
            due_date_timestamp: game
                .due_date_timestamp
                .map(U256::from)
                .ok_or_else(|| missing("dueDateTimestamp"))?,
            entrance_fee: game
                .entrance_fee
                .ok_or_else(|| missing("lottoEntranceFee"))?,
        })
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigurationError> {
        if self.name.trim().is_empty() {
            return Err(ConfigurationError::InvalidValue {
                network: self.chain_id.to_string(),
                field: "name",
                reason: "must not be empty".to_string(),
            });
        }
        if let Some(url) = &self.explorer_api_url {
            url::Url::parse(url).map_err(|e| ConfigurationError::InvalidValue {
                network: self.name.clone(),
                field: "explorer_api_url",
                reason: e.to_string(),
            })?;
        }
        Ok(())
    }
}

impl fmt::Display for NetworkProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} (chain id {})", self.name, self.chain_id)?;
        match self.link_token {
            Some(token) => writeln!(f, "  link token:      {token}")?,
            None => writeln!(f, "  link token:      -")?,
        }
        match self.vrf_coordinator {
            Some(coordinator) => writeln!(f, "  vrf coordinator: {coordinator}")?,
            None => writeln!(f, "  vrf coordinator: -")?,
        }
        writeln!(f, "  key hash:        {}", self.key_hash)?;
        writeln!(f, "  fee:             {}", self.fee)?;
        writeln!(f, "  fund amount:     {}", self.fund_amount)?;
        if let Some(url) = &self.explorer_api_url {
            writeln!(f, "  explorer api:    {url}")?;
        }
        write!(
            f,
            "  game configured: {}",
            if self.betting_args().is_ok() { "yes" } else { "no" }
        )
    }
}

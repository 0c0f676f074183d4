pub mod amounts;
pub mod error;
pub mod profile;
pub mod table;

pub use error::ConfigurationError;
pub use profile::{BettingArgs, GameParameters, NetworkProfile};
pub use table::NetworkTable;

use table::{GOERLI_CHAIN_ID, HARDHAT_CHAIN_ID, MAINNET_CHAIN_ID, SEPOLIA_CHAIN_ID};

pub const DEVELOPMENT_CHAINS: [&str; 2] = ["hardhat", "localhost"];
pub const VERIFICATION_BLOCK_CONFIRMATIONS: u64 = 6;
pub const DEFAULT_LOCAL_RPC_URL: &str = "http://127.0.0.1:8545";
pub const FRONT_END_CONTRACTS_FILE: &str =
    "../nextjs-smartcontract-lottery-fcc/constants/contractAddresses.json";
pub const FRONT_END_ABI_FILE: &str = "../nextjs-smartcontract-lottery-fcc/constants/abi.json";

pub fn is_development(network_name: &str) -> bool {
    DEVELOPMENT_CHAINS.contains(&network_name)
}

pub fn confirmations_for(network_name: &str) -> u64 {
    if is_development(network_name) {
        1
    } else {
        VERIFICATION_BLOCK_CONFIRMATIONS
    }
}

/// Name an operator passes on the command line to reach `network_name`.
/// The in-process `hardhat` network is only reachable as `localhost`.
pub fn external_network_name(network_name: &str) -> &str {
    if network_name == "hardhat" {
        "localhost"
    } else {
        network_name
    }
}

/// How to reach a named network: expected chain id and where its RPC URL comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkEndpoint {
    pub name: String,
    pub chain_id: u64,
    pub rpc_env_var: String,
    pub default_rpc_url: Option<String>,
}

impl NetworkEndpoint {
    fn new(name: &str, chain_id: u64) -> Self {
        let default_rpc_url = is_development(name).then(|| DEFAULT_LOCAL_RPC_URL.to_string());
        Self {
            name: name.to_string(),
            chain_id,
            rpc_env_var: format!("{}_URL", name.to_uppercase()),
            default_rpc_url,
        }
    }

    /// Resolves a network name. Known public networks and the development
    /// aliases are builtin; any other name must match a profile in `table`.
    pub fn resolve(name: &str, table: &NetworkTable) -> Result<Self, ConfigurationError> {
        let chain_id = match name {
            "hardhat" | "localhost" => HARDHAT_CHAIN_ID,
            "goerli" => GOERLI_CHAIN_ID,
            "sepolia" => SEPOLIA_CHAIN_ID,
            "mainnet" => MAINNET_CHAIN_ID,
            other => {
                table
                    .by_name(other)
                    .ok_or_else(|| ConfigurationError::UnknownNetwork(other.to_string()))?
                    .chain_id
            }
        };
        Ok(Self::new(name, chain_id))
    }
}

/// The network a command runs against, as chosen by the operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveNetwork {
    pub name: String,
    pub chain_id: u64,
}

impl ActiveNetwork {
    pub fn new(name: impl Into<String>, chain_id: u64) -> Self {
        Self {
            name: name.into(),
            chain_id,
        }
    }

    /// Checks the chain id reported by the RPC endpoint against the expected one.
    pub fn connect(
        endpoint: &NetworkEndpoint,
        reported_chain_id: u64,
    ) -> Result<Self, ConfigurationError> {
        if endpoint.chain_id != reported_chain_id {
            return Err(ConfigurationError::ChainIdMismatch {
                network: endpoint.name.clone(),
                expected: endpoint.chain_id,
                actual: reported_chain_id,
            });
        }
        Ok(Self::new(endpoint.name.clone(), reported_chain_id))
    }

    pub fn is_development(&self) -> bool {
        is_development(&self.name)
    }

    pub fn confirmations(&self) -> u64 {
        confirmations_for(&self.name)
    }

    pub fn external_name(&self) -> &str {
        external_network_name(&self.name)
    }
}

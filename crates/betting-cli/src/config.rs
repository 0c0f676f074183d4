use eyre::{Context, Result};
use serde::Deserialize;
use shared::network::{
    ConfigurationError, NetworkEndpoint, NetworkProfile, NetworkTable, FRONT_END_ABI_FILE,
    FRONT_END_CONTRACTS_FILE,
};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Named accounts and the environment variables holding their keys.
const ACCOUNT_VARS: [(&str, &str); 3] = [
    ("deployer", "PRIVATE_KEY_DEPLOYER"),
    ("user2", "PRIVATE_KEY_USER_2"),
    ("user3", "PRIVATE_KEY_USER_3"),
];

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub(crate) struct PathsConfig {
    pub(crate) artifact: PathBuf,
    pub(crate) build_info: Option<PathBuf>,
    pub(crate) deployments: PathBuf,
    pub(crate) front_end_contracts: PathBuf,
    pub(crate) front_end_abi: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            artifact: PathBuf::from("artifacts/contracts/Betting.sol/Betting.json"),
            build_info: None,
            deployments: PathBuf::from("deployments"),
            front_end_contracts: PathBuf::from(FRONT_END_CONTRACTS_FILE),
            front_end_abi: PathBuf::from(FRONT_END_ABI_FILE),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(crate) struct Config {
    pub(crate) paths: PathsConfig,
    pub(crate) networks: Vec<NetworkProfile>,
    #[serde(skip)]
    pub(crate) accounts: BTreeMap<String, String>,
    #[serde(skip)]
    pub(crate) etherscan_api_key: Option<String>,
}

impl Config {
    pub(crate) fn load(config_path: Option<&str>, env_file: &str) -> Result<Self> {
        dotenv::from_filename(env_file).ok();

        let mut config = if let Some(path) = config_path {
            Self::load_from_file(path)?
        } else {
            Self::default()
        };

        config.load_from_env();
        Ok(config)
    }

    pub(crate) fn load_from_file(path: &str) -> Result<Self> {
        if !Path::new(path).exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {path}"))?;

        let config: Config =
            toml::from_str(&content).map_err(ConfigurationError::from)?;

        Ok(config)
    }

    pub(crate) fn load_from_env(&mut self) {
        for (account, env_var) in ACCOUNT_VARS {
            match std::env::var(env_var) {
                Ok(key) if !key.trim().is_empty() => {
                    self.accounts.insert(account.to_string(), key);
                }
                _ => {}
            }
        }

        self.etherscan_api_key = std::env::var("ETHERSCAN_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty());
    }

    /// Builtin profiles with the file's `[[networks]]` entries layered on top.
    pub(crate) fn network_table(&self) -> Result<NetworkTable, ConfigurationError> {
        NetworkTable::builtin().with_overrides(self.networks.iter().cloned())
    }

    pub(crate) fn account_key(&self, account: &str) -> Option<&String> {
        self.accounts.get(account)
    }

    /// `<NETWORK>_URL` from the environment, else the local default for development networks.
    pub(crate) fn rpc_url(&self, endpoint: &NetworkEndpoint) -> Result<String, ConfigurationError> {
        std::env::var(&endpoint.rpc_env_var)
            .ok()
            .filter(|url| !url.trim().is_empty())
            .or_else(|| endpoint.default_rpc_url.clone())
            .ok_or_else(|| ConfigurationError::MissingRpcUrl {
                network: endpoint.name.clone(),
                env_var: endpoint.rpc_env_var.clone(),
            })
    }
}

use alloy::json_abi::JsonAbi;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::error::StoreError;
use super::DeploymentRecord;

/// A deployment as persisted on disk, with the ABI needed to talk to it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredDeployment {
    #[serde(flatten)]
    pub record: DeploymentRecord,
    pub abi: JsonAbi,
}

/// `<root>/<network>/<contract>.json`, one file per deployed contract.
#[derive(Debug, Clone)]
pub struct DeploymentStore {
    root: PathBuf,
}

impl DeploymentStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn path(&self, network: &str, contract_name: &str) -> PathBuf {
        self.root.join(network).join(format!("{contract_name}.json"))
    }

    pub fn save(&self, record: &DeploymentRecord, abi: &JsonAbi) -> Result<PathBuf, StoreError> {
        let path = self.path(&record.network, &record.contract_name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| io_error(parent, source))?;
        }
        let stored = StoredDeployment {
            record: record.clone(),
            abi: abi.clone(),
        };
        let content = serde_json::to_string_pretty(&stored).map_err(|source| StoreError::Json {
            path: path.display().to_string(),
            source,
        })?;
        std::fs::write(&path, content).map_err(|source| io_error(&path, source))?;
        Ok(path)
    }

    /// Returns `None` when the contract was never deployed to `network`.
    pub fn load(
        &self,
        network: &str,
        contract_name: &str,
    ) -> Result<Option<StoredDeployment>, StoreError> {
        let path = self.path(network, contract_name);
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(io_error(&path, source)),
        };
        let stored = serde_json::from_str(&content).map_err(|source| StoreError::Json {
            path: path.display().to_string(),
            source,
        })?;
        Ok(Some(stored))
    }
}

pub(crate) fn io_error(path: &Path, source: std::io::Error) -> StoreError {
    StoreError::Io {
        path: path.display().to_string(),
        source,
    }
}

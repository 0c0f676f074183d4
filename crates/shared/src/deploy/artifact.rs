use alloy::json_abi::JsonAbi;
use alloy::primitives::Bytes;
use serde::Deserialize;
use std::path::Path;

use super::error::DeployError;

/// Compiler artifact as written by hardhat (`artifacts/contracts/<Source>.sol/<Name>.json`).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractArtifact {
    pub contract_name: String,
    pub source_name: String,
    pub abi: JsonAbi,
    pub bytecode: Bytes,
}

/// The subset of a hardhat build-info file needed for explorer verification.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildInfo {
    pub solc_long_version: String,
    pub input: serde_json::Value,
}

fn read_json<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T, DeployError> {
    let invalid = |reason: String| DeployError::Artifact {
        path: path.display().to_string(),
        reason,
    };
    let content = std::fs::read_to_string(path).map_err(|e| invalid(e.to_string()))?;
    serde_json::from_str(&content).map_err(|e| invalid(e.to_string()))
}

impl ContractArtifact {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DeployError> {
        let path = path.as_ref();
        let artifact: Self = read_json(path)?;
        if artifact.bytecode.is_empty() {
            return Err(DeployError::Artifact {
                path: path.display().to_string(),
                reason: format!("{} has no bytecode", artifact.contract_name),
            });
        }
        Ok(artifact)
    }

    pub fn fully_qualified_name(&self) -> String {
        format!("{}:{}", self.source_name, self.contract_name)
    }
}

impl BuildInfo {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DeployError> {
        read_json(path.as_ref())
    }
}

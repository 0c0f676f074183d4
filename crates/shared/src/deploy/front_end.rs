use alloy::json_abi::JsonAbi;
use std::collections::BTreeMap;
use std::path::Path;

use super::error::StoreError;
use super::store::io_error;
use super::DeploymentRecord;

/// Address file layout read by the front-end: chain id → deployed addresses.
pub type ContractAddresses = BTreeMap<String, Vec<String>>;

/// Adds the record's address under its chain id (once) and rewrites the ABI file.
pub fn update_front_end(
    record: &DeploymentRecord,
    abi: &JsonAbi,
    contracts_file: &Path,
    abi_file: &Path,
) -> Result<ContractAddresses, StoreError> {
    let mut addresses: ContractAddresses = match std::fs::read_to_string(contracts_file) {
        Ok(content) if !content.trim().is_empty() => {
            serde_json::from_str(&content).map_err(|source| StoreError::Json {
                path: contracts_file.display().to_string(),
                source,
            })?
        }
        Ok(_) => ContractAddresses::new(),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => ContractAddresses::new(),
        Err(source) => return Err(io_error(contracts_file, source)),
    };

    let address = record.address.to_string();
    let entry = addresses.entry(record.chain_id.to_string()).or_default();
    if !entry.contains(&address) {
        entry.push(address);
    }

    write_json(contracts_file, &addresses)?;
    write_json(abi_file, abi)?;
    Ok(addresses)
}

fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> Result<(), StoreError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|source| io_error(parent, source))?;
    }
    let content = serde_json::to_string(value).map_err(|source| StoreError::Json {
        path: path.display().to_string(),
        source,
    })?;
    std::fs::write(path, content).map_err(|source| io_error(path, source))
}

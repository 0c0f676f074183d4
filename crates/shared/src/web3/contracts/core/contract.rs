use alloy::{
    contract::{ContractInstance, Interface},
    json_abi::JsonAbi,
    primitives::Address,
};

use std::include_bytes;

use super::error::ContractError;

macro_rules! include_abi {
    ($path:expr) => {{
        const ABI_BYTES: &[u8] = include_bytes!($path);
        ABI_BYTES
    }};
}

pub const LINK_TOKEN_ABI: &str = "link_token.json";
pub const BETTING_ABI: &str = "betting.json";

#[derive(Clone)]
pub struct Contract<P: alloy_provider::Provider> {
    instance: ContractInstance<P>,
}

impl<P: alloy_provider::Provider> Contract<P> {
    pub fn new(address: Address, provider: P, abi_file_path: &str) -> Result<Self, ContractError> {
        let abi = Self::parse_abi(abi_file_path)?;
        Ok(Self::from_abi(address, provider, abi))
    }

    pub fn from_abi(address: Address, provider: P, abi: JsonAbi) -> Self {
        let instance = ContractInstance::new(address, provider, Interface::new(abi));
        Self { instance }
    }

    pub fn parse_abi(path: &str) -> Result<JsonAbi, ContractError> {
        let artifact = match path {
            LINK_TOKEN_ABI => include_abi!("../../../../artifacts/abi/link_token.json"),
            BETTING_ABI => include_abi!("../../../../artifacts/abi/betting.json"),
            _ => {
                return Err(ContractError::ArtifactReadError(format!(
                    "Unknown ABI file: {path}"
                )))
            }
        };

        let abi: JsonAbi = serde_json::from_slice(artifact)?;
        Ok(abi)
    }

    pub fn address(&self) -> Address {
        *self.instance.address()
    }

    pub fn instance(&self) -> &ContractInstance<P> {
        &self.instance
    }
}

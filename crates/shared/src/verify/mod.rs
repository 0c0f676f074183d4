pub mod etherscan;

pub use etherscan::{EtherscanVerifier, VerificationSource};

use async_trait::async_trait;
use thiserror::Error;

use crate::deploy::DeploymentRecord;

#[derive(Debug, Error)]
pub enum VerificationError {
    #[error("Explorer request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Explorer rejected the verification request: {0}")]
    Rejected(String),
    #[error("Verification failed: {0}")]
    Failed(String),
    #[error("Verification still pending after {attempts} status checks")]
    Timeout { attempts: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerificationStatus {
    Verified,
    AlreadyVerified,
}

/// Publishes a deployed contract's source to a block explorer.
#[async_trait]
pub trait SourceVerifier: Send + Sync {
    async fn verify(
        &self,
        api_key: &str,
        record: &DeploymentRecord,
    ) -> Result<VerificationStatus, VerificationError>;
}

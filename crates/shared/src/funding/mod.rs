pub mod error;
pub mod guidance;

pub use error::FundingError;

use alloy::primitives::{Address, TxHash, U256};
use async_trait::async_trait;
use log::{debug, info, warn};

use crate::network::NetworkTable;
use crate::web3::contracts::core::error::ContractError;

/// Read access to an ERC-20 style funding token.
#[async_trait]
pub trait TokenBalance: Send + Sync {
    async fn balance_of(&self, account: Address) -> Result<U256, ContractError>;
}

/// A funding token the signer can also transfer from.
#[async_trait]
pub trait FundingToken: TokenBalance {
    async fn transfer(&self, to: Address, amount: U256) -> Result<TxHash, ContractError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FundingDecision {
    pub eligible: bool,
    pub reason: Option<String>,
    /// Lines telling the operator how to fund the contract by hand. Empty when eligible.
    pub guidance: Vec<String>,
}

/// Pure eligibility rule: the signer must hold more than `required`,
/// `required` must be positive, and the contract must not already hold it.
pub fn evaluate(signer_balance: U256, contract_balance: U256, required: U256) -> FundingDecision {
    let reason = if required.is_zero() {
        Some("no fund amount is configured for this network".to_string())
    } else if signer_balance <= required {
        Some(format!(
            "signer holds {signer_balance} but more than {required} is needed"
        ))
    } else if contract_balance >= required {
        Some(format!(
            "contract already holds {contract_balance} of the required {required}"
        ))
    } else {
        None
    };

    FundingDecision {
        eligible: reason.is_none(),
        reason,
        guidance: Vec::new(),
    }
}

/// Inputs of a single auto-funding check.
#[derive(Debug, Clone)]
pub struct FundCheck<'a> {
    pub contract: Address,
    pub chain_id: u64,
    pub network_name: &'a str,
    pub signer: Address,
    pub additional_message: &'a str,
}

/// Decides whether `check.signer` should push LINK to `check.contract`. Never transfers.
/// When not eligible, guidance for funding the contract by hand is logged and returned.
pub async fn assess_auto_fund<T>(
    table: &NetworkTable,
    token: &T,
    check: &FundCheck<'_>,
) -> Result<FundingDecision, FundingError>
where
    T: TokenBalance + ?Sized,
{
    let profile = table.profile_for(check.chain_id)?;
    info!("Checking to see if contract can be auto-funded with LINK:");

    let required = profile.fund_amount;
    let signer_balance = token
        .balance_of(check.signer)
        .await
        .map_err(|source| FundingError::BalanceQuery {
            account: check.signer,
            source,
        })?;
    let contract_balance = token
        .balance_of(check.contract)
        .await
        .map_err(|source| FundingError::BalanceQuery {
            account: check.contract,
            source,
        })?;

    let mut decision = evaluate(signer_balance, contract_balance, required);
    if decision.eligible {
        return Ok(decision);
    }

    if let Some(reason) = &decision.reason {
        debug!("Auto-funding skipped: {reason}");
    }
    decision.guidance = guidance::guidance_lines(
        check.contract,
        check.network_name,
        check.additional_message,
    )
    .into();
    for line in &decision.guidance {
        warn!("{line}");
    }
    Ok(decision)
}

/// [`assess_auto_fund`] reduced to its verdict.
pub async fn auto_fund_check<T>(
    table: &NetworkTable,
    token: &T,
    check: &FundCheck<'_>,
) -> Result<bool, FundingError>
where
    T: TokenBalance + ?Sized,
{
    Ok(assess_auto_fund(table, token, check).await?.eligible)
}

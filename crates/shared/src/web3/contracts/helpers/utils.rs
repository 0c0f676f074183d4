use alloy::contract::DynCallBuilder;
use alloy::dyn_abi::DynSolValue;
use alloy::network::{Ethereum, ReceiptResponse};
use alloy::primitives::{TxHash, U256};
use log::debug;

use crate::web3::contracts::core::error::ContractError;

pub type ContractCallBuilder<'a, P> = DynCallBuilder<&'a P, Ethereum>;

/// Decodes the first return value of a view call as an unsigned integer.
pub fn first_uint(function: &str, values: &[DynSolValue]) -> Result<U256, ContractError> {
    values
        .first()
        .and_then(|value| value.as_uint())
        .map(|(value, _)| value)
        .ok_or_else(|| {
            ContractError::DecodingError(format!("{function} did not return a uint256"))
        })
}

/// Maps a mined transaction's receipt status to an error when it reverted.
pub(crate) fn ensure_success(
    what: &str,
    tx_hash: TxHash,
    succeeded: bool,
) -> Result<TxHash, ContractError> {
    if succeeded {
        Ok(tx_hash)
    } else {
        Err(ContractError::TransactionError(format!(
            "{what} reverted in {tx_hash}"
        )))
    }
}

/// Sends a state-changing call and waits until it has `confirmations` blocks on top.
/// A transaction that is mined but reverted is an error.
pub async fn send_and_confirm<P: alloy_provider::Provider>(
    function: &str,
    call: ContractCallBuilder<'_, P>,
    confirmations: u64,
) -> Result<TxHash, ContractError> {
    let pending = call.send().await?;
    debug!("Transaction {} sent, waiting for confirmation", pending.tx_hash());
    let receipt = pending
        .with_required_confirmations(confirmations)
        .get_receipt()
        .await?;
    ensure_success(function, receipt.transaction_hash(), receipt.status())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_leading_uint() {
        let values = vec![DynSolValue::Uint(U256::from(42), 256)];
        assert_eq!(first_uint("f", &values).unwrap(), U256::from(42));
    }

    #[test]
    fn empty_response_is_a_decoding_error() {
        let err = first_uint("getEntranceFee", &[]).unwrap_err();
        assert!(err.to_string().contains("getEntranceFee"));
    }

    #[test]
    fn reverted_transaction_is_an_error() {
        let hash = TxHash::repeat_byte(0x0f);
        let err = ensure_success("betting", hash, false).unwrap_err();
        assert!(matches!(err, ContractError::TransactionError(_)));
        assert!(err.to_string().contains("betting reverted"));
        assert!(err.to_string().contains(&hash.to_string()));
    }

    #[test]
    fn successful_transaction_returns_its_hash() {
        let hash = TxHash::repeat_byte(0x0e);
        assert_eq!(ensure_success("transfer", hash, true).unwrap(), hash);
    }

    #[test]
    fn wrong_type_is_a_decoding_error() {
        let values = vec![DynSolValue::Bool(true)];
        assert!(first_uint("f", &values).is_err());
    }
}

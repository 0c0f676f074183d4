//! Serde helpers for token amounts written the way operators write them:
//! decimal ether strings ("0.1") or integer base-unit strings.

use alloy::primitives::utils::parse_ether;
use alloy::primitives::U256;
use serde::{de, Deserialize, Deserializer};
use std::str::FromStr;

#[derive(Deserialize)]
#[serde(untagged)]
enum RawAmount {
    Text(String),
    Integer(i64),
}

impl RawAmount {
    fn into_text(self) -> String {
        match self {
            RawAmount::Text(text) => text,
            RawAmount::Integer(value) => value.to_string(),
        }
    }
}

pub(crate) fn parse_decimal_ether(text: &str) -> Result<U256, String> {
    parse_ether(text.trim()).map_err(|e| format!("invalid decimal amount {text:?}: {e}"))
}

/// Integer amount in base units. Negative values collapse to zero.
pub(crate) fn parse_base_units(text: &str) -> Result<U256, String> {
    let text = text.trim();
    if let Some(magnitude) = text.strip_prefix('-') {
        U256::from_str(magnitude).map_err(|e| format!("invalid amount {text:?}: {e}"))?;
        return Ok(U256::ZERO);
    }
    U256::from_str(text).map_err(|e| format!("invalid amount {text:?}: {e}"))
}

pub(crate) fn ether<'de, D: Deserializer<'de>>(deserializer: D) -> Result<U256, D::Error> {
    let raw = RawAmount::deserialize(deserializer)?.into_text();
    parse_decimal_ether(&raw).map_err(de::Error::custom)
}

pub(crate) fn optional_ether<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<U256>, D::Error> {
    match Option::<RawAmount>::deserialize(deserializer)? {
        Some(raw) => parse_decimal_ether(&raw.into_text())
            .map(Some)
            .map_err(de::Error::custom),
        None => Ok(None),
    }
}

pub(crate) fn base_units<'de, D: Deserializer<'de>>(deserializer: D) -> Result<U256, D::Error> {
    let raw = RawAmount::deserialize(deserializer)?.into_text();
    parse_base_units(&raw).map_err(de::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::utils::Unit;

    #[test]
    fn decimal_ether_scales_to_wei() {
        assert_eq!(
            parse_decimal_ether("0.1").unwrap(),
            Unit::ETHER.wei() / U256::from(10)
        );
        assert_eq!(parse_decimal_ether("2").unwrap(), U256::from(2) * Unit::ETHER.wei());
    }

    #[test]
    fn base_units_accept_large_values() {
        assert_eq!(
            parse_base_units("10000000000000000000").unwrap(),
            U256::from(10u64) * Unit::ETHER.wei()
        );
    }

    #[test]
    fn negative_base_units_mean_zero() {
        assert_eq!(parse_base_units("-5").unwrap(), U256::ZERO);
        assert!(parse_base_units("-abc").is_err());
    }
}

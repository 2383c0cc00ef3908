use std::fmt;
use std::str::FromStr;

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// EVM account address, `0x` + 40 hex digits, stored lowercase.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address(String);

impl Address {
    pub fn zero() -> Address {
        Address(format!("0x{}", "0".repeat(40)))
    }

    pub fn is_zero(&self) -> bool {
        self.0[2..].bytes().all(|b| b == b'0')
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Address {
    type Err = Error;

    fn from_str(value: &str) -> Result<Address, Error> {
        let hex = value
            .strip_prefix("0x")
            .or_else(|| value.strip_prefix("0X"))
            .ok_or_else(|| {
                Error::DecodeResponse(format!(
                    "address missing 0x prefix: {}",
                    value
                ))
            })?;

        if hex.len() != 40 {
            return Err(Error::DecodeResponse(format!(
                "address must hold 40 hex digits, got {}",
                hex.len()
            )));
        }

        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(Error::DecodeResponse(format!(
                "address holds non-hex digits: {}",
                value
            )));
        }

        Ok(Address(format!("0x{}", hex.to_ascii_lowercase())))
    }
}

impl TryFrom<String> for Address {
    type Error = Error;

    fn try_from(value: String) -> Result<Address, Error> {
        Address::from_str(&value)
    }
}

impl From<Address> for String {
    fn from(address: Address) -> String {
        address.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One receivables pool as read from the CascadeProtocol contract.
///
/// Monetary fields are wei-scaled integers carried as arbitrary-precision
/// decimals; nothing here is mutated after the fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct Pool {
    pub id: u64,
    pub merchant: Address,
    pub receivable_value: BigDecimal,
    pub advance_amount: BigDecimal,
    pub senior_token: Address,
    pub junior_token: Address,
    pub senior_face_value: BigDecimal,
    pub senior_target_raise: BigDecimal,
    pub junior_face_value: BigDecimal,
    pub junior_target_raise: BigDecimal,
    pub senior_raised: BigDecimal,
    pub junior_raised: BigDecimal,
    pub total_repaid: BigDecimal,
    pub is_funded: bool,
}

impl Pool {
    /// Monetary fields with their wire names, for boundary validation.
    pub fn monetary_fields(&self) -> [(&'static str, &BigDecimal); 9] {
        [
            ("receivableValue", &self.receivable_value),
            ("advanceAmount", &self.advance_amount),
            ("seniorFaceValue", &self.senior_face_value),
            ("seniorTargetRaise", &self.senior_target_raise),
            ("juniorFaceValue", &self.junior_face_value),
            ("juniorTargetRaise", &self.junior_target_raise),
            ("seniorRaised", &self.senior_raised),
            ("juniorRaised", &self.junior_raised),
            ("totalRepaid", &self.total_repaid),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn address_parses_and_normalizes() {
        let address = Address::from_str(
            "0x44994F1f72129deC08457632E7f76224c879e59e",
        )
        .unwrap();
        assert_eq!(
            address.as_str(),
            "0x44994f1f72129dec08457632e7f76224c879e59e"
        );
        assert!(!address.is_zero());
    }

    #[test]
    fn zero_address_is_detected() {
        assert!(Address::zero().is_zero());
        let parsed = Address::from_str(Address::zero().as_str()).unwrap();
        assert!(parsed.is_zero());
    }

    #[test]
    fn malformed_addresses_are_rejected() {
        assert!(Address::from_str("44994f1f").is_err());
        assert!(Address::from_str("0x123").is_err());
        assert!(Address::from_str(
            "0xZZ994f1f72129dec08457632e7f76224c879e59e"
        )
        .is_err());
    }
}

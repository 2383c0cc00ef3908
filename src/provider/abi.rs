use std::str::FromStr;

use bigdecimal::{num_bigint::BigInt, BigDecimal};

use crate::{
    error::Error,
    types::{Address, Pool},
};

/// 4-byte selector of `pools(uint256)`.
pub const POOLS_SELECTOR: &str = "0xac4afa38";
/// 4-byte selector of `poolCount()`.
pub const POOL_COUNT_SELECTOR: &str = "0x73cfc255";

/// Field count of the `pools(uint256)` return tuple.
pub const POOL_WORDS: usize = 13;

const WORD_HEX_LEN: usize = 64;

/// Build `eth_call` data: selector followed by each argument as one
/// left-padded 32-byte word.
pub fn encode_call(selector: &str, args: &[u64]) -> String {
    let mut data = String::from(selector);
    for arg in args {
        data.push_str(&format!("{:064x}", arg));
    }
    data
}

/// Split a hex return payload into 32-byte words, validating prefix,
/// alignment and digits before any field is read.
pub fn split_words(data: &str) -> Result<Vec<&str>, Error> {
    let hex = data.strip_prefix("0x").ok_or_else(|| {
        Error::DecodeResponse(String::from(
            "call result missing 0x prefix",
        ))
    })?;

    if hex.is_empty() || hex.len() % WORD_HEX_LEN != 0 {
        return Err(Error::DecodeResponse(format!(
            "call result length {} is not word aligned",
            hex.len()
        )));
    }

    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(Error::DecodeResponse(String::from(
            "call result holds non-hex digits",
        )));
    }

    Ok((0..hex.len())
        .step_by(WORD_HEX_LEN)
        .map(|at| &hex[at..at + WORD_HEX_LEN])
        .collect())
}

/// Decode one word as an unsigned integer amount. The word is read with
/// a positive sign, so a transport-level amount can never turn negative
/// here; negative values only appear through other ingestion paths and
/// are caught by the stats validation.
pub fn word_to_amount(word: &str) -> Result<BigDecimal, Error> {
    let value =
        BigInt::parse_bytes(word.as_bytes(), 16).ok_or_else(|| {
            Error::DecodeResponse(format!("bad uint word: {}", word))
        })?;
    Ok(BigDecimal::from(value))
}

pub fn word_to_u64(word: &str) -> Result<u64, Error> {
    if word[..WORD_HEX_LEN - 16].bytes().any(|b| b != b'0') {
        return Err(Error::DecodeResponse(format!(
            "uint word out of u64 range: {}",
            word
        )));
    }
    Ok(u64::from_str_radix(&word[WORD_HEX_LEN - 16..], 16)?)
}

pub fn word_to_address(word: &str) -> Result<Address, Error> {
    if word[..WORD_HEX_LEN - 40].bytes().any(|b| b != b'0') {
        return Err(Error::DecodeResponse(format!(
            "address word has dirty padding: {}",
            word
        )));
    }
    Address::from_str(&format!("0x{}", &word[WORD_HEX_LEN - 40..]))
}

pub fn word_to_bool(word: &str) -> Result<bool, Error> {
    let (padding, flag) = word.split_at(WORD_HEX_LEN - 1);
    if padding.bytes().any(|b| b != b'0') {
        return Err(Error::DecodeResponse(format!(
            "bool word has dirty padding: {}",
            word
        )));
    }
    match flag {
        "0" => Ok(false),
        "1" => Ok(true),
        _ => Err(Error::DecodeResponse(format!(
            "bool word is neither 0 nor 1: {}",
            word
        ))),
    }
}

/// Decode the `pools(uint256)` tuple into a typed snapshot.
///
/// A zero merchant address is the contract's "no such pool" marker and
/// yields `None`, never a zero-valued pool.
pub fn parse_pool(id: u64, data: &str) -> Result<Option<Pool>, Error> {
    let words = split_words(data)?;
    if words.len() != POOL_WORDS {
        return Err(Error::DecodeResponse(format!(
            "pool tuple holds {} words, expected {}",
            words.len(),
            POOL_WORDS
        )));
    }

    let merchant = word_to_address(words[0])?;
    if merchant.is_zero() {
        return Ok(None);
    }

    Ok(Some(Pool {
        id,
        merchant,
        receivable_value: word_to_amount(words[1])?,
        advance_amount: word_to_amount(words[2])?,
        senior_token: word_to_address(words[3])?,
        junior_token: word_to_address(words[4])?,
        senior_face_value: word_to_amount(words[5])?,
        senior_target_raise: word_to_amount(words[6])?,
        junior_face_value: word_to_amount(words[7])?,
        junior_target_raise: word_to_amount(words[8])?,
        senior_raised: word_to_amount(words[9])?,
        junior_raised: word_to_amount(words[10])?,
        total_repaid: word_to_amount(words[11])?,
        is_funded: word_to_bool(words[12])?,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uint_word(value: u64) -> String {
        format!("{:064x}", value)
    }

    fn address_word(tail: &str) -> String {
        format!("{}{}", "0".repeat(24), tail)
    }

    fn pool_payload(merchant_tail: &str) -> String {
        let mut data = String::from("0x");
        data.push_str(&address_word(merchant_tail));
        for value in [1000, 800] {
            data.push_str(&uint_word(value));
        }
        data.push_str(&address_word(&"2".repeat(40)));
        data.push_str(&address_word(&"3".repeat(40)));
        for value in [600, 570, 200, 176, 570, 176, 0] {
            data.push_str(&uint_word(value));
        }
        data.push_str(&uint_word(1));
        data
    }

    #[test]
    fn encode_call_pads_arguments() {
        let data = encode_call(POOLS_SELECTOR, &[7]);
        assert_eq!(data.len(), POOLS_SELECTOR.len() + 64);
        assert!(data.starts_with(POOLS_SELECTOR));
        assert!(data.ends_with("07"));

        assert_eq!(encode_call(POOL_COUNT_SELECTOR, &[]), POOL_COUNT_SELECTOR);
    }

    #[test]
    fn pool_tuple_decodes() {
        let payload = pool_payload(&"1".repeat(40));
        let pool = parse_pool(4, &payload).unwrap().unwrap();

        assert_eq!(pool.id, 4);
        assert_eq!(
            pool.merchant.as_str(),
            &format!("0x{}", "1".repeat(40))
        );
        assert_eq!(pool.receivable_value, BigDecimal::from(1000));
        assert_eq!(pool.advance_amount, BigDecimal::from(800));
        assert_eq!(pool.senior_face_value, BigDecimal::from(600));
        assert_eq!(pool.senior_target_raise, BigDecimal::from(570));
        assert_eq!(pool.junior_face_value, BigDecimal::from(200));
        assert_eq!(pool.junior_target_raise, BigDecimal::from(176));
        assert_eq!(pool.total_repaid, BigDecimal::from(0));
        assert!(pool.is_funded);
    }

    #[test]
    fn zero_merchant_means_absent() {
        let payload = pool_payload(&"0".repeat(40));
        assert_eq!(parse_pool(9, &payload).unwrap(), None);
    }

    #[test]
    fn wrong_word_count_is_rejected() {
        let mut payload = pool_payload(&"1".repeat(40));
        payload.push_str(&uint_word(0));
        assert!(parse_pool(1, &payload).is_err());

        assert!(parse_pool(1, "0x").is_err());
    }

    #[test]
    fn dirty_address_padding_is_rejected() {
        let mut payload = pool_payload(&"1".repeat(40));
        // poke a non-zero nibble into the merchant word padding
        payload.replace_range(2..3, "f");
        assert!(parse_pool(1, &payload).is_err());
    }

    #[test]
    fn bool_word_must_be_binary() {
        let mut payload = pool_payload(&"1".repeat(40));
        let at = payload.len() - 1;
        payload.replace_range(at.., "2");
        assert!(parse_pool(1, &payload).is_err());
    }

    #[test]
    fn u64_word_range_is_enforced() {
        assert_eq!(word_to_u64(&uint_word(42)).unwrap(), 42);
        let too_big = format!("01{}", "0".repeat(62));
        assert!(word_to_u64(&too_big).is_err());
    }
}

use std::str::FromStr;

use bigdecimal::{
    num_bigint::BigInt, BigDecimal, RoundingMode, ToPrimitive,
};

use crate::error::Error;

/// Decimals of the chain's native currency (MNT), wei-like fixed point.
pub const NATIVE_DECIMALS: i64 = 18;

/// Scale factor for percentage math, 1 bps = 0.01%.
pub const BPS_SCALE: i64 = 10_000;

/// Ratio of two wei amounts in whole basis points, truncated.
///
/// Returns 0 when the denominator is zero (or the numerator is not
/// positive) so a display layer never divides by zero. The math stays in
/// arbitrary precision until the final truncation, which keeps amounts
/// above 2^53 exact.
pub fn ratio_bps(
    numerator: &BigDecimal,
    denominator: &BigDecimal,
) -> i64 {
    let zero = BigDecimal::from(0);
    if *denominator <= zero || *numerator <= zero {
        return 0;
    }

    let bps = (numerator * BigDecimal::from(BPS_SCALE)) / denominator;
    bps.with_scale_round(0, RoundingMode::Down)
        .to_i64()
        .unwrap_or(i64::MAX)
}

pub fn percent_from_bps(bps: i64) -> f64 {
    bps as f64 / 100.0
}

/// Zero-coupon yield on cost basis: roi = d / (1 - d) with d in bps.
/// Degenerate discounts (d <= 0 or d >= 100%) report 0 instead of failing.
pub fn roi_from_discount_bps(discount_bps: i64) -> f64 {
    if discount_bps > 0 && discount_bps < BPS_SCALE {
        discount_bps as f64 / (BPS_SCALE - discount_bps) as f64 * 100.0
    } else {
        0.0
    }
}

/// Format a wei-scaled amount as a decimal string with at most 4
/// fractional digits, truncated, trailing zeros stripped.
pub fn format_units(amount: &BigDecimal, decimals: i64) -> String {
    let scaled = amount * BigDecimal::new(BigInt::from(1), decimals);
    scaled
        .with_scale_round(4, RoundingMode::Down)
        .normalized()
        .to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order_Status {
    Pending,
    Approved,
    Rejected,
    Minted,
}

impl FromStr for Order_Status {
    type Err = Error;

    fn from_str(value: &str) -> Result<Order_Status, Error> {
        match value {
            "pending" => Ok(Order_Status::Pending),
            "approved" => Ok(Order_Status::Approved),
            "rejected" => Ok(Order_Status::Rejected),
            "minted" => Ok(Order_Status::Minted),
            _ => Err(Error::InvalidOrder(format!(
                "unknown status {}",
                value
            ))),
        }
    }
}

impl From<Order_Status> for String {
    fn from(status: Order_Status) -> String {
        let value = match status {
            Order_Status::Pending => "pending",
            Order_Status::Approved => "approved",
            Order_Status::Rejected => "rejected",
            Order_Status::Minted => "minted",
        };
        value.to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wei(value: i64) -> BigDecimal {
        BigDecimal::from(value) * BigDecimal::from(10u64.pow(18))
    }

    #[test]
    fn ratio_bps_truncates_to_whole_bps() {
        // 1/3 = 3333.33.. bps, truncated
        assert_eq!(ratio_bps(&wei(1), &wei(3)), 3333);
        assert_eq!(ratio_bps(&wei(2), &wei(3)), 6666);
        assert_eq!(ratio_bps(&wei(570), &wei(570)), 10_000);
    }

    #[test]
    fn ratio_bps_zero_denominator_is_zero() {
        assert_eq!(ratio_bps(&wei(5), &BigDecimal::from(0)), 0);
        assert_eq!(ratio_bps(&BigDecimal::from(0), &BigDecimal::from(0)), 0);
    }

    #[test]
    fn ratio_bps_exact_above_f64_range() {
        // 2^53 + 1 is not representable as f64; the integer path must not
        // lose the trailing 1.
        let above = BigDecimal::from_str("9007199254740993").unwrap()
            * BigDecimal::from(10u64.pow(18));
        let double = &above * BigDecimal::from(2);
        assert_eq!(ratio_bps(&above, &double), 5_000);
    }

    #[test]
    fn roi_follows_discount_over_cost_basis() {
        // 5% discount -> 500 / 9500 * 100
        let roi = roi_from_discount_bps(500);
        assert!((roi - 5.2631578947).abs() < 1e-9);
        assert_eq!(roi_from_discount_bps(0), 0.0);
        assert_eq!(roi_from_discount_bps(10_000), 0.0);
        assert_eq!(roi_from_discount_bps(-300), 0.0);
    }

    #[test]
    fn format_units_truncates_at_four_digits() {
        let amount = BigDecimal::from_str("1234567890000000000").unwrap();
        assert_eq!(format_units(&amount, NATIVE_DECIMALS), "1.2345");

        let whole = wei(800);
        assert_eq!(format_units(&whole, NATIVE_DECIMALS), "800");

        assert_eq!(
            format_units(&BigDecimal::from(0), NATIVE_DECIMALS),
            "0"
        );
    }

    #[test]
    fn order_status_round_trips() {
        for value in ["pending", "approved", "rejected", "minted"] {
            let status = Order_Status::from_str(value).unwrap();
            assert_eq!(String::from(status), value);
        }
        assert!(Order_Status::from_str("settled").is_err());
    }
}

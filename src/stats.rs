use bigdecimal::{BigDecimal, RoundingMode};
use serde::Serialize;

use crate::{
    error::Error,
    helpers::{
        format_units, percent_from_bps, ratio_bps, roi_from_discount_bps,
        NATIVE_DECIMALS,
    },
    types::{Overview, Pool},
};

/// Share of the merchant advance attributed to the senior tranche, in
/// percent. The junior tranche carries the remainder.
const SENIOR_ADVANCE_PCT: i64 = 75;
const JUNIOR_ADVANCE_PCT: i64 = 25;

/// Investor-facing figures derived from a single pool snapshot.
///
/// Percentages are exact at basis-point resolution; monetary fields are
/// display strings in whole currency units. Recomputed on every poll
/// tick, never stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PoolStats {
    pub pool_id: u64,
    pub merchant: String,
    pub funding_progress: f64,
    pub senior_progress: f64,
    pub junior_progress: f64,
    pub senior_roi: f64,
    pub junior_roi: f64,
    pub total_value: String,
    pub advance_amount: String,
    pub senior_advance_share: String,
    pub junior_advance_share: String,
    pub senior_raised: String,
    pub senior_target: String,
    pub junior_raised: String,
    pub junior_target: String,
    pub total_raised: String,
    pub total_target: String,
    pub total_receive: String,
    pub remaining_debt: String,
    pub is_funded: bool,
}

/// Derive the full stats view for one pool.
///
/// Progress is measured against the tranche target raises, the same
/// quantity the contract compares against when it flips `isFunded`, so
/// aggregate progress reads exactly 100% at the funding boundary.
/// Degenerate inputs (zero targets, zero face values, discounts at or
/// past 100%, over-repayment) clamp to zero rather than fail; only a
/// negative monetary field is an error.
pub fn pool_stats(pool: &Pool) -> Result<PoolStats, Error> {
    validate(pool)?;

    let total_raised = &pool.senior_raised + &pool.junior_raised;
    let total_target =
        &pool.senior_target_raise + &pool.junior_target_raise;
    let total_receive =
        &pool.senior_face_value + &pool.junior_face_value;

    let funding_progress =
        percent_from_bps(ratio_bps(&total_raised, &total_target));
    let senior_progress = percent_from_bps(ratio_bps(
        &pool.senior_raised,
        &pool.senior_target_raise,
    ));
    let junior_progress = percent_from_bps(ratio_bps(
        &pool.junior_raised,
        &pool.junior_target_raise,
    ));

    let senior_roi = roi_from_discount_bps(discount_bps(
        &pool.senior_face_value,
        &pool.senior_target_raise,
    ));
    let junior_roi = roi_from_discount_bps(discount_bps(
        &pool.junior_face_value,
        &pool.junior_target_raise,
    ));

    let senior_advance_share =
        advance_share(&pool.advance_amount, SENIOR_ADVANCE_PCT);
    let junior_advance_share =
        advance_share(&pool.advance_amount, JUNIOR_ADVANCE_PCT);

    let remaining = remaining_debt(&total_receive, &pool.total_repaid);

    Ok(PoolStats {
        pool_id: pool.id,
        merchant: pool.merchant.to_string(),
        funding_progress,
        senior_progress,
        junior_progress,
        senior_roi,
        junior_roi,
        total_value: format_units(
            &pool.receivable_value,
            NATIVE_DECIMALS,
        ),
        advance_amount: format_units(
            &pool.advance_amount,
            NATIVE_DECIMALS,
        ),
        senior_advance_share: format_units(
            &senior_advance_share,
            NATIVE_DECIMALS,
        ),
        junior_advance_share: format_units(
            &junior_advance_share,
            NATIVE_DECIMALS,
        ),
        senior_raised: format_units(&pool.senior_raised, NATIVE_DECIMALS),
        senior_target: format_units(
            &pool.senior_target_raise,
            NATIVE_DECIMALS,
        ),
        junior_raised: format_units(&pool.junior_raised, NATIVE_DECIMALS),
        junior_target: format_units(
            &pool.junior_target_raise,
            NATIVE_DECIMALS,
        ),
        total_raised: format_units(&total_raised, NATIVE_DECIMALS),
        total_target: format_units(&total_target, NATIVE_DECIMALS),
        total_receive: format_units(&total_receive, NATIVE_DECIMALS),
        remaining_debt: format_units(&remaining, NATIVE_DECIMALS),
        is_funded: pool.is_funded,
    })
}

/// Aggregate figures across every pool, as shown on the market page.
pub fn market_overview(pools: &[Pool]) -> Result<Overview, Error> {
    let mut total_value = BigDecimal::from(0);
    let mut total_raised = BigDecimal::from(0);
    let mut funded_pools = 0u64;
    let mut senior_roi_sum = 0.0;
    let mut junior_roi_sum = 0.0;

    for pool in pools {
        validate(pool)?;

        total_value += &pool.receivable_value;
        total_raised += &pool.senior_raised + &pool.junior_raised;
        if pool.is_funded {
            funded_pools += 1;
        }

        senior_roi_sum += roi_from_discount_bps(discount_bps(
            &pool.senior_face_value,
            &pool.senior_target_raise,
        ));
        junior_roi_sum += roi_from_discount_bps(discount_bps(
            &pool.junior_face_value,
            &pool.junior_target_raise,
        ));
    }

    let count = pools.len() as u64;
    let (avg_senior_roi, avg_junior_roi) = if count > 0 {
        (
            senior_roi_sum / count as f64,
            junior_roi_sum / count as f64,
        )
    } else {
        (0.0, 0.0)
    };

    Ok(Overview {
        total_pools: count,
        funded_pools,
        total_value: format_units(&total_value, NATIVE_DECIMALS),
        total_raised: format_units(&total_raised, NATIVE_DECIMALS),
        avg_senior_roi,
        avg_junior_roi,
    })
}

/// Outstanding debt owed to both tranches, floored at zero.
pub fn remaining_debt(
    face_total: &BigDecimal,
    repaid: &BigDecimal,
) -> BigDecimal {
    let outstanding = face_total - repaid;
    if outstanding < BigDecimal::from(0) {
        BigDecimal::from(0)
    } else {
        outstanding
    }
}

/// Discount to face value in bps: (face - target) / face.
/// 0 when face is zero or the pool prices the tranche above face.
fn discount_bps(face: &BigDecimal, target: &BigDecimal) -> i64 {
    ratio_bps(&(face - target), face)
}

fn advance_share(advance: &BigDecimal, pct: i64) -> BigDecimal {
    ((advance * BigDecimal::from(pct)) / BigDecimal::from(100))
        .with_scale_round(0, RoundingMode::Down)
}

fn validate(pool: &Pool) -> Result<(), Error> {
    let zero = BigDecimal::from(0);
    for (name, value) in pool.monetary_fields() {
        if *value < zero {
            return Err(Error::InvalidPool(format!(
                "pool {}: negative {}",
                pool.id, name
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;
    use crate::types::Address;

    fn wei(value: i64) -> BigDecimal {
        BigDecimal::from(value) * BigDecimal::from(10u64.pow(18))
    }

    fn sample_pool() -> Pool {
        Pool {
            id: 1,
            merchant: Address::from_str(
                "0x1111111111111111111111111111111111111111",
            )
            .unwrap(),
            receivable_value: wei(1000),
            advance_amount: wei(800),
            senior_token: Address::from_str(
                "0x2222222222222222222222222222222222222222",
            )
            .unwrap(),
            junior_token: Address::from_str(
                "0x3333333333333333333333333333333333333333",
            )
            .unwrap(),
            senior_face_value: wei(600),
            senior_target_raise: wei(570),
            junior_face_value: wei(200),
            junior_target_raise: wei(176),
            senior_raised: wei(570),
            junior_raised: wei(176),
            total_repaid: wei(0),
            is_funded: true,
        }
    }

    #[test]
    fn fully_raised_pool_reads_one_hundred_percent() {
        let stats = pool_stats(&sample_pool()).unwrap();

        assert_eq!(stats.funding_progress, 100.0);
        assert_eq!(stats.senior_progress, 100.0);
        assert_eq!(stats.junior_progress, 100.0);

        // 5% senior discount, 12% junior discount
        assert!((stats.senior_roi - 5.263157894736842).abs() < 1e-9);
        assert!((stats.junior_roi - 13.636363636363637).abs() < 1e-9);

        assert_eq!(stats.total_value, "1000");
        assert_eq!(stats.advance_amount, "800");
        assert_eq!(stats.senior_advance_share, "600");
        assert_eq!(stats.junior_advance_share, "200");
        assert_eq!(stats.total_receive, "800");
        assert_eq!(stats.remaining_debt, "800");
        assert!(stats.is_funded);
    }

    #[test]
    fn partial_raise_truncates_to_bps() {
        let mut pool = sample_pool();
        pool.senior_raised = wei(190);
        pool.junior_raised = wei(0);
        pool.is_funded = false;

        let stats = pool_stats(&pool).unwrap();

        // 190 / 570 = 33.33%, floored at bps resolution
        assert_eq!(stats.senior_progress, 33.33);
        assert_eq!(stats.junior_progress, 0.0);
        // 190 / 746 = 25.46%
        assert_eq!(stats.funding_progress, 25.46);
    }

    #[test]
    fn over_repayment_floors_remaining_debt() {
        let mut pool = sample_pool();
        pool.total_repaid = wei(900);

        let stats = pool_stats(&pool).unwrap();
        assert_eq!(stats.remaining_debt, "0");
    }

    #[test]
    fn exact_repayment_clears_remaining_debt() {
        let mut pool = sample_pool();
        pool.total_repaid = wei(800);

        let stats = pool_stats(&pool).unwrap();
        assert_eq!(stats.remaining_debt, "0");
    }

    #[test]
    fn zero_targets_report_zero_progress() {
        let mut pool = sample_pool();
        pool.senior_target_raise = BigDecimal::from(0);
        pool.junior_target_raise = BigDecimal::from(0);
        pool.senior_face_value = BigDecimal::from(0);
        pool.junior_face_value = BigDecimal::from(0);

        let stats = pool_stats(&pool).unwrap();

        assert_eq!(stats.funding_progress, 0.0);
        assert_eq!(stats.senior_progress, 0.0);
        assert_eq!(stats.junior_progress, 0.0);
        assert_eq!(stats.senior_roi, 0.0);
        assert_eq!(stats.junior_roi, 0.0);
    }

    #[test]
    fn tranche_priced_above_face_reports_zero_roi() {
        let mut pool = sample_pool();
        // target > face: inconsistent on-chain state, not a crash
        pool.senior_target_raise = wei(650);

        let stats = pool_stats(&pool).unwrap();
        assert_eq!(stats.senior_roi, 0.0);
    }

    #[test]
    fn roi_grows_as_discount_deepens() {
        let mut previous = 0.0;
        for target in [950, 900, 800, 700, 500] {
            let mut pool = sample_pool();
            pool.senior_face_value = wei(1000);
            pool.senior_target_raise = wei(target);

            let stats = pool_stats(&pool).unwrap();
            assert!(stats.senior_roi >= previous);
            previous = stats.senior_roi;
        }
    }

    #[test]
    fn stats_are_deterministic() {
        let pool = sample_pool();
        assert_eq!(
            pool_stats(&pool).unwrap(),
            pool_stats(&pool).unwrap()
        );
    }

    #[test]
    fn negative_monetary_field_is_rejected() {
        let mut pool = sample_pool();
        pool.total_repaid = wei(-1);

        match pool_stats(&pool) {
            Err(Error::InvalidPool(message)) => {
                assert!(message.contains("totalRepaid"));
            }
            other => panic!("expected InvalidPool, got {:?}", other),
        }
    }

    #[test]
    fn amounts_above_f64_precision_stay_exact() {
        let mut pool = sample_pool();
        // 2^53 + 1 whole tokens in wei
        let raised = BigDecimal::from_str("9007199254740993").unwrap()
            * BigDecimal::from(10u64.pow(18));
        pool.senior_target_raise = &raised * BigDecimal::from(2);
        pool.senior_raised = raised;

        let stats = pool_stats(&pool).unwrap();
        assert_eq!(stats.senior_progress, 50.0);
    }

    #[test]
    fn overview_aggregates_across_pools() {
        let mut second = sample_pool();
        second.id = 2;
        second.is_funded = false;
        second.senior_raised = wei(0);
        second.junior_raised = wei(0);

        let overview =
            market_overview(&[sample_pool(), second]).unwrap();

        assert_eq!(overview.total_pools, 2);
        assert_eq!(overview.funded_pools, 1);
        assert_eq!(overview.total_value, "2000");
        assert_eq!(overview.total_raised, "746");
        assert!((overview.avg_senior_roi - 5.263157894736842).abs() < 1e-9);
    }

    #[test]
    fn overview_of_no_pools_is_all_zero() {
        let overview = market_overview(&[]).unwrap();
        assert_eq!(overview.total_pools, 0);
        assert_eq!(overview.avg_senior_roi, 0.0);
        assert_eq!(overview.total_value, "0");
    }
}

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{types::BigDecimal, FromRow};

use crate::{
    error::Error,
    types::{Address, Pool},
};

/// Snapshot of one receivables pool at one poll tick.
#[derive(Debug, Clone, FromRow)]
pub struct RP_Pool_State {
    pub RP_Pool_id: i64,
    pub RP_Pool_timestamp: DateTime<Utc>,
    pub RP_merchant: String,
    pub RP_receivable_value: BigDecimal,
    pub RP_advance_amount: BigDecimal,
    pub RP_senior_token: String,
    pub RP_junior_token: String,
    pub RP_senior_face_value: BigDecimal,
    pub RP_senior_target_raise: BigDecimal,
    pub RP_junior_face_value: BigDecimal,
    pub RP_junior_target_raise: BigDecimal,
    pub RP_senior_raised: BigDecimal,
    pub RP_junior_raised: BigDecimal,
    pub RP_total_repaid: BigDecimal,
    pub RP_is_funded: bool,
}

impl RP_Pool_State {
    pub fn from_pool(
        pool: &Pool,
        timestamp: DateTime<Utc>,
    ) -> Result<RP_Pool_State, Error> {
        Ok(RP_Pool_State {
            RP_Pool_id: pool.id.try_into()?,
            RP_Pool_timestamp: timestamp,
            RP_merchant: pool.merchant.to_string(),
            RP_receivable_value: pool.receivable_value.to_owned(),
            RP_advance_amount: pool.advance_amount.to_owned(),
            RP_senior_token: pool.senior_token.to_string(),
            RP_junior_token: pool.junior_token.to_string(),
            RP_senior_face_value: pool.senior_face_value.to_owned(),
            RP_senior_target_raise: pool.senior_target_raise.to_owned(),
            RP_junior_face_value: pool.junior_face_value.to_owned(),
            RP_junior_target_raise: pool.junior_target_raise.to_owned(),
            RP_senior_raised: pool.senior_raised.to_owned(),
            RP_junior_raised: pool.junior_raised.to_owned(),
            RP_total_repaid: pool.total_repaid.to_owned(),
            RP_is_funded: pool.is_funded,
        })
    }
}

impl TryFrom<&RP_Pool_State> for Pool {
    type Error = Error;

    fn try_from(state: &RP_Pool_State) -> Result<Pool, Error> {
        Ok(Pool {
            id: state.RP_Pool_id.try_into()?,
            merchant: Address::from_str(&state.RP_merchant)?,
            receivable_value: state.RP_receivable_value.to_owned(),
            advance_amount: state.RP_advance_amount.to_owned(),
            senior_token: Address::from_str(&state.RP_senior_token)?,
            junior_token: Address::from_str(&state.RP_junior_token)?,
            senior_face_value: state.RP_senior_face_value.to_owned(),
            senior_target_raise: state
                .RP_senior_target_raise
                .to_owned(),
            junior_face_value: state.RP_junior_face_value.to_owned(),
            junior_target_raise: state
                .RP_junior_target_raise
                .to_owned(),
            senior_raised: state.RP_senior_raised.to_owned(),
            junior_raised: state.RP_junior_raised.to_owned(),
            total_repaid: state.RP_total_repaid.to_owned(),
            is_funded: state.RP_is_funded,
        })
    }
}

/// Merchant sales order; the receivable a pool is later created from.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SO_Order {
    pub SO_id: String,
    pub SO_merchant: String,
    pub SO_customer: String,
    pub SO_amount: BigDecimal,
    pub SO_description: String,
    pub SO_status: String,
    pub SO_created_at: DateTime<Utc>,
    pub SO_due_date: DateTime<Utc>,
}

use std::str::FromStr;

use actix_web::{get, post, web, HttpResponse};
use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    configuration::{AppState, State},
    error::Error,
    helpers::Order_Status,
    model::SO_Order,
    types::Address,
};

const DEFAULT_PAGE_SIZE: i64 = 10;
const MAX_PAGE_SIZE: i64 = 100;

#[derive(Debug, Deserialize)]
pub struct Query {
    merchant: Option<String>,
    skip: Option<i64>,
    limit: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct OrdersResponse {
    pub orders: Vec<SO_Order>,
}

#[get("/orders")]
pub async fn get_index(
    state: web::Data<AppState<State>>,
    data: web::Query<Query>,
) -> Result<HttpResponse, Error> {
    let skip = data.skip.unwrap_or(0).max(0);
    let limit = data
        .limit
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .clamp(1, MAX_PAGE_SIZE);

    let orders = match &data.merchant {
        Some(merchant) => {
            let merchant = Address::from_str(merchant)?;
            state
                .database
                .so_order
                .get_by_merchant(merchant.to_string(), skip, limit)
                .await?
        }
        None => state.database.so_order.get_all(skip, limit).await?,
    };

    Ok(HttpResponse::Ok().json(OrdersResponse { orders }))
}

#[derive(Debug, Deserialize)]
pub struct CreateOrder {
    pub merchant: String,
    pub customer: String,
    /// Wei-scaled amount as a decimal string.
    pub amount: String,
    pub description: String,
    /// RFC 3339 due date.
    pub due_date: String,
}

#[post("/orders")]
pub async fn post_index(
    state: web::Data<AppState<State>>,
    order: web::Json<CreateOrder>,
) -> Result<HttpResponse, Error> {
    let merchant = Address::from_str(&order.merchant)?;
    let customer = Address::from_str(&order.customer)?;

    let amount = BigDecimal::from_str(&order.amount)?;
    if amount < BigDecimal::from(0) {
        return Err(Error::InvalidOrder(String::from(
            "amount must not be negative",
        )));
    }
    if !amount.is_integer() {
        return Err(Error::InvalidOrder(String::from(
            "amount must be a whole number of wei",
        )));
    }

    if order.description.trim().is_empty() {
        return Err(Error::InvalidOrder(String::from(
            "description must not be empty",
        )));
    }

    let due_date = DateTime::parse_from_rfc3339(&order.due_date)
        .map_err(|err| {
            Error::InvalidOrder(format!("bad due date: {}", err))
        })?
        .with_timezone(&Utc);

    let count = state.database.so_order.count().await?;
    let id = format!("SO-{:03}", count + 1);

    let data = SO_Order {
        SO_id: id.to_owned(),
        SO_merchant: merchant.to_string(),
        SO_customer: customer.to_string(),
        SO_amount: amount,
        SO_description: order.description.trim().to_owned(),
        SO_status: String::from(Order_Status::Pending),
        SO_created_at: Utc::now(),
        SO_due_date: due_date,
    };

    state.database.so_order.insert(data).await?;
    let created = state.database.so_order.get_one(id).await?;

    Ok(HttpResponse::Ok().json(created))
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatus {
    pub order_id: String,
    pub status: String,
}

/// Customer approval flow. Orders only move forward:
/// pending -> approved | rejected, approved -> minted.
#[post("/orders/status")]
pub async fn status_index(
    state: web::Data<AppState<State>>,
    update: web::Json<UpdateStatus>,
) -> Result<HttpResponse, Error> {
    let next = Order_Status::from_str(&update.status)?;

    let order = state
        .database
        .so_order
        .get_one(update.order_id.to_owned())
        .await?;

    let Some(order) = order else {
        return Ok(HttpResponse::NotFound().json(OrdersResponse {
            orders: vec![],
        }));
    };

    let current = Order_Status::from_str(&order.SO_status)?;
    let allowed = matches!(
        (current, next),
        (Order_Status::Pending, Order_Status::Approved)
            | (Order_Status::Pending, Order_Status::Rejected)
            | (Order_Status::Approved, Order_Status::Minted)
    );

    if !allowed {
        return Err(Error::InvalidOrder(format!(
            "cannot move order {} from {} to {}",
            order.SO_id,
            order.SO_status,
            String::from(next)
        )));
    }

    state
        .database
        .so_order
        .update_status(order.SO_id.to_owned(), String::from(next))
        .await?;

    let updated = state.database.so_order.get_one(order.SO_id).await?;

    Ok(HttpResponse::Ok().json(updated))
}

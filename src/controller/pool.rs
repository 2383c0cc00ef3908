use actix_web::{get, web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::{
    cache_keys,
    configuration::{AppState, State},
    error::Error,
    stats::pool_stats,
    types::Pool,
};

#[derive(Debug, Deserialize)]
pub struct Query {
    id: u64,
}

#[derive(Debug, Serialize)]
pub struct NotFoundResponse {
    pub error: String,
}

#[get("/pool")]
pub async fn index(
    state: web::Data<AppState<State>>,
    data: web::Query<Query>,
) -> Result<HttpResponse, Error> {
    if data.id < 1 {
        return Ok(HttpResponse::BadRequest().json(NotFoundResponse {
            error: String::from("pool ids start at 1"),
        }));
    }

    let key = cache_keys::pool_key(data.id);
    if let Some(cached) = state.api_cache.pool.get(&key).await {
        return Ok(HttpResponse::Ok().json(cached));
    }

    let row = state
        .database
        .rp_pool_state
        .get_latest(data.id.try_into()?)
        .await?;

    let Some(row) = row else {
        return Ok(HttpResponse::NotFound().json(NotFoundResponse {
            error: format!("pool {} does not exist", data.id),
        }));
    };

    let pool = Pool::try_from(&row)?;
    let stats = pool_stats(&pool)?;

    state.api_cache.pool.set(&key, stats.clone()).await;

    Ok(HttpResponse::Ok().json(stats))
}

use actix_web::{get, web, HttpResponse};
use serde::Serialize;

use crate::{
    cache_keys,
    configuration::{AppState, State},
    error::Error,
    stats::{pool_stats, PoolStats},
    types::Pool,
};

#[derive(Debug, Serialize)]
pub struct PoolsResponse {
    pub pools: Vec<PoolStats>,
}

/// Latest stats for every known pool. Served from the poller's cache;
/// on a cold cache the latest snapshots are read back from the
/// database and recomputed.
#[get("/pools")]
pub async fn index(
    state: web::Data<AppState<State>>,
) -> Result<HttpResponse, Error> {
    if let Some(cached) =
        state.api_cache.pools.get(cache_keys::POOLS).await
    {
        return Ok(HttpResponse::Ok().json(PoolsResponse {
            pools: cached,
        }));
    }

    let rows = state.database.rp_pool_state.get_latest_all().await?;

    let mut data = Vec::with_capacity(rows.len());
    for row in &rows {
        let pool = Pool::try_from(row)?;
        data.push(pool_stats(&pool)?);
    }

    state
        .api_cache
        .pools
        .set(cache_keys::POOLS, data.clone())
        .await;

    Ok(HttpResponse::Ok().json(PoolsResponse { pools: data }))
}

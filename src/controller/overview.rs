use actix_web::{get, web, HttpResponse};

use crate::{
    cache_keys,
    configuration::{AppState, State},
    error::Error,
    stats::market_overview,
    types::Pool,
};

/// Market-wide aggregates shown at the top of the pools page.
#[get("/overview")]
pub async fn index(
    state: web::Data<AppState<State>>,
) -> Result<HttpResponse, Error> {
    if let Some(cached) =
        state.api_cache.overview.get(cache_keys::OVERVIEW).await
    {
        return Ok(HttpResponse::Ok().json(cached));
    }

    let rows = state.database.rp_pool_state.get_latest_all().await?;

    let mut pools = Vec::with_capacity(rows.len());
    for row in &rows {
        pools.push(Pool::try_from(row)?);
    }

    let overview = market_overview(&pools)?;

    state
        .api_cache
        .overview
        .set(cache_keys::OVERVIEW, overview.clone())
        .await;

    Ok(HttpResponse::Ok().json(overview))
}

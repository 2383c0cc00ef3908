use chrono::Utc;
use futures::future::join_all;
use tokio::{time, time::Duration};
use tracing::{error, info};

use crate::{
    cache_keys,
    configuration::{AppState, State},
    error::Error,
    model::RP_Pool_State,
    stats::{market_overview, pool_stats},
};

/// One full sweep: read every pool from the contract, persist a
/// snapshot row per pool and swap the API caches wholesale.
pub async fn fetch_insert(
    app_state: AppState<State>,
) -> Result<(), Error> {
    let timestamp = Utc::now();
    let count = app_state.rpc.pool_count().await?;

    let mut joins = Vec::new();
    for id in 1..=count {
        joins.push(app_state.rpc.pool(id));
    }

    let mut pools = Vec::new();
    for result in join_all(joins).await {
        match result {
            // zero merchant: id not (yet) assigned, skip silently
            Ok(Some(pool)) => pools.push(pool),
            Ok(None) => {}
            Err(err) => return Err(err),
        }
    }

    let mut snapshots = Vec::new();
    let mut stats_all = Vec::new();

    for pool in &pools {
        snapshots.push(RP_Pool_State::from_pool(pool, timestamp)?);

        let stats = pool_stats(pool)?;
        app_state
            .api_cache
            .pool
            .set(&cache_keys::pool_key(pool.id), stats.clone())
            .await;
        stats_all.push(stats);
    }

    let overview = market_overview(&pools)?;

    app_state
        .database
        .rp_pool_state
        .insert_many(&snapshots)
        .await?;

    app_state
        .api_cache
        .pools
        .set(cache_keys::POOLS, stats_all)
        .await;
    app_state
        .api_cache
        .overview
        .set(cache_keys::OVERVIEW, overview)
        .await;

    info!("Synced {} pools of {} ids", pools.len(), count);

    Ok(())
}

/// Recurring poll driver. A failed sweep is logged and retried on the
/// next tick so a flaky node cannot take the service down.
pub async fn pool_state_task(
    app_state: AppState<State>,
) -> Result<(), Error> {
    if !app_state.config.enable_poll {
        return Ok(());
    }

    let interval_value = app_state.config.poll_interval;
    let mut interval =
        time::interval(Duration::from_secs(interval_value));

    tokio::spawn(async move {
        interval.tick().await;
        loop {
            interval.tick().await;
            let app = app_state.clone();
            if let Err(err) = fetch_insert(app).await {
                error!("Pool sync error {}", err);
            };
        }
    })
    .await?
}

use tracing::{error, info, Level};

use cascade_etl::{
    configuration::{
        get_configuration, set_configuration, AppState, Config, State,
    },
    error::Error,
    handler::pool_state,
    provider::{DatabasePool, EvmRpc},
    server,
};

#[tokio::main]
async fn main() -> Result<(), Error> {
    let result = app_main().await;

    if let Err(err) = &result {
        error!("{}", err);
    }

    result
}

async fn app_main() -> Result<(), Error> {
    let subscriber = tracing_subscriber::fmt()
        .compact()
        .with_level(true)
        .with_max_level(Level::INFO)
        .with_file(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let (config, database) = match init().await {
        Ok((config, database)) => (config, database),
        Err(e) => return Err(Error::ConfigurationError(e.to_string())),
    };

    let rpc = EvmRpc::new(config.clone())?;

    let chain_id = rpc.chain_id().await?;
    if chain_id != config.chain_id {
        return Err(Error::ConfigurationError(format!(
            "node reports chain id {}, configured {}",
            chain_id, config.chain_id
        )));
    }
    info!("Connected to chain {}", chain_id);

    let state = State::new(config, database, rpc).await?;
    let app_state = AppState::new(state);

    pool_state::fetch_insert(app_state.clone()).await?;

    let (_, _) = tokio::try_join!(
        pool_state::pool_state_task(app_state.clone()),
        server::server_task(&app_state),
    )?;

    Ok(())
}

async fn init() -> Result<(Config, DatabasePool), Error> {
    set_configuration()?;
    let config = get_configuration()?;
    let database = DatabasePool::new(&config).await?;
    Ok((config, database))
}

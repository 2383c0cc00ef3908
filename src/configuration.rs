use std::{env, fs, ops::Deref, str::FromStr, sync::Arc};

use crate::{
    cache::ApiCache,
    dao::read_migration,
    error::Error,
    provider::{DatabasePool, EvmRpc},
    types::Address,
};

/// Chain id the service expects when none is configured.
#[cfg(feature = "mainnet")]
pub const DEFAULT_CHAIN_ID: u64 = 5000;
#[cfg(not(feature = "mainnet"))]
pub const DEFAULT_CHAIN_ID: u64 = 5003;

#[derive(Debug)]
pub struct AppState<T>(Arc<T>);

impl<T> AppState<T> {
    pub fn new(state: T) -> AppState<T> {
        AppState(Arc::new(state))
    }
}

impl<T> Clone for AppState<T> {
    fn clone(&self) -> AppState<T> {
        AppState(Arc::clone(&self.0))
    }
}

impl<T> Deref for AppState<T> {
    type Target = Arc<T>;

    fn deref(&self) -> &Arc<T> {
        &self.0
    }
}

#[derive(Debug)]
pub struct State {
    pub config: Config,
    pub database: DatabasePool,
    pub rpc: EvmRpc,
    pub api_cache: ApiCache,
}

impl State {
    pub async fn new(
        config: Config,
        database: DatabasePool,
        rpc: EvmRpc,
    ) -> Result<State, Error> {
        Self::init_migrations(&database).await?;
        let api_cache = ApiCache::new(config.cache_ttl);
        Ok(Self {
            config,
            database,
            rpc,
            api_cache,
        })
    }

    async fn init_migrations(database: &DatabasePool) -> Result<(), Error> {
        let files = vec!["rp_pool_state.sql", "so_order.sql"];

        let dir = env!("CARGO_MANIFEST_DIR");

        for file in files {
            let data = read_migration(dir, file)?;
            sqlx::query(data.as_str()).execute(&database.pool).await?;
        }

        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub rpc_host: String,
    pub protocol_contract: Address,
    pub chain_id: u64,
    pub poll_interval: u64,
    pub enable_poll: bool,
    pub timeout: u64,
    pub cache_ttl: u64,
    pub server_host: String,
    pub port: u16,
    pub allowed_origins: Vec<String>,
    pub static_dir: String,
}

pub fn get_configuration() -> Result<Config, Error> {
    let database_url = env::var("DATABASE_URL")?;
    let rpc_host = env::var("RPC_HOST")?;
    let protocol_contract =
        Address::from_str(&env::var("PROTOCOL_CONTRACT")?)?;

    let chain_id = match env::var("CHAIN_ID") {
        Ok(value) => value.parse()?,
        Err(_) => DEFAULT_CHAIN_ID,
    };

    let poll_interval = env::var("POLL_INTERVAL_IN_SEC")?.parse()?;
    let enable_poll = env::var("ENABLE_POLL")?.parse()?;
    let timeout = env::var("TIMEOUT")?.parse()?;
    let cache_ttl = env::var("CACHE_TTL_IN_SEC")?.parse()?;

    let server_host = env::var("SERVER_HOST")?;
    let port: u16 = env::var("PORT")?.parse()?;
    let allowed_origins = env::var("ALLOWED_ORIGINS")?
        .split(',')
        .map(|item| item.to_owned())
        .collect::<Vec<String>>();
    let static_dir = format!(
        "{}/{}",
        env!("CARGO_MANIFEST_DIR"),
        env::var("STATIC_DIRECTORY")?
    );

    let config = Config {
        database_url,
        rpc_host,
        protocol_contract,
        chain_id,
        poll_interval,
        enable_poll,
        timeout,
        cache_ttl,
        server_host,
        port,
        allowed_origins,
        static_dir,
    };

    Ok(config)
}

pub fn set_configuration() -> Result<(), Error> {
    let config_file: &str = ".env";
    let app_config_file: &str = "cascade.conf";

    let directory = env!("CARGO_MANIFEST_DIR");
    let path = format!("{}/{}", directory, config_file);
    let app_config_path = format!("{}/{}", directory, app_config_file);

    let config_string = fs::read_to_string(path)?;
    let app_config_string = fs::read_to_string(app_config_path)?;

    parse_config_string(config_string);
    parse_config_string(app_config_string);

    Ok(())
}

fn parse_config_string(config: String) {
    let params: Vec<Option<(&str, &str)>> = config
        .split('\n')
        .map(|s| {
            let element = s.find('=');
            if let Some(e) = element {
                return Some(s.split_at(e));
            }
            None
        })
        .map(|value| {
            if let Some((k, v)) = value {
                return Some((k, &v[1..]));
            }
            None
        })
        .collect();

    for (key, value) in params.into_iter().flatten() {
        env::set_var(key, value);
    }
}

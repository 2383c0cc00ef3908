use crate::{
    configuration::Config,
    dao::{PoolOption, PoolType},
    error::Error,
    model::{RP_Pool_State, SO_Order, Table},
};

#[derive(Debug)]
pub struct DatabasePool {
    pub rp_pool_state: Table<RP_Pool_State>,
    pub so_order: Table<SO_Order>,
    pub pool: PoolType,
}

impl DatabasePool {
    pub async fn new(config: &Config) -> Result<DatabasePool, Error> {
        let pool = PoolOption::new()
            .max_connections(20)
            .connect(config.database_url.as_str())
            .await?;

        Ok(DatabasePool {
            rp_pool_state: Table::new(pool.clone()),
            so_order: Table::new(pool.clone()),
            pool,
        })
    }

    pub fn get_pool(&self) -> &PoolType {
        &self.pool
    }
}

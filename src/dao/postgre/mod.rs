pub use self::{
    path::read_migration,
    types::{DBRow, DataBase, PoolOption, PoolType, QueryResult},
};

mod path;
mod rp_pool_state;
mod so_order;
mod types;

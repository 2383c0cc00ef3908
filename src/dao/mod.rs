mod postgre;

pub use postgre::{
    read_migration, DBRow, DataBase, PoolOption, PoolType, QueryResult,
};

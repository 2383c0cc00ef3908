pub use self::{database::DatabasePool, rpc::EvmRpc};

pub mod abi;
mod database;
mod rpc;

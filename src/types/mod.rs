pub use self::{
    overview::Overview,
    pool::{Address, Pool},
    rpc::{CallParams, RpcErrorBody, RpcResponse},
};

mod overview;
mod pool;
mod rpc;

use serde::{Deserialize, Serialize};

/// `eth_call` argument object.
#[derive(Debug, Serialize)]
pub struct CallParams {
    pub to: String,
    pub data: String,
}

#[derive(Debug, Deserialize)]
pub struct RpcResponse {
    pub result: Option<String>,
    pub error: Option<RpcErrorBody>,
}

#[derive(Debug, Deserialize)]
pub struct RpcErrorBody {
    pub code: i64,
    pub message: String,
}

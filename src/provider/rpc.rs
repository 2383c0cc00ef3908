use std::time::Duration;

use serde_json::json;
use url::Url;

use crate::{
    configuration::Config,
    error::Error,
    provider::abi::{
        encode_call, parse_pool, split_words, word_to_u64,
        POOLS_SELECTOR, POOL_COUNT_SELECTOR,
    },
    types::{CallParams, Pool, RpcResponse},
};

/// JSON-RPC client for the CascadeProtocol contract.
#[derive(Debug)]
pub struct EvmRpc {
    pub config: Config,
    client: reqwest::Client,
}

impl EvmRpc {
    pub fn new(config: Config) -> Result<EvmRpc, Error> {
        Url::parse(&config.rpc_host)?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .build()?;

        Ok(EvmRpc { config, client })
    }

    pub async fn pool_count(&self) -> Result<u64, Error> {
        let result = self
            .eth_call(encode_call(POOL_COUNT_SELECTOR, &[]))
            .await?;
        let words = split_words(&result)?;

        if words.len() != 1 {
            return Err(Error::DecodeResponse(format!(
                "poolCount returned {} words",
                words.len()
            )));
        }

        word_to_u64(words[0])
    }

    /// Read one pool snapshot; `None` when the contract reports no pool
    /// under this id (zero merchant address).
    pub async fn pool(&self, id: u64) -> Result<Option<Pool>, Error> {
        let result =
            self.eth_call(encode_call(POOLS_SELECTOR, &[id])).await?;
        parse_pool(id, &result)
    }

    /// Chain id of the connected node, for a startup sanity check
    /// against the configured network.
    pub async fn chain_id(&self) -> Result<u64, Error> {
        let result =
            self.request("eth_chainId", json!([])).await?;
        let hex = result.strip_prefix("0x").ok_or_else(|| {
            Error::DecodeResponse(format!(
                "chain id is not a hex quantity: {}",
                result
            ))
        })?;
        Ok(u64::from_str_radix(hex, 16)?)
    }

    async fn eth_call(&self, data: String) -> Result<String, Error> {
        let params = CallParams {
            to: self.config.protocol_contract.to_string(),
            data,
        };
        self.request("eth_call", json!([params, "latest"])).await
    }

    async fn request(
        &self,
        method: &str,
        params: serde_json::Value,
    ) -> Result<String, Error> {
        let body = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": method,
            "params": params,
        });

        let response = self
            .client
            .post(&self.config.rpc_host)
            .json(&body)
            .send()
            .await?
            .json::<RpcResponse>()
            .await?;

        if let Some(error) = response.error {
            return Err(Error::Rpc {
                code: error.code,
                message: error.message,
            });
        }

        response.result.ok_or_else(|| {
            Error::DecodeResponse(String::from(
                "RPC response holds neither result nor error",
            ))
        })
    }
}

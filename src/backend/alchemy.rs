use anyhow::Result;
use axum::async_trait;
use serde::{de::DeserializeOwned, Deserialize};
use serde_json::{json, Value};
use web3::{transports::Http, Transport};

use crate::{backend::ReceiptProvider, chain::Chain};

const ENV_PREFIX: &str = "ALCHEMY_";
const GET_RECEIPTS_METHOD: &str = "alchemy_getTransactionReceipts";

#[derive(Clone, Deserialize)]
pub struct Config {
    pub api_key: String,
}

#[derive(Deserialize)]
struct ReceiptsResponse {
    receipts: Option<Vec<Value>>,
}

pub struct AlchemyProvider {
    env_prefix: String,
}

impl Default for AlchemyProvider {
    fn default() -> Self {
        Self::with_env_prefix(ENV_PREFIX)
    }
}

impl AlchemyProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads credentials from `<prefix>API_KEY` instead of `ALCHEMY_API_KEY`.
    pub fn with_env_prefix(prefix: &str) -> Self {
        Self {
            env_prefix: prefix.to_string(),
        }
    }

    /// Credentials are read from the environment on every call, so a rotated
    /// key is picked up without a restart.
    fn config(&self) -> Result<Config> {
        prefixed_config(&self.env_prefix, std::env::vars())
    }

    fn rpc_url(chain: Chain, api_key: &str) -> String {
        format!("https://{}.g.alchemy.com/v2/{api_key}", chain.rpc_subdomain())
    }
}

fn prefixed_config<T, I>(prefix: &str, vars: I) -> Result<T>
where
    T: DeserializeOwned,
    I: IntoIterator<Item = (String, String)>,
{
    Ok(envy::prefixed(prefix).from_iter(vars)?)
}

#[async_trait]
impl ReceiptProvider for AlchemyProvider {
    fn name(&self) -> &'static str {
        "alchemy"
    }

    async fn get_transaction_receipts(&self, chain: Chain, block_hash: &str) -> Result<Vec<Value>> {
        let config = self.config()?;
        let transport = Http::new(&Self::rpc_url(chain, &config.api_key))?;

        tracing::debug!("Requesting receipts of block {block_hash} on {chain}");

        let result = transport
            .execute(GET_RECEIPTS_METHOD, vec![json!({ "blockHash": block_hash })])
            .await?;
        let response: ReceiptsResponse = serde_json::from_value(result)?;

        Ok(response.receipts.unwrap_or_default())
    }
}

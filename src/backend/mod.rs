use anyhow::Result;
use axum::async_trait;
use serde_json::Value;

use crate::chain::Chain;

pub mod alchemy;
pub mod mock;

#[async_trait]
pub trait ReceiptProvider: Sync + Send {
    fn name(&self) -> &'static str;

    /// Fetch all transaction receipts of the block with the given hash, as
    /// returned by the provider. An unknown block yields an empty list.
    async fn get_transaction_receipts(
        &self,
        chain: Chain,
        block_hash: &str,
    ) -> Result<Vec<Value>>;
}

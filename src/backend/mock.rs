use std::{
    collections::HashMap,
    sync::atomic::{AtomicUsize, Ordering},
};

use anyhow::{bail, Result};
use axum::async_trait;
use serde_json::{json, Map, Value};
use web3::types::U256;

use crate::{backend::ReceiptProvider, chain::Chain, receipt::TransactionReceipt};

/// Block served by [`MockProvider::demo`].
pub const DEMO_BLOCK_HASH: &str =
    "0x0000000000000000000000000000000000000000000000000000000000000001";
const DEMO_TX_COUNT: usize = 25;

#[derive(Default)]
pub struct MockProvider {
    blocks: HashMap<String, Vec<Value>>,
    failure: Option<String>,
    calls: AtomicUsize,
}

impl MockProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// A provider serving a single block of generated receipts.
    pub fn demo() -> Self {
        let receipts = (0..DEMO_TX_COUNT).map(sample_receipt_json).collect();
        Self::new().with_block(DEMO_BLOCK_HASH, receipts)
    }

    pub fn with_block(mut self, block_hash: &str, receipts: Vec<Value>) -> Self {
        self.blocks.insert(block_hash.to_string(), receipts);
        self
    }

    /// Every call fails with the given message.
    pub fn failing(message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ReceiptProvider for MockProvider {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn get_transaction_receipts(&self, _chain: Chain, block_hash: &str) -> Result<Vec<Value>> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(message) = &self.failure {
            bail!("{message}");
        }

        Ok(self.blocks.get(block_hash).cloned().unwrap_or_default())
    }
}

/// Provider-shaped receipt; deserializes into [`sample_receipt`].
pub fn sample_receipt_json(index: usize) -> Value {
    json!({
        "transactionHash": format!("0x{index:064x}"),
        "from": format!("0x{:040x}", index * 2),
        "to": format!("0x{:040x}", index * 2 + 1),
        "gasUsed": format!("{:#x}", 21_000 + index),
    })
}

pub fn sample_receipt(index: usize) -> TransactionReceipt {
    TransactionReceipt {
        transaction_hash: format!("0x{index:064x}"),
        from: format!("0x{:040x}", index * 2),
        to: Some(format!("0x{:040x}", index * 2 + 1)),
        gas_used: U256::from(21_000u64 + index as u64),
        extra: Map::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_provider() {
        let provider = MockProvider::demo();

        let receipts = provider
            .get_transaction_receipts(Chain::EthMainnet, DEMO_BLOCK_HASH)
            .await
            .unwrap();
        assert_eq!(receipts.len(), DEMO_TX_COUNT);
        assert_eq!(receipts[3], sample_receipt_json(3));

        let receipts = provider
            .get_transaction_receipts(Chain::EthMainnet, "0xunknown")
            .await
            .unwrap();
        assert!(receipts.is_empty());
        assert_eq!(provider.calls(), 2);
    }

    #[test]
    fn test_sample_receipts_agree() {
        for index in [0, 9, 24] {
            let receipt: TransactionReceipt =
                serde_json::from_value(sample_receipt_json(index)).unwrap();
            assert_eq!(receipt, sample_receipt(index));
        }
    }

    #[tokio::test]
    async fn test_failing_mock_provider() {
        let provider = MockProvider::failing("rate limited");
        let err = provider
            .get_transaction_receipts(Chain::EthMainnet, DEMO_BLOCK_HASH)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "rate limited");
    }
}

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use web3::types::U256;

use crate::chain::Chain;

const WEI_DECIMALS: usize = 18;

/// A single search request as sent by the view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockQuery {
    pub block_hash: String,
    #[serde(default)]
    pub chain: Chain,
}

impl BlockQuery {
    pub fn new(block_hash: impl Into<String>, chain: Chain) -> Self {
        Self {
            block_hash: block_hash.into(),
            chain,
        }
    }
}

/// Transaction receipt as returned by the provider. Only the fields the view
/// renders are typed, everything else is carried through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionReceipt {
    pub transaction_hash: String,
    pub from: String,
    /// `None` for contract creation.
    pub to: Option<String>,
    pub gas_used: U256,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Formats a wei amount as a decimal ether string, always keeping at least one
/// fractional digit (`0.0`, `1.5`, `0.000021`).
pub fn format_ether(wei: U256) -> String {
    let base = U256::exp10(WEI_DECIMALS);
    let whole = wei / base;
    let fraction = format!("{:0>width$}", (wei % base).to_string(), width = WEI_DECIMALS);
    let fraction = fraction.trim_end_matches('0');
    let fraction = if fraction.is_empty() { "0" } else { fraction };

    format!("{whole}.{fraction}")
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use test_case::test_case;

    use super::*;

    #[test_case(U256::zero(), "0.0")]
    #[test_case(U256::from(21_000u64), "0.000000000000021")]
    #[test_case(U256::exp10(18), "1.0")]
    #[test_case(U256::exp10(17) * U256::from(15u64), "1.5")]
    #[test_case(U256::from(21_000_000_000_000u64), "0.000021")]
    fn test_format_ether(wei: U256, expected: &str) {
        assert_eq!(format_ether(wei), expected);
    }

    #[test]
    fn test_receipt_passes_unknown_fields_through() {
        let raw = json!({
            "transactionHash": "0xaa",
            "from": "0x01",
            "to": null,
            "gasUsed": "0x5208",
            "contractAddress": "0x02",
            "logs": [],
            "status": 1,
        });

        let receipt: TransactionReceipt = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(receipt.gas_used, U256::from(21_000u64));
        assert_eq!(receipt.to, None);
        assert_eq!(receipt.extra["contractAddress"], json!("0x02"));

        assert_eq!(serde_json::to_value(&receipt).unwrap(), raw);
    }

    #[test]
    fn test_block_query_defaults_to_mainnet() {
        let query: BlockQuery = serde_json::from_value(json!({ "blockHash": "0x01" })).unwrap();
        assert_eq!(query, BlockQuery::new("0x01", Chain::EthMainnet));

        let body = serde_json::to_value(BlockQuery::new("0x01", Chain::OptMainnet)).unwrap();
        assert_eq!(body, json!({ "blockHash": "0x01", "chain": "OPT_MAINNET" }));
    }
}

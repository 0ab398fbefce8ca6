use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Networks the receipt lookup can be scoped to. Names follow the provider's
/// network identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Chain {
    #[default]
    #[serde(rename = "ETH_MAINNET")]
    EthMainnet,
    #[serde(rename = "ETH_GOERLI")]
    EthGoerli,
    #[serde(rename = "ETH_SEPOLIA")]
    EthSepolia,
    #[serde(rename = "MATIC_MAINNET")]
    MaticMainnet,
    #[serde(rename = "MATIC_MUMBAI")]
    MaticMumbai,
    #[serde(rename = "ARB_MAINNET")]
    ArbMainnet,
    #[serde(rename = "ARB_GOERLI")]
    ArbGoerli,
    #[serde(rename = "OPT_MAINNET")]
    OptMainnet,
    #[serde(rename = "OPT_GOERLI")]
    OptGoerli,
    #[serde(rename = "BASE_MAINNET")]
    BaseMainnet,
    #[serde(rename = "BASE_GOERLI")]
    BaseGoerli,
}

impl Chain {
    pub const ALL: [Chain; 11] = [
        Chain::EthMainnet,
        Chain::EthGoerli,
        Chain::EthSepolia,
        Chain::MaticMainnet,
        Chain::MaticMumbai,
        Chain::ArbMainnet,
        Chain::ArbGoerli,
        Chain::OptMainnet,
        Chain::OptGoerli,
        Chain::BaseMainnet,
        Chain::BaseGoerli,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Chain::EthMainnet => "ETH_MAINNET",
            Chain::EthGoerli => "ETH_GOERLI",
            Chain::EthSepolia => "ETH_SEPOLIA",
            Chain::MaticMainnet => "MATIC_MAINNET",
            Chain::MaticMumbai => "MATIC_MUMBAI",
            Chain::ArbMainnet => "ARB_MAINNET",
            Chain::ArbGoerli => "ARB_GOERLI",
            Chain::OptMainnet => "OPT_MAINNET",
            Chain::OptGoerli => "OPT_GOERLI",
            Chain::BaseMainnet => "BASE_MAINNET",
            Chain::BaseGoerli => "BASE_GOERLI",
        }
    }

    /// Subdomain of the provider's RPC host for this network.
    pub fn rpc_subdomain(&self) -> &'static str {
        match self {
            Chain::EthMainnet => "eth-mainnet",
            Chain::EthGoerli => "eth-goerli",
            Chain::EthSepolia => "eth-sepolia",
            Chain::MaticMainnet => "polygon-mainnet",
            Chain::MaticMumbai => "polygon-mumbai",
            Chain::ArbMainnet => "arb-mainnet",
            Chain::ArbGoerli => "arb-goerli",
            Chain::OptMainnet => "opt-mainnet",
            Chain::OptGoerli => "opt-goerli",
            Chain::BaseMainnet => "base-mainnet",
            Chain::BaseGoerli => "base-goerli",
        }
    }

    pub fn explorer_url(&self) -> &'static str {
        match self {
            Chain::EthMainnet => "https://etherscan.io",
            Chain::EthGoerli => "https://goerli.etherscan.io",
            Chain::EthSepolia => "https://sepolia.etherscan.io",
            Chain::MaticMainnet => "https://polygonscan.com",
            Chain::MaticMumbai => "https://mumbai.polygonscan.com",
            Chain::ArbMainnet => "https://arbiscan.io",
            Chain::ArbGoerli => "https://goerli.arbiscan.io",
            Chain::OptMainnet => "https://optimistic.etherscan.io",
            Chain::OptGoerli => "https://goerli-optimism.etherscan.io",
            Chain::BaseMainnet => "https://basescan.org",
            Chain::BaseGoerli => "https://goerli.basescan.org",
        }
    }

    pub fn tx_url(&self, tx_hash: &str) -> String {
        format!("{}/tx/{tx_hash}", self.explorer_url())
    }

    pub fn address_url(&self, address: &str) -> String {
        format!("{}/address/{address}", self.explorer_url())
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unsupported chain: {0}")]
pub struct UnsupportedChain(pub String);

impl FromStr for Chain {
    type Err = UnsupportedChain;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Chain::ALL
            .into_iter()
            .find(|chain| chain.name() == s)
            .ok_or_else(|| UnsupportedChain(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test_case("ETH_MAINNET", Chain::EthMainnet)]
    #[test_case("MATIC_MUMBAI", Chain::MaticMumbai)]
    #[test_case("BASE_MAINNET", Chain::BaseMainnet)]
    fn test_parse_known_chain(name: &str, expected: Chain) {
        assert_eq!(name.parse::<Chain>().unwrap(), expected);
    }

    #[test_case("eth_mainnet")]
    #[test_case("SOLANA_MAINNET")]
    #[test_case("")]
    fn test_parse_unknown_chain(name: &str) {
        assert_eq!(
            name.parse::<Chain>(),
            Err(UnsupportedChain(name.to_string()))
        );
    }

    #[test]
    fn test_names_match_serde() {
        for chain in Chain::ALL {
            let json = serde_json::to_value(chain).unwrap();
            assert_eq!(json, serde_json::json!(chain.name()));
        }
    }

    #[test]
    fn test_explorer_links() {
        assert_eq!(
            Chain::EthMainnet.tx_url("0xabc"),
            "https://etherscan.io/tx/0xabc"
        );
        assert_eq!(
            Chain::MaticMainnet.address_url("0xdef"),
            "https://polygonscan.com/address/0xdef"
        );
    }
}

// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Supported chains per query kind.
//!
//! The balance and collection endpoints of the upstream API do not cover the
//! same networks: `tezos` is balance-only and `ethereum-holesky` is NFT-only.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::error::ValidationError;

/// The two upstream lookups this service performs.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum QueryKind {
    Balances,
    Nfts,
}

impl std::fmt::Display for QueryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QueryKind::Balances => write!(f, "balance"),
            QueryKind::Nfts => write!(f, "NFT"),
        }
    }
}

/// Blockchain network identifier as understood by the upstream API.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum ChainId {
    Ethereum,
    EthereumSepolia,
    EthereumHolesky,
    Celo,
    CeloTestnet,
    Bsc,
    BscTestnet,
    Polygon,
    Tezos,
    Eon,
    Chiliz,
}

/// Chains served by both endpoints.
const SHARED_CHAINS: [ChainId; 9] = [
    ChainId::Ethereum,
    ChainId::EthereumSepolia,
    ChainId::Celo,
    ChainId::CeloTestnet,
    ChainId::Bsc,
    ChainId::BscTestnet,
    ChainId::Polygon,
    ChainId::Eon,
    ChainId::Chiliz,
];

impl ChainId {
    pub const ALL: [ChainId; 11] = [
        ChainId::Ethereum,
        ChainId::EthereumSepolia,
        ChainId::EthereumHolesky,
        ChainId::Celo,
        ChainId::CeloTestnet,
        ChainId::Bsc,
        ChainId::BscTestnet,
        ChainId::Polygon,
        ChainId::Tezos,
        ChainId::Eon,
        ChainId::Chiliz,
    ];

    /// Wire name used in query parameters.
    pub fn as_str(self) -> &'static str {
        match self {
            ChainId::Ethereum => "ethereum",
            ChainId::EthereumSepolia => "ethereum-sepolia",
            ChainId::EthereumHolesky => "ethereum-holesky",
            ChainId::Celo => "celo",
            ChainId::CeloTestnet => "celo-testnet",
            ChainId::Bsc => "bsc",
            ChainId::BscTestnet => "bsc-testnet",
            ChainId::Polygon => "polygon",
            ChainId::Tezos => "tezos",
            ChainId::Eon => "eon",
            ChainId::Chiliz => "chiliz",
        }
    }

    pub fn is_supported(self, kind: QueryKind) -> bool {
        SHARED_CHAINS.contains(&self)
            || matches!(
                (self, kind),
                (ChainId::Tezos, QueryKind::Balances) | (ChainId::EthereumHolesky, QueryKind::Nfts)
            )
    }

    /// Chains accepted for `kind`, in display order.
    pub fn supported(kind: QueryKind) -> Vec<ChainId> {
        Self::ALL
            .into_iter()
            .filter(|chain| chain.is_supported(kind))
            .collect()
    }

    fn from_wire(raw: &str) -> Option<ChainId> {
        Self::ALL.into_iter().find(|chain| chain.as_str() == raw)
    }
}

impl std::fmt::Display for ChainId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolve `chain` against the set valid for `kind`.
pub fn validate(chain: &str, kind: QueryKind) -> Result<ChainId, ValidationError> {
    let trimmed = chain.trim();
    ChainId::from_wire(trimmed)
        .filter(|id| id.is_supported(kind))
        .ok_or_else(|| ValidationError::UnsupportedChain {
            chain: trimmed.to_string(),
            kind,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tezos_is_balance_only() {
        assert_eq!(validate("tezos", QueryKind::Balances), Ok(ChainId::Tezos));
        assert!(matches!(
            validate("tezos", QueryKind::Nfts),
            Err(ValidationError::UnsupportedChain { kind: QueryKind::Nfts, .. })
        ));
    }

    #[test]
    fn holesky_is_nft_only() {
        assert_eq!(
            validate("ethereum-holesky", QueryKind::Nfts),
            Ok(ChainId::EthereumHolesky)
        );
        assert!(matches!(
            validate("ethereum-holesky", QueryKind::Balances),
            Err(ValidationError::UnsupportedChain { .. })
        ));
    }

    #[test]
    fn shared_chains_are_valid_for_both_kinds() {
        for chain in SHARED_CHAINS {
            assert_eq!(validate(chain.as_str(), QueryKind::Balances), Ok(chain));
            assert_eq!(validate(chain.as_str(), QueryKind::Nfts), Ok(chain));
        }
    }

    #[test]
    fn unknown_and_miscased_chains_are_rejected() {
        for raw in ["not-a-chain", "", "Ethereum", "polygon-amoy"] {
            assert!(validate(raw, QueryKind::Balances).is_err(), "{raw}");
        }
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        assert_eq!(validate(" bsc ", QueryKind::Nfts), Ok(ChainId::Bsc));
    }

    #[test]
    fn supported_sets_have_ten_chains_each() {
        let balances = ChainId::supported(QueryKind::Balances);
        let nfts = ChainId::supported(QueryKind::Nfts);
        assert_eq!(balances.len(), 10);
        assert_eq!(nfts.len(), 10);
        assert!(balances.contains(&ChainId::Tezos));
        assert!(!nfts.contains(&ChainId::Tezos));
    }

    #[test]
    fn serde_uses_wire_names() {
        let json = serde_json::to_string(&ChainId::CeloTestnet).unwrap();
        assert_eq!(json, "\"celo-testnet\"");
        for chain in ChainId::ALL {
            assert_eq!(
                serde_json::to_value(chain).unwrap(),
                serde_json::Value::String(chain.as_str().to_string())
            );
        }
    }
}

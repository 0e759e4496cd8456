// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # API Data Models
//!
//! Normalized records returned by the REST API. Field names follow the
//! upstream camelCase wire format so the records can be mapped 1:1.
//!
//! ## Model Categories
//!
//! - **Balances**: one [`BalanceRecord`] per (address, token) pair
//! - **NFTs**: one [`NftRecord`] per NFT or multitoken held
//! - **Combined**: [`QueryResult`], possibly with a [`QueryFailure`] marker
//!   for the half that failed

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::portfolio::{Address, QueryKind};

/// Treat an explicit JSON `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// =============================================================================
// Token Type
// =============================================================================

/// Token classification reported by the upstream API.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Fungible,
    Nft,
    Multitoken,
    Native,
}

// =============================================================================
// Balance Models
// =============================================================================

/// A token balance held by one address.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BalanceRecord {
    /// Holder address.
    pub address: String,
    /// Token contract address (empty for native balances).
    #[serde(default, deserialize_with = "null_as_default")]
    pub token_address: String,
    /// Chain the balance was read on.
    pub chain: String,
    /// Decimal string exactly as returned upstream.
    pub balance: String,
    /// Token id for NFTs and multitokens.
    #[serde(default, deserialize_with = "null_as_default")]
    pub token_id: String,
    #[serde(rename = "type")]
    pub token_type: TokenType,
    #[serde(default)]
    pub last_update_block: Option<u64>,
    #[serde(
        rename = "metadataURI",
        default,
        deserialize_with = "null_as_default"
    )]
    pub metadata_uri: String,
    #[serde(default)]
    #[schema(value_type = Object)]
    pub metadata: Value,
}

// =============================================================================
// NFT Models
// =============================================================================

/// Display metadata attached to an NFT.
///
/// Metadata is authored by third parties, so only `image` is interpreted;
/// `name`, `description` and `attributes` are kept as whatever JSON the
/// upstream returned.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct NftMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub name: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub description: Option<Value>,
    /// Image URI, frequently `ipfs://`. Non-string values read as absent.
    #[serde(default, deserialize_with = "string_or_none")]
    pub image: Option<String>,
    /// Usually an array of trait objects; `null` reads as `[]`.
    #[serde(default = "empty_attributes", deserialize_with = "attributes_or_empty")]
    #[schema(value_type = Object)]
    pub attributes: Value,
}

impl Default for NftMetadata {
    fn default() -> Self {
        Self {
            name: None,
            description: None,
            image: None,
            attributes: empty_attributes(),
        }
    }
}

fn empty_attributes() -> Value {
    Value::Array(Vec::new())
}

fn attributes_or_empty<'de, D>(deserializer: D) -> Result<Value, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => empty_attributes(),
        other => other,
    })
}

fn string_or_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

/// A single NFT or multitoken held by one of the queried addresses.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NftRecord {
    pub chain: String,
    pub token_address: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub token_id: String,
    pub token_type: TokenType,
    #[serde(
        rename = "metadataURI",
        default,
        deserialize_with = "null_as_default"
    )]
    pub metadata_uri: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub metadata: NftMetadata,
}

// =============================================================================
// Combined Query Models
// =============================================================================

/// Error marker for the failed half of a combined query.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QueryFailure {
    /// Which lookup failed.
    pub kind: QueryKind,
    /// HTTP status this failure maps to.
    pub status: u16,
    /// Machine-readable error code (e.g. `unsupported_chain`).
    pub error_code: String,
    /// Human-readable message.
    pub error: String,
    /// Upstream error body, verbatim, when the upstream API rejected the call.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub upstream: Option<Value>,
}

/// Balances and NFTs for one batch of addresses on one chain.
///
/// Either half may be empty with its `*Error` marker set; this is a valid
/// (partial) result rather than an error.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QueryResult {
    /// Chain as requested (trimmed).
    pub chain: String,
    /// Addresses that were queried, after normalization.
    pub addresses: Vec<Address>,
    pub balances: Vec<BalanceRecord>,
    pub nfts: Vec<NftRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub balances_error: Option<QueryFailure>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nfts_error: Option<QueryFailure>,
    pub fetched_at: DateTime<Utc>,
}

impl QueryResult {
    /// True when exactly one of the two lookups failed.
    pub fn is_partial(&self) -> bool {
        self.balances_error.is_some() != self.nfts_error.is_some()
    }
}

// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Tatum v4 data API integration for balance and NFT lookups.

use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use tracing::{debug, warn};
use url::Url;

use super::{UpstreamClient, UpstreamError};
use crate::portfolio::{address, Address, ChainId};

pub const DEFAULT_API_BASE_URL: &str = "https://api.tatum.io";
const BALANCES_PATH: &str = "/v4/data/balances";
const COLLECTIONS_PATH: &str = "/v4/data/collections";
const API_KEY_HEADER: &str = "x-api-key";
/// The collections endpoint also serves multitokens; restrict it to NFTs.
const NFT_TOKEN_TYPES: &str = "nft";

#[derive(Clone)]
pub struct TatumClient {
    base_url: Url,
    api_key: String,
    http: Client,
}

impl std::fmt::Debug for TatumClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TatumClient")
            .field("base_url", &self.base_url.as_str())
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl TatumClient {
    /// Build a client. The API key is forwarded as-is and never checked here.
    pub fn new(base_url: Url, api_key: impl Into<String>) -> Result<Self, UpstreamError> {
        let http = Client::builder()
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()
            .map_err(|e| UpstreamError::Transport(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            base_url,
            api_key: api_key.into(),
            http,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn has_api_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }

    fn endpoint(&self, path: &str, params: &[(&str, &str)]) -> Url {
        let mut url = self.base_url.clone();
        let joined = format!("{}{}", self.base_url.path().trim_end_matches('/'), path);
        url.set_path(&joined);
        url.query_pairs_mut().clear().extend_pairs(params);
        url
    }

    async fn get_json(&self, path: &str, params: &[(&str, &str)]) -> Result<Value, UpstreamError> {
        let url = self.endpoint(path, params);
        debug!(%url, "Calling Tatum data API");

        let response = self
            .http
            .get(url)
            .header(API_KEY_HEADER, &self.api_key)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| UpstreamError::Transport(format!("GET {path} failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = read_error_body(path, status, response.text().await);
            warn!(path, status = status.as_u16(), body = %body, "Tatum request rejected");
            return Err(UpstreamError::Status { status, body });
        }

        response
            .json()
            .await
            .map_err(|e| UpstreamError::InvalidBody(format!("GET {path}: {e}")))
    }
}

impl UpstreamClient for TatumClient {
    async fn fetch_balances(
        &self,
        chain: ChainId,
        addresses: &[Address],
    ) -> Result<Value, UpstreamError> {
        let joined = address::join(addresses);
        self.get_json(
            BALANCES_PATH,
            &[("chain", chain.as_str()), ("addresses", joined.as_str())],
        )
        .await
    }

    async fn fetch_nfts(
        &self,
        chain: ChainId,
        addresses: &[Address],
    ) -> Result<Value, UpstreamError> {
        let joined = address::join(addresses);
        self.get_json(
            COLLECTIONS_PATH,
            &[
                ("chain", chain.as_str()),
                ("collectionAddresses", joined.as_str()),
                ("tokenTypes", NFT_TOKEN_TYPES),
            ],
        )
        .await
    }
}

/// Error body of a rejected call, or a message naming the read failure.
fn read_error_body<E: std::fmt::Display>(
    path: &str,
    status: StatusCode,
    text: Result<String, E>,
) -> Value {
    match text {
        Ok(text) => error_body(&text),
        Err(e) => {
            warn!(path, status = status.as_u16(), error = %e, "Failed to read Tatum error body");
            json!({ "message": format!("failed to read upstream error body: {e}") })
        }
    }
}

/// Keep JSON error bodies verbatim; wrap anything else.
fn error_body(text: &str) -> Value {
    serde_json::from_str(text).unwrap_or_else(|_| json!({ "message": text }))
}

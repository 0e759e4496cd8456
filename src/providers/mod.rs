// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Upstream blockchain-data providers.
//!
//! The rest of the service only sees [`UpstreamClient`]: two read-only
//! lookups returning the raw upstream JSON. [`tatum::TatumClient`] is the
//! production implementation.

use std::future::Future;

use reqwest::StatusCode;
use serde_json::Value;

use crate::portfolio::{Address, ChainId};

pub mod tatum;

pub use tatum::TatumClient;

/// Read-only access to the upstream balance and collection endpoints.
///
/// Implementations issue exactly one request per call and never retry.
pub trait UpstreamClient: Send + Sync {
    /// Balances of every token held by `addresses` on `chain`.
    fn fetch_balances(
        &self,
        chain: ChainId,
        addresses: &[Address],
    ) -> impl Future<Output = Result<Value, UpstreamError>> + Send;

    /// NFTs (token type `nft` only) held by `addresses` on `chain`.
    fn fetch_nfts(
        &self,
        chain: ChainId,
        addresses: &[Address],
    ) -> impl Future<Output = Result<Value, UpstreamError>> + Send;
}

/// Classification of upstream failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpstreamErrorKind {
    BadRequest,
    Unauthorized,
    Forbidden,
    ServerError,
    Other,
    InvalidBody,
    /// No HTTP answer at all. Shares its code with `QueryError::Transport`,
    /// which is where these failures surface once they leave the provider.
    Transport,
}

impl UpstreamErrorKind {
    pub fn from_status(status: StatusCode) -> Self {
        match status {
            StatusCode::BAD_REQUEST => Self::BadRequest,
            StatusCode::UNAUTHORIZED => Self::Unauthorized,
            StatusCode::FORBIDDEN => Self::Forbidden,
            s if s.is_server_error() => Self::ServerError,
            _ => Self::Other,
        }
    }

    pub fn error_code(self) -> &'static str {
        match self {
            Self::BadRequest => "upstream_bad_request",
            Self::Unauthorized => "upstream_unauthorized",
            Self::Forbidden => "upstream_forbidden",
            Self::ServerError => "upstream_server_error",
            Self::Other => "upstream_error",
            Self::InvalidBody => "upstream_invalid_body",
            Self::Transport => "transport_error",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    /// Upstream answered with a non-2xx status. `body` is the upstream JSON
    /// error body, or `{"message": <text>}` when it was not JSON.
    #[error("Upstream returned {status}: {body}")]
    Status { status: StatusCode, body: Value },

    #[error("Upstream request failed: {0}")]
    Transport(String),

    #[error("Upstream response was not valid JSON: {0}")]
    InvalidBody(String),
}

impl UpstreamError {
    pub fn kind(&self) -> UpstreamErrorKind {
        match self {
            UpstreamError::Status { status, .. } => UpstreamErrorKind::from_status(*status),
            UpstreamError::Transport(_) => UpstreamErrorKind::Transport,
            UpstreamError::InvalidBody(_) => UpstreamErrorKind::InvalidBody,
        }
    }
}

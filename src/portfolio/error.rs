// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Portfolio query errors.
//!
//! Validation and normalization failures are detected locally and stop the
//! pipeline early. Upstream failures are carried through unchanged so the
//! HTTP layer can pass the upstream status and body back to the caller.

use std::time::Duration;

use reqwest::StatusCode;
use serde_json::Value;

use super::chain::QueryKind;
use crate::providers::UpstreamError;

/// Input rejected before any network call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("At least one non-empty address is required.")]
    EmptyInput,

    #[error("Chain `{chain}` is not supported for {kind} queries.")]
    UnsupportedChain { chain: String, kind: QueryKind },

    /// Rejected by both the balance and the NFT chain sets.
    #[error("Chain `{chain}` is not supported for balance or NFT queries.")]
    UnknownChain { chain: String },
}

/// Upstream answered 2xx but the body does not have the expected layout.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NormalizationError {
    #[error("Unexpected {kind} response shape: {reason}")]
    UnexpectedShape { kind: QueryKind, reason: String },
}

#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Upstream(UpstreamError),

    #[error(transparent)]
    Normalization(#[from] NormalizationError),

    #[error("Upstream transport failed: {0}")]
    Transport(String),

    #[error("Upstream did not answer within {0:?}")]
    TimedOut(Duration),

    #[error("Query was cancelled")]
    Cancelled,

    #[error("Both queries failed (balances: {balances}; nfts: {nfts})")]
    AllFailed {
        balances: Box<QueryError>,
        nfts: Box<QueryError>,
    },
}

impl From<UpstreamError> for QueryError {
    fn from(err: UpstreamError) -> Self {
        match err {
            // Connection-level failures belong to the transport bucket, not to
            // the upstream status taxonomy.
            UpstreamError::Transport(msg) => QueryError::Transport(msg),
            other => QueryError::Upstream(other),
        }
    }
}

impl QueryError {
    /// Short machine-readable code, used in logs and partial-failure markers.
    pub fn error_code(&self) -> &'static str {
        match self {
            QueryError::Validation(ValidationError::EmptyInput) => "empty_input",
            QueryError::Validation(
                ValidationError::UnsupportedChain { .. } | ValidationError::UnknownChain { .. },
            ) => "unsupported_chain",
            QueryError::Upstream(err) => err.kind().error_code(),
            QueryError::Normalization(_) => "unexpected_shape",
            QueryError::Transport(_) => "transport_error",
            QueryError::TimedOut(_) => "timeout",
            QueryError::Cancelled => "cancelled",
            QueryError::AllFailed { .. } => "all_failed",
        }
    }

    /// HTTP status reported to the caller. Upstream statuses pass through.
    ///
    /// When both halves failed, the balance side decides.
    pub fn status_code(&self) -> StatusCode {
        match self {
            QueryError::Validation(_) => StatusCode::BAD_REQUEST,
            QueryError::Upstream(UpstreamError::Status { status, .. }) => *status,
            QueryError::Upstream(_) | QueryError::Transport(_) => StatusCode::BAD_GATEWAY,
            QueryError::Normalization(_) => StatusCode::INTERNAL_SERVER_ERROR,
            QueryError::TimedOut(_) => StatusCode::GATEWAY_TIMEOUT,
            QueryError::Cancelled => StatusCode::SERVICE_UNAVAILABLE,
            QueryError::AllFailed { balances, .. } => balances.status_code(),
        }
    }

    /// The upstream error body, if the upstream API rejected the call.
    pub fn upstream_body(&self) -> Option<&Value> {
        match self {
            QueryError::Upstream(UpstreamError::Status { body, .. }) => Some(body),
            QueryError::AllFailed { balances, .. } => balances.upstream_body(),
            _ => None,
        }
    }
}

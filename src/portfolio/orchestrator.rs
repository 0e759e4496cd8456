// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Portfolio Query Orchestration
//!
//! Turns raw user input into validated, chain-scoped upstream calls and
//! combines the normalized results.
//!
//! ## Lifecycle of one [`QueryOrchestrator::run`]
//!
//! 1. **Validating**: addresses are normalized and the chain is checked once
//!    per query kind. An empty address list, or a chain that is valid for
//!    neither kind, fails before any network call.
//! 2. **Fetching**: balance and NFT lookups run concurrently, each bounded by
//!    the request deadline. A kind whose chain failed validation is not
//!    fetched and carries its validation error instead.
//! 3. **Normalizing**: each successful body is mapped into records.
//! 4. **Done**: both halves are returned; a failed half is empty and carries
//!    a [`QueryFailure`] marker. Only when both halves fail does `run` return
//!    an error.

use std::{future::Future, sync::Arc, time::Duration};

use chrono::Utc;
use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;

use super::{
    address::{self, Address},
    chain::{self, ChainId, QueryKind},
    error::{QueryError, ValidationError},
    normalize,
};
use crate::models::{BalanceRecord, NftRecord, QueryFailure, QueryResult};
use crate::providers::{UpstreamClient, UpstreamError};

pub struct QueryOrchestrator<C> {
    client: Arc<C>,
    deadline: Option<Duration>,
}

impl<C> Clone for QueryOrchestrator<C> {
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
            deadline: self.deadline,
        }
    }
}

impl<C: UpstreamClient> QueryOrchestrator<C> {
    /// Create an orchestrator without a request deadline.
    pub fn new(client: Arc<C>) -> Self {
        Self {
            client,
            deadline: None,
        }
    }

    /// Bound every upstream call by `deadline` (`None` waits indefinitely).
    pub fn with_deadline(mut self, deadline: Option<Duration>) -> Self {
        self.deadline = deadline;
        self
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Balance lookup only.
    pub async fn balances<S: AsRef<str>>(
        &self,
        raw_addresses: &[S],
        raw_chain: &str,
    ) -> Result<Vec<BalanceRecord>, QueryError> {
        let addresses = address::normalize(raw_addresses)?;
        let chain = chain::validate(raw_chain, QueryKind::Balances)?;
        self.fetch_balances(chain, &addresses).await
    }

    /// NFT lookup only.
    pub async fn nfts<S: AsRef<str>>(
        &self,
        raw_addresses: &[S],
        raw_chain: &str,
    ) -> Result<Vec<NftRecord>, QueryError> {
        let addresses = address::normalize(raw_addresses)?;
        let chain = chain::validate(raw_chain, QueryKind::Nfts)?;
        self.fetch_nfts(chain, &addresses).await
    }

    /// Balances and NFTs for one batch, tolerating failure of either half.
    pub async fn run<S: AsRef<str>>(
        &self,
        raw_addresses: &[S],
        raw_chain: &str,
    ) -> Result<QueryResult, QueryError> {
        self.run_cancellable(raw_addresses, raw_chain, CancellationToken::new())
            .await
    }

    /// Like [`run`](Self::run), abandoning both outstanding fetches once
    /// `cancel` fires.
    pub async fn run_cancellable<S: AsRef<str>>(
        &self,
        raw_addresses: &[S],
        raw_chain: &str,
        cancel: CancellationToken,
    ) -> Result<QueryResult, QueryError> {
        let span = info_span!(
            "portfolio_query",
            query_id = %Uuid::new_v4(),
            chain = raw_chain.trim(),
        );
        self.run_inner(raw_addresses, raw_chain, cancel)
            .instrument(span)
            .await
    }

    async fn run_inner<S: AsRef<str>>(
        &self,
        raw_addresses: &[S],
        raw_chain: &str,
        cancel: CancellationToken,
    ) -> Result<QueryResult, QueryError> {
        let addresses = address::normalize(raw_addresses)?;
        let balance_chain = chain::validate(raw_chain, QueryKind::Balances);
        let nft_chain = chain::validate(raw_chain, QueryKind::Nfts);

        if balance_chain.is_err() && nft_chain.is_err() {
            return Err(ValidationError::UnknownChain {
                chain: raw_chain.trim().to_string(),
            }
            .into());
        }

        info!(addresses = addresses.len(), "Fetching balances and NFTs");

        let balances_fut = async {
            match &balance_chain {
                Ok(chain) => self.fetch_balances(*chain, &addresses).await,
                Err(err) => Err(err.clone().into()),
            }
        };
        let nfts_fut = async {
            match &nft_chain {
                Ok(chain) => self.fetch_nfts(*chain, &addresses).await,
                Err(err) => Err(err.clone().into()),
            }
        };

        let (balances, nfts) = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                warn!("Portfolio query cancelled");
                return Err(QueryError::Cancelled);
            }
            pair = async { tokio::join!(balances_fut, nfts_fut) } => pair,
        };

        let (balances, nfts) = match (balances, nfts) {
            (Err(balances), Err(nfts)) => {
                warn!(
                    balances_error = %balances,
                    nfts_error = %nfts,
                    "Both portfolio lookups failed"
                );
                return Err(QueryError::AllFailed {
                    balances: Box::new(balances),
                    nfts: Box::new(nfts),
                });
            }
            pair => pair,
        };

        let (balances, balances_error) = settle(QueryKind::Balances, balances);
        let (nfts, nfts_error) = settle(QueryKind::Nfts, nfts);

        info!(
            balances = balances.len(),
            nfts = nfts.len(),
            partial = balances_error.is_some() || nfts_error.is_some(),
            "Portfolio query complete"
        );

        Ok(QueryResult {
            chain: raw_chain.trim().to_string(),
            addresses,
            balances,
            nfts,
            balances_error,
            nfts_error,
            fetched_at: Utc::now(),
        })
    }

    async fn fetch_balances(
        &self,
        chain: ChainId,
        addresses: &[Address],
    ) -> Result<Vec<BalanceRecord>, QueryError> {
        let raw = self
            .bounded(self.client.fetch_balances(chain, addresses))
            .await?;
        Ok(normalize::to_balances(&raw)?)
    }

    async fn fetch_nfts(
        &self,
        chain: ChainId,
        addresses: &[Address],
    ) -> Result<Vec<NftRecord>, QueryError> {
        let raw = self.bounded(self.client.fetch_nfts(chain, addresses)).await?;
        Ok(normalize::to_nfts(&raw)?)
    }

    async fn bounded<F>(&self, call: F) -> Result<Value, QueryError>
    where
        F: Future<Output = Result<Value, UpstreamError>>,
    {
        match self.deadline {
            Some(limit) => tokio::time::timeout(limit, call)
                .await
                .map_err(|_| QueryError::TimedOut(limit))?
                .map_err(QueryError::from),
            None => call.await.map_err(QueryError::from),
        }
    }
}

/// Split one half into its records and, on failure, an error marker.
fn settle<T>(kind: QueryKind, result: Result<Vec<T>, QueryError>) -> (Vec<T>, Option<QueryFailure>) {
    match result {
        Ok(records) => (records, None),
        Err(err) => {
            warn!(kind = ?kind, error = %err, "Portfolio lookup failed, returning partial result");
            (Vec::new(), Some(failure_marker(kind, &err)))
        }
    }
}

pub(crate) fn failure_marker(kind: QueryKind, err: &QueryError) -> QueryFailure {
    QueryFailure {
        kind,
        status: err.status_code().as_u16(),
        error_code: err.error_code().to_string(),
        error: err.to_string(),
        upstream: err.upstream_body().cloned(),
    }
}

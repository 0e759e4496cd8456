// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Combined portfolio endpoints.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use super::params::AddressQuery;
use crate::{
    error::ApiError,
    models::QueryResult,
    portfolio::{ChainId, QueryKind},
    state::AppState,
};

/// Get balances and NFTs in one call.
///
/// Both lookups run concurrently. If one of them fails, the other is still
/// returned and the failed half carries a `balancesError` / `nftsError`
/// marker. An error status is only returned when both fail.
#[utoipa::path(
    get,
    path = "/v1/portfolio",
    tag = "Portfolio",
    params(AddressQuery),
    responses(
        (status = 200, description = "Portfolio retrieved, possibly partial", body = QueryResult),
        (status = 400, description = "Missing parameters, no usable address or chain supported by neither lookup"),
        (status = 503, description = "Server is shutting down")
    )
)]
pub async fn get_portfolio(
    State(state): State<AppState>,
    Query(query): Query<AddressQuery>,
) -> Result<Json<QueryResult>, ApiError> {
    let (addresses, chain) = query.require()?;
    let result = state
        .portfolio
        .run_cancellable(&addresses, chain, state.shutdown.child_token())
        .await?;
    Ok(Json(result))
}

/// Chains accepted by each lookup.
#[derive(Debug, Serialize, ToSchema)]
pub struct SupportedChainsResponse {
    pub balances: Vec<ChainId>,
    pub nfts: Vec<ChainId>,
}

/// List the chains supported by the balance and NFT lookups.
#[utoipa::path(
    get,
    path = "/v1/chains",
    tag = "Portfolio",
    responses(
        (status = 200, description = "Supported chains", body = SupportedChainsResponse)
    )
)]
pub async fn list_chains() -> Json<SupportedChainsResponse> {
    Json(SupportedChainsResponse {
        balances: ChainId::supported(QueryKind::Balances),
        nfts: ChainId::supported(QueryKind::Nfts),
    })
}

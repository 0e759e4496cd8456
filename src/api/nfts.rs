// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! NFT lookup endpoint.

use axum::{
    extract::{Query, State},
    Json,
};

use super::params::AddressQuery;
use crate::{error::ApiError, models::NftRecord, state::AppState};

/// Get NFTs for a batch of collection addresses.
///
/// Only tokens of type `nft` are requested upstream; multitokens and
/// fungible balances are excluded.
#[utoipa::path(
    get,
    path = "/v1/nfts",
    tag = "Portfolio",
    params(AddressQuery),
    responses(
        (status = 200, description = "NFTs retrieved successfully", body = [NftRecord]),
        (status = 400, description = "Missing parameters, no usable address or unsupported chain"),
        (status = 401, description = "Upstream rejected the API key"),
        (status = 403, description = "Upstream forbade the request"),
        (status = 500, description = "Upstream response had an unexpected shape"),
        (status = 502, description = "Upstream unreachable"),
        (status = 504, description = "Upstream did not answer in time")
    )
)]
pub async fn get_nfts(
    State(state): State<AppState>,
    Query(query): Query<AddressQuery>,
) -> Result<Json<Vec<NftRecord>>, ApiError> {
    let (addresses, chain) = query.require()?;
    let nfts = state.portfolio.nfts(&addresses, chain).await?;
    Ok(Json(nfts))
}

// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Token balance lookup endpoint.

use axum::{
    extract::{Query, State},
    Json,
};

use super::params::AddressQuery;
use crate::{error::ApiError, models::BalanceRecord, state::AppState};

/// Get token balances for a batch of addresses.
///
/// Returns fungible, NFT, multitoken and native balances for every address,
/// in upstream order. Balances are decimal strings and are never rounded.
#[utoipa::path(
    get,
    path = "/v1/balances",
    tag = "Portfolio",
    params(AddressQuery),
    responses(
        (status = 200, description = "Balances retrieved successfully", body = [BalanceRecord]),
        (status = 400, description = "Missing parameters, no usable address or unsupported chain"),
        (status = 401, description = "Upstream rejected the API key"),
        (status = 403, description = "Upstream forbade the request"),
        (status = 500, description = "Upstream response had an unexpected shape"),
        (status = 502, description = "Upstream unreachable"),
        (status = 504, description = "Upstream did not answer in time")
    )
)]
pub async fn get_balances(
    State(state): State<AppState>,
    Query(query): Query<AddressQuery>,
) -> Result<Json<Vec<BalanceRecord>>, ApiError> {
    let (addresses, chain) = query.require()?;
    let balances = state.portfolio.balances(&addresses, chain).await?;
    Ok(Json(balances))
}

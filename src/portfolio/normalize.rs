// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Mapping of upstream JSON envelopes into [`BalanceRecord`] and [`NftRecord`].
//!
//! This is where upstream schema drift is caught: a missing or mistyped
//! result array fails loudly instead of turning into an empty result.

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::chain::QueryKind;
use super::error::NormalizationError;
use crate::models::{BalanceRecord, NftRecord};

/// Balances live under `result`.
pub fn to_balances(raw: &Value) -> Result<Vec<BalanceRecord>, NormalizationError> {
    let kind = QueryKind::Balances;
    let items = match raw.get("result") {
        Some(Value::Array(items)) => items,
        Some(other) => return Err(shape(kind, format!("`result` is {}", type_name(other)))),
        None => return Err(shape(kind, "missing `result` field")),
    };
    map_items(kind, items)
}

/// Collections come back as a bare array, or wrapped in `result` / `data`.
pub fn to_nfts(raw: &Value) -> Result<Vec<NftRecord>, NormalizationError> {
    let kind = QueryKind::Nfts;
    let items = match raw {
        Value::Array(items) => items,
        Value::Object(envelope) => match envelope.get("result").or_else(|| envelope.get("data")) {
            Some(Value::Array(items)) => items,
            Some(other) => {
                return Err(shape(
                    kind,
                    format!("result array is {}", type_name(other)),
                ))
            }
            None => return Err(shape(kind, "missing `result`/`data` array")),
        },
        other => return Err(shape(kind, format!("body is {}", type_name(other)))),
    };
    map_items(kind, items)
}

fn map_items<T: DeserializeOwned>(
    kind: QueryKind,
    items: &[Value],
) -> Result<Vec<T>, NormalizationError> {
    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            T::deserialize(item).map_err(|e| shape(kind, format!("item {index}: {e}")))
        })
        .collect()
}

fn shape(kind: QueryKind, reason: impl Into<String>) -> NormalizationError {
    NormalizationError::UnexpectedShape {
        kind,
        reason: reason.into(),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

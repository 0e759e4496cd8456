// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Address batch handling.
//!
//! Addresses are free-form strings; format checks are left to the upstream
//! API. Duplicates are forwarded unchanged and yield duplicate rows.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::error::ValidationError;

/// Separator used both by the inbound `addresses` parameter and upstream.
pub const ADDRESS_SEPARATOR: &str = ",";

/// A trimmed, non-empty wallet or contract address.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Address(String);

impl Address {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Address {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Trim every entry, drop blanks, keep order and multiplicity.
pub fn normalize<I, S>(raw: I) -> Result<Vec<Address>, ValidationError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let addresses: Vec<Address> = raw
        .into_iter()
        .filter_map(|entry| {
            let trimmed = entry.as_ref().trim();
            (!trimmed.is_empty()).then(|| Address(trimmed.to_string()))
        })
        .collect();

    if addresses.is_empty() {
        return Err(ValidationError::EmptyInput);
    }
    Ok(addresses)
}

/// Split a comma-joined `addresses` parameter into raw entries.
pub fn split_joined(raw: &str) -> Vec<&str> {
    raw.split(ADDRESS_SEPARATOR).collect()
}

/// Comma-join addresses for the upstream query string.
pub fn join(addresses: &[Address]) -> String {
    addresses
        .iter()
        .map(Address::as_str)
        .collect::<Vec<_>>()
        .join(ADDRESS_SEPARATOR)
}

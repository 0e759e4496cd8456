// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Query parameters shared by the lookup endpoints.

use serde::Deserialize;
use utoipa::IntoParams;

use crate::{error::ApiError, portfolio::address};

/// Chain and address batch for a lookup.
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct AddressQuery {
    /// Chain identifier, e.g. `ethereum`, `polygon`, `tezos`.
    pub chain: Option<String>,
    /// Comma-separated wallet or collection addresses.
    pub addresses: Option<String>,
}

impl AddressQuery {
    /// Raw address entries and chain, or `400 Missing required parameters.`
    pub fn require(&self) -> Result<(Vec<&str>, &str), ApiError> {
        match (self.chain.as_deref(), self.addresses.as_deref()) {
            (Some(chain), Some(addresses)) if !addresses.is_empty() => {
                Ok((address::split_joined(addresses), chain))
            }
            _ => Err(ApiError::missing_parameters()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(chain: Option<&str>, addresses: Option<&str>) -> AddressQuery {
        AddressQuery {
            chain: chain.map(str::to_string),
            addresses: addresses.map(str::to_string),
        }
    }

    #[test]
    fn both_parameters_are_required() {
        assert!(query(None, Some("0xa")).require().is_err());
        assert!(query(Some("ethereum"), None).require().is_err());
        assert!(query(Some("ethereum"), Some("")).require().is_err());
        assert!(AddressQuery::default().require().is_err());
    }

    #[test]
    fn addresses_are_split_on_commas() {
        let q = query(Some("celo"), Some("0xa,0xb"));
        let (addresses, chain) = q.require().unwrap();
        assert_eq!(addresses, vec!["0xa", "0xb"]);
        assert_eq!(chain, "celo");
    }
}

// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::{
    config::Config,
    portfolio::QueryOrchestrator,
    providers::{TatumClient, UpstreamError},
};

#[derive(Clone)]
pub struct AppState {
    pub portfolio: QueryOrchestrator<TatumClient>,
    /// Cancelled on server shutdown; in-flight combined queries observe it.
    pub shutdown: CancellationToken,
}

impl AppState {
    pub fn new(client: TatumClient, config: &Config, shutdown: CancellationToken) -> Self {
        Self {
            portfolio: QueryOrchestrator::new(Arc::new(client))
                .with_deadline(config.query_timeout),
            shutdown,
        }
    }

    pub fn from_config(config: &Config, shutdown: CancellationToken) -> Result<Self, UpstreamError> {
        let client = TatumClient::new(config.tatum_base_url.clone(), config.api_key.clone())?;
        Ok(Self::new(client, config, shutdown))
    }
}

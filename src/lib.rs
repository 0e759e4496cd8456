// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Portfolio Proxy - Wallet balance and NFT lookups
//!
//! This crate provides a thin HTTP proxy in front of the Tatum data API.
//! Callers submit a chain and a batch of addresses; the service validates
//! them locally, forwards the lookup with the server-held API key and
//! returns normalized balance and NFT records.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum)
//! - `portfolio` - Address/chain validation, normalization and query orchestration
//! - `providers` - Upstream data API clients (Tatum)
//! - `config` - Environment configuration

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod portfolio;
pub mod providers;
pub mod state;

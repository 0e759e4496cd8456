// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Wallet portfolio lookups.
//!
//! This module provides:
//! - Address batch validation ([`address`])
//! - Chain support per query kind ([`chain`])
//! - Upstream response normalization ([`normalize`])
//! - Balance + NFT query orchestration ([`orchestrator`])

pub mod address;
pub mod chain;
pub mod error;
pub mod normalize;
pub mod orchestrator;

pub use address::Address;
pub use chain::{ChainId, QueryKind};
pub use error::{NormalizationError, QueryError, ValidationError};
pub use orchestrator::QueryOrchestrator;

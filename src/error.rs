// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::{json, Value};

use crate::portfolio::{orchestrator::failure_marker, QueryError, QueryKind};

pub const MISSING_PARAMETERS: &str = "Missing required parameters.";

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    pub error_code: Option<&'static str>,
    /// Sent instead of the standard error body (upstream pass-through).
    pub body: Option<Value>,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error_code: Option<&'static str>,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            error_code: None,
            body: None,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn missing_parameters() -> Self {
        Self::bad_request(MISSING_PARAMETERS)
    }

    pub fn with_code(mut self, code: &'static str) -> Self {
        self.error_code = Some(code);
        self
    }

    /// Respond with `body` verbatim instead of the standard error shape.
    pub fn passthrough(status: StatusCode, body: Value) -> Self {
        Self {
            status,
            message: body.to_string(),
            error_code: None,
            body: Some(body),
        }
    }
}

impl From<QueryError> for ApiError {
    fn from(err: QueryError) -> Self {
        let status = err.status_code();

        if let QueryError::AllFailed { balances, nfts } = &err {
            let body = json!({
                "error": err.to_string(),
                "error_code": err.error_code(),
                "balancesError": failure_marker(QueryKind::Balances, balances),
                "nftsError": failure_marker(QueryKind::Nfts, nfts),
            });
            return Self::passthrough(status, body);
        }

        match err.upstream_body() {
            Some(body) => Self::passthrough(status, body.clone()),
            None => Self::new(status, err.to_string()).with_code(err.error_code()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self.body {
            Some(body) => (self.status, Json(body)).into_response(),
            None => {
                let body = Json(ErrorBody {
                    error: self.message,
                    error_code: self.error_code,
                });
                (self.status, body).into_response()
            }
        }
    }
}

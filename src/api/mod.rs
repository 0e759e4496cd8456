// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{routing::get, Router};
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    models::{BalanceRecord, NftMetadata, NftRecord, QueryFailure, QueryResult, TokenType},
    portfolio::{Address, ChainId, QueryKind},
    state::AppState,
};

pub mod balance;
pub mod health;
pub mod nfts;
pub mod params;
pub mod portfolio;

pub fn router(state: AppState) -> Router {
    let v1_routes = Router::new()
        .route("/balances", get(balance::get_balances))
        .route("/nfts", get(nfts::get_nfts))
        .route("/portfolio", get(portfolio::get_portfolio))
        .route("/chains", get(portfolio::list_chains));

    // Legacy query paths served by the web front-end.
    let legacy_routes = Router::new()
        .route("/getbalance", get(balance::get_balances))
        .route("/getnfts", get(nfts::get_nfts));

    let request_id = ServiceBuilder::new()
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(PropagateRequestIdLayer::x_request_id());

    Router::new()
        .nest("/v1", v1_routes)
        .nest("/api", legacy_routes)
        .route("/health", get(health::health))
        .route("/health/live", get(health::liveness))
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .layer(request_id)
}

#[derive(OpenApi)]
#[openapi(
    paths(
        balance::get_balances,
        nfts::get_nfts,
        portfolio::get_portfolio,
        portfolio::list_chains,
        health::health,
        health::liveness
    ),
    components(
        schemas(
            Address,
            ChainId,
            QueryKind,
            TokenType,
            BalanceRecord,
            NftMetadata,
            NftRecord,
            QueryFailure,
            QueryResult,
            portfolio::SupportedChainsResponse,
            health::ReadyResponse,
            health::HealthChecks,
            health::HealthResponse
        )
    ),
    tags(
        (name = "Portfolio", description = "Wallet balance and NFT lookups"),
        (name = "Health", description = "Service health probes")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
        response::Response,
    };
    use httpmock::prelude::*;
    use serde_json::{json, Value};
    use tokio_util::sync::CancellationToken;
    use tower::ServiceExt;

    fn app_for(server: &MockServer) -> Router {
        let base_url = server.base_url();
        let config = Config::from_lookup(|name: &str| match name {
            "TATUM_API_BASE_URL" => Some(base_url.clone()),
            "API_KEY" => Some("test-key".to_string()),
            _ => None,
        })
        .unwrap();
        router(AppState::from_config(&config, CancellationToken::new()).unwrap())
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
        let response: Response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn balances_body() -> Value {
        json!({
            "result": [{
                "address": "0xa",
                "tokenAddress": "0xt",
                "chain": "ethereum",
                "balance": "100.5",
                "tokenId": "",
                "type": "fungible",
                "lastUpdateBlock": 19000000,
                "metadataURI": "",
                "metadata": {}
            }],
            "prevPage": "",
            "nextPage": ""
        })
    }

    fn nfts_body() -> Value {
        json!([{
            "chain": "ethereum",
            "tokenAddress": "0xa",
            "tokenId": "9",
            "tokenType": "nft",
            "metadataURI": "ipfs://m/9",
            "metadata": { "image": "ipfs://i/9.png", "attributes": [] }
        }])
    }

    #[tokio::test]
    async fn router_builds_with_all_routes() {
        let server = MockServer::start_async().await;
        let _ = app_for(&server).into_make_service();
    }

    #[tokio::test]
    async fn request_id_is_generated_or_echoed() {
        let server = MockServer::start_async().await;

        let response = app_for(&server)
            .oneshot(
                Request::builder()
                    .uri("/health/live")
                    .header("x-request-id", "req-123")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["x-request-id"], "req-123");

        let response = app_for(&server)
            .oneshot(Request::builder().uri("/v1/chains").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let generated = response.headers()["x-request-id"].to_str().unwrap();
        assert!(uuid::Uuid::parse_str(generated).is_ok());
    }

    #[tokio::test]
    async fn cors_headers_are_added() {
        let server = MockServer::start_async().await;

        let response = app_for(&server)
            .oneshot(
                Request::builder()
                    .uri("/v1/chains")
                    .header("origin", "https://wallet.example")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["access-control-allow-origin"], "*");
    }

    #[tokio::test]
    async fn balances_are_proxied_and_normalized() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/v4/data/balances")
                    .header("x-api-key", "test-key")
                    .query_param("chain", "ethereum")
                    .query_param("addresses", "0xa,0xb");
                then.status(200).json_body(balances_body());
            })
            .await;

        let (status, body) =
            get_json(app_for(&server), "/v1/balances?chain=ethereum&addresses=0xa,%200xb").await;

        mock.assert_async().await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 1);
        assert_eq!(body[0]["balance"], "100.5");
        assert_eq!(body[0]["type"], "fungible");
    }

    #[tokio::test]
    async fn legacy_paths_serve_the_same_lookups() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/v4/data/collections")
                    .query_param("tokenTypes", "nft");
                then.status(200).json_body(nfts_body());
            })
            .await;

        let (status, body) =
            get_json(app_for(&server), "/api/getnfts?chain=ethereum&addresses=0xa").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["metadata"]["image"], "ipfs://i/9.png");
    }

    #[tokio::test]
    async fn missing_parameters_are_rejected_locally() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.any_request();
                then.status(200).json_body(balances_body());
            })
            .await;

        for uri in [
            "/v1/balances?addresses=0xa",
            "/v1/nfts?chain=ethereum",
            "/v1/portfolio?chain=ethereum&addresses=",
        ] {
            let (status, body) = get_json(app_for(&server), uri).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
            assert_eq!(body["error"], "Missing required parameters.");
        }
        assert_eq!(mock.hits_async().await, 0);
    }

    #[tokio::test]
    async fn unsupported_chain_is_rejected_without_upstream_call() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.any_request();
                then.status(200).json_body(nfts_body());
            })
            .await;

        let (status, body) =
            get_json(app_for(&server), "/v1/nfts?chain=tezos&addresses=tz1abc").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error_code"], "unsupported_chain");
        assert_eq!(mock.hits_async().await, 0);
    }

    #[tokio::test]
    async fn portfolio_rejects_chain_unknown_to_both_lookups() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.any_request();
                then.status(200).json_body(nfts_body());
            })
            .await;

        let (status, body) =
            get_json(app_for(&server), "/v1/portfolio?chain=not-a-chain&addresses=0xa").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error_code"], "unsupported_chain");
        assert_eq!(
            body["error"],
            "Chain `not-a-chain` is not supported for balance or NFT queries."
        );
        assert_eq!(mock.hits_async().await, 0);
    }

    #[tokio::test]
    async fn upstream_rejection_is_passed_through() {
        let server = MockServer::start_async().await;
        let upstream_error = json!({
            "errorCode": "subscription.invalid",
            "message": "Unauthorized. Not valid or inactive subscription key present in the HTTP Header.",
            "statusCode": 401
        });
        server
            .mock_async(|when, then| {
                when.method(GET).path("/v4/data/balances");
                then.status(401).json_body(upstream_error.clone());
            })
            .await;

        let (status, body) =
            get_json(app_for(&server), "/v1/balances?chain=polygon&addresses=0xa").await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body, upstream_error);
    }

    #[tokio::test]
    async fn unexpected_upstream_shape_is_an_internal_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/v4/data/balances");
                then.status(200).json_body(json!({ "rows": [] }));
            })
            .await;

        let (status, body) =
            get_json(app_for(&server), "/v1/balances?chain=bsc&addresses=0xa").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error_code"], "unexpected_shape");
    }

    #[tokio::test]
    async fn portfolio_returns_partial_result_when_nfts_fail() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/v4/data/balances");
                then.status(200).json_body(balances_body());
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/v4/data/collections");
                then.status(500).json_body(json!({ "message": "internal error" }));
            })
            .await;

        let (status, body) =
            get_json(app_for(&server), "/v1/portfolio?chain=ethereum&addresses=0xa").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["balances"].as_array().unwrap().len(), 1);
        assert_eq!(body["nfts"], json!([]));
        assert_eq!(body["nftsError"]["status"], 500);
        assert_eq!(body["nftsError"]["upstream"]["message"], "internal error");
        assert!(body.get("balancesError").is_none());
    }

    #[tokio::test]
    async fn chains_endpoint_reflects_per_kind_support() {
        let server = MockServer::start_async().await;
        let (status, body) = get_json(app_for(&server), "/v1/chains").await;

        assert_eq!(status, StatusCode::OK);
        let balances = body["balances"].as_array().unwrap();
        let nfts = body["nfts"].as_array().unwrap();
        assert!(balances.contains(&json!("tezos")));
        assert!(!balances.contains(&json!("ethereum-holesky")));
        assert!(nfts.contains(&json!("ethereum-holesky")));
        assert!(!nfts.contains(&json!("tezos")));
    }

    #[tokio::test]
    async fn health_reports_upstream_configuration() {
        let server = MockServer::start_async().await;
        let (status, body) = get_json(app_for(&server), "/health").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["checks"]["api_key"], "configured");
        assert_eq!(body["checks"]["upstream"], "127.0.0.1");
    }

    #[tokio::test]
    async fn openapi_document_lists_lookup_paths() {
        let server = MockServer::start_async().await;
        let (status, body) = get_json(app_for(&server), "/api-doc/openapi.json").await;

        assert_eq!(status, StatusCode::OK);
        for path in ["/v1/balances", "/v1/nfts", "/v1/portfolio", "/v1/chains"] {
            assert!(body["paths"].get(path).is_some(), "{path}");
        }
    }
}

//! Tests for the HTTP ranker backend against a local mock server.

use std::sync::Arc;

use rerank_compressor::fixtures::{rerank_api_response, sample_documents};
use rerank_compressor::{
    CompressorError, HttpRanker, HttpRankerConfig, Passage, Ranker, RerankCompressor,
    RerankRequest,
};
use secrecy::SecretString;
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(server: &MockServer) -> HttpRankerConfig {
    HttpRankerConfig::new(
        server.uri(),
        SecretString::new("test-api-key-12345".to_string()),
    )
    .with_model("remote-rerank-v1")
}

#[tokio::test]
async fn test_http_ranker_sends_expected_request_shape() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/rerank"))
        .and(header("authorization", "Bearer test-api-key-12345"))
        .and(header("content-type", "application/json"))
        .and(body_partial_json(json!({
            "model": "remote-rerank-v1",
            "query": "capital of France",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{"index": 0, "relevance_score": 0.8}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let ranker = HttpRanker::from_config(config_for(&server)).unwrap();
    let request = RerankRequest::new(
        "capital of France",
        vec![Passage::new(0, "Paris is the capital of France.")],
    );

    let ranked = ranker.rerank(request).await.unwrap();
    assert_eq!(ranked.len(), 1);
    assert_eq!(ranked[0].id, 0);
    assert_eq!(ranked[0].score, 0.8);
}

#[tokio::test]
async fn test_http_ranker_maps_server_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/rerank"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let ranker = HttpRanker::from_config(config_for(&server)).unwrap();
    let request = RerankRequest::new("q", vec![Passage::new(0, "text")]);

    let error = ranker.rerank(request).await.unwrap_err();
    assert!(matches!(error, CompressorError::Server { .. }));
    assert!(error.is_retryable());
}

#[tokio::test]
async fn test_http_ranker_maps_authentication_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/rerank"))
        .respond_with(ResponseTemplate::new(401).set_body_string("bad key"))
        .mount(&server)
        .await;

    let ranker = HttpRanker::from_config(config_for(&server)).unwrap();
    let request = RerankRequest::new("q", vec![Passage::new(0, "text")]);

    let error = ranker.rerank(request).await.unwrap_err();
    assert!(matches!(error, CompressorError::Authentication { .. }));
}

#[tokio::test]
async fn test_http_ranker_maps_rate_limit_with_retry_after() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/rerank"))
        .respond_with(
            ResponseTemplate::new(429)
                .insert_header("retry-after", "7")
                .set_body_string("slow down"),
        )
        .mount(&server)
        .await;

    let ranker = HttpRanker::from_config(config_for(&server)).unwrap();
    let request = RerankRequest::new("q", vec![Passage::new(0, "text")]);

    let error = ranker.rerank(request).await.unwrap_err();
    assert_eq!(
        error.retry_after(),
        Some(std::time::Duration::from_secs(7))
    );
}

#[tokio::test]
async fn test_compressor_over_http_ranker_end_to_end() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/rerank"))
        .respond_with(ResponseTemplate::new(200).set_body_json(rerank_api_response()))
        .mount(&server)
        .await;

    let ranker: Arc<dyn Ranker> = Arc::new(HttpRanker::from_config(config_for(&server)).unwrap());
    let compressor = RerankCompressor::builder()
        .client(ranker)
        .top_n(3)
        .score_threshold(0.5)
        .build()
        .unwrap();

    let documents = sample_documents();
    let compressed = compressor.compress(&documents, "query").await.unwrap();

    assert_eq!(compressed.len(), 2);
    assert_eq!(compressed[0].content, documents[2].content);
    assert_eq!(compressed[1].content, documents[0].content);
}

#[tokio::test]
async fn test_http_ranker_upstream_error_reaches_compress_caller() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/rerank"))
        .respond_with(ResponseTemplate::new(500).set_body_string("model crashed"))
        .mount(&server)
        .await;

    let ranker: Arc<dyn Ranker> = Arc::new(HttpRanker::from_config(config_for(&server)).unwrap());
    let compressor = RerankCompressor::builder().client(ranker).build().unwrap();

    let result = compressor.compress(&sample_documents(), "query").await;
    assert!(matches!(result, Err(CompressorError::Server { .. })));
}

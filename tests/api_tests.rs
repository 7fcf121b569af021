use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use tokio_test::assert_ok;
use tower::ServiceExt;

use market_ribbon::api::{router, AppState};
use market_ribbon::generator::{GeneratorConfig, MarketSeriesGenerator};
use market_ribbon::model::tick::MarketSeries;

fn app() -> Router {
    let generator = MarketSeriesGenerator::new(GeneratorConfig {
        max_steps: 1_000,
        ..GeneratorConfig::default()
    })
    .unwrap();
    router(AppState::new(generator, 100))
}

async fn get(uri: &str) -> (StatusCode, serde_json::Value) {
    let response = app()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null))
}

#[tokio::test]
async fn root_reports_liveness() {
    let (status, body) = get("/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "API is running");
}

#[tokio::test]
async fn market_data_defaults_to_100_ticks() {
    let (status, body) = get("/api/market-data").await;
    assert_eq!(status, StatusCode::OK);
    let series: MarketSeries = assert_ok!(serde_json::from_value(body));
    assert_eq!(series.len(), 100);
    assert!(series[9].has_ribbon());
    assert!(series[8].ribbon_color.is_none());
}

#[tokio::test]
async fn market_data_accepts_steps_and_start_price() {
    let (status, body) = get("/api/market-data?steps=7&start_price=50").await;
    assert_eq!(status, StatusCode::OK);
    let series: MarketSeries = assert_ok!(serde_json::from_value(body));
    assert_eq!(series.len(), 7);
    assert!(series.iter().all(|t| t.sma_slow.is_none()));
}

#[tokio::test]
async fn zero_steps_returns_empty_array() {
    let (status, body) = get("/api/market-data?steps=0").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, serde_json::json!([]));
}

#[tokio::test]
async fn too_many_steps_is_bad_request() {
    let (status, body) = get("/api/market-data?steps=5000").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("5000"));
}

#[tokio::test]
async fn huge_start_price_is_bad_request() {
    let (status, body) = get("/api/market-data?start_price=1e307").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("start price"));
}

#[tokio::test]
async fn nan_start_price_is_bad_request() {
    let (status, _) = get("/api/market-data?start_price=NaN").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn negative_steps_is_rejected() {
    let (status, _) = get("/api/market-data?steps=-3").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn cors_allows_any_origin() {
    let response = app()
        .oneshot(
            Request::builder()
                .uri("/api/market-data?steps=1")
                .header("origin", "http://localhost:3000")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(
        response.headers()["access-control-allow-origin"],
        "*"
    );
}

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::error::AppError;
use crate::generator::MarketSeriesGenerator;
use crate::model::tick::MarketSeries;

#[derive(Debug, Clone)]
pub struct AppState {
    generator: Arc<MarketSeriesGenerator>,
    default_steps: usize,
}

impl AppState {
    pub fn new(generator: MarketSeriesGenerator, default_steps: usize) -> Self {
        Self {
            generator: Arc::new(generator),
            default_steps,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct MarketDataQuery {
    pub steps: Option<usize>,
    pub start_price: Option<f64>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = if self.is_invalid_input() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };
        tracing::warn!(error = %self, status = status.as_u16(), "Market data request failed");
        let body = Json(serde_json::json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/api/market-data", get(market_data))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn root() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "API is running" }))
}

async fn market_data(
    State(state): State<AppState>,
    Query(query): Query<MarketDataQuery>,
) -> Result<Json<MarketSeries>, AppError> {
    build_series(&state, &query).map(Json)
}

fn build_series(state: &AppState, query: &MarketDataQuery) -> Result<MarketSeries, AppError> {
    let steps = query.steps.unwrap_or(state.default_steps);
    match query.start_price {
        Some(start_price) => {
            let config = state.generator.config().clone().with_start_price(start_price);
            MarketSeriesGenerator::new(config)?.generate(steps)
        }
        None => state.generator.generate(steps),
    }
}

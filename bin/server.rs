// Billionaire Insights - Web Server
// JSON API over the dataset cache for dashboard front-ends

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use billionaire_insights::{
    country_options, dimension_summary, parse_top_n, run_query, selector_options, BucketScheme,
    Config, DashboardQuery, DatasetCache, Dimension, InsightError, LoaderConfig, Record,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Shared application state
#[derive(Clone)]
struct AppState {
    cache: Arc<DatasetCache>,
    default_scheme: BucketScheme,
    default_top_n: usize,
}

/// API Response wrapper
#[derive(Serialize)]
struct ApiResponse<T> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<T> ApiResponse<T> {
    fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    fn err(message: String) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message),
        }
    }
}

/// Failure of a handler, mapped to a status code
enum ApiError {
    BadRequest(InsightError),
    Internal(anyhow::Error),
}

impl From<InsightError> for ApiError {
    fn from(err: InsightError) -> Self {
        ApiError::BadRequest(err)
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::Internal(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(e) => (
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::<()>::err(e.to_string())),
            )
                .into_response(),
            ApiError::Internal(e) => {
                error!("Error loading dataset: {:#}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ApiResponse::<()>::err("dataset unavailable".to_string())),
                )
                    .into_response()
            }
        }
    }
}

type ApiResult<T> = Result<Json<ApiResponse<T>>, ApiError>;

#[derive(Debug, Deserialize)]
struct ViewParams {
    group: Option<String>,
    scheme: Option<String>,
    n: Option<String>,
}

impl AppState {
    fn records(&self) -> Result<Arc<Vec<Record>>, ApiError> {
        Ok(self.cache.records()?)
    }

    fn scheme(&self, raw: Option<&str>) -> Result<BucketScheme, InsightError> {
        raw.map(|s| s.parse::<BucketScheme>())
            .unwrap_or(Ok(self.default_scheme))
    }

    fn top_n(&self, raw: Option<&str>) -> Result<usize, InsightError> {
        raw.map(parse_top_n).unwrap_or(Ok(self.default_top_n))
    }
}

// ============================================================================
// API Handlers
// ============================================================================

/// GET /api/health - Health check
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(ApiResponse::ok(state.cache.snapshot_info()))
}

/// GET /api/groups?scheme= - Dropdown options
async fn get_groups(
    State(state): State<AppState>,
    Query(params): Query<ViewParams>,
) -> ApiResult<billionaire_insights::SelectorOptions> {
    let scheme = state.scheme(params.scheme.as_deref())?;
    let records = state.records()?;
    Ok(Json(ApiResponse::ok(selector_options(&records, scheme))))
}

/// GET /api/countries - Country dropdown values
async fn get_countries(State(state): State<AppState>) -> ApiResult<Vec<String>> {
    let records = state.records()?;
    Ok(Json(ApiResponse::ok(country_options(&records))))
}

/// GET /api/top?group=&scheme=&n= - Top billionaires overall or in an age group
async fn get_top(
    State(state): State<AppState>,
    Query(params): Query<ViewParams>,
) -> ApiResult<billionaire_insights::DashboardView> {
    let query = DashboardQuery::new(
        state.scheme(params.scheme.as_deref())?,
        state.top_n(params.n.as_deref())?,
    )
    .age_group(params.group.as_deref().unwrap_or("All"));

    let records = state.records()?;
    Ok(Json(ApiResponse::ok(run_query(&records, &query)?)))
}

/// GET /api/countries/:country/top?n= - Top billionaires in a country
async fn get_country_top(
    State(state): State<AppState>,
    Path(country): Path<String>,
    Query(params): Query<ViewParams>,
) -> ApiResult<billionaire_insights::DashboardView> {
    let query = DashboardQuery::new(
        state.scheme(params.scheme.as_deref())?,
        state.top_n(params.n.as_deref())?,
    )
    .country(&country);

    let records = state.records()?;
    Ok(Json(ApiResponse::ok(run_query(&records, &query)?)))
}

/// GET /api/summary/:dimension?scheme= - Group summary by age, country or gender
async fn get_summary(
    State(state): State<AppState>,
    Path(dimension): Path<String>,
    Query(params): Query<ViewParams>,
) -> ApiResult<Vec<billionaire_insights::GroupSummary>> {
    let dimension: Dimension = dimension.parse()?;
    let scheme = state.scheme(params.scheme.as_deref())?;

    let records = state.records()?;
    Ok(Json(ApiResponse::ok(dimension_summary(&records, dimension, scheme))))
}

// ============================================================================
// Main Server
// ============================================================================

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("🌐 Billionaire Insights - Web Server");

    let config = Config::load(None)?;

    if !config.dataset.path.exists() {
        anyhow::bail!("Dataset not found at {:?}", config.dataset.path);
    }

    let cache = DatasetCache::new(&config.dataset.path, LoaderConfig::from(&config.dataset));
    // Load eagerly so a broken file fails at startup, not on the first request
    let count = cache.records()?.len();
    info!(records = count, path = ?config.dataset.path, "dataset loaded");

    // Create shared state
    let state = AppState {
        cache: Arc::new(cache),
        default_scheme: config.dashboard.scheme,
        default_top_n: config.dashboard.top_n,
    };

    // Build API routes
    let api_routes = Router::new()
        .route("/health", get(health_check))
        .route("/groups", get(get_groups))
        .route("/countries", get(get_countries))
        .route("/countries/:country/top", get(get_country_top))
        .route("/top", get(get_top))
        .route("/summary/:dimension", get(get_summary))
        .with_state(state);

    let app = Router::new()
        .nest("/api", api_routes)
        .layer(CorsLayer::permissive());

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.server.addr).await?;

    info!("🚀 Server running on http://{}", config.server.addr);
    info!("   API: http://{}/api/top", config.server.addr);

    axum::serve(listener, app).await?;
    Ok(())
}

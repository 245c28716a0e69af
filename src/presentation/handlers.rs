// HTTP request handlers
use crate::application::errors::StoreError;
use crate::application::series_store::TimeSeriesStore;
use crate::domain::dashboard::{ChartSelection, Dashboard};
use crate::domain::resolution::{ChartKind, Resolution};
use crate::domain::series::{Aggregate, Sample};
use crate::presentation::app_state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

#[derive(Deserialize, Default)]
pub struct DashboardQuery {
    pub resolution: Option<String>,
    pub chart: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ResolutionInfo {
    pub resolution: Resolution,
    pub label: &'static str,
    pub enabled: bool,
    pub chart_kind: ChartKind,
    pub view_points: usize,
}

#[derive(Debug, Serialize)]
pub struct SeriesView {
    pub resolution: Resolution,
    pub source: String,
    pub points: usize,
    pub full: Aggregate,
    pub shown: Aggregate,
    pub samples: Vec<Sample>,
}

#[derive(Debug)]
pub enum ApiError {
    Store(StoreError),
    BadRequest(String),
    NothingConfigured,
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        ApiError::Store(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Store(e @ StoreError::MissingMapping(_)) => (StatusCode::NOT_FOUND, e.to_string()),
            ApiError::Store(e @ StoreError::FetchFailure { .. }) => {
                (StatusCode::BAD_GATEWAY, e.to_string())
            }
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            ApiError::NothingConfigured => (
                StatusCode::NOT_FOUND,
                "no resolution has a configured source".to_string(),
            ),
        };

        if status.is_server_error() {
            tracing::error!("Request failed: {}", message);
        }
        (status, Json(json!({ "error": message }))).into_response()
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(health_check))
        .route("/resolutions", get(list_resolutions))
        .route("/series/:resolution", get(get_series))
        .route("/dashboard", get(get_dashboard))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Every resolution with its defaults; unmapped ones are reported disabled
pub async fn list_resolutions(State(state): State<Arc<AppState>>) -> Json<Vec<ResolutionInfo>> {
    let store = state.dashboard_service.store();
    let infos = Resolution::ALL
        .into_iter()
        .map(|resolution| ResolutionInfo {
            resolution,
            label: resolution.label(),
            enabled: store.is_enabled(resolution),
            chart_kind: store.default_chart_kind(resolution),
            view_points: store.default_view_points(resolution),
        })
        .collect();

    Json(infos)
}

pub async fn get_series(
    Path(resolution): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<SeriesView>, ApiError> {
    let resolution = parse_resolution(&resolution)?;
    let entry = state.dashboard_service.store().load(resolution).await?;
    let window = TimeSeriesStore::window(&entry, resolution);

    Ok(Json(SeriesView {
        resolution,
        source: entry.source.clone(),
        points: entry.len(),
        full: entry.aggregate,
        shown: TimeSeriesStore::aggregate(window),
        samples: window.to_vec(),
    }))
}

pub async fn get_dashboard(
    Query(query): Query<DashboardQuery>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Dashboard>, ApiError> {
    let resolution = match query.resolution.as_deref() {
        Some(key) => parse_resolution(key)?,
        None => state
            .dashboard_service
            .initial_resolution()
            .ok_or(ApiError::NothingConfigured)?,
    };

    let selection = match query.chart.as_deref() {
        Some(chart) => chart
            .parse::<ChartSelection>()
            .map_err(|e| ApiError::BadRequest(e.to_string()))?,
        None => ChartSelection::Auto,
    };

    let dashboard = state
        .dashboard_service
        .get_dashboard(resolution, selection)
        .await?;
    Ok(Json(dashboard))
}

fn parse_resolution(key: &str) -> Result<Resolution, ApiError> {
    key.parse::<Resolution>()
        .map_err(|e| ApiError::BadRequest(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::dashboard_service::DashboardService;
    use crate::application::series_store::tests::{sources, MemoryFetcher};

    fn state() -> Arc<AppState> {
        let fetcher = MemoryFetcher::default()
            .with("d.csv", "5,00:00:00 01/01/24\n7,00:00:00 01/02/24")
            .with("m.csv", "100,00:00:00 01/01/24");
        let store = TimeSeriesStore::new(
            Arc::new(fetcher),
            sources(&[
                (Resolution::Days, "d.csv"),
                (Resolution::Months, "m.csv"),
                (Resolution::Weeks, "broken.csv"),
            ]),
        );
        Arc::new(AppState {
            dashboard_service: DashboardService::new(Arc::new(store)),
        })
    }

    #[tokio::test]
    async fn test_list_resolutions() {
        let Json(infos) = list_resolutions(State(state())).await;
        assert_eq!(infos.len(), 5);
        let enabled: Vec<Resolution> = infos
            .iter()
            .filter(|i| i.enabled)
            .map(|i| i.resolution)
            .collect();
        assert_eq!(
            enabled,
            vec![Resolution::Days, Resolution::Weeks, Resolution::Months]
        );
    }

    #[tokio::test]
    async fn test_get_series() {
        let Json(view) = get_series(Path("days".to_string()), State(state()))
            .await
            .unwrap();
        assert_eq!(view.points, 2);
        assert_eq!(view.full.total, 12.0);
        assert_eq!(view.shown.peak, 7.0);
        assert_eq!(view.samples.len(), 2);
    }

    #[tokio::test]
    async fn test_error_statuses() {
        let state = state();

        let err = get_series(Path("minutes".to_string()), State(state.clone()))
            .await
            .unwrap_err();
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);

        let err = get_series(Path("weeks".to_string()), State(state.clone()))
            .await
            .unwrap_err();
        assert_eq!(err.into_response().status(), StatusCode::BAD_GATEWAY);

        let err = get_series(Path("fortnights".to_string()), State(state))
            .await
            .unwrap_err();
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_dashboard_defaults_to_initial_resolution() {
        let Json(dashboard) = get_dashboard(Query(DashboardQuery::default()), State(state()))
            .await
            .unwrap();
        assert_eq!(dashboard.resolution, Resolution::Months);
        assert_eq!(dashboard.chart.kind, ChartKind::Bar);
    }

    #[tokio::test]
    async fn test_dashboard_with_explicit_query() {
        let query = DashboardQuery {
            resolution: Some("days".to_string()),
            chart: Some("bar".to_string()),
        };
        let Json(dashboard) = get_dashboard(Query(query), State(state())).await.unwrap();
        assert_eq!(dashboard.resolution, Resolution::Days);
        assert_eq!(dashboard.chart.kind, ChartKind::Bar);
        assert_eq!(dashboard.chart.values, vec![5.0, 7.0]);
    }

    #[tokio::test]
    async fn test_dashboard_rejects_unknown_chart_with_json_error() {
        let query = DashboardQuery {
            resolution: Some("days".to_string()),
            chart: Some("pie".to_string()),
        };
        let err = get_dashboard(Query(query), State(state())).await.unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(ref m) if m.contains("pie")));

        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.headers()[axum::http::header::CONTENT_TYPE],
            "application/json"
        );
    }
}

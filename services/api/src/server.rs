use crate::cli::ServeArgs;
use crate::infra::{load_catalog, AppState, InMemoryPreferenceRepository};
use crate::routes::with_match_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use donate_impact::config::AppConfig;
use donate_impact::error::AppError;
use donate_impact::matching::{MatchService, ScoringConfig};
use donate_impact::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let catalog = Arc::new(load_catalog(None, &config)?);
    let repository = Arc::new(InMemoryPreferenceRepository::default());
    let match_service = Arc::new(MatchService::new(
        repository,
        catalog.clone(),
        ScoringConfig::default(),
    ));

    let app = with_match_routes(match_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, candidates = catalog.len(), "donation match service ready");

    axum::serve(listener, app).await?;
    Ok(())
}

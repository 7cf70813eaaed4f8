use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes::with_scorecard_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use credit_scorecard::config::AppConfig;
use credit_scorecard::error::AppError;
use credit_scorecard::telemetry;
use credit_scorecard::underwriting::{validate_policy, PolicyStore, ScorecardService};
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

    let policy = config.policy.load()?;
    validate_policy(&policy).map_err(AppError::Policy)?;
    info!(source = ?config.policy, "scoring policy loaded");

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let scorecard_service = Arc::new(ScorecardService::new(PolicyStore::new(policy)));

    let app = with_scorecard_routes(scorecard_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "credit scorecard service ready");

    axum::serve(listener, app).await?;
    Ok(())
}

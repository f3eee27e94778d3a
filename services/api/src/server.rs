use crate::cli::ServeArgs;
use crate::infra::{AppState, HttpLeadNotifier, InMemorySessionStore};
use crate::routes::with_quiz_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use leadquiz::config::AppConfig;
use leadquiz::error::AppError;
use leadquiz::quiz::{QuizService, ScoringConfig};
use leadquiz::telemetry;
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

    if config.notifier.endpoint.is_none() {
        info!("QUIZ_NOTIFY_URL not set; completed quizzes are logged instead of dispatched");
    }

    let store = Arc::new(InMemorySessionStore::default());
    let notifier = Arc::new(HttpLeadNotifier::new(config.notifier.endpoint.clone()));
    let quiz_service = Arc::new(QuizService::new(store, notifier, ScoringConfig::default()));

    let app = with_quiz_routes(quiz_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "lead quiz service ready");

    axum::serve(listener, app).await?;
    Ok(())
}

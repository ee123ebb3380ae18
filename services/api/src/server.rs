use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryOrganizationDirectory, InMemoryPostingRepository};
use crate::routes::with_career_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use career_posting::careers::{CareerPostingService, DirectorySeed};
use career_posting::config::AppConfig;
use career_posting::error::AppError;
use career_posting::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::{info, warn};

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }
    if let Some(seed) = args.seed.take() {
        config.storage.directory_seed = Some(seed);
    }

    telemetry::init(&config.telemetry)?;

    let seed = match &config.storage.directory_seed {
        Some(path) => DirectorySeed::from_path(path)?,
        None => {
            warn!("no directory seed configured; every organization lookup will be not found");
            DirectorySeed::default()
        }
    };

    let directory = Arc::new(InMemoryOrganizationDirectory::from_seed(&seed));
    let repository = Arc::new(InMemoryPostingRepository::from_seed(&seed));
    info!(
        organizations = directory.organization_count(),
        postings = repository.len(),
        "directory seeded"
    );

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let posting_service = Arc::new(CareerPostingService::new(directory, repository));

    let app = with_career_routes(posting_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "career posting service ready");

    axum::serve(listener, app).await?;
    Ok(())
}

use crate::cli::ServeArgs;
use crate::infra::{
    load_catalog, seed_listings, AppState, InMemoryApplicationRepository,
    InMemoryPropertyRepository,
};
use crate::routes::with_marketplace_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use property_hub::config::AppConfig;
use property_hub::error::AppError;
use property_hub::listings::ListingService;
use property_hub::mortgage::MortgageService;
use property_hub::telemetry;
use std::sync::atomic::{AtomicBool, Ordering};
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
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let catalog = Arc::new(load_catalog(config.catalog.products_csv.as_deref())?);
    let mortgage_service = Arc::new(MortgageService::new(
        catalog,
        Arc::new(InMemoryApplicationRepository::default()),
    ));

    let listing_service = Arc::new(ListingService::new(Arc::new(
        InMemoryPropertyRepository::default(),
    )));
    let seeded = seed_listings(&listing_service)?;
    info!(listings = seeded.len(), "demo listings seeded");

    let app = with_marketplace_routes(mortgage_service, listing_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "property hub api ready");

    axum::serve(listener, app).await?;
    Ok(())
}

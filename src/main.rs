// define modules in crate
mod config;
mod cqrs;
mod domain;
mod dtos;
mod error;
mod params;
mod repositories;
mod routes;
mod state;

use axum::routing::get;
use axum_prometheus::PrometheusMetricLayer;
use config::{AppConfig, RepositoryBackend};
use dotenv::dotenv;
use mongodb::Client;
use repositories::{InMemoryProductRepository, MongoDbProductRepository, ProductRepository};
use state::AppState;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{event, Level};

fn init_tracing(log_path: Option<&str>) -> Result<(), std::io::Error> {
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_target(false)
        .with_ansi(false)
        .json()
        .with_file(true)
        .with_line_number(true)
        .with_current_span(true);

    match log_path {
        Some(path) => subscriber.with_writer(std::fs::File::create(path)?).init(),
        None => subscriber.with_writer(std::io::stdout).init(),
    }

    Ok(())
}

async fn build_repository(backend: &RepositoryBackend) -> Result<Arc<dyn ProductRepository>, Box<dyn std::error::Error>> {
    match backend {
        RepositoryBackend::MongoDb(info) => {
            let client: Client = Client::with_uri_str(&info.uri).await?;
            let product_repository = MongoDbProductRepository::new(info, &client);
            product_repository.ensure_indexes().await?;

            event!(Level::INFO, "Using MongoDB collection {}.{}", info.database, info.collection);
            Ok(Arc::new(product_repository))
        }
        RepositoryBackend::InMemory { seed_path } => {
            let product_repository = match seed_path {
                Some(path) => InMemoryProductRepository::from_seed_file(path).await?,
                None => InMemoryProductRepository::new(),
            };

            event!(Level::INFO, "Using in-memory product repository");
            Ok(Arc::new(product_repository))
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();

    let config = AppConfig::from_env()?;
    init_tracing(config.log_path.as_deref())?;

    let product_repository = build_repository(&config.backend).await?;
    let state = Arc::new(AppState::new(product_repository));

    let (prometheus_layer, metrics_handle) = PrometheusMetricLayer::pair();

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port)).await?;
    event!(Level::INFO, "Catalog service listening on port {}", config.port);

    axum::serve(
        listener,
        routes::router(state)
            .route("/metrics", get(|| async move { metrics_handle.render() }))
            .layer(prometheus_layer)
            .layer(
                ServiceBuilder::new()
                    .layer(TraceLayer::new_for_http())
                    .layer(CorsLayer::permissive()),
            ),
    )
    .await?;

    Ok(())
}

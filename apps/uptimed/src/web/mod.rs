use std::sync::Arc;
use std::time::Duration;

use axum::{http::Method, Router};
use tokio::task::JoinHandle;
use tokio_util::task::TaskTracker;
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};

use crate::{
    config::AppConfig,
    delivery::CallbackClient,
    numbers::FunFactClient,
    pipeline::{supervisor::PipelineSupervisor, Pipeline},
};

pub mod error;
pub mod models;
pub mod routes;

pub use self::error::AppError;

const SHUTDOWN_GRACE: Duration = Duration::from_secs(30);

/// process-wide state shared by every handler
pub struct AppState {
    pub config: AppConfig,
    pub supervisor: PipelineSupervisor,
    pub callback: CallbackClient,
    pub fun_facts: FunFactClient,
    /// fire-and-forget posts made by handlers, drained on shutdown
    pub background: TaskTracker,
}

impl AppState {
    /// builds the shared http clients once and starts the pipeline worker
    pub fn from_config(config: AppConfig) -> eyre::Result<(Arc<AppState>, JoinHandle<()>)> {
        let callback = CallbackClient::from_config(&config.callback);
        let pipeline = Pipeline::from_config(&config.probe, Arc::new(callback.clone()))?;
        let (supervisor, worker) = PipelineSupervisor::start(pipeline, &config.pipeline);
        let fun_facts = FunFactClient::from_config(&config.numbers);

        let state = Arc::new(AppState {
            config,
            supervisor,
            callback,
            fun_facts,
            background: TaskTracker::new(),
        });

        Ok((state, worker))
    }
}

pub fn create_router(app_state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET])
        .allow_headers(Any);

    Router::new()
        .merge(routes::info_routes::create_info_router())
        .merge(routes::integration_routes::create_integration_router())
        .merge(routes::tick_routes::create_tick_router())
        .merge(routes::formatter_routes::create_formatter_router())
        .merge(routes::number_routes::create_number_router())
        .layer(cors)
        .with_state(app_state)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for ctrl-c: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

/// serves until ctrl-c, then lets queued pipeline runs and pending posts finish
pub async fn serve(config: AppConfig) -> eyre::Result<()> {
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let (app_state, worker) = AppState::from_config(config)?;
    let background = app_state.background.clone();

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, create_router(app_state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Http server stopped, waiting for pending work to finish...");
    background.close();
    let drained = async {
        let finished = worker.await;
        background.wait().await;
        finished
    };
    match tokio::time::timeout(SHUTDOWN_GRACE, drained).await {
        Ok(Ok(())) => info!("All pipeline runs finished"),
        Ok(Err(e)) => warn!("Pipeline worker failed: {}", e),
        Err(_) => warn!(
            "Pipeline runs still active after {:?}, exiting anyway",
            SHUTDOWN_GRACE
        ),
    }

    Ok(())
}

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use dotenvy::dotenv;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::errors::StartupError;
use crate::repositories::telegram::TelegramNotifier;

mod config;
mod errors;
mod handlers;
mod logger;
mod models;
mod repositories;
mod utils;

/// Shared, read-only request state.
#[derive(Clone, Debug)]
pub struct AppState {
    pub chat_id: Arc<str>,
    pub telegram: TelegramNotifier,
}

impl AppState {
    pub fn new(chat_id: &str, telegram: TelegramNotifier) -> Self {
        Self {
            chat_id: Arc::from(chat_id),
            telegram,
        }
    }
}

pub fn app(state: AppState) -> Router {
    // Development default: any origin may post reviews.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handlers::health::check))
        .route("/api/review", post(handlers::review::create))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn axum() -> Result<(), StartupError> {
    dotenv().ok();

    logger::init();

    let config = Config::from_env()?;

    let telegram = TelegramNotifier::new(
        &config.telegram_base_url,
        &config.bot_token,
        config.telegram_timeout(),
    )?;

    let state = AppState::new(&config.chat_id, telegram);

    let addr = config.address().parse::<SocketAddr>()?;

    tracing::info!("listening on {}", addr);
    axum::Server::try_bind(&addr)?
        .serve(app(state).into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if tokio::signal::ctrl_c().await.is_err() {
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("shutting down");
}

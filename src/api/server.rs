//! API Server
//!
//! Builds the middleware stack around the router and serves it until a
//! shutdown signal arrives.

use super::{
    handlers::AppState,
    middleware::{create_cors_layer, request_id_middleware, session_middleware},
    routes::create_router,
};
use crate::{
    config::{ConfigValidationError, LexiConfig},
    errors::LexiResult,
    games::service::GameService,
};
use std::{net::SocketAddr, sync::Arc};
use tokio::signal;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};
use tracing::{info, warn};

/// Install the global `tracing` subscriber. `RUST_LOG` wins over `default_filter`.
pub fn init_tracing(default_filter: &str) {
    let result = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .try_init();

    if result.is_err() {
        warn!("Tracing subscriber already installed");
    }
}

/// LexiGuess HTTP server
pub struct ApiServer {
    config: LexiConfig,
    game_service: Arc<GameService>,
}

impl ApiServer {
    pub fn new(config: LexiConfig, game_service: Arc<GameService>) -> Self {
        Self { config, game_service }
    }

    /// Start the API server
    pub async fn run(self) -> LexiResult<()> {
        let app = self.create_app();
        let addr = self.get_socket_addr()?;

        info!("🌐 Starting LexiGuess server");
        info!("   Listen: http://{}", addr);
        self.log_server_info();

        let listener = tokio::net::TcpListener::bind(addr).await?;

        info!("✅ LexiGuess server running");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("🛑 LexiGuess server stopped gracefully");
        Ok(())
    }

    /// Create the application with its middleware stack
    pub fn create_app(&self) -> axum::Router {
        let state = Arc::new(AppState {
            game_service: self.game_service.clone(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        });

        create_router(state)
            // Session cookie (innermost, right next to the handlers)
            .layer(axum::middleware::from_fn(session_middleware))

            // Request ID middleware (before session so errors carry an id)
            .layer(axum::middleware::from_fn(request_id_middleware))

            // CORS layer (before timeout to handle preflight)
            .layer(create_cors_layer(self.config.server.allowed_origins.clone()))

            .layer(TimeoutLayer::new(self.config.request_timeout()))

            // Tracing layer (last for complete request tracing)
            .layer(TraceLayer::new_for_http())
    }

    /// Get socket address from config
    fn get_socket_addr(&self) -> Result<SocketAddr, ConfigValidationError> {
        let ip = self.config.server.host.parse::<std::net::IpAddr>().map_err(|e| {
            ConfigValidationError::InvalidValue {
                field: "server.host".to_string(),
                value: self.config.server.host.clone(),
                reason: e.to_string(),
            }
        })?;
        Ok(SocketAddr::from((ip, self.config.server.port)))
    }

    fn log_server_info(&self) {
        info!("📋 Server Configuration:");
        info!("   Version: {}", env!("CARGO_PKG_VERSION"));
        info!("   Words: {}", self.game_service.dictionary().len());
        info!("   CORS: {:?}", self.config.server.allowed_origins);
        info!("   Request timeout: {}s", self.config.server.request_timeout_secs);
        info!("   Session TTL: {}s", self.config.game.session_ttl_secs);

        info!("📊 Available endpoints:");
        info!("   GET  /         - Game page");
        info!("   GET  /state    - Current game");
        info!("   POST /guess    - Submit a guess");
        info!("   POST /reset    - Start a new game");
        info!("   GET  /health   - Health check");
    }
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            info!("Received terminate signal");
        },
    }
}

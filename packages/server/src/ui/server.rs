//! Server execution logic.

use std::{future::Future, sync::Arc};

use axum::{Router, routing::get};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::usecase::{DispatcherHandle, GetChannelDetailUseCase, GetChannelsUseCase};

use super::{
    handler::{get_channel_detail, get_channels, health_check, websocket_handler},
    signal::shutdown_signal,
    state::{AppState, ConnectionSettings},
};

/// WebSocket chat relay server
///
/// # Example
///
/// ```ignore
/// let server = Server::new(dispatcher, get_channels_usecase, get_channel_detail_usecase, config.connection_settings());
/// server.run("0.0.0.0".to_string(), 8090).await?;
/// ```
pub struct Server {
    state: Arc<AppState>,
}

impl Server {
    pub fn new(
        dispatcher: DispatcherHandle,
        get_channels_usecase: Arc<GetChannelsUseCase>,
        get_channel_detail_usecase: Arc<GetChannelDetailUseCase>,
        connection: ConnectionSettings,
    ) -> Self {
        Self {
            state: Arc::new(AppState {
                dispatcher,
                get_channels_usecase,
                get_channel_detail_usecase,
                connection,
            }),
        }
    }

    /// Build the router with every endpoint.
    pub fn router(&self) -> Router {
        Router::new()
            // WebSocket エンドポイント
            .route("/ws", get(websocket_handler))
            // HTTP エンドポイント
            .route("/api/health", get(health_check))
            .route("/api/channels", get(get_channels))
            .route("/api/channels/{channel_id}", get(get_channel_detail))
            .layer(CorsLayer::permissive())
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Bind to `host:port` and serve until a shutdown signal arrives.
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address or
    /// if there's an error during server execution.
    pub async fn run(self, host: String, port: u16) -> Result<(), Box<dyn std::error::Error>> {
        let bind_addr = format!("{}:{}", host, port);
        let listener = TcpListener::bind(&bind_addr).await?;

        tracing::info!("Chat relay listening on {}", listener.local_addr()?);
        tracing::info!("Connect to: ws://{}/ws", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        self.serve(listener, shutdown_signal()).await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }

    /// Serve on an already bound listener until `shutdown` resolves.
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> std::io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await
    }
}

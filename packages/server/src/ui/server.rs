//! Server execution logic.

use std::{future::Future, sync::Arc};

use axum::{
    Router,
    routing::{get, post},
};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::{
    handler::{create_room, get_room, health_check, list_rooms, reset_room, websocket_handler},
    signal::shutdown_signal,
    state::AppState,
};

/// Study room server
///
/// # Example
///
/// ```ignore
/// let server = Server::new(AppState::in_memory(&ServerSettings::default()));
/// server.run("127.0.0.1".to_string(), 8000).await?;
/// ```
pub struct Server {
    app_state: Arc<AppState>,
}

impl Server {
    /// Create a new Server instance
    pub fn new(app_state: AppState) -> Self {
        Self {
            app_state: Arc::new(app_state),
        }
    }

    /// Routes of the HTTP API and the WebSocket gateway
    pub fn router(&self) -> Router {
        Router::new()
            // WebSocket エンドポイント
            .route("/ws/rooms/{room_id}", get(websocket_handler))
            // HTTP エンドポイント
            .route("/rooms", post(create_room).get(list_rooms))
            .route("/rooms/{room_id}", get(get_room))
            .route("/rooms/{room_id}/reset", post(reset_room))
            .route("/api/health", get(health_check))
            .with_state(Arc::clone(&self.app_state))
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive())
    }

    /// Run the server until Ctrl+C / SIGTERM
    ///
    /// # Arguments
    ///
    /// * `host` - The host address to bind to (e.g., "127.0.0.1")
    /// * `port` - The port number to bind to (e.g., 8000)
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address or
    /// if there's an error during server execution.
    pub async fn run(self, host: String, port: u16) -> Result<(), Box<dyn std::error::Error>> {
        let bind_addr = format!("{}:{}", host, port);
        let listener = TcpListener::bind(&bind_addr).await?;

        tracing::info!("Study room server listening on {}", listener.local_addr()?);
        tracing::info!("Connect to: ws://{}/ws/rooms/<room_id>", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        self.serve(listener, shutdown_signal()).await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }

    /// Serve on an already bound listener until `shutdown` resolves
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> std::io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await
    }
}

use crate::{api, config::LogFormat, telemetry::request_trace_layer, AppState};
use axum::{
    http::StatusCode, response::IntoResponse, response::Response, routing::post, Router,
};
use std::any::Any;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer};
use users_core::UsersError;

/// Routes mounted under `/api`. Undeclared methods on a declared path are
/// answered like undeclared paths: 404.
pub fn api_routes() -> Router<Arc<AppState>> {
    Router::new().route(
        "/users",
        post(api::create_user).fallback(|| async { StatusCode::NOT_FOUND }),
    )
}

/// Builds the full service.
///
/// Layers, outermost first: panic fallback, request logging, CORS. JSON
/// bodies are parsed by the route's extractor, after CORS.
pub fn build_app(state: Arc<AppState>, log_format: LogFormat) -> Router {
    Router::new()
        .nest("/api", api_routes())
        .layer(CorsLayer::permissive())
        .layer(request_trace_layer(log_format))
        .layer(CatchPanicLayer::custom(handle_panic))
        .with_state(state)
}

fn handle_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    UsersError::from_panic(payload.as_ref()).into_response()
}

/// Serves `app` on `listener` until Ctrl-C or SIGTERM.
pub async fn serve(listener: TcpListener, app: Router) -> Result<(), UsersError> {
    let port = listener.local_addr()?.port();
    tracing::info!("Server running on port {}", port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(%e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(%e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}

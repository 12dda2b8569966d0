use std::sync::Arc;
use users_core::UsersResult;
use users_server::{
    app::{build_app, serve},
    config::ServerConfig,
    database::ServerDatabase,
    telemetry, AppState,
};

#[tokio::main]
async fn main() -> UsersResult<()> {
    let config = ServerConfig::load(std::env::args_os(), None).unwrap_or_else(|e| e.exit());

    telemetry::init_tracing(config.log_format);

    let db = match ServerDatabase::connect_lazy(&config.database_url) {
        Ok(db) => Arc::new(db),
        Err(e) => {
            tracing::error!(%e, "Invalid database configuration");
            return Err(e.into());
        }
    };

    let app = build_app(Arc::new(AppState::new(db)), config.log_format);

    let addr = config.bind_address();
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(%e, addr = %addr, "Failed to bind");
            return Err(e.into());
        }
    };

    serve(listener, app).await
}

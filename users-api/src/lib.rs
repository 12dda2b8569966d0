//! users-api - a single-endpoint user creation service
//!
//! This crate provides a unified API over the server and its model types.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use users_api::{build_app, AppState, LogFormat, ServerDatabase};
//!
//! let db = ServerDatabase::connect_lazy("postgres://localhost/users_api")?;
//! let app = build_app(Arc::new(AppState::new(Arc::new(db))), LogFormat::Concise);
//! ```

// Re-export server types
pub use users_server::app::{build_app, serve};
pub use users_server::config::{LogFormat, ServerConfig};
pub use users_server::database::{ServerDatabase, UserStore};
pub use users_server::AppState;

// Re-export core types that external applications may need
pub use users_core::errors::{UsersError, FALLBACK_ERROR_MESSAGE};
pub use users_core::models::{NewUser, User};
pub use users_core::UsersResult;

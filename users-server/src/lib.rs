pub mod api;
pub mod app;
pub mod config;
pub mod database;
pub mod queries;
pub mod telemetry;

use std::sync::Arc;

use database::UserStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn UserStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }
}

pub mod handlers;
pub mod models;
pub mod services;
pub mod config;
pub mod routes;
pub mod errors;
pub mod database;
pub mod middleware;
pub mod repository;

use std::sync::Arc;
use database::Database;
use config::Config;
use repository::ContentEvent;
use tokio::sync::broadcast;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub db: Database,
    pub config: Config,
    pub events: broadcast::Sender<ContentEvent>,
}

/// Rejects the request with 403 unless the authenticated user is an admin.
#[macro_export]
macro_rules! require_admin {
    ($user:expr) => {
        if !$user.is_admin {
            return Err($crate::errors::AppError::Forbidden);
        }
    };
}

// src/state.rs

use crate::config::Config;
use crate::utils::admin_session::AdminSessions;
use axum::extract::FromRef;
use sqlx::SqlitePool;

#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub config: Config,
    pub admin_sessions: AdminSessions,
}

impl FromRef<AppState> for SqlitePool {
    fn from_ref(state: &AppState) -> Self {
        state.pool.clone()
    }
}

impl FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}

impl FromRef<AppState> for AdminSessions {
    fn from_ref(state: &AppState) -> Self {
        state.admin_sessions.clone()
    }
}

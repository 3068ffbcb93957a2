// src/config.rs

use dotenvy::dotenv;
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    /// Shared secret for the admin area. Compared verbatim at login.
    pub admin_password: String,
    pub rust_log: String,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite:podotest.sqlite3".to_string());

        let admin_password = env::var("ADMIN_PASSWORD").unwrap_or_else(|_| {
            tracing::warn!("ADMIN_PASSWORD not set, using the default password");
            "admin".to_string()
        });

        let rust_log = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        let port = env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(3000);

        Self {
            database_url,
            admin_password,
            rust_log,
            port,
        }
    }
}

//! Application configuration management.
//!
//! This module handles loading configuration from environment variables.
//! It uses the `envy` crate to automatically deserialize environment variables into a type-safe struct.

use serde::Deserialize;

/// Which storage backend serves the movement and location tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// PostgreSQL through sqlx (tables created by the bundled migrations)
    Postgres,

    /// Process-local maps, lost on restart
    Memory,
}

/// Application configuration loaded from environment variables.
///
/// # Environment Variables
///
/// - `STORE_BACKEND` (optional): `postgres` or `memory`, defaults to `postgres`
/// - `DATABASE_URL` (required for `postgres`): PostgreSQL connection string
/// - `DATABASE_MAX_CONNECTIONS` (optional): pool size, defaults to 5
/// - `SERVER_PORT` (optional): HTTP server port, defaults to 3000
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_backend")]
    pub store_backend: StoreBackend,

    #[serde(default)]
    pub database_url: Option<String>,

    #[serde(default = "default_max_connections")]
    pub database_max_connections: u32,

    #[serde(default = "default_port")]
    pub server_port: u16,
}

fn default_backend() -> StoreBackend {
    StoreBackend::Postgres
}

fn default_max_connections() -> u32 {
    5
}

/// Default port if SERVER_PORT environment variable is not set.
fn default_port() -> u16 {
    3000
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// This method first attempts to load a `.env` file (which is optional),
    /// then reads environment variables and deserializes them into a Config struct.
    ///
    /// # Errors
    ///
    /// Returns an error if environment variable values cannot be parsed into
    /// expected types (e.g. an unknown `STORE_BACKEND`).
    pub fn from_env() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();

        envy::from_env::<Config>()
    }

    /// Connection string for the postgres backend.
    pub fn require_database_url(&self) -> anyhow::Result<&str> {
        self.database_url
            .as_deref()
            .ok_or_else(|| anyhow::anyhow!("DATABASE_URL must be set when STORE_BACKEND=postgres"))
    }
}

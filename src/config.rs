//! Application configuration management.
//!
//! Configuration comes entirely from the environment (optionally via a
//! `.env` file), deserialized into a type-safe struct with the `envy` crate.

use serde::Deserialize;

/// Runtime configuration.
///
/// # Environment Variables
///
/// - `DATABASE_URL` (required): PostgreSQL connection string
/// - `SERVER_PORT` (optional): HTTP server port, defaults to 3000
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// PostgreSQL connection string
    pub database_url: String,

    /// Port the HTTP server binds to
    #[serde(default = "default_port")]
    pub server_port: u16,
}

/// Default port if SERVER_PORT environment variable is not set.
fn default_port() -> u16 {
    3000
}

impl Config {
    /// Load configuration from the environment.
    ///
    /// Loads a `.env` file first when one exists, then deserializes the
    /// process environment. Field names map to upper-case variables
    /// (`database_url` -> `DATABASE_URL`).
    ///
    /// # Errors
    ///
    /// Returns an error if `DATABASE_URL` is missing or a value cannot be
    /// parsed into its expected type.
    pub fn from_env() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>()
    }

    /// Socket address the server listens on, on all interfaces.
    pub fn bind_addr(&self) -> String {
        format!("0.0.0.0:{}", self.server_port)
    }
}

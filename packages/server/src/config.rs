// Application configuration loaded from the environment

use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub ml_service_url: String,
    pub ml_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let database_url =
            std::env::var("DATABASE_URL").context("DATABASE_URL environment variable not set")?;

        let port = std::env::var("PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse::<u16>()
            .context("PORT must be a valid port number")?;

        let ml_service_url = std::env::var("ML_SERVICE_URL")
            .unwrap_or_else(|_| "http://localhost:5001".to_string());

        let ml_timeout_secs = std::env::var("ML_TIMEOUT_SECS")
            .unwrap_or_else(|_| ml_client::DEFAULT_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .context("ML_TIMEOUT_SECS must be a number of seconds")?;

        Ok(Self {
            database_url,
            port,
            ml_service_url,
            ml_timeout_secs,
        })
    }
}

use std::env;

use crate::error::AppError;

/// Runtime configuration resolved from the environment.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// SQLite connection string (`DATABASE_URL`).
    pub database_url: String,
    /// HTTP listen port (`PORT`).
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://kaiwa.sqlite".to_string());

        let port = env::var("PORT").unwrap_or_else(|_| "5000".to_string());
        let port = port
            .parse::<u16>()
            .map_err(|_| AppError::Config(format!("invalid PORT value: {}", port)))?;

        Ok(Self { database_url, port })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        // Runs without the variables set in the test environment.
        if env::var("DATABASE_URL").is_err() && env::var("PORT").is_err() {
            let config = AppConfig::from_env().unwrap();
            assert_eq!(config.database_url, "sqlite://kaiwa.sqlite");
            assert_eq!(config.port, 5000);
        }
    }
}

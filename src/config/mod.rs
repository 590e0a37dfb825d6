//! Configuration module for the directory backend.
//!
//! All configuration is loaded from environment variables. The service
//! account key is the one required setting: without it the process cannot
//! reach the document store, so its absence is a startup failure.

use std::env;
use std::net::SocketAddr;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Raw service-account key JSON for the document store
    pub service_account_key: String,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let service_account_key = env::var("DIRECTORY_SERVICE_ACCOUNT_KEY")
            .expect("DIRECTORY_SERVICE_ACCOUNT_KEY environment variable not set");

        let bind_addr = env::var("DIRECTORY_BIND_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:8080".to_string())
            .parse()
            .expect("Invalid DIRECTORY_BIND_ADDR format");

        let log_level = env::var("DIRECTORY_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Self {
            service_account_key,
            bind_addr,
            log_level,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_env() {
        env::set_var("DIRECTORY_SERVICE_ACCOUNT_KEY", "{\"project_id\":\"test\"}");
        env::remove_var("DIRECTORY_BIND_ADDR");
        env::remove_var("DIRECTORY_LOG_LEVEL");

        let config = Config::from_env();

        assert_eq!(config.service_account_key, "{\"project_id\":\"test\"}");
        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:8080");
        assert_eq!(config.log_level, "info");
    }
}

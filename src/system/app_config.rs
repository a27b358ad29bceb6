//! Application configuration
//!
//! All configuration is read from the environment once at startup
//! (`dotenvy` has already populated it from `.env` when present).
//! The two required values come from the deployment: the ipstack access
//! credential and the database connection string. Everything else has a
//! sensible default.

use std::env;

use crate::errors::{IpLocatorError, Result};

/// 默认的 ipstack API 地址
pub const DEFAULT_IPSTACK_API_URL: &str = "http://api.ipstack.com/";

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// 公共路由前缀, 例如 `/api/v1/public`
    pub public_prefix: String,
}

#[derive(Clone, Debug)]
pub struct DatabaseConfig {
    pub database_url: String,
    /// MySQL/PostgreSQL 连接池大小, SQLite 忽略
    pub pool_size: u32,
}

#[derive(Clone, Debug)]
pub struct ProviderConfig {
    pub api_url: String,
    pub access_key: String,
}

#[derive(Clone, Debug)]
pub struct LoggingConfig {
    pub level: String,
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub provider: ProviderConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from the environment.
    ///
    /// Missing required variables are collected and reported together so a
    /// broken deployment fails with one complete message instead of several
    /// restarts' worth of partial ones.
    pub fn from_env() -> Result<Self> {
        let mut missing = Vec::new();

        let access_key = env::var("IPSTACK_KEY").unwrap_or_default();
        if access_key.is_empty() {
            missing.push("IPSTACK_KEY");
        }

        let database_url = env::var("DATABASE_URL").unwrap_or_default();
        if database_url.is_empty() {
            missing.push("DATABASE_URL");
        }

        if !missing.is_empty() {
            return Err(IpLocatorError::validation(format!(
                "Missing required environment variables: {}",
                missing.join(", ")
            )));
        }

        let port = env::var("SERVER_PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse::<u16>()
            .map_err(|e| IpLocatorError::validation(format!("Invalid SERVER_PORT: {}", e)))?;

        let pool_size = env::var("DB_POOL_SIZE")
            .unwrap_or_else(|_| "10".to_string())
            .parse::<u32>()
            .map_err(|e| IpLocatorError::validation(format!("Invalid DB_POOL_SIZE: {}", e)))?;

        Ok(AppConfig {
            server: ServerConfig {
                host: env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
                port,
                public_prefix: env::var("PUBLIC_ROUTE_PREFIX")
                    .unwrap_or_else(|_| "/api/v1/public".to_string()),
            },
            database: DatabaseConfig {
                database_url,
                pool_size,
            },
            provider: ProviderConfig {
                api_url: env::var("IPSTACK_API_URL")
                    .unwrap_or_else(|_| DEFAULT_IPSTACK_API_URL.to_string()),
                access_key,
            },
            logging: LoggingConfig {
                level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            },
        })
    }
}

//! Configuration module for Dog Finder.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use crate::errors::ConfigError;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the dog adoption service
    pub api_base_url: String,
    /// Base URL of the cookie-consent server
    pub consent_url: String,
    /// Address the consent server binds to
    pub bind_addr: SocketAddr,
    /// Origin allowed to call the consent server with credentials
    pub cors_origin: String,
    /// File holding the persisted "is authenticated" flag
    pub session_path: PathBuf,
    /// Resolve city/state for every dog on a result page
    pub enrich_locations: bool,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let api_base_url = env::var("DOGS_API_BASE_URL")
            .unwrap_or_else(|_| "https://frontend-take-home-service.fetch.com".to_string());

        let consent_url =
            env::var("DOGS_CONSENT_URL").unwrap_or_else(|_| "http://localhost:3000".to_string());

        let bind_addr = env::var("DOGS_BIND_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:3000".to_string())
            .parse()
            .map_err(|e| ConfigError {
                variable: "DOGS_BIND_ADDR",
                message: format!("invalid socket address: {}", e),
            })?;

        let cors_origin =
            env::var("DOGS_CORS_ORIGIN").unwrap_or_else(|_| "http://localhost:3001".to_string());

        let session_path = env::var("DOGS_SESSION_PATH")
            .unwrap_or_else(|_| "./data/session.json".to_string())
            .into();

        let enrich_locations = match env::var("DOGS_ENRICH_LOCATIONS") {
            Ok(raw) => parse_flag(&raw).ok_or_else(|| ConfigError {
                variable: "DOGS_ENRICH_LOCATIONS",
                message: format!("expected true/false, got {:?}", raw),
            })?,
            Err(_) => true,
        };

        let log_level = env::var("DOGS_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            api_base_url: trim_base(api_base_url),
            consent_url: trim_base(consent_url),
            bind_addr,
            cors_origin,
            session_path,
            enrich_locations,
            log_level,
        })
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn trim_base(url: String) -> String {
    url.trim_end_matches('/').to_string()
}

//! Configuration management for the MCP server.
//!
//! Configuration is loaded once at startup from environment variables (after
//! reading an optional `.env` file) and shared read-only for the lifetime of
//! the process.

use super::error::{Error, Result};
use super::transport::TransportConfig;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Environment variables that must be present for the server to start.
pub const REQUIRED_DQ_VARS: [&str; 5] = ["DQ_URL", "DQ_USERNAME", "DQ_PASSWORD", "DQ_ISS", "DQ_CXN"];

/// Main configuration structure for the MCP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,

    /// Connection to the Collibra DQ service.
    pub dq: DqConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,

    /// Whether to include timestamps in log output.
    pub with_timestamps: bool,
}

/// Connection parameters for the Collibra DQ REST API.
///
/// Exactly one connection is supported per process.
#[derive(Clone, Serialize, Deserialize)]
pub struct DqConfig {
    /// Base URL of the DQ service, e.g. `https://dq.example.com`.
    pub base_url: String,

    /// Username used for sign-in.
    pub username: String,

    /// Password used for sign-in.
    pub password: String,

    /// Tenant identifier ("iss") sent with the sign-in request.
    pub iss: String,

    /// Connection name used for pushdown jobs and SQL execution.
    pub connection: String,

    /// Accept self-signed or otherwise invalid TLS certificates.
    pub accept_invalid_certs: bool,
}

/// Custom Debug implementation to redact secrets from logs.
impl std::fmt::Debug for DqConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DqConfig")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("iss", &self.iss)
            .field("connection", &self.connection)
            .field("accept_invalid_certs", &self.accept_invalid_certs)
            .finish()
    }
}

impl Default for DqConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:9000".to_string(),
            username: String::new(),
            password: String::new(),
            iss: String::new(),
            connection: "BIGQUERY".to_string(),
            accept_invalid_certs: false,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "cdq-mcp".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                with_timestamps: true,
            },
            transport: TransportConfig::default(),
            dq: DqConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Reads `.env` first if present. Fails if any of [`REQUIRED_DQ_VARS`] is
    /// missing or empty.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    pub fn from_vars<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let missing: Vec<&str> = REQUIRED_DQ_VARS
            .iter()
            .copied()
            .filter(|key| get(*key).is_none())
            .collect();
        if !missing.is_empty() {
            return Err(Error::config(format!(
                "missing required environment variable(s): {}",
                missing.join(", ")
            )));
        }

        let mut config = Self::default();

        if let Some(name) = get("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Some(level) = get("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        if let Some(timestamps) = get("MCP_LOG_TIMESTAMPS") {
            config.logging.with_timestamps = parse_flag(&timestamps, true);
        }

        config.transport = TransportConfig::from_vars(&get)?;

        // Presence checked above.
        let required = |key: &str| get(key).unwrap_or_default();
        config.dq = DqConfig {
            base_url: required("DQ_URL").trim_end_matches('/').to_string(),
            username: required("DQ_USERNAME"),
            password: required("DQ_PASSWORD"),
            iss: required("DQ_ISS"),
            connection: required("DQ_CXN"),
            accept_invalid_certs: get("DQ_ACCEPT_INVALID_CERTS")
                .map(|v| parse_flag(&v, false))
                .unwrap_or(false),
        };

        Ok(config)
    }

    /// Log the settings worth knowing about at startup. Call once logging is up.
    pub fn log_summary(&self) {
        info!("Starting {} v{}", self.server.name, self.server.version);
        info!(
            "DQ connection configured: {} (cxn {}, tenant {})",
            self.dq.base_url, self.dq.connection, self.dq.iss
        );
        if self.dq.accept_invalid_certs {
            warn!("TLS certificate verification disabled for the DQ service");
        }
    }
}

/// Parse a boolean-ish environment value, falling back to `default`.
pub(crate) fn parse_flag(value: &str, default: bool) -> bool {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => true,
        "0" | "false" | "no" | "off" => false,
        _ => default,
    }
}

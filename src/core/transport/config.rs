//! Transport configuration types.

use serde::{Deserialize, Serialize};

use crate::core::error::{Error, Result};

#[cfg(not(any(feature = "stdio", feature = "http")))]
compile_error!("At least one transport feature must be enabled: stdio or http");

/// Transport configuration options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TransportConfig {
    /// Standard input/output transport.
    #[cfg(feature = "stdio")]
    Stdio,

    /// Session-based JSON-RPC over HTTP (default).
    #[cfg(feature = "http")]
    Http(HttpConfig),
}

/// HTTP transport configuration.
#[cfg(feature = "http")]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Port number to listen on.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Host address to bind to.
    #[serde(default = "default_host")]
    pub host: String,

    /// Path for JSON-RPC endpoint.
    #[serde(default = "default_rpc_path")]
    pub rpc_path: String,

    /// Enable CORS for browser clients.
    #[serde(default = "default_cors")]
    pub enable_cors: bool,

    /// Seconds a session may stay unused before it is dropped.
    #[serde(default = "default_session_idle_secs")]
    pub session_idle_secs: u64,

    /// Open sessions kept at most; the least recently used one goes first.
    #[serde(default = "default_max_sessions")]
    pub max_sessions: usize,
}

#[cfg(feature = "http")]
fn default_port() -> u16 {
    8765
}

#[cfg(feature = "http")]
fn default_host() -> String {
    "0.0.0.0".to_string()
}

#[cfg(feature = "http")]
fn default_rpc_path() -> String {
    "/mcp".to_string()
}

#[cfg(feature = "http")]
fn default_cors() -> bool {
    true
}

#[cfg(feature = "http")]
fn default_session_idle_secs() -> u64 {
    30 * 60
}

#[cfg(feature = "http")]
fn default_max_sessions() -> usize {
    1000
}

#[cfg(feature = "http")]
fn parse_number<F, T>(get: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match get(key) {
        Some(v) => v
            .trim()
            .parse()
            .map_err(|_| Error::config(format!("{} is not a valid number: {}", key, v))),
        None => Ok(default),
    }
}

impl Default for TransportConfig {
    fn default() -> Self {
        #[cfg(feature = "http")]
        {
            return Self::Http(HttpConfig::default());
        }

        #[cfg(all(not(feature = "http"), feature = "stdio"))]
        {
            return Self::Stdio;
        }
    }
}

#[cfg(feature = "http")]
impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            host: default_host(),
            rpc_path: default_rpc_path(),
            enable_cors: default_cors(),
            session_idle_secs: default_session_idle_secs(),
            max_sessions: default_max_sessions(),
        }
    }
}

impl TransportConfig {
    /// Create a STDIO transport config.
    #[cfg(feature = "stdio")]
    pub fn stdio() -> Self {
        Self::Stdio
    }

    /// Create an HTTP transport config.
    #[cfg(feature = "http")]
    pub fn http(port: u16, host: impl Into<String>) -> Self {
        Self::Http(HttpConfig {
            port,
            host: host.into(),
            ..Default::default()
        })
    }

    /// Load transport config from a variable lookup.
    ///
    /// `MCP_TRANSPORT` selects the transport; an unset value picks the
    /// default. Unknown names and unparsable numbers are configuration errors.
    pub fn from_vars<F>(get: &F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        #[cfg(feature = "http")]
        let default_transport = "http";
        #[cfg(not(feature = "http"))]
        let default_transport = "stdio";

        let transport = get("MCP_TRANSPORT")
            .map(|t| t.trim().to_lowercase())
            .unwrap_or_else(|| default_transport.to_string());

        match transport.as_str() {
            #[cfg(feature = "stdio")]
            "stdio" => Ok(Self::Stdio),
            #[cfg(feature = "http")]
            "http" => {
                let port = match get("MCP_HTTP_PORT") {
                    Some(p) => p.trim().parse().map_err(|_| {
                        Error::config(format!("MCP_HTTP_PORT is not a valid port: {}", p))
                    })?,
                    None => default_port(),
                };
                let host = get("MCP_HTTP_HOST").unwrap_or_else(default_host);
                let rpc_path = get("MCP_HTTP_PATH").unwrap_or_else(default_rpc_path);
                let enable_cors = get("MCP_HTTP_CORS")
                    .map(|v| crate::core::config::parse_flag(&v, true))
                    .unwrap_or(true);
                let session_idle_secs = parse_number(
                    get,
                    "MCP_HTTP_SESSION_IDLE_SECS",
                    default_session_idle_secs(),
                )?;
                let max_sessions =
                    parse_number(get, "MCP_HTTP_MAX_SESSIONS", default_max_sessions())?;
                Ok(Self::Http(HttpConfig {
                    port,
                    host,
                    rpc_path,
                    enable_cors,
                    session_idle_secs,
                    max_sessions,
                }))
            }
            other => Err(Error::config(format!(
                "unsupported MCP_TRANSPORT '{}' for this build",
                other
            ))),
        }
    }

    /// Get a description of this transport for logging.
    pub fn description(&self) -> String {
        match self {
            #[cfg(feature = "stdio")]
            Self::Stdio => "STDIO (standard MCP mode)".to_string(),
            #[cfg(feature = "http")]
            Self::Http(cfg) => format!("HTTP on {}:{}{}", cfg.host, cfg.port, cfg.rpc_path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[cfg(feature = "http")]
    #[test]
    fn test_default_is_http_on_fixed_port() {
        let config = TransportConfig::from_vars(&lookup(&[])).unwrap();
        match config {
            TransportConfig::Http(cfg) => {
                assert_eq!(cfg.host, "0.0.0.0");
                assert_eq!(cfg.port, 8765);
                assert_eq!(cfg.rpc_path, "/mcp");
                assert!(cfg.enable_cors);
            }
            #[allow(unreachable_patterns)]
            _ => panic!("expected HTTP transport"),
        }
    }

    #[cfg(feature = "http")]
    #[test]
    fn test_http_overrides() {
        let get = lookup(&[
            ("MCP_TRANSPORT", "HTTP"),
            ("MCP_HTTP_PORT", "9000"),
            ("MCP_HTTP_HOST", "127.0.0.1"),
            ("MCP_HTTP_PATH", "/rpc"),
            ("MCP_HTTP_CORS", "0"),
        ]);
        let config = TransportConfig::from_vars(&get).unwrap();
        assert_eq!(config.description(), "HTTP on 127.0.0.1:9000/rpc");
    }

    #[cfg(feature = "http")]
    #[test]
    fn test_invalid_port_is_config_error() {
        let get = lookup(&[("MCP_TRANSPORT", "http"), ("MCP_HTTP_PORT", "eighty")]);
        let err = TransportConfig::from_vars(&get).unwrap_err();
        assert!(err.to_string().contains("MCP_HTTP_PORT"));
    }

    #[cfg(feature = "http")]
    #[test]
    fn test_http_settings_apply_without_transport_name() {
        let get = lookup(&[
            ("MCP_HTTP_PORT", "9100"),
            ("MCP_HTTP_SESSION_IDLE_SECS", "60"),
            ("MCP_HTTP_MAX_SESSIONS", "5"),
        ]);
        match TransportConfig::from_vars(&get).unwrap() {
            TransportConfig::Http(cfg) => {
                assert_eq!(cfg.port, 9100);
                assert_eq!(cfg.session_idle_secs, 60);
                assert_eq!(cfg.max_sessions, 5);
            }
            #[allow(unreachable_patterns)]
            _ => panic!("expected HTTP transport"),
        }

        let bad = lookup(&[("MCP_HTTP_MAX_SESSIONS", "lots")]);
        let err = TransportConfig::from_vars(&bad).unwrap_err();
        assert!(err.to_string().contains("MCP_HTTP_MAX_SESSIONS"));
    }

    #[cfg(feature = "stdio")]
    #[test]
    fn test_stdio_selected() {
        let config = TransportConfig::from_vars(&lookup(&[("MCP_TRANSPORT", "stdio")])).unwrap();
        assert!(matches!(config, TransportConfig::Stdio));
    }

    #[test]
    fn test_unknown_transport_rejected() {
        let result = TransportConfig::from_vars(&lookup(&[("MCP_TRANSPORT", "carrier-pigeon")]));
        assert!(result.is_err());
    }
}

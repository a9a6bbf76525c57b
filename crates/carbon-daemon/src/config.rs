//! Configuration for carbon-daemon

use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

/// Default listening port, matching the `PORT` environment default.
pub const DEFAULT_PORT: u16 = 5001;

/// Main daemon configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DaemonConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Listen address
    pub listen_addr: SocketAddr,

    /// Enable permissive CORS
    #[serde(default = "default_true")]
    pub enable_cors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), DEFAULT_PORT),
            enable_cors: true,
        }
    }
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = DaemonConfig::default();
        assert_eq!(config.server.listen_addr.port(), DEFAULT_PORT);
        assert!(config.server.enable_cors);
    }

    #[test]
    fn test_cors_defaults_on_when_omitted() {
        let config: ServerConfig =
            serde_json::from_str(r#"{"listen_addr": "127.0.0.1:5001"}"#).unwrap();
        assert!(config.enable_cors);
    }
}

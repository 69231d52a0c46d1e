use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,

    pub port: u16,

    /// Map logical failures to 4xx/5xx instead of answering `200 OK`
    pub map_failure_status: bool,

    /// Upper bound on the request body, base64 image included
    pub max_body_bytes: usize,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, String> {
        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|e| format!("host must be an IP address, got {:?}: {}", self.host, e))?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: Ipv4Addr::UNSPECIFIED.to_string(),
            port: 8000,
            map_failure_status: false,
            max_body_bytes: 20 * 1024 * 1024,
        }
    }
}

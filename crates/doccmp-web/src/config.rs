use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use doccmp_core::{Error, Result};
use serde::{Deserialize, Serialize};

pub const DEFAULT_PORT: u16 = 5000;

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
}

const fn default_host() -> IpAddr {
    IpAddr::V4(Ipv4Addr::UNSPECIFIED)
}

const fn default_port() -> u16 {
    DEFAULT_PORT
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    /// `DOCCMP_PORT` wins over the platform-provided `PORT`.
    pub fn from_env() -> Result<Self> {
        let port = match std::env::var("DOCCMP_PORT").or_else(|_| std::env::var("PORT")) {
            Ok(value) => parse_port(&value)?,
            Err(_) => default_port(),
        };

        let host = match std::env::var("DOCCMP_HOST") {
            Ok(value) if !value.trim().is_empty() => value.trim().parse().map_err(|_| {
                Error::InvalidConfig(format!("DOCCMP_HOST is not an IP address: {value}"))
            })?,
            _ => default_host(),
        };

        Ok(Self { host, port })
    }

    pub const fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn parse_port(value: &str) -> Result<u16> {
    value
        .trim()
        .parse()
        .map_err(|_| Error::InvalidConfig(format!("port is not a number: {value}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_binds_everywhere() {
        let config = ServerConfig::default();
        assert_eq!(config.addr().to_string(), "0.0.0.0:5000");
    }

    #[test]
    fn test_parse_port() {
        assert_eq!(parse_port(" 8080 ").unwrap(), 8080);
        assert!(matches!(parse_port("http"), Err(Error::InvalidConfig(_))));
        assert!(matches!(parse_port("70000"), Err(Error::InvalidConfig(_))));
    }
}

//! Server configuration loaded from environment variables.

use std::net::{Ipv4Addr, SocketAddr};

use anyhow::Context;

pub const DEFAULT_PORT: u16 = 8000;

/// Server configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Address the listener binds to.
    pub bind_addr: SocketAddr,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// - `RESPONDER_BIND_ADDR`: full bind address, e.g. `127.0.0.1:9000`
    /// - `PORT`: port on `0.0.0.0`, used when `RESPONDER_BIND_ADDR` is unset
    ///
    /// Defaults to `0.0.0.0:8000`.
    pub fn from_env() -> anyhow::Result<Self> {
        let config = Self::from_vars(|key| std::env::var(key).ok())?;
        tracing::info!(bind_addr = %config.bind_addr, "configuration loaded");
        Ok(config)
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let bind_addr = match (var("RESPONDER_BIND_ADDR"), var("PORT")) {
            (Some(addr), _) => addr
                .trim()
                .parse()
                .with_context(|| format!("invalid RESPONDER_BIND_ADDR: {addr:?}"))?,
            (None, Some(port)) => {
                let port: u16 = port
                    .trim()
                    .parse()
                    .with_context(|| format!("invalid PORT: {port:?}"))?;
                SocketAddr::from((Ipv4Addr::UNSPECIFIED, port))
            }
            (None, None) => SocketAddr::from((Ipv4Addr::UNSPECIFIED, DEFAULT_PORT)),
        };
        Ok(Self { bind_addr })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load(vars: &[(&str, &str)]) -> anyhow::Result<Config> {
        Config::from_vars(|key| {
            vars.iter()
                .find(|(name, _)| *name == key)
                .map(|(_, value)| value.to_string())
        })
    }

    #[test]
    fn config_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.bind_addr, "0.0.0.0:8000".parse().unwrap());
    }

    #[test]
    fn port_only() {
        let config = load(&[("PORT", "3000")]).unwrap();
        assert_eq!(config.bind_addr, "0.0.0.0:3000".parse().unwrap());
    }

    #[test]
    fn bind_addr_wins_over_port() {
        let config = load(&[("RESPONDER_BIND_ADDR", "127.0.0.1:9090"), ("PORT", "3000")]).unwrap();
        assert_eq!(config.bind_addr, "127.0.0.1:9090".parse().unwrap());
    }

    #[test]
    fn invalid_values_are_reported() {
        let err = load(&[("PORT", "eighty")]).unwrap_err();
        assert!(err.to_string().contains("invalid PORT"));

        let err = load(&[("RESPONDER_BIND_ADDR", "localhost")]).unwrap_err();
        assert!(err.to_string().contains("invalid RESPONDER_BIND_ADDR"));
    }
}

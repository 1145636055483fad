//! Listen-address configuration.
//!
//! The redirect rule is fixed; the only knob is where the server listens.

use std::net::SocketAddr;

use crate::error::Error;

/// Environment variable overriding [`Config::addr`].
pub const ADDR_ENV: &str = "LEGACY_REDIRECT_ADDR";

/// Where the landing page's links point.
pub const DEFAULT_ADDR: &str = "127.0.0.1:8787";

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    pub addr: SocketAddr,
}

impl Config {
    /// Reads [`ADDR_ENV`], falling back to [`DEFAULT_ADDR`].
    pub fn from_env() -> Result<Self, Error> {
        Self::from_addr(std::env::var(ADDR_ENV).ok().as_deref())
    }

    fn from_addr(addr: Option<&str>) -> Result<Self, Error> {
        let addr = addr.unwrap_or(DEFAULT_ADDR).trim().parse::<SocketAddr>()?;
        Ok(Self { addr })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self { addr: SocketAddr::from(([127, 0, 0, 1], 8787)) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_uses_default() {
        assert_eq!(Config::from_addr(None).unwrap(), Config::default());
        assert_eq!(Config::default().addr.to_string(), DEFAULT_ADDR);
    }

    #[test]
    fn override_is_parsed() {
        let cfg = Config::from_addr(Some(" 0.0.0.0:3000 ")).unwrap();
        assert_eq!(cfg.addr, "0.0.0.0:3000".parse::<SocketAddr>().unwrap());
    }

    #[test]
    fn invalid_override_is_an_error() {
        let err = Config::from_addr(Some("localhost")).unwrap_err();
        assert!(matches!(err, Error::InvalidAddr(_)));
    }
}

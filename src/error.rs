//! Unified error type.

use std::fmt;
use std::net::AddrParseError;

/// The error type returned by the crate's fallible operations.
///
/// The two responses [`fetch`](crate::fetch) knows how to build are plain
/// [`Response`](crate::Response) values. An `Error` is either an
/// infrastructure failure (binding, accepting, bad listen address) or the one
/// fault a request can cause: a URL that cannot be built or parsed.
#[derive(Debug)]
pub enum Error {
    /// Binding to a port or accepting a connection failed.
    Io(std::io::Error),
    /// The request URL could not be built or parsed.
    MalformedUrl(Box<dyn std::error::Error + Send + Sync>),
    /// `LEGACY_REDIRECT_ADDR` is not a `host:port` socket address.
    InvalidAddr(AddrParseError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e)           => write!(f, "io: {e}"),
            Self::MalformedUrl(e) => write!(f, "malformed request url: {e}"),
            Self::InvalidAddr(e)  => write!(f, "invalid listen address: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e)           => Some(e),
            Self::MalformedUrl(e) => Some(e.as_ref()),
            Self::InvalidAddr(e)  => Some(e),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<url::ParseError> for Error {
    fn from(e: url::ParseError) -> Self {
        Self::MalformedUrl(Box::new(e))
    }
}

impl From<http::Error> for Error {
    fn from(e: http::Error) -> Self {
        Self::MalformedUrl(Box::new(e))
    }
}

impl From<AddrParseError> for Error {
    fn from(e: AddrParseError) -> Self {
        Self::InvalidAddr(e)
    }
}

//! Runs the legacy-path redirector.
//!
//!   RUST_LOG=info cargo run
//!   curl -i http://127.0.0.1:8787/old-path/foo?x=1
//!
//! `LEGACY_REDIRECT_ADDR` overrides the listen address.

use legacy_redirect::{Config, Error, Server, fetch};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env()?;
    Server::bind(config.addr).serve(fetch).await
}

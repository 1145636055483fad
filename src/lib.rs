//! # legacy-redirect
//!
//! Moves clients off a retired URL prefix. Requests whose path starts with
//! `/old-path` get a `301 Moved Permanently` to the same URL under
//! `/new-path`; everything else gets a small HTML page pointing at both.
//!
//! The decision lives in one stateless handler, [`fetch`]. The rest of the
//! crate hosts it: [`Server`] accepts HTTP/1.1 and HTTP/2 connections, builds
//! an absolute-URL [`Request`] for each request, calls the handler, and
//! turns a handler error into a 500.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use legacy_redirect::{Config, Server, fetch};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), legacy_redirect::Error> {
//!     let config = Config::from_env()?;
//!     Server::bind(config.addr).serve(fetch).await
//! }
//! ```
//!
//! Calling the handler directly needs no server:
//!
//! ```rust
//! use legacy_redirect::{Request, fetch};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let res = fetch(Request::get("http://127.0.0.1:8787/old-path/foo?x=1")).await.unwrap();
//! assert_eq!(res.status_code(), 301);
//! assert_eq!(res.header("location"), Some("http://127.0.0.1:8787/new-path/foo?x=1"));
//! # }
//! ```

mod config;
mod error;
mod fetch;
mod handler;
mod request;
mod response;
mod server;
mod status;

pub use config::{ADDR_ENV, Config, DEFAULT_ADDR};
pub use error::Error;
pub use fetch::{LANDING_PAGE, LEGACY_PREFIX, NEW_PREFIX, fetch, rewrite};
pub use handler::Handler;
pub use request::Request;
pub use response::{ContentType, IntoResponse, Response, ResponseBuilder};
pub use server::Server;
pub use status::Status;

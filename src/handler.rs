//! The `fetch`-style entry point the server calls.
//!
//! The server runs exactly one handler for its whole lifetime, so there is
//! nothing to erase: [`Server`](crate::Server) is generic over `H: Handler`,
//! wraps it in one `Arc`, and calls [`Handler::handle`] once per request.

use std::future::Future;

use crate::request::Request;
use crate::response::{IntoResponse, Response};

/// Something that turns one [`Request`] into one [`Response`].
///
/// Any function shaped like a Workers `fetch` already is one:
///
/// ```text
/// async fn name(req: Request) -> impl IntoResponse
/// ```
///
/// Its output goes through [`IntoResponse`], so a handler returning
/// `Result<Response, Error>` gets the 500 fault path for free.
pub trait Handler: Send + Sync + 'static {
    fn handle(&self, req: Request) -> impl Future<Output = Response> + Send;
}

impl<F, Fut, R> Handler for F
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send,
    R: IntoResponse + Send,
{
    fn handle(&self, req: Request) -> impl Future<Output = Response> + Send {
        let fut = self(req);
        async move { fut.await.into_response() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Status, fetch};

    async fn always_moved(_req: Request) -> Status {
        Status::MovedPermanently
    }

    #[tokio::test]
    async fn return_value_is_converted() {
        let res = always_moved.handle(Request::get("http://example.com/")).await;
        assert_eq!(res.status_code(), 301);
        assert!(res.body().is_empty());
    }

    #[tokio::test]
    async fn closures_are_handlers() {
        let echo = |req: Request| async move { Response::html(req.url().to_owned()) };
        let res = echo.handle(Request::get("http://example.com/x")).await;
        assert_eq!(res.body(), b"http://example.com/x");
    }

    #[tokio::test]
    async fn failing_fetch_becomes_500() {
        let res = fetch.handle(Request::get("http://bad host/old-path")).await;
        assert_eq!(res.status_code(), 500);
        assert_eq!(res.body(), b"Internal Server Error");
    }
}

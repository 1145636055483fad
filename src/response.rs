//! Outgoing HTTP response type and the [`IntoResponse`] conversion trait.
//!
//! A handler builds a [`Response`] and returns it. The server turns it into a
//! hyper response at the very end; handlers never see hyper types.

use bytes::Bytes;
use http::header::{HeaderName, HeaderValue};
use http_body_util::Full;
use tracing::{error, warn};

use crate::error::Error;
use crate::status::Status;

// ── ContentType ───────────────────────────────────────────────────────────────

/// Content-type values for use with [`ResponseBuilder::bytes`].
pub enum ContentType {
    Html, // text/html
    Text, // text/plain; charset=utf-8
}

impl ContentType {
    fn as_str(&self) -> &'static str {
        match self {
            Self::Html => "text/html",
            Self::Text => "text/plain; charset=utf-8",
        }
    }
}

// ── Response ─────────────────────────────────────────────────────────────────

/// An outgoing HTTP response.
///
/// # Shortcuts
///
/// ```rust
/// use legacy_redirect::{Response, Status};
///
/// Response::html("<h1>hi</h1>");
/// Response::redirect("https://example.com/new-path", Status::MovedPermanently);
/// Response::status(Status::InternalServerError);
/// ```
///
/// # Builder (custom status or headers)
///
/// ```rust
/// use legacy_redirect::{ContentType, Response, Status};
///
/// Response::builder()
///     .status(Status::InternalServerError)
///     .header("retry-after", "5")
///     .bytes(ContentType::Text, b"try again".to_vec());
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Response {
    pub(crate) body: Vec<u8>,
    pub(crate) headers: Vec<(String, String)>,
    pub(crate) status: Status,
}

impl Response {
    /// `200 OK`, `text/html`.
    pub fn html(body: impl Into<String>) -> Self {
        Self::builder().bytes(ContentType::Html, body.into().into_bytes())
    }

    /// Redirect to `location` with no body.
    pub fn redirect(location: &str, code: Status) -> Self {
        Self::builder().status(code).header("location", location).no_body()
    }

    /// Response with no body.
    pub fn status(code: Status) -> Self {
        Self { body: Vec::new(), headers: Vec::new(), status: code }
    }

    /// Builder for responses that need a custom status or extra headers.
    pub fn builder() -> ResponseBuilder {
        ResponseBuilder { headers: Vec::new(), status: Status::Ok }
    }

    pub fn status_code(&self) -> u16 { self.status.into() }
    pub fn headers(&self) -> &[(String, String)] { &self.headers }
    pub fn body(&self) -> &[u8] { &self.body }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Converts into the hyper-facing response.
    ///
    /// Headers hyper would reject are dropped with a warning rather than
    /// failing the whole response.
    pub(crate) fn into_inner(self) -> http::Response<Full<Bytes>> {
        let mut res = http::Response::new(Full::new(Bytes::from(self.body)));
        *res.status_mut() = self.status.into();

        for (name, value) in self.headers {
            match (HeaderName::from_bytes(name.as_bytes()), HeaderValue::from_str(&value)) {
                (Ok(name), Ok(value)) => {
                    res.headers_mut().append(name, value);
                }
                _ => warn!(header = %name, "dropping invalid response header"),
            }
        }
        res
    }
}

// ── ResponseBuilder ───────────────────────────────────────────────────────────

/// Fluent builder for [`Response`].
///
/// Obtain via [`Response::builder()`]. Defaults to `Status::Ok` (200).
/// Terminated by a typed body method or [`no_body`](Self::no_body).
pub struct ResponseBuilder {
    headers: Vec<(String, String)>,
    status: Status,
}

impl ResponseBuilder {
    pub fn status(mut self, code: Status) -> Self {
        self.status = code;
        self
    }

    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_owned(), value.to_owned()));
        self
    }

    /// Terminate with a plain-text body (`text/plain; charset=utf-8`).
    pub fn text(self, body: impl Into<String>) -> Response {
        self.bytes(ContentType::Text, body.into().into_bytes())
    }

    /// Terminate with a typed body.
    pub fn bytes(self, content_type: ContentType, body: Vec<u8>) -> Response {
        let mut headers = vec![("content-type".to_owned(), content_type.as_str().to_owned())];
        headers.extend(self.headers);
        Response { body, headers, status: self.status }
    }

    /// Terminate with no body (e.g. `Status::MovedPermanently`).
    pub fn no_body(self) -> Response {
        Response { body: Vec::new(), headers: self.headers, status: self.status }
    }
}

// ── IntoResponse ──────────────────────────────────────────────────────────────

/// Conversion into an HTTP [`Response`].
///
/// Anything a handler returns must implement this.
pub trait IntoResponse {
    fn into_response(self) -> Response;
}

impl IntoResponse for Response {
    fn into_response(self) -> Response { self }
}

/// Return a [`Status`] directly from a handler.
impl IntoResponse for Status {
    fn into_response(self) -> Response { Response::status(self) }
}

/// The server's fault path.
///
/// A handler that bails out with `?` lands here: the error is logged and the
/// client gets a bare 500. The handler itself never writes an error page.
impl<T: IntoResponse> IntoResponse for Result<T, Error> {
    fn into_response(self) -> Response {
        match self {
            Ok(res) => res.into_response(),
            Err(e) => {
                error!(error = %e, "handler failed");
                Response::builder()
                    .status(Status::InternalServerError)
                    .text("Internal Server Error")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn html_sets_exact_content_type() {
        let res = Response::html("<p>x</p>");
        assert_eq!(res.status_code(), 200);
        assert_eq!(res.header("Content-Type"), Some("text/html"));
        assert_eq!(res.body(), b"<p>x</p>");
    }

    #[test]
    fn redirect_has_location_and_no_body() {
        let res = Response::redirect("http://a/new-path", Status::MovedPermanently);
        assert_eq!(res.status_code(), 301);
        assert_eq!(res.header("location"), Some("http://a/new-path"));
        assert!(res.body().is_empty());
        assert_eq!(res.header("content-type"), None);
    }

    #[test]
    fn error_becomes_plain_500() {
        let err = url::Url::parse("not a url").unwrap_err();
        let res = Err::<Response, _>(Error::from(err)).into_response();
        assert_eq!(res.status_code(), 500);
        assert_eq!(res.body(), b"Internal Server Error");
    }

    #[test]
    fn ok_result_passes_through() {
        let res = Ok::<_, Error>(Status::Ok).into_response();
        assert_eq!(res, Response::status(Status::Ok));
    }

    #[test]
    fn into_inner_drops_invalid_headers() {
        let res = Response::builder()
            .header("x-good", "yes")
            .header("bad header", "no")
            .header("x-bad-value", "line\nbreak")
            .text("body")
            .into_inner();

        assert_eq!(res.status(), http::StatusCode::OK);
        assert_eq!(res.headers()["x-good"], "yes");
        assert_eq!(res.headers()["content-type"], "text/plain; charset=utf-8");
        assert!(res.headers().get("x-bad-value").is_none());
        assert_eq!(res.headers().len(), 2);
    }
}

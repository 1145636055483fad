//! Incoming HTTP request type.

use std::net::SocketAddr;

use http::uri::{Authority, Scheme};
use http::{HeaderMap, Method, Uri};

use crate::error::Error;

/// An incoming HTTP request as a handler sees it.
///
/// Like a Workers `Request`, it carries an absolute URL even when the wire
/// request only had an origin-form target. The body is not kept.
#[derive(Clone, Debug)]
pub struct Request {
    pub(crate) method: Method,
    pub(crate) url: String,
    pub(crate) headers: HeaderMap,
}

impl Request {
    /// A `GET` for `url` with no headers.
    ///
    /// ```rust
    /// let req = legacy_redirect::Request::get("http://127.0.0.1:8787/old-path");
    /// assert_eq!(req.url(), "http://127.0.0.1:8787/old-path");
    /// ```
    pub fn get(url: impl Into<String>) -> Self {
        Self { method: Method::GET, url: url.into(), headers: HeaderMap::new() }
    }

    /// Builds the handler-facing request from hyper's request head.
    ///
    /// An absolute target is used verbatim. Otherwise the URL is
    /// `http://{host}{path?query}`, with `host` from the `Host` header or
    /// `local_addr` when there is none. A `Host` that is not exactly one
    /// authority (no path, query or fragment, valid UTF-8) is a
    /// [`Error::MalformedUrl`].
    pub(crate) fn from_parts(
        parts: http::request::Parts,
        local_addr: SocketAddr,
    ) -> Result<Self, Error> {
        let url = if parts.uri.scheme().is_some() && parts.uri.authority().is_some() {
            parts.uri.to_string()
        } else {
            let authority = match parts.headers.get(http::header::HOST) {
                Some(host) => Authority::try_from(host.as_bytes()),
                None => Authority::try_from(local_addr.to_string()),
            }
            .map_err(http::Error::from)?;
            let target = parts.uri.path_and_query().map_or("/", |pq| pq.as_str());
            let target = if target.starts_with('/') { target } else { "/" };

            Uri::builder()
                .scheme(Scheme::HTTP)
                .authority(authority)
                .path_and_query(target)
                .build()?
                .to_string()
        };

        Ok(Self { method: parts.method, url, headers: parts.headers })
    }

    pub fn method(&self) -> &Method { &self.method }
    pub fn url(&self) -> &str { &self.url }
    pub fn headers(&self) -> &HeaderMap { &self.headers }

    /// Case-insensitive header lookup. Non-UTF-8 values read as `None`.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parts(uri: &str, host: Option<&str>) -> http::request::Parts {
        let mut builder = http::Request::builder().method(Method::GET).uri(uri);
        if let Some(host) = host {
            builder = builder.header("host", host);
        }
        builder.body(()).unwrap().into_parts().0
    }

    fn local() -> SocketAddr {
        "10.0.0.1:8080".parse().unwrap()
    }

    #[test]
    fn origin_form_uses_host_header() {
        let req = Request::from_parts(parts("/old-path/foo?x=1", Some("127.0.0.1:8787")), local())
            .unwrap();
        assert_eq!(req.url(), "http://127.0.0.1:8787/old-path/foo?x=1");
        assert_eq!(req.header("HOST"), Some("127.0.0.1:8787"));
    }

    #[test]
    fn missing_host_falls_back_to_local_addr() {
        let req = Request::from_parts(parts("/", None), local()).unwrap();
        assert_eq!(req.url(), "http://10.0.0.1:8080/");
    }

    #[test]
    fn absolute_form_is_kept() {
        let req = Request::from_parts(
            parts("https://example.com/old-path?a=b", Some("ignored.test")),
            local(),
        )
        .unwrap();
        assert_eq!(req.url(), "https://example.com/old-path?a=b");
    }

    #[test]
    fn asterisk_target_maps_to_root() {
        let req = Request::from_parts(parts("*", Some("example.com")), local()).unwrap();
        assert_eq!(req.url(), "http://example.com/");
    }

    #[test]
    fn host_cannot_inject_path_query_or_fragment() {
        for host in ["127.0.0.1:8787/old-path", "h?x=/old-path", "h#", "bad host", ""] {
            let err = Request::from_parts(parts("/", Some(host)), local()).unwrap_err();
            assert!(matches!(err, Error::MalformedUrl(_)), "{host:?}");
        }
    }

    #[test]
    fn non_utf8_host_is_malformed() {
        let parts = http::Request::builder()
            .uri("/old-path")
            .header("host", http::HeaderValue::from_bytes(b"h\xffst").unwrap())
            .body(())
            .unwrap()
            .into_parts()
            .0;
        let err = Request::from_parts(parts, local()).unwrap_err();
        assert!(matches!(err, Error::MalformedUrl(_)));
    }

    #[test]
    fn get_has_no_headers() {
        let req = Request::get("http://example.com/");
        assert_eq!(req.method(), Method::GET);
        assert!(req.headers().is_empty());
    }
}

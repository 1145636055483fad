//! The request handler.
//!
//! | Path | Response |
//! |---|---|
//! | starts with `/old-path` | `301`, `location` = request URL with the first `/old-path` swapped for `/new-path` |
//! | anything else | `200`, `text/html` landing page |
//!
//! The prefix test is case-sensitive and purely textual: `/old-pathology`
//! redirects to `/new-pathology`, `/Old-Path` does not redirect at all.

use tracing::info;
use url::Url;

use crate::error::Error;
use crate::request::Request;
use crate::response::Response;
use crate::status::Status;

/// Paths starting with this are redirected.
pub const LEGACY_PREFIX: &str = "/old-path";

/// Replaces [`LEGACY_PREFIX`] in the redirect target.
pub const NEW_PREFIX: &str = "/new-path";

/// Body served for every non-legacy path.
pub const LANDING_PAGE: &str = concat!(
    r#"Hello, try visiting <a href="http://127.0.0.1:8787/old-path">http://127.0.0.1:8787/old-path</a>"#,
    "\n\n<hr />\n\n\n      ",
    r#"You will be redirected back to <a href="http://127.0.0.1:8787/new-path">http://127.0.0.1:8787/new-path</a>"#,
);

/// Handles one request.
///
/// Fails only when the request URL does not parse; the server turns that
/// into a 500.
pub async fn fetch(req: Request) -> Result<Response, Error> {
    let url = Url::parse(req.url())?;

    match rewrite(&url) {
        Some(location) => {
            info!(from = %url, to = %location, "redirecting legacy path");
            Ok(Response::redirect(&location, Status::MovedPermanently))
        }
        None => Ok(Response::html(LANDING_PAGE)),
    }
}

/// The redirect target for `url`, or `None` when its path is not legacy.
///
/// Only the first occurrence of the prefix in the serialized URL is replaced,
/// wherever it falls. That is usually the start of the path, but the `//`
/// after the scheme means a host beginning with `old-path` matches first:
/// `http://old-path.example/old-path/x` becomes
/// `http://new-path.example/old-path/x`. Later occurrences (say, in the
/// query) are left alone.
pub fn rewrite(url: &Url) -> Option<String> {
    if !url.path().starts_with(LEGACY_PREFIX) {
        return None;
    }
    Some(url.as_str().replacen(LEGACY_PREFIX, NEW_PREFIX, 1))
}

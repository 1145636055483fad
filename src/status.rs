//! HTTP status codes as a typed enum.
//!
//! Only the codes this crate emits are listed: the landing page, the legacy
//! redirect, and the fault path.
//!
//! ```rust
//! use legacy_redirect::{Response, Status};
//!
//! Response::redirect("http://127.0.0.1:8787/new-path", Status::MovedPermanently);
//! Response::status(Status::InternalServerError);
//! ```

/// A status code the crate sends.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Status {
    Ok,                  // 200
    MovedPermanently,    // 301
    InternalServerError, // 500
}

impl From<Status> for u16 {
    fn from(s: Status) -> u16 {
        match s {
            Status::Ok                  => 200,
            Status::MovedPermanently    => 301,
            Status::InternalServerError => 500,
        }
    }
}

impl From<Status> for http::StatusCode {
    fn from(s: Status) -> http::StatusCode {
        match s {
            Status::Ok                  => http::StatusCode::OK,
            Status::MovedPermanently    => http::StatusCode::MOVED_PERMANENTLY,
            Status::InternalServerError => http::StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

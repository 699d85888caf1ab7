//! Cache-defeating response headers.
//!
//! The whole point of this server: every response carries headers telling
//! browsers and intermediate caches never to store or reuse it.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::header::{HeaderValue, CACHE_CONTROL, EXPIRES, PRAGMA};
use hyper::{HeaderMap, Response};

/// `Cache-Control` value stamped on every response.
pub const CACHE_CONTROL_VALUE: &str = "no-store, no-cache, must-revalidate, max-age=0";

/// `Pragma` value stamped on every response, for HTTP/1.0 clients.
pub const PRAGMA_VALUE: &str = "no-cache";

/// `Expires` value stamped on every response.
pub const EXPIRES_VALUE: &str = "0";

/// Stamp the no-cache headers onto a finished response.
///
/// The header map is rebuilt so the three no-cache headers come first,
/// ahead of whatever the file-serving logic added. Runs on every response
/// the server produces, success or error, as the last step before the
/// connection writes it out.
pub fn disable_client_caching(response: Response<Full<Bytes>>) -> Response<Full<Bytes>> {
    let (mut parts, body) = response.into_parts();

    let mut headers = HeaderMap::with_capacity(parts.headers.len() + 3);
    headers.insert(CACHE_CONTROL, HeaderValue::from_static(CACHE_CONTROL_VALUE));
    headers.insert(PRAGMA, HeaderValue::from_static(PRAGMA_VALUE));
    headers.insert(EXPIRES, HeaderValue::from_static(EXPIRES_VALUE));
    headers.extend(parts.headers.drain());

    parts.headers = headers;
    Response::from_parts(parts, body)
}

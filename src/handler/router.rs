//! Request dispatch module
//!
//! Entry point for HTTP request processing. Validates the method, unpacks
//! the request, hands it to the static file logic, and stamps the no-cache
//! headers onto whatever comes back.

use crate::config::ServerConfig;
use crate::handler::static_files;
use crate::http::cache;
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Method, Request, Response};

/// Request context encapsulating what the file-serving logic needs
pub struct RequestContext<'a> {
    /// Raw (still percent-encoded) URI path
    pub path: &'a str,
    /// Query string, preserved across directory redirects
    pub query: Option<&'a str>,
    pub is_head: bool,
}

/// Main entry point for HTTP request handling.
///
/// Every response produced here, errors included, passes through
/// [`cache::disable_client_caching`] last, so the no-cache headers lead
/// the header block on the wire.
pub async fn handle_request<B>(req: &Request<B>, config: &ServerConfig) -> Response<Full<Bytes>> {
    cache::disable_client_caching(dispatch(req, config).await)
}

async fn dispatch<B>(req: &Request<B>, config: &ServerConfig) -> Response<Full<Bytes>> {
    let method = req.method();
    if !matches!(*method, Method::GET | Method::HEAD) {
        logger::log_warning(&format!("Method not allowed: {method}"));
        return crate::http::build_405_response();
    }

    let ctx = RequestContext {
        path: req.uri().path(),
        query: req.uri().query(),
        is_head: *method == Method::HEAD,
    };
    static_files::serve(&ctx, config).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use tempfile::tempdir;

    fn request(method: &str, uri: &str) -> Request<()> {
        Request::builder()
            .method(method)
            .uri(uri)
            .body(())
            .unwrap()
    }

    fn config_with(files: &[(&str, &str)]) -> (tempfile::TempDir, ServerConfig) {
        let dir = tempdir().unwrap();
        for (name, content) in files {
            std::fs::write(dir.path().join(name), content).unwrap();
        }
        let config = ServerConfig::with_root(dir.path()).unwrap();
        (dir, config)
    }

    fn assert_no_cache_trio_first(response: &Response<Full<Bytes>>) {
        let names: Vec<&str> = response.headers().iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(&names[..3], &["cache-control", "pragma", "expires"]);
        assert_eq!(
            response.headers()["cache-control"],
            "no-store, no-cache, must-revalidate, max-age=0"
        );
        assert_eq!(response.headers()["pragma"], "no-cache");
        assert_eq!(response.headers()["expires"], "0");
    }

    async fn body_of(response: Response<Full<Bytes>>) -> Bytes {
        response.into_body().collect().await.unwrap().to_bytes()
    }

    #[tokio::test]
    async fn serves_file_with_no_cache_headers() {
        let (_dir, config) = config_with(&[("index.html", "<h1>hi</h1>")]);
        let response = handle_request(&request("GET", "/index.html"), &config).await;

        assert_eq!(response.status(), 200);
        assert_no_cache_trio_first(&response);
        assert_eq!(body_of(response).await, "<h1>hi</h1>");
    }

    #[tokio::test]
    async fn missing_path_is_404_with_no_cache_headers() {
        let (_dir, config) = config_with(&[]);
        let response = handle_request(&request("GET", "/does-not-exist.txt"), &config).await;

        assert_eq!(response.status(), 404);
        assert_no_cache_trio_first(&response);
    }

    #[tokio::test]
    async fn post_is_rejected_with_no_cache_headers() {
        let (_dir, config) = config_with(&[]);
        let response = handle_request(&request("POST", "/index.html"), &config).await;

        assert_eq!(response.status(), 405);
        assert_eq!(response.headers()["allow"], "GET, HEAD");
        assert_no_cache_trio_first(&response);
    }

    #[tokio::test]
    async fn head_matches_get_headers_with_empty_body() {
        let (_dir, config) = config_with(&[("page.html", "<p>content</p>")]);
        let get = handle_request(&request("GET", "/page.html"), &config).await;
        let head = handle_request(&request("HEAD", "/page.html"), &config).await;

        assert_eq!(head.status(), get.status());
        assert_eq!(
            head.headers()["content-length"],
            get.headers()["content-length"]
        );
        assert_no_cache_trio_first(&head);
        assert!(body_of(head).await.is_empty());
    }

    #[tokio::test]
    async fn repeated_requests_are_identical() {
        let (_dir, config) = config_with(&[("a.txt", "stable")]);
        let first = handle_request(&request("GET", "/a.txt"), &config).await;
        let second = handle_request(&request("GET", "/a.txt"), &config).await;

        assert_eq!(first.status(), second.status());
        let first_headers: Vec<_> = first.headers().iter().collect();
        let second_headers: Vec<_> = second.headers().iter().collect();
        assert_eq!(first_headers, second_headers);
        assert_eq!(body_of(first).await, body_of(second).await);
    }
}

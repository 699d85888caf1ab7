// Connection handling module
// Serves one accepted TCP connection on its own task

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::Response;
use hyper_util::rt::TokioIo;

use crate::config::ServerConfig;
use crate::handler;
use crate::logger;

/// Spawn a task serving HTTP/1.1 on the accepted stream.
///
/// Each request is handled independently; the only state shared between
/// connections is the immutable configuration.
pub fn accept_connection(
    stream: tokio::net::TcpStream,
    peer_addr: SocketAddr,
    config: Arc<ServerConfig>,
) {
    tokio::spawn(async move {
        let io = TokioIo::new(stream);

        let conn = http1::Builder::new().serve_connection(
            io,
            service_fn(move |req| {
                let config = Arc::clone(&config);
                async move {
                    // Request bodies are never read, so drop them at the door.
                    let (parts, _body) = req.into_parts();
                    let req = hyper::Request::from_parts(parts, ());

                    let mut entry = logger::AccessLogEntry::new(
                        peer_addr.ip().to_string(),
                        req.method().to_string(),
                        req.uri().path().to_string(),
                    );
                    entry.query = req.uri().query().map(ToString::to_string);
                    entry.http_version = format!("{:?}", req.version());

                    let response = handler::handle_request(&req, &config).await;

                    entry.status = response.status().as_u16();
                    entry.body_bytes = body_size(&response);
                    logger::log_access(&entry);

                    Ok::<_, Infallible>(response)
                }
            }),
        );

        if let Err(err) = conn.await {
            logger::log_connection_error(&err);
        }
    });
}

/// Bytes actually sent as the body (0 for HEAD responses).
fn body_size(response: &Response<Full<Bytes>>) -> usize {
    use hyper::body::Body as _;

    response
        .body()
        .size_hint()
        .exact()
        .and_then(|n| usize::try_from(n).ok())
        .unwrap_or(0)
}

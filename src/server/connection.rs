// Connection handling module
// Accepts a single TCP connection and serves it with hyper

use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::config::{self, PerformanceConfig};
use crate::handler;

/// Accept and process a connection, checking limits and logging.
///
/// # Arguments
///
/// * `stream` - The TCP stream to handle
/// * `peer_addr` - The peer's socket address
/// * `state` - Shared application state
/// * `conn_counter` - Active connection counter
pub fn accept_connection(
    stream: tokio::net::TcpStream,
    peer_addr: std::net::SocketAddr,
    state: &Arc<config::AppState>,
    conn_counter: &Arc<AtomicUsize>,
) {
    // Increment counter first, then check limit (prevents race condition)
    let prev_count = conn_counter.fetch_add(1, Ordering::SeqCst);

    if let Some(max_conn) = state.config.performance.max_connections {
        if prev_count >= usize::try_from(max_conn).unwrap_or(usize::MAX) {
            conn_counter.fetch_sub(1, Ordering::SeqCst);
            tracing::warn!(
                active = prev_count,
                max = max_conn,
                %peer_addr,
                "max connections reached, connection rejected"
            );
            drop(stream);
            return;
        }
    }

    tracing::debug!(%peer_addr, "connection accepted");
    handle_connection(stream, peer_addr, Arc::clone(state), Arc::clone(conn_counter));
}

/// Keep-alive switch and lifetime bound for one connection.
///
/// A `keep_alive_timeout` of 0 disables keep-alive; any other value only enables it.
/// The lifetime is the larger of the read and write timeouts and covers the whole
/// connection, idle time between keep-alive requests included.
fn connection_limits(performance: &PerformanceConfig) -> (bool, Duration) {
    (
        performance.keep_alive_timeout > 0,
        Duration::from_secs(std::cmp::max(performance.read_timeout, performance.write_timeout)),
    )
}

/// Serve one connection on the local task set, decrementing the counter when done.
fn handle_connection(
    stream: tokio::net::TcpStream,
    peer_addr: std::net::SocketAddr,
    state: Arc<config::AppState>,
    conn_counter: Arc<AtomicUsize>,
) {
    tokio::task::spawn_local(async move {
        let io = TokioIo::new(stream);

        let (keep_alive, timeout_duration) = connection_limits(&state.config.performance);

        let mut builder = http1::Builder::new();
        builder.keep_alive(keep_alive);

        let service_state = Arc::clone(&state);
        let conn = builder.serve_connection(
            io,
            service_fn(move |req| {
                let state = Arc::clone(&service_state);
                async move { handler::handle_request(req, state, peer_addr).await }
            }),
        );

        match tokio::time::timeout(timeout_duration, conn).await {
            Ok(Ok(())) => {}
            Ok(Err(err)) => tracing::warn!(%peer_addr, error = %err, "failed to serve connection"),
            Err(_) => tracing::warn!(
                %peer_addr,
                timeout_secs = timeout_duration.as_secs(),
                "connection timed out"
            ),
        }

        conn_counter.fetch_sub(1, Ordering::SeqCst);
    });
}

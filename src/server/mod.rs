//! Server module
//!
//! Accept loop and per-connection handling on top of Hyper's HTTP/1
//! support. The application context is read-only here; every request is
//! handed to the dispatcher.

mod listener;

pub use listener::create_reusable_listener;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use tokio::net::{TcpListener, TcpStream};

use crate::context::AppContext;
use crate::dispatch;
use crate::error::StartupError;
use crate::logger;

/// Run the accept loop forever.
pub async fn run(listener: TcpListener, context: Arc<AppContext>) -> Result<(), StartupError> {
    let active_connections = Arc::new(AtomicUsize::new(0));

    loop {
        match listener.accept().await {
            Ok((stream, peer_addr)) => {
                accept_connection(stream, peer_addr, &context, &active_connections);
            }
            Err(e) => {
                logger::log_error(&format!("Failed to accept connection: {e}"));
            }
        }
    }
}

/// Accept one connection, enforcing the connection limit.
fn accept_connection(
    stream: TcpStream,
    peer_addr: std::net::SocketAddr,
    context: &Arc<AppContext>,
    active_connections: &Arc<AtomicUsize>,
) {
    // Increment first, then check, so two racing accepts cannot both pass.
    let prev_count = active_connections.fetch_add(1, Ordering::SeqCst);
    if let Some(max_conn) = context.config.performance.max_connections {
        if prev_count >= usize::try_from(max_conn).unwrap_or(usize::MAX) {
            active_connections.fetch_sub(1, Ordering::SeqCst);
            logger::log_warning(&format!(
                "Max connections reached: {prev_count}/{max_conn}. Connection rejected."
            ));
            drop(stream);
            return;
        }
    }

    handle_connection(stream, peer_addr, Arc::clone(context), Arc::clone(active_connections));
}

/// Serve one connection in a spawned task.
fn handle_connection(
    stream: TcpStream,
    peer_addr: std::net::SocketAddr,
    context: Arc<AppContext>,
    active_connections: Arc<AtomicUsize>,
) {
    tokio::spawn(async move {
        let io = TokioIo::new(stream);

        let keep_alive = context.config.performance.keep_alive_timeout > 0;
        let timeout_secs = std::cmp::max(
            context.config.performance.read_timeout,
            context.config.performance.write_timeout,
        );

        let mut builder = http1::Builder::new();
        builder.keep_alive(keep_alive);

        let service_context = Arc::clone(&context);
        let conn = builder.serve_connection(
            io,
            service_fn(move |req| {
                let context = Arc::clone(&service_context);
                async move { dispatch::handle_request(req, peer_addr, context).await }
            }),
        );

        if timeout_secs > 0 {
            match tokio::time::timeout(Duration::from_secs(timeout_secs), conn).await {
                Ok(Ok(())) => {}
                Ok(Err(err)) => logger::log_connection_error(&err),
                Err(_) => {
                    logger::log_warning(&format!(
                        "Connection from {peer_addr} timed out after {timeout_secs} seconds"
                    ));
                }
            }
        } else if let Err(err) = conn.await {
            logger::log_connection_error(&err);
        }

        active_connections.fetch_sub(1, Ordering::SeqCst);
    });
}

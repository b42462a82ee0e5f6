//! Logger module
//!
//! Provides logging utilities for the HTTP server including:
//! - `tracing` subscriber installation (text or JSON)
//! - Access logging with multiple formats
//! - Server lifecycle logging

mod format;

pub use format::{AccessLogEntry, AccessLogFormat};

use crate::config::{Config, LogFormat, LoggingConfig};
use crate::error::StartupError;
use std::io::{self, IsTerminal};
use std::net::SocketAddr;
use std::panic;
use std::sync::Once;
use tracing::Subscriber;
use tracing_subscriber::fmt;
use tracing_subscriber::EnvFilter;

/// Target access log lines are emitted under
pub const ACCESS_TARGET: &str = "access";

/// Initialize the global subscriber
///
/// `RUST_LOG` takes precedence over `logging.level`. Should be called once at startup.
pub fn init(logging: &LoggingConfig) -> Result<(), StartupError> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&logging.level))
        .map_err(|e| StartupError::LogFilter(e.to_string()))?;

    let builder = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal());

    let subscriber: Box<dyn Subscriber + Send + Sync> = match logging.format {
        LogFormat::Json => Box::new(builder.json().flatten_event(true).finish()),
        LogFormat::Text => Box::new(builder.compact().finish()),
    };

    tracing::subscriber::set_global_default(subscriber)?;
    install_panic_hook();
    Ok(())
}

/// Report panics through `tracing` instead of raw stderr
///
/// The previous hook still runs while no global subscriber is installed. Idempotent.
pub fn install_panic_hook() {
    static INSTALL: Once = Once::new();

    INSTALL.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            let payload = info.payload();
            let message = payload
                .downcast_ref::<&str>()
                .copied()
                .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
                .unwrap_or("unknown panic");
            let location = info
                .location()
                .map(|location| format!("{}:{}", location.file(), location.line()));

            tracing::error!(panic = message, location = ?location, "thread panicked");

            if !tracing::dispatcher::has_been_set() {
                previous(info);
            }
        }));
    });
}

pub fn log_server_start(addr: &SocketAddr, config: &Config) {
    tracing::info!(
        %addr,
        workers = ?config.server.workers,
        max_connections = ?config.performance.max_connections,
        access_log = config.logging.access_log,
        "server started, listening on http://{addr}"
    );
    if config.redirects.force_https {
        tracing::info!(header = %config.redirects.forwarded_proto_header, "forcing https");
    }
    if let Some(target) = &config.redirects.target_domain {
        tracing::info!(
            sources = ?config.redirects.source_domains,
            %target,
            "redirecting source domains"
        );
    }
}

/// Log formatted access log entry
pub fn log_access(entry: &AccessLogEntry, format: &AccessLogFormat) {
    tracing::info!(target: ACCESS_TARGET, "{}", entry.format(format));
}

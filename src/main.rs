use std::path::PathBuf;
use std::sync::atomic::AtomicUsize;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tokio::sync::Notify;

use brochure_http::config::{self, AppState, Config};
use brochure_http::error::StartupError;
use brochure_http::logger;
use brochure_http::server::{create_reusable_listener, start_server_loop, start_signal_handler};

/// Serve a brochure site over HTTP
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Config file path, extension optional
    #[arg(short, long, default_value = config::DEFAULT_CONFIG_PATH)]
    config: PathBuf,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let cfg = Config::load_from(&cli.config.to_string_lossy()).map_err(StartupError::from)?;
    logger::init(&cfg.logging)?;

    // Create Tokio runtime, thread count follows `server.workers`
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();

    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
        tracing::info!(workers, "using configured worker threads");
    } else {
        tracing::info!("using default worker threads (CPU cores)");
    }

    let runtime = runtime_builder.build()?;

    if let Err(err) = runtime.block_on(async_main(cfg)) {
        tracing::error!(error = %err, "server failed to start");
        return Err(err.into());
    }
    Ok(())
}

async fn async_main(cfg: Config) -> Result<(), StartupError> {
    let addr = cfg.get_socket_addr()?;
    let drain_timeout = Duration::from_secs(cfg.performance.write_timeout);

    let state = Arc::new(AppState::build(cfg).await?);
    let listener = create_reusable_listener(addr)?;
    logger::log_server_start(&addr, &state.config);

    let shutdown = Arc::new(Notify::new());
    start_signal_handler(Arc::clone(&shutdown))?;

    // Use LocalSet for spawn_local support
    let local = tokio::task::LocalSet::new();
    local
        .run_until(start_server_loop(
            listener,
            state,
            Arc::new(AtomicUsize::new(0)),
            shutdown,
            drain_timeout,
        ))
        .await;

    tracing::info!("server stopped");
    Ok(())
}

use std::process::ExitCode;

use configs::{AppConfig, ServiceKind};
use dotenvy::dotenv;
use tracing::{error, info};
use uuid::Uuid;

/// Process entry shared by both service binaries: logging, panic hook,
/// Tokio runtime sized from config, then the HTTP server until Ctrl+C.
pub fn launch(kind: ServiceKind) -> ExitCode {
    // .env first so RUST_LOG, LOG_FORMAT and DATABASE_URL are visible
    dotenv().ok();
    let config = AppConfig::load_or_env();
    let format = config.as_ref().map(|c| c.logging.format.as_str()).unwrap_or("compact");
    common::utils::logging::init_logging_with_format(format);

    let service = kind.name();
    info!(service, event = "logger_init", "tracing subscriber initialized");

    let config = match config {
        Ok(cfg) => cfg,
        Err(e) => {
            error!(service, event = "config_invalid", error = %e, "configuration rejected");
            return ExitCode::FAILURE;
        }
    };

    let service_id = Uuid::new_v4();
    let pid = std::process::id();
    let version = env!("CARGO_PKG_VERSION");

    std::panic::set_hook(Box::new(move |info| {
        error!(service, event = "panic", %service_id, pid, message = %info, "unhandled panic occurred");
    }));

    let worker_threads = config.server(kind).worker_threads;
    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();
    if let Some(w) = worker_threads { builder.worker_threads(w); }

    let rt = match builder.build() {
        Ok(rt) => rt,
        Err(e) => {
            error!(service, event = "runtime_build_failed", error = %e, "failed to build tokio runtime");
            return ExitCode::FAILURE;
        }
    };

    info!(
        service,
        event = "start",
        %service_id,
        pid,
        version,
        threads = worker_threads.unwrap_or_default(),
        "service starting"
    );

    rt.block_on(async move {
        match server::serve(kind, config).await {
            Ok(()) => {
                info!(service, event = "stop", %service_id, pid, "service stopped normally");
                ExitCode::SUCCESS
            }
            Err(e) => {
                error!(service, event = "run_failed", error = %e, "server::serve returned error");
                ExitCode::FAILURE
            }
        }
    })
}

//! `petclinic` binary: load the config once, size the runtime from it and
//! serve until Ctrl+C.

use std::process::ExitCode;

use configs::AppConfig;
use tracing::{error, info};
use uuid::Uuid;

fn install_panic_hook(instance: Uuid) {
    std::panic::set_hook(Box::new(move |panic| {
        error!(service = "petclinic", event = "panic", %instance, message = %panic, "unhandled panic occurred");
    }));
}

fn build_runtime(cfg: &AppConfig) -> std::io::Result<tokio::runtime::Runtime> {
    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();
    if let Some(threads) = cfg.server.worker_threads {
        builder.worker_threads(threads);
    }
    builder.build()
}

fn main() -> ExitCode {
    // .env before logging so RUST_LOG and LOG_FORMAT apply
    dotenvy::dotenv().ok();
    common::utils::logging::init_logging_from_env();

    let cfg = match AppConfig::load_or_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!(service = "petclinic", event = "config_invalid", error = %e, "refusing to start");
            return ExitCode::FAILURE;
        }
    };

    let instance = Uuid::new_v4();
    install_panic_hook(instance);

    let runtime = match build_runtime(&cfg) {
        Ok(rt) => rt,
        Err(e) => {
            error!(service = "petclinic", event = "runtime_build_failed", error = %e, "failed to build tokio runtime");
            return ExitCode::FAILURE;
        }
    };

    info!(
        service = "petclinic",
        event = "start",
        %instance,
        pid = std::process::id(),
        version = env!("CARGO_PKG_VERSION"),
        threads = ?cfg.server.worker_threads,
        database = if cfg.database.is_sqlite() { "sqlite" } else { "postgres" },
        "petclinic starting"
    );

    match runtime.block_on(server::run_with(cfg, server::shutdown_signal())) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(service = "petclinic", event = "run_failed", %instance, error = %e, "server stopped with an error");
            ExitCode::FAILURE
        }
    }
}

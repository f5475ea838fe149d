use std::process::ExitCode;

use configs::AppConfig;
use tracing::{error, info};

fn main() -> ExitCode {
    // .env first so RUST_LOG and DATABASE_URL are honoured
    dotenvy::dotenv().ok();
    let cfg = AppConfig::load_or_env();
    match &cfg {
        Ok(c) if c.server.log_json => common::utils::logging::init_logging_json(),
        _ => common::utils::logging::init_logging_default(),
    }
    let cfg = match cfg {
        Ok(cfg) => cfg,
        Err(e) => {
            error!(error = %e, "invalid configuration");
            return ExitCode::FAILURE;
        }
    };

    std::panic::set_hook(Box::new(|info| {
        error!(message = %info, "unhandled panic");
    }));

    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();
    if let Some(w) = cfg.server.worker_threads { builder.worker_threads(w); }
    let rt = match builder.build() {
        Ok(rt) => rt,
        Err(e) => {
            error!(error = %e, "failed to build tokio runtime");
            return ExitCode::FAILURE;
        }
    };

    info!(version = env!("CARGO_PKG_VERSION"), threads = ?cfg.server.worker_threads, "marina starting");
    rt.block_on(async move {
        tokio::select! {
            res = server::serve(cfg) => match res {
                Ok(()) => ExitCode::SUCCESS,
                Err(e) => {
                    error!(error = %e, "server stopped with error");
                    ExitCode::FAILURE
                }
            },
            _ = tokio::signal::ctrl_c() => {
                info!("received Ctrl+C, shutting down");
                ExitCode::SUCCESS
            }
        }
    })
}

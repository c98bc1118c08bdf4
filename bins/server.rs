use std::process::ExitCode;

use tracing::{error, info};

fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    common::utils::logging::init_logging_from_env();

    let cfg = match server::startup::load_config() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!(error = %e, "cannot start catalog server");
            return ExitCode::FAILURE;
        }
    };

    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();
    if let Some(w) = cfg.server.worker_threads {
        builder.worker_threads(w);
    }
    let rt = match builder.build() {
        Ok(rt) => rt,
        Err(e) => {
            error!(error = %e, "failed to build tokio runtime");
            return ExitCode::FAILURE;
        }
    };

    info!(
        version = env!("CARGO_PKG_VERSION"),
        pid = std::process::id(),
        "catalog server starting"
    );
    match rt.block_on(server::run(cfg)) {
        Ok(()) => {
            info!("catalog server stopped");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "catalog server failed");
            ExitCode::FAILURE
        }
    }
}

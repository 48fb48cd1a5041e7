use std::process::ExitCode;

use configs::AppConfig;
use tokio::runtime::Runtime;
use tracing::{error, info};
use uuid::Uuid;

const SERVICE: &str = "newsdesk";

/// Per-process identity stamped on lifecycle events.
#[derive(Clone, Copy)]
struct Instance {
    id: Uuid,
    pid: u32,
}

fn install_panic_logger(instance: Instance) {
    std::panic::set_hook(Box::new(move |info| {
        error!(service = SERVICE, event = "panic", instance_id = %instance.id, pid = instance.pid, message = %info, "unhandled panic");
    }));
}

fn build_runtime(cfg: &AppConfig) -> std::io::Result<Runtime> {
    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();
    if let Some(threads) = cfg.server.worker_threads {
        builder.worker_threads(threads);
    }
    builder.build()
}

async fn serve_until_ctrl_c(cfg: AppConfig, instance: Instance) -> ExitCode {
    let server = tokio::spawn(server::run(cfg));
    tokio::select! {
        joined = server => match joined {
            Ok(Ok(())) => {
                info!(service = SERVICE, event = "stop", instance_id = %instance.id, "listener closed");
                ExitCode::SUCCESS
            }
            Ok(Err(e)) => {
                error!(service = SERVICE, event = "run_failed", error = %e, "news server failed");
                ExitCode::FAILURE
            }
            Err(e) => {
                error!(service = SERVICE, event = "task_join_error", error = %e, "news server task aborted");
                ExitCode::FAILURE
            }
        },
        _ = tokio::signal::ctrl_c() => {
            info!(service = SERVICE, event = "shutdown_signal", instance_id = %instance.id, "ctrl-c received");
            ExitCode::SUCCESS
        }
    }
}

fn main() -> ExitCode {
    // .env before the subscriber so RUST_LOG and LOG_FORMAT apply
    dotenvy::dotenv().ok();
    common::utils::logging::init_logging_from_env();

    let instance = Instance { id: Uuid::new_v4(), pid: std::process::id() };
    install_panic_logger(instance);

    let cfg = match AppConfig::load_or_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!(service = SERVICE, event = "config_invalid", error = format!("{e:#}"), "configuration rejected");
            return ExitCode::FAILURE;
        }
    };

    let rt = match build_runtime(&cfg) {
        Ok(rt) => rt,
        Err(e) => {
            error!(service = SERVICE, event = "runtime_build_failed", error = %e, "could not build tokio runtime");
            return ExitCode::FAILURE;
        }
    };

    info!(
        service = SERVICE,
        event = "start",
        instance_id = %instance.id,
        pid = instance.pid,
        version = env!("CARGO_PKG_VERSION"),
        threads = cfg.server.worker_threads.unwrap_or_default(),
        "news server starting"
    );
    rt.block_on(serve_until_ctrl_c(cfg, instance))
}

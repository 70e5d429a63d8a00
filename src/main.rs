use std::sync::Arc;

use rust_mvc::config::Config;
use rust_mvc::{context, demo, logger, server, StartupError};

fn main() {
    if let Err(e) = run() {
        eprintln!("[FATAL] {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), StartupError> {
    let cfg = Config::load()?;
    cfg.validate()?;
    logger::init(&cfg)?;

    // Build the Tokio runtime, honoring the configured worker count.
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }
    let runtime = runtime_builder.build()?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: Config) -> Result<(), StartupError> {
    logger::log_startup_begin();

    let context = context::AppContext::build(cfg, &demo::components())?;
    let addr = context.config.socket_addr()?;
    let listener = server::create_reusable_listener(addr)?;

    logger::log_server_start(&addr, &context.config);
    logger::log_startup_end();

    server::run(listener, Arc::new(context)).await
}

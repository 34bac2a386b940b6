use clap::Parser;
use std::process::ExitCode;
use std::sync::Arc;
use tokio::sync::Notify;

mod cli;
mod config;
mod discovery;
mod handler;
mod http;
mod logger;
mod server;

fn main() -> ExitCode {
    let cli = cli::Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            logger::log_error(&e.to_string());
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &cli::Cli) -> Result<(), Box<dyn std::error::Error>> {
    let cfg = config::Config::load(cli)?;
    logger::init(&cfg)?;

    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.server.workers.filter(|w| *w > 0) {
        runtime_builder.worker_threads(workers);
    }
    let runtime = runtime_builder.build()?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: config::Config) -> Result<(), Box<dyn std::error::Error>> {
    let addr = cfg.get_socket_addr()?;

    // Bind failure is fatal: the process exits non-zero
    let listener = server::create_listener(addr)
        .map_err(|e| format!("Failed to start discovery server on {addr}: {e}"))?;
    let local_addr = listener.local_addr()?;

    let state = Arc::new(config::AppState::new(&cfg, local_addr));
    logger::log_server_start(&local_addr, &state.advertised_addr, &cfg);

    let shutdown = Arc::new(Notify::new());
    server::start_signal_handler(Arc::clone(&shutdown));
    server::serve(listener, state, shutdown).await;

    Ok(())
}

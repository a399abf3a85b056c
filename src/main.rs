mod app;
mod cli;
mod commands;
mod configuration;
mod context;
mod presenter;
mod rest;
mod storage;
mod tracing;
mod types;

#[tokio::main]
async fn main() {
    crate::tracing::init();

    if let Err(e) = app::run().await {
        log::error!("{:#}", e);
        std::process::exit(1);
    }
}

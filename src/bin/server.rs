//! HTTP variant: JSON API on `LISTEN_ADDR`, static files from `STATIC_DIR`.

use oracle_customers::{app, init_tracing, startup, AppState};
use std::process::ExitCode;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    let (config, store) = match startup::start().await {
        Ok(ready) => ready,
        Err(e) => {
            tracing::error!(error = %e, "startup failed");
            return e.exit_code();
        }
    };

    let router = app(AppState::new(store), &config.static_dir);
    let listener = match TcpListener::bind(config.listen_addr).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!(error = %e, addr = %config.listen_addr, "bind failed");
            return ExitCode::FAILURE;
        }
    };
    tracing::info!("listening on http://{}", config.listen_addr);

    if let Err(e) = axum::serve(listener, router).await {
        tracing::error!(error = %e, "server error");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

//! One-shot variant: runs create, get, update, list against Oracle and exits.

use oracle_customers::{demo, init_tracing, startup};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    let (_config, store) = match startup::start().await {
        Ok(ready) => ready,
        Err(e) => {
            tracing::error!(error = %e, "startup failed");
            return e.exit_code();
        }
    };

    let tag = chrono::Utc::now().format("%Y%m%d%H%M%S").to_string();
    match demo::run(&store, &tag).await {
        Ok(report) => {
            tracing::info!(total = report.total, "demo finished");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "demo failed");
            ExitCode::FAILURE
        }
    }
}

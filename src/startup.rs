//! Startup sequence: config, connect, ping, migrate. Each failure is fatal and maps to an exit code.

use crate::config::Config;
use crate::error::{ConfigError, StoreError};
use crate::store::{CustomerStore, OracleStore};
use std::process::ExitCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to connect to Oracle: {0}")]
    Connect(StoreError),
    #[error("failed to ping Oracle: {0}")]
    Ping(StoreError),
    #[error("schema migration failed: {0}")]
    Schema(StoreError),
}

impl StartupError {
    pub fn exit_code(&self) -> ExitCode {
        ExitCode::from(self.code())
    }

    /// Distinct non-zero code per failed step.
    pub fn code(&self) -> u8 {
        match self {
            StartupError::Config(_) => 2,
            StartupError::Connect(_) => 3,
            StartupError::Ping(_) => 4,
            StartupError::Schema(_) => 5,
        }
    }
}

/// Open the Oracle session pool. Does not verify liveness; see [`prepare`].
pub async fn connect(config: &Config) -> Result<OracleStore, StartupError> {
    let config = config.clone();
    tokio::task::spawn_blocking(move || OracleStore::connect(&config))
        .await
        .map_err(|e| StartupError::Connect(e.into()))?
        .map_err(StartupError::Connect)
}

/// Ping, then bring the schema up to date. Returns the store ready for use.
pub async fn prepare<S: CustomerStore>(store: S) -> Result<S, StartupError> {
    store.ping().await.map_err(StartupError::Ping)?;
    tracing::info!("connected to database");
    store.migrate().await.map_err(StartupError::Schema)?;
    tracing::info!("schema ready");
    Ok(store)
}

/// Full sequence against Oracle from the process environment.
pub async fn start() -> Result<(Config, OracleStore), StartupError> {
    let config = Config::from_env()?;
    tracing::info!(descriptor = %config.redacted_descriptor(), "configuration loaded");
    let store = connect(&config).await?;
    let store = prepare(store).await?;
    Ok((config, store))
}

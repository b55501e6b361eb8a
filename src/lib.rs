//! Customer records on Oracle Database: a JSON API server and a one-shot CRUD demo
//! over the same persistence gateway.

pub mod config;
pub mod demo;
pub mod error;
pub mod handlers;
pub mod migration;
pub mod model;
pub mod routes;
pub mod schema;
pub mod service;
pub mod startup;
pub mod state;
pub mod store;

pub use config::Config;
pub use error::{AppError, ConfigError, StoreError};
pub use model::{Customer, CustomerUpdate, NewCustomer};
pub use routes::{app, common_routes, customer_routes};
pub use startup::{prepare, StartupError};
pub use state::AppState;
pub use store::{CustomerStore, MemoryStore, OracleStore};

/// Filter used when `RUST_LOG` is unset. Request spans and responses log at info.
pub const DEFAULT_LOG_FILTER: &str = "oracle_customers=info,tower_http=info";

/// Install the fmt subscriber. `RUST_LOG` overrides [`DEFAULT_LOG_FILTER`].
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();
}

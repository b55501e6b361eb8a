//! Persistence gateway for the Customer entity.

mod memory;
mod oracle;

pub use self::memory::MemoryStore;
pub use self::oracle::OracleStore;

use crate::error::StoreError;
use crate::model::{Customer, CustomerUpdate, NewCustomer};
use async_trait::async_trait;

/// All reads and writes of Customer rows go through this trait.
#[async_trait]
pub trait CustomerStore: Send + Sync {
    /// Liveness check against the backing database.
    async fn ping(&self) -> Result<(), StoreError>;

    /// Bring the schema up to date. Idempotent.
    async fn migrate(&self) -> Result<(), StoreError>;

    /// All customers, ascending by id.
    async fn list(&self) -> Result<Vec<Customer>, StoreError>;

    async fn get(&self, id: i64) -> Result<Customer, StoreError>;

    /// Insert and return the stored row with its generated id and timestamps.
    async fn create(&self, new: NewCustomer) -> Result<Customer, StoreError>;

    async fn update(&self, id: i64, change: CustomerUpdate) -> Result<Customer, StoreError>;
}

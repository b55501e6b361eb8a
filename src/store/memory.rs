//! In-process store with the same constraints as the Oracle table.

use super::CustomerStore;
use crate::error::StoreError;
use crate::model::{Customer, CustomerUpdate, NewCustomer};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

#[derive(Default)]
struct Inner {
    last_id: i64,
    rows: BTreeMap<i64, Customer>,
}

impl Inner {
    fn email_taken(&self, email: &str, except: Option<i64>) -> bool {
        self.rows
            .values()
            .any(|c| c.email == email && Some(c.id) != except)
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CustomerStore for MemoryStore {
    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn migrate(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Customer>, StoreError> {
        Ok(self.inner.read().await.rows.values().cloned().collect())
    }

    async fn get(&self, id: i64) -> Result<Customer, StoreError> {
        self.inner
            .read()
            .await
            .rows
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound { id })
    }

    async fn create(&self, new: NewCustomer) -> Result<Customer, StoreError> {
        let mut inner = self.inner.write().await;
        if inner.email_taken(&new.email, None) {
            return Err(StoreError::Duplicate { field: "email" });
        }
        inner.last_id += 1;
        let now = Utc::now();
        let customer = Customer {
            id: inner.last_id,
            name: new.name,
            email: new.email,
            created_at: now,
            updated_at: now,
        };
        inner.rows.insert(customer.id, customer.clone());
        Ok(customer)
    }

    async fn update(&self, id: i64, change: CustomerUpdate) -> Result<Customer, StoreError> {
        let mut inner = self.inner.write().await;
        if let CustomerUpdate::Email(email) = &change {
            if inner.email_taken(email, Some(id)) {
                return Err(StoreError::Duplicate { field: "email" });
            }
        }
        let row = inner.rows.get_mut(&id).ok_or(StoreError::NotFound { id })?;
        match change {
            CustomerUpdate::Name(name) => row.name = name,
            CustomerUpdate::Email(email) => row.email = email,
        }
        row.updated_at = Utc::now();
        Ok(row.clone())
    }
}

//! One-shot CRUD walk-through: create, get, update, list.

use crate::error::StoreError;
use crate::model::{Customer, CustomerUpdate, NewCustomer};
use crate::store::CustomerStore;

#[derive(Debug)]
pub struct DemoReport {
    pub created: Customer,
    pub fetched: Customer,
    pub updated: Customer,
    pub total: usize,
}

/// Run the sequence against `store`. `tag` goes into the email so repeated runs
/// against a persistent database do not trip the unique constraint.
pub async fn run(store: &dyn CustomerStore, tag: &str) -> Result<DemoReport, StoreError> {
    let created = store
        .create(NewCustomer {
            name: "Alice".into(),
            email: format!("alice+{}@example.com", tag),
        })
        .await?;
    tracing::info!(id = created.id, email = %created.email, "created customer");

    let fetched = store.get(created.id).await?;
    tracing::info!(id = fetched.id, name = %fetched.name, "fetched customer");

    let updated = store
        .update(created.id, CustomerUpdate::Name("Alice Updated".into()))
        .await?;
    tracing::info!(
        id = updated.id,
        name = %updated.name,
        updated_at = %updated.updated_at,
        "updated customer"
    );

    let all = store.list().await?;
    for c in &all {
        tracing::info!(id = c.id, name = %c.name, email = %c.email, "customer");
    }
    tracing::info!(total = all.len(), "listed customers");

    Ok(DemoReport {
        created,
        fetched,
        updated,
        total: all.len(),
    })
}

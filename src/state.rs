//! Shared application state for all routes.

use crate::store::CustomerStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn CustomerStore>,
}

impl AppState {
    pub fn new<S: CustomerStore + 'static>(store: S) -> Self {
        Self {
            store: Arc::new(store),
        }
    }
}

//! Request validation ahead of the store.

mod validation;
pub use validation::{CreateCustomerRequest, RequestValidator};

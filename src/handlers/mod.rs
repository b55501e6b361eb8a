pub mod common;
pub mod customers;

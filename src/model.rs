//! The Customer entity and its write payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const TABLE_NAME: &str = "CUSTOMERS";
pub const NAME_MAX_LEN: usize = 100;
pub const EMAIL_MAX_LEN: usize = 200;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated insert payload; the store assigns id and timestamps.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewCustomer {
    pub name: String,
    pub email: String,
}

/// A single-field change. The store refreshes `updated_at`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CustomerUpdate {
    Name(String),
    Email(String),
}

impl CustomerUpdate {
    pub fn column(&self) -> &'static str {
        match self {
            CustomerUpdate::Name(_) => "NAME",
            CustomerUpdate::Email(_) => "EMAIL",
        }
    }

    pub fn value(&self) -> &str {
        match self {
            CustomerUpdate::Name(v) | CustomerUpdate::Email(v) => v,
        }
    }
}

//! Versioned schema migrations. Each store records applied versions and runs the rest in order.

use crate::schema::customers_table;

/// Bookkeeping table for applied versions.
pub const MIGRATIONS_TABLE: &str = "SCHEMA_MIGRATIONS";

/// One DDL statement and what an existing object must look like to count as applied.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Step {
    /// Table or other object; one with the same name is accepted as is.
    Create(String),
    /// Single-column unique index; an existing index on the column only counts if it is unique.
    UniqueIndex {
        table: &'static str,
        column: &'static str,
        sql: String,
    },
}

impl Step {
    pub fn sql(&self) -> &str {
        match self {
            Step::Create(sql) | Step::UniqueIndex { sql, .. } => sql,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Migration {
    pub version: i64,
    pub description: &'static str,
    pub steps: Vec<Step>,
}

/// All migrations, ascending by version.
pub fn migrations() -> Vec<Migration> {
    let customers = customers_table();
    let mut create_customers = vec![Step::Create(customers.create_table_sql())];
    create_customers.extend(customers.unique_columns().map(|c| Step::UniqueIndex {
        table: customers.name,
        column: c.name,
        sql: customers.unique_index_sql_for(c.name),
    }));

    vec![Migration {
        version: 1,
        description: "create CUSTOMERS",
        steps: create_customers,
    }]
}

/// Migrations whose version is not in `applied`, in the order they must run.
pub fn pending(applied: &[i64]) -> Vec<Migration> {
    migrations()
        .into_iter()
        .filter(|m| !applied.contains(&m.version))
        .collect()
}

pub(crate) fn create_migrations_table_sql() -> String {
    format!(
        "CREATE TABLE {} (\n  VERSION NUMBER(19) PRIMARY KEY,\n  DESCRIPTION VARCHAR2(200 CHAR) NOT NULL,\n  APPLIED_AT TIMESTAMP WITH TIME ZONE DEFAULT SYSTIMESTAMP NOT NULL\n)",
        MIGRATIONS_TABLE
    )
}

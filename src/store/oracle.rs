//! Oracle-backed store. The driver is blocking, so every call runs on the blocking pool.

use super::CustomerStore;
use crate::config::Config;
use crate::error::StoreError;
use crate::migration::{create_migrations_table_sql, pending, Step, MIGRATIONS_TABLE};
use crate::model::{Customer, CustomerUpdate, NewCustomer, TABLE_NAME};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use oracle::pool::{Pool, PoolBuilder};
use oracle::{Connection, InitParams, Row};

/// ORA-00955: name is already used by an existing object.
const ORA_NAME_IN_USE: i32 = 955;
/// ORA-01408: such column list already indexed.
const ORA_ALREADY_INDEXED: i32 = 1408;

const SELECT_COLUMNS: &str = "ID, NAME, EMAIL, CREATED_AT, UPDATED_AT";

#[derive(Clone)]
pub struct OracleStore {
    pool: Pool,
}

impl OracleStore {
    /// Build a session pool from `config`. Blocking; loads the client library on first use.
    pub fn connect(config: &Config) -> Result<Self, StoreError> {
        if let Some(dir) = &config.lib_dir {
            InitParams::new()
                .oracle_client_lib_dir(dir.as_os_str())?
                .init()?;
        }
        tracing::debug!(descriptor = %config.redacted_descriptor(), "opening session pool");
        let pool = PoolBuilder::new(
            config.user.as_str(),
            config.password.as_str(),
            config.connect_string.as_str(),
        )
        .max_connections(config.pool_max)
        .build()?;
        Ok(Self { pool })
    }

    async fn with_conn<T, F>(&self, f: F) -> Result<T, StoreError>
    where
        F: FnOnce(&Connection) -> Result<T, StoreError> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            f(&conn)
        })
        .await?
    }
}

fn customer_from_row(row: &Row) -> Result<Customer, StoreError> {
    Ok(Customer {
        id: row.get::<_, i64>("ID")?,
        name: row.get::<_, String>("NAME")?,
        email: row.get::<_, String>("EMAIL")?,
        created_at: row.get::<_, DateTime<Utc>>("CREATED_AT")?,
        updated_at: row.get::<_, DateTime<Utc>>("UPDATED_AT")?,
    })
}

fn fetch_one(conn: &Connection, id: i64) -> Result<Customer, StoreError> {
    let sql = format!("SELECT {} FROM {} WHERE ID = :1", SELECT_COLUMNS, TABLE_NAME);
    tracing::debug!(%sql, id);
    let mut rows = conn.query(&sql, &[&id])?;
    match rows.next() {
        Some(row) => customer_from_row(&row?),
        None => Err(StoreError::NotFound { id }),
    }
}

/// What an error from a migration step means for that step.
#[derive(Debug, PartialEq, Eq)]
enum Existing {
    /// The object is already there.
    Present,
    /// Some index already covers the column; accept it only if it is a unique one.
    VerifyUnique {
        table: &'static str,
        column: &'static str,
    },
    Fail,
}

fn classify(step: &Step, code: Option<i32>) -> Existing {
    match (step, code) {
        (_, Some(ORA_NAME_IN_USE)) => Existing::Present,
        (Step::UniqueIndex { table, column, .. }, Some(ORA_ALREADY_INDEXED)) => {
            Existing::VerifyUnique {
                table: *table,
                column: *column,
            }
        }
        _ => Existing::Fail,
    }
}

/// True when a unique index on exactly `column` exists on `table`.
fn has_unique_index(conn: &Connection, table: &str, column: &str) -> Result<bool, StoreError> {
    let sql = "SELECT COUNT(*) FROM USER_INDEXES i \
               WHERE i.TABLE_NAME = :1 AND i.UNIQUENESS = 'UNIQUE' \
               AND (SELECT COUNT(*) FROM USER_IND_COLUMNS c WHERE c.INDEX_NAME = i.INDEX_NAME) = 1 \
               AND EXISTS (SELECT 1 FROM USER_IND_COLUMNS c \
                           WHERE c.INDEX_NAME = i.INDEX_NAME AND c.COLUMN_NAME = :2)";
    let mut rows = conn.query(sql, &[&table, &column])?;
    let count = match rows.next() {
        Some(row) => row?.get::<_, i64>(0usize)?,
        None => 0,
    };
    Ok(count > 0)
}

fn apply_step(conn: &Connection, step: &Step) -> Result<(), StoreError> {
    let sql = step.sql();
    tracing::debug!(%sql);
    let err = match conn.execute(sql, &[]) {
        Ok(_) => return Ok(()),
        Err(e) => e,
    };
    match classify(step, err.db_error().map(|db| db.code())) {
        Existing::Present => {
            tracing::debug!(error = %err, "object already present");
            Ok(())
        }
        Existing::VerifyUnique { table, column } => {
            if has_unique_index(conn, table, column)? {
                tracing::debug!(table, column, "unique index already present");
                Ok(())
            } else {
                Err(StoreError::Schema(format!(
                    "{}.{} is indexed but the index is not unique",
                    table, column
                )))
            }
        }
        Existing::Fail => Err(err.into()),
    }
}

fn migrate_blocking(conn: &Connection) -> Result<(), StoreError> {
    apply_step(conn, &Step::Create(create_migrations_table_sql()))?;

    let mut applied = Vec::new();
    for row in conn.query(&format!("SELECT VERSION FROM {}", MIGRATIONS_TABLE), &[])? {
        applied.push(row?.get::<_, i64>(0usize)?);
    }

    for m in pending(&applied) {
        for step in &m.steps {
            apply_step(conn, step)?;
        }
        conn.execute(
            &format!(
                "INSERT INTO {} (VERSION, DESCRIPTION) VALUES (:1, :2)",
                MIGRATIONS_TABLE
            ),
            &[&m.version, &m.description],
        )?;
        conn.commit()?;
        tracing::info!(version = m.version, description = m.description, "migration applied");
    }
    Ok(())
}

#[async_trait]
impl CustomerStore for OracleStore {
    async fn ping(&self) -> Result<(), StoreError> {
        self.with_conn(|conn| Ok(conn.ping()?)).await
    }

    async fn migrate(&self) -> Result<(), StoreError> {
        self.with_conn(migrate_blocking).await
    }

    async fn list(&self) -> Result<Vec<Customer>, StoreError> {
        self.with_conn(|conn| {
            let sql = format!("SELECT {} FROM {} ORDER BY ID", SELECT_COLUMNS, TABLE_NAME);
            tracing::debug!(%sql);
            let mut out = Vec::new();
            for row in conn.query(&sql, &[])? {
                out.push(customer_from_row(&row?)?);
            }
            Ok(out)
        })
        .await
    }

    async fn get(&self, id: i64) -> Result<Customer, StoreError> {
        self.with_conn(move |conn| fetch_one(conn, id)).await
    }

    async fn create(&self, new: NewCustomer) -> Result<Customer, StoreError> {
        self.with_conn(move |conn| {
            let sql = format!(
                "INSERT INTO {} (NAME, EMAIL) VALUES (:1, :2) RETURNING ID INTO :3",
                TABLE_NAME
            );
            tracing::debug!(%sql, email = %new.email);
            let mut stmt = conn.statement(&sql).build()?;
            stmt.execute(&[&new.name, &new.email, &None::<i64>])
                .map_err(|e| StoreError::from_oracle(e, "email"))?;
            let ids: Vec<i64> = stmt.returned_values(3usize)?;
            let id = ids
                .first()
                .copied()
                .ok_or_else(|| StoreError::Internal("insert returned no id".into()))?;
            conn.commit()?;
            fetch_one(conn, id)
        })
        .await
    }

    async fn update(&self, id: i64, change: CustomerUpdate) -> Result<Customer, StoreError> {
        self.with_conn(move |conn| {
            let sql = format!(
                "UPDATE {} SET {} = :1, UPDATED_AT = SYSTIMESTAMP WHERE ID = :2",
                TABLE_NAME,
                change.column()
            );
            tracing::debug!(%sql, id);
            let stmt = conn
                .execute(&sql, &[&change.value(), &id])
                .map_err(|e| StoreError::from_oracle(e, "email"))?;
            if stmt.row_count()? == 0 {
                return Err(StoreError::NotFound { id });
            }
            conn.commit()?;
            fetch_one(conn, id)
        })
        .await
    }
}

use crate::domain::ContactId;
use crate::error::{StoreError, StoreResult};
use crate::models::{Contact, ContactFields};
use crate::repositories::traits::{ensure_required, ContactRepository};
use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{Row, SqlitePool};
use std::str::FromStr;
use tracing::{debug, info};

const SCHEMA: &str = include_str!("../../migrations/001_create_contacts.sql");

const SELECT_COLUMNS: &str = "SELECT id, name, phonenum, email FROM contacts";

/// Contact repository backed by a SQLite database.
///
/// The `contacts` table carries a unique index on `name`, so two concurrent
/// submissions that both pass the duplicate check cannot both be written.
#[derive(Clone)]
pub struct SqliteContactRepository {
    pool: SqlitePool,
}

impl SqliteContactRepository {
    /// Open the database at `database_url`, creating it and applying the
    /// schema if needed.
    pub async fn connect(database_url: &str) -> StoreResult<Self> {
        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

        // Every connection to `:memory:` is its own database; pin a single one.
        let pool = if database_url.contains(":memory:") {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect_with(options)
                .await?
        } else {
            SqlitePoolOptions::new()
                .max_connections(5)
                .connect_with(options)
                .await?
        };

        sqlx::raw_sql(SCHEMA).execute(&pool).await?;
        info!("Contact store ready at {}", database_url);

        Ok(Self { pool })
    }

    /// Open a private in-memory database.
    pub async fn in_memory() -> StoreResult<Self> {
        Self::connect("sqlite::memory:").await
    }

    /// Close the pool, waiting for checked-out connections to return.
    pub async fn close(&self) {
        self.pool.close().await;
        info!("Contact store closed");
    }

    fn row_to_contact(row: SqliteRow) -> StoreResult<Contact> {
        let id: String = row.try_get("id")?;
        let id = ContactId::new(id).map_err(|e| StoreError::CorruptRecord(e.to_string()))?;

        Ok(Contact {
            id,
            name: row.try_get("name")?,
            phone_number: row.try_get("phonenum")?,
            email: row.try_get("email")?,
        })
    }

    fn map_write_error(err: sqlx::Error, name: &str) -> StoreError {
        match &err {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                StoreError::DuplicateName(name.to_string())
            }
            _ => StoreError::Unavailable(err),
        }
    }
}

#[async_trait]
impl ContactRepository for SqliteContactRepository {
    async fn list_all(&self) -> StoreResult<Vec<Contact>> {
        let rows = sqlx::query(&format!("{SELECT_COLUMNS} ORDER BY rowid"))
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(Self::row_to_contact).collect()
    }

    async fn find_by_name(&self, name: &str) -> StoreResult<Option<Contact>> {
        debug!("Looking up contact by name: {}", name);

        let row = sqlx::query(&format!("{SELECT_COLUMNS} WHERE name = ? LIMIT 1"))
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;

        row.map(Self::row_to_contact).transpose()
    }

    async fn insert(&self, fields: &ContactFields) -> StoreResult<Contact> {
        ensure_required(fields)?;

        let id = ContactId::generate();
        sqlx::query("INSERT INTO contacts (id, name, phonenum, email) VALUES (?, ?, ?, ?)")
            .bind(id.as_str())
            .bind(&fields.name)
            .bind(&fields.phone_number)
            .bind(&fields.email)
            .execute(&self.pool)
            .await
            .map_err(|e| Self::map_write_error(e, &fields.name))?;

        Ok(Contact::from_fields(id, fields.clone()))
    }

    async fn update_by_id(&self, id: &ContactId, fields: &ContactFields) -> StoreResult<()> {
        ensure_required(fields)?;

        let result =
            sqlx::query("UPDATE contacts SET name = ?, phonenum = ?, email = ? WHERE id = ?")
                .bind(&fields.name)
                .bind(&fields.phone_number)
                .bind(&fields.email)
                .bind(id.as_str())
                .execute(&self.pool)
                .await
                .map_err(|e| Self::map_write_error(e, &fields.name))?;

        if result.rows_affected() == 0 {
            debug!("Update matched no contact with id {}", id);
        }
        Ok(())
    }

    async fn delete_by_name(&self, name: &str) -> StoreResult<()> {
        let result = sqlx::query(
            "DELETE FROM contacts WHERE id IN (SELECT id FROM contacts WHERE name = ? LIMIT 1)",
        )
        .bind(name)
        .execute(&self.pool)
        .await?;

        debug!(
            "Deleted {} contact(s) named {}",
            result.rows_affected(),
            name
        );
        Ok(())
    }
}

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    Pool, Row, Sqlite,
};
use std::{
    fs,
    path::{Path, PathBuf},
    str::FromStr,
};
use tracing::{info, warn};

use shared::protocol::{StudentEnrollmentRecord, ENROLLMENT_SLOT_KEY};

/// Persistence seam used by the enrollment form and the dashboard.
///
/// There is exactly one slot. `save` overwrites it, `load` reports a missing
/// slot and an unreadable one the same way: `None`.
#[async_trait]
pub trait EnrollmentStore: Send + Sync {
    async fn save(&self, record: &StudentEnrollmentRecord) -> Result<()>;
    async fn load(&self) -> Result<Option<StudentEnrollmentRecord>>;
    async fn clear(&self) -> Result<bool>;
}

#[derive(Clone)]
pub struct Storage {
    pool: Pool<Sqlite>,
}

#[derive(Debug, Clone)]
pub struct StoredSlot {
    pub slot_key: String,
    pub payload: String,
    pub updated_at: DateTime<Utc>,
}

impl Storage {
    pub async fn new(database_url: &str) -> Result<Self> {
        ensure_sqlite_parent_dir_exists(database_url)?;

        let connect_options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        // Every connection to an in-memory database sees its own empty
        // database, so those pools are pinned to one long-lived connection.
        let pool_options = if is_memory_url(database_url) {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(5)
        };
        let pool = pool_options
            .connect_with(connect_options)
            .await
            .with_context(|| format!("failed to open enrollment database '{database_url}'"))?;
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .context("failed to apply enrollment storage migrations")?;
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    pub async fn health_check(&self) -> Result<()> {
        let _: i64 = sqlx::query_scalar("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .context("sqlite ping failed")?;
        Ok(())
    }

    pub async fn write_slot(&self, slot_key: &str, payload: &str) -> Result<()> {
        sqlx::query(
            "INSERT INTO enrollment_slots (slot_key, payload, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(slot_key) DO UPDATE SET
                payload = excluded.payload,
                updated_at = excluded.updated_at",
        )
        .bind(slot_key)
        .bind(payload)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .with_context(|| format!("failed to write slot '{slot_key}'"))?;
        Ok(())
    }

    pub async fn read_slot(&self, slot_key: &str) -> Result<Option<StoredSlot>> {
        let row = sqlx::query(
            "SELECT slot_key, payload, updated_at FROM enrollment_slots WHERE slot_key = ?1",
        )
        .bind(slot_key)
        .fetch_optional(&self.pool)
        .await
        .with_context(|| format!("failed to read slot '{slot_key}'"))?;

        row.map(|row| -> Result<StoredSlot> {
            Ok(StoredSlot {
                slot_key: row.try_get("slot_key")?,
                payload: row.try_get("payload")?,
                updated_at: row.try_get("updated_at")?,
            })
        })
        .transpose()
    }

    pub async fn delete_slot(&self, slot_key: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM enrollment_slots WHERE slot_key = ?1")
            .bind(slot_key)
            .execute(&self.pool)
            .await
            .with_context(|| format!("failed to delete slot '{slot_key}'"))?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl EnrollmentStore for Storage {
    async fn save(&self, record: &StudentEnrollmentRecord) -> Result<()> {
        let payload = record
            .to_json()
            .context("failed to serialize enrollment record")?;
        self.write_slot(ENROLLMENT_SLOT_KEY, &payload).await?;
        info!(
            student = %record.name,
            courses = record.courses.len(),
            "saved enrollment record"
        );
        Ok(())
    }

    async fn load(&self) -> Result<Option<StudentEnrollmentRecord>> {
        let Some(slot) = self.read_slot(ENROLLMENT_SLOT_KEY).await? else {
            return Ok(None);
        };

        match StudentEnrollmentRecord::from_json(&slot.payload) {
            Ok(record) => Ok(Some(record)),
            Err(err) => {
                warn!(
                    slot = ENROLLMENT_SLOT_KEY,
                    updated_at = %slot.updated_at,
                    "stored enrollment is unreadable, treating as absent: {err}"
                );
                Ok(None)
            }
        }
    }

    async fn clear(&self) -> Result<bool> {
        let removed = self.delete_slot(ENROLLMENT_SLOT_KEY).await?;
        if removed {
            info!("cleared enrollment record");
        }
        Ok(removed)
    }
}

/// True for urls that name an in-memory database, shared-cache ones included.
pub fn is_memory_url(database_url: &str) -> bool {
    database_url.starts_with("sqlite::memory:") || database_url.contains("mode=memory")
}

fn ensure_sqlite_parent_dir_exists(database_url: &str) -> Result<()> {
    let Some(path) = sqlite_path(database_url) else {
        return Ok(());
    };

    let Some(parent) = path.parent() else {
        return Ok(());
    };

    fs::create_dir_all(parent).with_context(|| {
        format!(
            "failed to create parent directory '{}' for database url '{database_url}'",
            parent.display()
        )
    })?;

    Ok(())
}

fn sqlite_path(database_url: &str) -> Option<PathBuf> {
    if is_memory_url(database_url) || !database_url.starts_with("sqlite:") {
        return None;
    }

    let path = database_url
        .trim_start_matches("sqlite://")
        .trim_start_matches("sqlite:")
        .split('?')
        .next()
        .unwrap_or_default();

    if path.is_empty() {
        return None;
    }

    Some(Path::new(path).to_path_buf())
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;

//! services/api/src/adapters/db.rs
//!
//! This module contains the database adapter, which is the concrete implementation
//! of the `DevotionalStore` and `UserStore` ports from the `core` crate. It handles
//! all interactions with the PostgreSQL database using `sqlx`.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use devotional_core::domain::{utc_midnight, Devotional, User, UserCredentials};
use devotional_core::ports::{
    DevotionalChanges, DevotionalStore, NewDevotional, NewUser, PortError, PortResult, UserStore,
};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// A database adapter that implements the `DevotionalStore` and `UserStore` ports.
#[derive(Clone)]
pub struct DbAdapter {
    pool: PgPool,
}

impl DbAdapter {
    /// Creates a new `DbAdapter`.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// A helper function to run database migrations at startup.
    pub async fn run_migrations(&self) -> Result<(), sqlx::Error> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }
}

//=========================================================================================
// "Impure" Database Record Structs
//=========================================================================================

#[derive(FromRow)]
struct DevotionalRecord {
    id: Uuid,
    user_id: Uuid,
    date: DateTime<Utc>,
    title: String,
    content: String,
    reference: String,
    user_notes: String,
    completed: bool,
}
impl DevotionalRecord {
    fn to_domain(self) -> Devotional {
        Devotional {
            id: self.id,
            user_id: self.user_id,
            date: self.date,
            title: self.title,
            content: self.content,
            reference: self.reference,
            user_notes: self.user_notes,
            completed: self.completed,
        }
    }
}

#[derive(FromRow)]
struct UserRecord {
    id: Uuid,
    name: String,
    email: String,
    password_hash: String,
}
impl UserRecord {
    fn to_domain(self) -> User {
        User {
            id: self.id,
            name: self.name,
            email: self.email,
        }
    }

    fn to_credentials(self) -> UserCredentials {
        UserCredentials {
            user_id: self.id,
            name: self.name,
            email: self.email,
            password_hash: self.password_hash,
        }
    }
}

//=========================================================================================
// `DevotionalStore` Trait Implementation
//=========================================================================================

#[async_trait]
impl DevotionalStore for DbAdapter {
    async fn list_for_user(&self, user_id: Uuid) -> PortResult<Vec<Devotional>> {
        let records = sqlx::query_as::<_, DevotionalRecord>(
            "SELECT id, user_id, date, title, content, reference, user_notes, completed \
             FROM devotionals WHERE user_id = $1 ORDER BY date DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| PortError::Unexpected(e.to_string()))?;

        Ok(records.into_iter().map(|r| r.to_domain()).collect())
    }

    async fn find_by_day(&self, user_id: Uuid, day: NaiveDate) -> PortResult<Option<Devotional>> {
        // Every write stores the day at UTC midnight, so equality on the
        // normalized instant is exact.
        let record = sqlx::query_as::<_, DevotionalRecord>(
            "SELECT id, user_id, date, title, content, reference, user_notes, completed \
             FROM devotionals WHERE user_id = $1 AND date = $2",
        )
        .bind(user_id)
        .bind(utc_midnight(day))
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| PortError::Unexpected(e.to_string()))?;

        Ok(record.map(|r| r.to_domain()))
    }

    async fn create(&self, new: NewDevotional) -> PortResult<Devotional> {
        // Insert-if-absent, then read back whichever row owns the day. The
        // unique (user_id, date) index makes the race harmless: concurrent
        // creates for the same day all resolve to the one surviving row.
        sqlx::query(
            "INSERT INTO devotionals (id, user_id, date, title, content, reference, user_notes, completed) \
             VALUES ($1, $2, $3, $4, $5, $6, '', FALSE) \
             ON CONFLICT (user_id, date) DO NOTHING",
        )
        .bind(Uuid::new_v4())
        .bind(new.user_id)
        .bind(utc_midnight(new.day))
        .bind(&new.title)
        .bind(&new.content)
        .bind(&new.reference)
        .execute(&self.pool)
        .await
        .map_err(|e| PortError::Unexpected(e.to_string()))?;

        let record = sqlx::query_as::<_, DevotionalRecord>(
            "SELECT id, user_id, date, title, content, reference, user_notes, completed \
             FROM devotionals WHERE user_id = $1 AND date = $2",
        )
        .bind(new.user_id)
        .bind(utc_midnight(new.day))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => {
                PortError::NotFound(format!("Devotional for {} not found", new.day))
            }
            _ => PortError::Unexpected(e.to_string()),
        })?;

        Ok(record.to_domain())
    }

    async fn update_by_id(
        &self,
        id: Uuid,
        user_id: Uuid,
        changes: DevotionalChanges,
    ) -> PortResult<Devotional> {
        // COALESCE keeps a column's stored value when its bind is NULL,
        // which is exactly the merge contract of `DevotionalChanges`.
        let record = sqlx::query_as::<_, DevotionalRecord>(
            "UPDATE devotionals SET \
                title = COALESCE($3, title), \
                content = COALESCE($4, content), \
                reference = COALESCE($5, reference), \
                completed = COALESCE($6, completed), \
                user_notes = COALESCE($7, user_notes), \
                updated_at = NOW() \
             WHERE id = $1 AND user_id = $2 \
             RETURNING id, user_id, date, title, content, reference, user_notes, completed",
        )
        .bind(id)
        .bind(user_id)
        .bind(changes.title)
        .bind(changes.content)
        .bind(changes.reference)
        .bind(changes.completed)
        .bind(changes.user_notes)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => PortError::NotFound(format!("Devotional {} not found", id)),
            _ => PortError::Unexpected(e.to_string()),
        })?;

        Ok(record.to_domain())
    }

    async fn delete_by_id(&self, id: Uuid, user_id: Uuid) -> PortResult<()> {
        let result = sqlx::query("DELETE FROM devotionals WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| PortError::Unexpected(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(PortError::NotFound(format!("Devotional {} not found", id)));
        }
        Ok(())
    }

    async fn list_all(&self) -> PortResult<Vec<Devotional>> {
        let records = sqlx::query_as::<_, DevotionalRecord>(
            "SELECT id, user_id, date, title, content, reference, user_notes, completed \
             FROM devotionals",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| PortError::Unexpected(e.to_string()))?;

        Ok(records.into_iter().map(|r| r.to_domain()).collect())
    }
}

//=========================================================================================
// `UserStore` Trait Implementation
//=========================================================================================

#[async_trait]
impl UserStore for DbAdapter {
    async fn find_by_email(&self, email: &str) -> PortResult<Option<UserCredentials>> {
        let record = sqlx::query_as::<_, UserRecord>(
            "SELECT id, name, email, password_hash FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| PortError::Unexpected(e.to_string()))?;

        Ok(record.map(|r| r.to_credentials()))
    }

    async fn find_by_id(&self, user_id: Uuid) -> PortResult<User> {
        let record = sqlx::query_as::<_, UserRecord>(
            "SELECT id, name, email, password_hash FROM users WHERE id = $1",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => PortError::NotFound(format!("User {} not found", user_id)),
            _ => PortError::Unexpected(e.to_string()),
        })?;

        Ok(record.to_domain())
    }

    async fn create(&self, new: NewUser) -> PortResult<User> {
        let record = sqlx::query_as::<_, UserRecord>(
            "INSERT INTO users (id, name, email, password_hash) VALUES ($1, $2, $3, $4) \
             RETURNING id, name, email, password_hash",
        )
        .bind(Uuid::new_v4())
        .bind(&new.name)
        .bind(&new.email)
        .bind(&new.password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db)
                if matches!(db.kind(), sqlx::error::ErrorKind::UniqueViolation) =>
            {
                PortError::Conflict("User already exists".to_string())
            }
            _ => PortError::Unexpected(e.to_string()),
        })?;

        Ok(record.to_domain())
    }

    async fn list_all(&self) -> PortResult<Vec<User>> {
        let records = sqlx::query_as::<_, UserRecord>(
            "SELECT id, name, email, password_hash FROM users ORDER BY created_at ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| PortError::Unexpected(e.to_string()))?;

        Ok(records.into_iter().map(|r| r.to_domain()).collect())
    }
}

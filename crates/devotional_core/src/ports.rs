//! crates/devotional_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the application's core logic.
//! These traits form the boundary of the hexagonal architecture, allowing the core
//! to be independent of specific external implementations like databases or APIs.

use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::domain::{Devotional, Passage, User, UserCredentials};

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
/// This abstracts away the specific errors from external services (e.g., database, network).
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Upstream service error: {0}")]
    Upstream(String),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Insert and Update Payloads
//=========================================================================================

/// Payload for creating a devotional. The port speaks in calendar days so
/// that the stored instant is normalized to UTC midnight in exactly one
/// place, the adapter. New records always start with empty notes and
/// `completed = false`.
#[derive(Debug, Clone)]
pub struct NewDevotional {
    pub user_id: Uuid,
    pub day: NaiveDate,
    pub title: String,
    pub content: String,
    pub reference: String,
}

/// A partial update. `None` fields keep their stored values.
#[derive(Debug, Clone, Default)]
pub struct DevotionalChanges {
    pub title: Option<String>,
    pub content: Option<String>,
    pub reference: Option<String>,
    pub completed: Option<bool>,
    pub user_notes: Option<String>,
}

/// Payload for registering a user. The password arrives already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

#[async_trait]
pub trait DevotionalStore: Send + Sync {
    /// All devotionals belonging to one user, newest day first.
    async fn list_for_user(&self, user_id: Uuid) -> PortResult<Vec<Devotional>>;

    /// The user's devotional for one UTC calendar day, if it exists.
    async fn find_by_day(&self, user_id: Uuid, day: NaiveDate) -> PortResult<Option<Devotional>>;

    /// Creates a devotional. At most one record may exist per (user, day);
    /// a create for an already-populated day resolves to the existing record
    /// rather than failing or duplicating.
    async fn create(&self, new: NewDevotional) -> PortResult<Devotional>;

    /// Partial update scoped to the owning user. An unknown id and a foreign
    /// id are both `NotFound` - indistinguishable to the caller.
    async fn update_by_id(
        &self,
        id: Uuid,
        user_id: Uuid,
        changes: DevotionalChanges,
    ) -> PortResult<Devotional>;

    /// Delete scoped to the owning user, with the same `NotFound` contract
    /// as [`update_by_id`](DevotionalStore::update_by_id).
    async fn delete_by_id(&self, id: Uuid, user_id: Uuid) -> PortResult<()>;

    /// Every devotional of every user. Leaderboard input.
    async fn list_all(&self) -> PortResult<Vec<Devotional>>;
}

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Credentials for a login attempt. Absence is an expected outcome here,
    /// not an error, so callers can fail without leaking which check failed.
    async fn find_by_email(&self, email: &str) -> PortResult<Option<UserCredentials>>;

    async fn find_by_id(&self, user_id: Uuid) -> PortResult<User>;

    /// Registers a new user. A duplicate email is a `Conflict`.
    async fn create(&self, new: NewUser) -> PortResult<User>;

    /// Every registered user, in registration order. Leaderboard input.
    async fn list_all(&self) -> PortResult<Vec<User>>;
}

#[async_trait]
pub trait ScriptureService: Send + Sync {
    /// Resolves a free-form reference string to passage text.
    async fn fetch_passage(&self, reference: &str) -> PortResult<Passage>;
}

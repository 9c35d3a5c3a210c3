//! services/api/src/web/leaderboard.rs
//!
//! Ranks every registered user by current devotional streak.

use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

use devotional_core::streak::{rank_users, LeaderboardEntry};

use crate::error::ApiError;
use crate::web::state::AppState;

#[derive(Serialize, ToSchema)]
pub struct LeaderboardEntryResponse {
    pub user_id: Uuid,
    pub name: String,
    pub streak: u32,
}

impl From<LeaderboardEntry> for LeaderboardEntryResponse {
    fn from(entry: LeaderboardEntry) -> Self {
        Self {
            user_id: entry.user_id,
            name: entry.name,
            streak: entry.streak,
        }
    }
}

/// GET /api/leaderboard - Users ranked by current streak, highest first
///
/// Both lookups have to succeed; a partial leaderboard is never rendered.
#[utoipa::path(
    get,
    path = "/api/leaderboard",
    responses(
        (status = 200, description = "All users ranked by streak", body = [LeaderboardEntryResponse]),
        (status = 401, description = "Missing or invalid token"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn leaderboard_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<LeaderboardEntryResponse>>, ApiError> {
    let users = state.users.list_all().await?;
    let devotionals = state.devotionals.list_all().await?;

    let entries = rank_users(&users, &devotionals);
    Ok(Json(entries.into_iter().map(Into::into).collect()))
}

//! services/api/src/web/devotionals.rs
//!
//! CRUD endpoints for devotional records. Every operation is scoped to the
//! authenticated user; a record id belonging to someone else behaves exactly
//! like an id that never existed.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

use devotional_core::domain::{generated_reference, Devotional};
use devotional_core::ports::{DevotionalChanges, NewDevotional};

use crate::error::{ApiError, ApiJson};
use crate::web::state::AppState;

/// Placeholder content for a record created on first view of an empty date.
const DEFAULT_CONTENT: &str = "Read today's passage and note what stood out to you.";

fn default_title(day: NaiveDate) -> String {
    format!("Devotional for {}", day)
}

//=========================================================================================
// Request/Response Types
//=========================================================================================

#[derive(Serialize, ToSchema)]
pub struct DevotionalResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub date: DateTime<Utc>,
    pub title: String,
    pub content: String,
    pub reference: String,
    pub user_notes: String,
    pub completed: bool,
}

impl From<Devotional> for DevotionalResponse {
    fn from(d: Devotional) -> Self {
        Self {
            id: d.id,
            user_id: d.user_id,
            date: d.date,
            title: d.title,
            content: d.content,
            reference: d.reference,
            user_notes: d.user_notes,
            completed: d.completed,
        }
    }
}

#[derive(Deserialize, ToSchema)]
pub struct CreateDevotionalRequest {
    /// Calendar day in YYYY-MM-DD form.
    pub date: Option<NaiveDate>,
    pub title: Option<String>,
    pub content: Option<String>,
    pub reference: Option<String>,
}

#[derive(Deserialize, ToSchema)]
pub struct UpdateDevotionalRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub reference: Option<String>,
    pub completed: Option<bool>,
    pub user_notes: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

fn parse_day(raw: &str) -> Result<NaiveDate, ApiError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
        ApiError::Validation(format!("Invalid date '{}', expected YYYY-MM-DD", raw))
    })
}

fn parse_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw)
        .map_err(|_| ApiError::Validation(format!("Invalid devotional id '{}'", raw)))
}

//=========================================================================================
// Handlers
//=========================================================================================

/// GET /api/devotionals - All of the caller's devotionals, newest first
#[utoipa::path(
    get,
    path = "/api/devotionals",
    responses(
        (status = 200, description = "The caller's devotionals, newest first", body = [DevotionalResponse]),
        (status = 401, description = "Missing or invalid token")
    )
)]
pub async fn list_devotionals_handler(
    State(state): State<Arc<AppState>>,
    Extension(user_id): Extension<Uuid>,
) -> Result<Json<Vec<DevotionalResponse>>, ApiError> {
    let devotionals = state.devotionals.list_for_user(user_id).await?;
    Ok(Json(devotionals.into_iter().map(Into::into).collect()))
}

/// GET /api/devotionals/{date} - The devotional for one day, created on demand
///
/// Viewing a date that has no record yet seeds it with a placeholder title,
/// placeholder content and a generated reference, so the caller always gets
/// a record back.
#[utoipa::path(
    get,
    path = "/api/devotionals/{date}",
    params(
        ("date" = String, Path, description = "Calendar day in YYYY-MM-DD form")
    ),
    responses(
        (status = 200, description = "The day's devotional, created if absent", body = DevotionalResponse),
        (status = 400, description = "Malformed date"),
        (status = 401, description = "Missing or invalid token")
    )
)]
pub async fn get_devotional_by_date_handler(
    State(state): State<Arc<AppState>>,
    Extension(user_id): Extension<Uuid>,
    Path(date): Path<String>,
) -> Result<Json<DevotionalResponse>, ApiError> {
    let day = parse_day(&date)?;

    if let Some(existing) = state.devotionals.find_by_day(user_id, day).await? {
        return Ok(Json(existing.into()));
    }

    let created = state
        .devotionals
        .create(NewDevotional {
            user_id,
            day,
            title: default_title(day),
            content: DEFAULT_CONTENT.to_string(),
            reference: generated_reference(day),
        })
        .await?;
    Ok(Json(created.into()))
}

/// POST /api/devotionals - Create the devotional for a day
///
/// At most one record exists per day. Creating for an already-populated day
/// returns the existing record untouched.
#[utoipa::path(
    post,
    path = "/api/devotionals",
    request_body = CreateDevotionalRequest,
    responses(
        (status = 201, description = "The day's devotional", body = DevotionalResponse),
        (status = 400, description = "Missing or malformed date"),
        (status = 401, description = "Missing or invalid token")
    )
)]
pub async fn create_devotional_handler(
    State(state): State<Arc<AppState>>,
    Extension(user_id): Extension<Uuid>,
    ApiJson(req): ApiJson<CreateDevotionalRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let day = req
        .date
        .ok_or_else(|| ApiError::Validation("date is required".to_string()))?;

    let non_blank = |value: Option<String>| value.filter(|v| !v.trim().is_empty());

    let devotional = state
        .devotionals
        .create(NewDevotional {
            user_id,
            day,
            title: non_blank(req.title).unwrap_or_else(|| default_title(day)),
            content: non_blank(req.content).unwrap_or_else(|| DEFAULT_CONTENT.to_string()),
            reference: non_blank(req.reference).unwrap_or_else(|| generated_reference(day)),
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(DevotionalResponse::from(devotional)),
    ))
}

/// PUT /api/devotionals/{id} - Partially update a devotional
///
/// Omitted fields keep their stored values; only the fields present in the
/// body change.
#[utoipa::path(
    put,
    path = "/api/devotionals/{id}",
    params(
        ("id" = Uuid, Path, description = "Devotional id")
    ),
    request_body = UpdateDevotionalRequest,
    responses(
        (status = 200, description = "The updated devotional", body = DevotionalResponse),
        (status = 400, description = "Malformed id"),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "No such devotional for this user")
    )
)]
pub async fn update_devotional_handler(
    State(state): State<Arc<AppState>>,
    Extension(user_id): Extension<Uuid>,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<UpdateDevotionalRequest>,
) -> Result<Json<DevotionalResponse>, ApiError> {
    let id = parse_id(&id)?;

    let updated = state
        .devotionals
        .update_by_id(
            id,
            user_id,
            DevotionalChanges {
                title: req.title,
                content: req.content,
                reference: req.reference,
                completed: req.completed,
                user_notes: req.user_notes,
            },
        )
        .await?;

    Ok(Json(updated.into()))
}

/// DELETE /api/devotionals/{id} - Delete a devotional
#[utoipa::path(
    delete,
    path = "/api/devotionals/{id}",
    params(
        ("id" = Uuid, Path, description = "Devotional id")
    ),
    responses(
        (status = 200, description = "Deleted", body = MessageResponse),
        (status = 400, description = "Malformed id"),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "No such devotional for this user")
    )
)]
pub async fn delete_devotional_handler(
    State(state): State<Arc<AppState>>,
    Extension(user_id): Extension<Uuid>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = parse_id(&id)?;
    state.devotionals.delete_by_id(id, user_id).await?;
    Ok(Json(MessageResponse {
        message: "Devotional deleted".to_string(),
    }))
}

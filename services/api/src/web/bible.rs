//! services/api/src/web/bible.rs
//!
//! Server-side scripture lookup. Proxying keeps the Bible API key on the
//! server; clients only ever see passage text.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::web::state::AppState;

#[derive(Serialize, ToSchema)]
pub struct PassageResponse {
    pub reference: String,
    pub content: String,
}

/// GET /api/bible/passage/{reference} - Passage text for a reference
#[utoipa::path(
    get,
    path = "/api/bible/passage/{reference}",
    params(
        ("reference" = String, Path, description = "Scripture reference, e.g. 'John 3:16'")
    ),
    responses(
        (status = 200, description = "The resolved passage", body = PassageResponse),
        (status = 401, description = "Missing or invalid token"),
        (status = 502, description = "The scripture API failed or the reference could not be resolved")
    )
)]
pub async fn bible_passage_handler(
    State(state): State<Arc<AppState>>,
    Path(reference): Path<String>,
) -> Result<Json<PassageResponse>, ApiError> {
    let passage = state.scripture.fetch_passage(&reference).await?;
    Ok(Json(PassageResponse {
        reference: passage.reference,
        content: passage.content,
    }))
}

//! services/api/src/web/rest.rs
//!
//! Assembles the API router and contains the master definition for the
//! OpenAPI specification, plus the unauthenticated health probe.

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use utoipa::{OpenApi, ToSchema};

use crate::web::auth::{current_user_handler, login_handler, register_handler};
use crate::web::bible::bible_passage_handler;
use crate::web::devotionals::{
    create_devotional_handler, delete_devotional_handler, get_devotional_by_date_handler,
    list_devotionals_handler, update_devotional_handler,
};
use crate::web::leaderboard::leaderboard_handler;
use crate::web::middleware::require_auth;
use crate::web::state::AppState;

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        health_handler,
        crate::web::auth::register_handler,
        crate::web::auth::login_handler,
        crate::web::auth::current_user_handler,
        crate::web::devotionals::list_devotionals_handler,
        crate::web::devotionals::get_devotional_by_date_handler,
        crate::web::devotionals::create_devotional_handler,
        crate::web::devotionals::update_devotional_handler,
        crate::web::devotionals::delete_devotional_handler,
        crate::web::leaderboard::leaderboard_handler,
        crate::web::bible::bible_passage_handler,
    ),
    components(
        schemas(
            HealthResponse,
            crate::web::auth::RegisterRequest,
            crate::web::auth::LoginRequest,
            crate::web::auth::AuthResponse,
            crate::web::auth::UserProfile,
            crate::web::devotionals::DevotionalResponse,
            crate::web::devotionals::CreateDevotionalRequest,
            crate::web::devotionals::UpdateDevotionalRequest,
            crate::web::devotionals::MessageResponse,
            crate::web::leaderboard::LeaderboardEntryResponse,
            crate::web::bible::PassageResponse,
        )
    ),
    tags(
        (name = "Devotional Tracker API", description = "API endpoints for tracking daily devotionals and streaks.")
    )
)]
pub struct ApiDoc;

//=========================================================================================
// Health Probe
//=========================================================================================

#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

/// GET /health - Liveness probe
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is up", body = HealthResponse)
    )
)]
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        timestamp: Utc::now(),
    })
}

//=========================================================================================
// Router Assembly
//=========================================================================================

/// Builds the full API router. The server binary and the integration tests
/// both call this, so they exercise identical routing and middleware.
pub fn api_router(state: Arc<AppState>) -> Router {
    // Public routes (no auth required)
    let public_routes = Router::new()
        .route("/health", get(health_handler))
        .route("/api/users/register", post(register_handler))
        .route("/api/auth/login", post(login_handler));

    // Protected routes (auth required)
    let protected_routes = Router::new()
        .route("/api/auth/user", get(current_user_handler))
        .route(
            "/api/devotionals",
            get(list_devotionals_handler).post(create_devotional_handler),
        )
        // One template serves all three verbs: GET selects by calendar day,
        // PUT and DELETE select by record id. Each handler parses its own
        // path parameter.
        .route(
            "/api/devotionals/{key}",
            get(get_devotional_by_date_handler)
                .put(update_devotional_handler)
                .delete(delete_devotional_handler),
        )
        .route("/api/leaderboard", get(leaderboard_handler))
        .route("/api/bible/passage/{reference}", get(bible_passage_handler))
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            require_auth,
        ));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .with_state(state)
}

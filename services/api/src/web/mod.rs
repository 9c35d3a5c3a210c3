//! services/api/src/web/mod.rs

pub mod auth;
pub mod bible;
pub mod devotionals;
pub mod leaderboard;
pub mod middleware;
pub mod rest;
pub mod state;

pub use middleware::require_auth;
pub use rest::{api_router, ApiDoc};
pub use state::AppState;

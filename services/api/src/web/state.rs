//! services/api/src/web/state.rs
//!
//! Defines the application's shared state.

use crate::auth::TokenIssuer;
use crate::config::Config;
use devotional_core::ports::{DevotionalStore, ScriptureService, UserStore};
use std::sync::Arc;

//=========================================================================================
// AppState (Shared Across All Requests)
//=========================================================================================

/// The shared application state, created once at startup and passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub devotionals: Arc<dyn DevotionalStore>,
    pub users: Arc<dyn UserStore>,
    pub scripture: Arc<dyn ScriptureService>,
    pub tokens: Arc<TokenIssuer>,
    pub config: Arc<Config>,
}

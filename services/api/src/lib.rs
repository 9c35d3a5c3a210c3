//! services/api/src/lib.rs
//!
//! Library crate for the API server. The `api` and `openapi` binaries and
//! the integration tests all build on top of these modules.

pub mod adapters;
pub mod auth;
pub mod config;
pub mod error;
pub mod web;

//! # Inkpost Infrastructure
//!
//! Concrete implementations of the ports defined in `inkpost-core`:
//! the Postgres-backed Query Layer and the identity-provider session client.

pub mod auth;
pub mod database;

pub use auth::JwtSessionValidator;
pub use database::{PostgresBlogRepository, PostgresDashboardRepository};

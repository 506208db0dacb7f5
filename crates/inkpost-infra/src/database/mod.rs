//! Postgres-backed Query Layer.

mod connections;
pub mod entity;
mod postgres_blog;
mod postgres_dashboard;

pub use connections::{DatabaseConfig, connect};
pub use postgres_blog::PostgresBlogRepository;
pub use postgres_dashboard::PostgresDashboardRepository;

// Re-exported so the server does not need its own sea-orm dependency.
pub use sea_orm::DbErr;

#[cfg(test)]
mod tests;

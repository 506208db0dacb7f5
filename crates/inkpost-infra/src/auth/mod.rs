//! Authentication adapters.

pub mod jwt;

pub use jwt::{JwtConfig, JwtSessionValidator};

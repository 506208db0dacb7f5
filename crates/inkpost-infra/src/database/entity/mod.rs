//! SeaORM entities mirroring the persisted schema.

pub mod category;
pub mod post;
pub mod post_category;
pub mod post_tag;
pub mod profile;
pub mod tag;

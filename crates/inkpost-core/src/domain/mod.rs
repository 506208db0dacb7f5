//! Domain entities - the core business objects.

mod analytics;
mod post;
mod profile;
mod taxonomy;

pub use analytics::DashboardAnalytics;
pub use post::{NewPost, Post, PostPatch, PostStatus, PostWithAuthor, PostWithDetails};
pub use profile::{Profile, ProfilePatch};
pub use taxonomy::{Category, Tag};
